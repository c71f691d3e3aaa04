// SPDX-License-Identifier: MIT OR Apache-2.0
//! Option bags handed through to the animation subsystem.
//!
//! Simple and keyframe animations use independent option channels; a keyframe
//! request never carries simple-animation options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn running_time(duration: Duration, autoreverse: bool, repeat: bool) -> Option<Duration> {
    match (repeat, autoreverse) {
        (true, _) => None,
        (false, true) => Some(duration * 2),
        (false, false) => Some(duration),
    }
}

/// Timing curve for a simple animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationCurve {
    /// Slow start and end
    #[default]
    EaseInOut,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Constant speed
    Linear,
}

/// Options for a simple (single transition) animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnimationOptions {
    /// Timing curve
    pub curve: AnimationCurve,
    /// Keep the target interactive while animating
    pub allow_user_interaction: bool,
    /// Start from the currently presented state rather than the model state
    pub begin_from_current_state: bool,
    /// Play forward then backward
    pub autoreverse: bool,
    /// Repeat indefinitely
    pub repeat: bool,
}

impl AnimationOptions {
    /// Set the timing curve
    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Allow user interaction during the animation
    pub fn allowing_user_interaction(mut self) -> Self {
        self.allow_user_interaction = true;
        self
    }

    /// Begin from the presented state
    pub fn beginning_from_current_state(mut self) -> Self {
        self.begin_from_current_state = true;
        self
    }

    /// Play forward then backward
    pub fn autoreversing(mut self) -> Self {
        self.autoreverse = true;
        self
    }

    /// Repeat indefinitely
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Wall time the animation occupies for a given duration.
    ///
    /// `None` for a repeating animation, which never ends on its own.
    pub fn running_time(&self, duration: Duration) -> Option<Duration> {
        running_time(duration, self.autoreverse, self.repeat)
    }
}

/// How intermediate values between keyframes are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KeyframeCalculationMode {
    /// Linear between keyframes
    #[default]
    Linear,
    /// Jump between keyframe values
    Discrete,
    /// Evenly paced, ignoring keyframe timing
    Paced,
    /// Smooth spline through keyframes
    Cubic,
    /// Evenly paced spline
    CubicPaced,
}

/// Options for a keyframe animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyframeAnimationOptions {
    /// Interpolation between phases
    pub calculation_mode: KeyframeCalculationMode,
    /// Keep the target interactive while animating
    pub allow_user_interaction: bool,
    /// Start from the currently presented state rather than the model state
    pub begin_from_current_state: bool,
    /// Play forward then backward
    pub autoreverse: bool,
    /// Repeat indefinitely
    pub repeat: bool,
}

impl KeyframeAnimationOptions {
    /// Set the calculation mode
    pub fn with_calculation_mode(mut self, mode: KeyframeCalculationMode) -> Self {
        self.calculation_mode = mode;
        self
    }

    /// Play forward then backward
    pub fn autoreversing(mut self) -> Self {
        self.autoreverse = true;
        self
    }

    /// Repeat indefinitely
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Wall time the animation occupies for a given duration.
    ///
    /// `None` for a repeating animation, which never ends on its own.
    pub fn running_time(&self, duration: Duration) -> Option<Duration> {
        running_time(duration, self.autoreverse, self.repeat)
    }
}
