// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation requests consumed by the scheduler.
//!
//! A request is built once per animation invocation and discarded after the
//! scheduler runs it. Requests are immutable once built; the scheduler hands
//! a deferred request back to itself unchanged.

use crate::animator::Animator;
use crate::options::{AnimationOptions, KeyframeAnimationOptions};
use futures::future::BoxFuture;
use std::fmt;
use std::time::Duration;

/// The mutation being animated
pub type Effect = Box<dyn FnOnce() + Send + 'static>;

/// Called once with the animation subsystem's `finished` flag
pub type Completion = Box<dyn FnOnce(bool) + Send + 'static>;

/// Duration and start delay of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timing {
    /// Length of the animation
    pub duration: Duration,
    /// Wait before the animation starts
    pub delay: Duration,
}

impl Timing {
    /// Timing with no delay
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
        }
    }

    /// Set the start delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A single eased transition addressed at one key
pub struct AnimationRequest {
    key: String,
    timing: Timing,
    options: AnimationOptions,
    effect: Effect,
    completion: Option<Completion>,
}

impl AnimationRequest {
    /// Create a request animating `effect` over `duration`.
    ///
    /// An empty key is a programmer error.
    pub fn new(
        key: impl Into<String>,
        duration: Duration,
        effect: impl FnOnce() + Send + 'static,
    ) -> Self {
        let key = key.into();
        debug_assert!(!key.is_empty(), "animation key must not be empty");
        Self {
            key,
            timing: Timing::new(duration),
            options: AnimationOptions::default(),
            effect: Box::new(effect),
            completion: None,
        }
    }

    /// Set the start delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.timing.delay = delay;
        self
    }

    /// Set the animation options
    pub fn with_options(mut self, options: AnimationOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the completion handler
    pub fn on_completion(mut self, completion: impl FnOnce(bool) + Send + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    /// Key identifying the animated slot
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Duration and delay
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Options passed to the animation subsystem
    pub fn options(&self) -> AnimationOptions {
        self.options
    }
}

impl fmt::Debug for AnimationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRequest")
            .field("key", &self.key)
            .field("timing", &self.timing)
            .field("options", &self.options)
            .field("has_completion", &self.completion.is_some())
            .finish_non_exhaustive()
    }
}

/// One weighted phase of a keyframe animation
pub struct KeyframePhase {
    /// Start of the phase as a fraction of the animation duration
    pub relative_start: f64,
    /// Length of the phase as a fraction of the animation duration
    pub relative_duration: f64,
    /// Mutation applied when the phase begins
    pub effect: Effect,
}

impl KeyframePhase {
    /// Create a phase; times are clamped into `[0, 1]` and non-finite times
    /// become zero
    pub fn new(
        relative_start: f64,
        relative_duration: f64,
        effect: impl FnOnce() + Send + 'static,
    ) -> Self {
        let finite_or_zero = |value: f64| if value.is_finite() { value } else { 0.0 };
        let relative_start = finite_or_zero(relative_start).clamp(0.0, 1.0);
        Self {
            relative_start,
            relative_duration: finite_or_zero(relative_duration).clamp(0.0, 1.0 - relative_start),
            effect: Box::new(effect),
        }
    }

    /// Offset of this phase from the start of the animation
    pub fn start_offset(&self, duration: Duration) -> Duration {
        duration.mul_f64(self.relative_start)
    }
}

impl fmt::Debug for KeyframePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframePhase")
            .field("relative_start", &self.relative_start)
            .field("relative_duration", &self.relative_duration)
            .finish_non_exhaustive()
    }
}

/// A multi-phase animation sharing one duration, addressed at one key
pub struct KeyframeAnimationRequest {
    key: String,
    timing: Timing,
    options: KeyframeAnimationOptions,
    effect: Effect,
    phases: Vec<KeyframePhase>,
    completion: Option<Completion>,
}

impl KeyframeAnimationRequest {
    /// Create a keyframe request whose `effect` runs when the animation starts.
    ///
    /// An empty key is a programmer error.
    pub fn new(
        key: impl Into<String>,
        duration: Duration,
        effect: impl FnOnce() + Send + 'static,
    ) -> Self {
        let key = key.into();
        debug_assert!(!key.is_empty(), "animation key must not be empty");
        Self {
            key,
            timing: Timing::new(duration),
            options: KeyframeAnimationOptions::default(),
            effect: Box::new(effect),
            phases: Vec::new(),
            completion: None,
        }
    }

    /// Set the start delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.timing.delay = delay;
        self
    }

    /// Set the keyframe options
    pub fn with_options(mut self, options: KeyframeAnimationOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a weighted phase
    pub fn with_keyframe(
        mut self,
        relative_start: f64,
        relative_duration: f64,
        effect: impl FnOnce() + Send + 'static,
    ) -> Self {
        self.phases
            .push(KeyframePhase::new(relative_start, relative_duration, effect));
        self
    }

    /// Set the completion handler
    pub fn on_completion(mut self, completion: impl FnOnce(bool) + Send + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    /// Key identifying the animated slot
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Duration and delay
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Options passed to the animation subsystem
    pub fn options(&self) -> KeyframeAnimationOptions {
        self.options
    }

    /// Number of registered phases
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }
}

impl fmt::Debug for KeyframeAnimationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeAnimationRequest")
            .field("key", &self.key)
            .field("timing", &self.timing)
            .field("options", &self.options)
            .field("phases", &self.phases)
            .field("has_completion", &self.completion.is_some())
            .finish_non_exhaustive()
    }
}

/// Any request the scheduler can run
#[derive(Debug)]
pub enum ScheduledAnimation {
    /// Single eased transition
    Simple(AnimationRequest),
    /// Multi-phase keyframe animation
    Keyframe(KeyframeAnimationRequest),
}

impl ScheduledAnimation {
    /// Key identifying the animated slot
    pub fn key(&self) -> &str {
        match self {
            ScheduledAnimation::Simple(request) => request.key(),
            ScheduledAnimation::Keyframe(request) => request.key(),
        }
    }

    /// Hand the request to the animation subsystem.
    ///
    /// Returns the running animation and the caller's completion handler.
    pub(crate) fn start(
        self,
        animator: &dyn Animator,
    ) -> (BoxFuture<'static, bool>, Option<Completion>) {
        match self {
            ScheduledAnimation::Simple(request) => (
                animator.animate(request.timing, request.options, request.effect),
                request.completion,
            ),
            ScheduledAnimation::Keyframe(request) => (
                animator.animate_keyframes(
                    request.timing,
                    request.options,
                    request.effect,
                    request.phases,
                ),
                request.completion,
            ),
        }
    }

    /// Drop the request without running it, reporting `finished = false`
    pub(crate) fn abandon(self) {
        let completion = match self {
            ScheduledAnimation::Simple(request) => request.completion,
            ScheduledAnimation::Keyframe(request) => request.completion,
        };
        if let Some(completion) = completion {
            completion(false);
        }
    }
}

impl From<AnimationRequest> for ScheduledAnimation {
    fn from(request: AnimationRequest) -> Self {
        ScheduledAnimation::Simple(request)
    }
}

impl From<KeyframeAnimationRequest> for ScheduledAnimation {
    fn from(request: KeyframeAnimationRequest) -> Self {
        ScheduledAnimation::Keyframe(request)
    }
}
