// SPDX-License-Identifier: MIT OR Apache-2.0
//! Form row animating its validation error label.
//!
//! The error label is one visual owner. Revealing, hiding and shaking it all
//! address the same key, so a rapid burst of validation results plays back
//! one animation at a time instead of fighting over the label's state.

use checkout_choreo_animation::{
    AnimationCurve, AnimationOptions, AnimationRequest, AnimationScheduler,
    KeyframeAnimationOptions, KeyframeAnimationRequest, KeyframeCalculationMode, OwnerId,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Key shared by every animation of the error label
pub const ERROR_LABEL_KEY: &str = "validation-error";

/// Reveal/hide duration
const REVEAL_DURATION: Duration = Duration::from_millis(250);

/// Shake duration
const SHAKE_DURATION: Duration = Duration::from_millis(300);

/// Horizontal shake amplitude in points
const SHAKE_OFFSET: f64 = 8.0;

/// Presented state of the error label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorLabel {
    /// Whether the label is shown
    pub visible: bool,
    /// Message currently displayed
    pub message: Option<String>,
    /// Horizontal offset from the resting position
    pub offset_x: f64,
}

/// Drives the error label of one form row
pub struct FormController {
    scheduler: AnimationScheduler,
    owner: OwnerId,
    label: Arc<Mutex<ErrorLabel>>,
}

impl FormController {
    /// Create a controller registering its label with the scheduler
    pub fn new(scheduler: AnimationScheduler) -> Self {
        let owner = scheduler.register_owner();
        Self {
            scheduler,
            owner,
            label: Arc::new(Mutex::new(ErrorLabel::default())),
        }
    }

    /// Current label state
    pub fn label(&self) -> ErrorLabel {
        self.label.lock().clone()
    }

    /// Whether an error label animation is in flight
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_animating(self.owner, ERROR_LABEL_KEY)
    }

    /// Reveal the error label with `message`
    pub fn show_validation_error(&self, message: impl Into<String>) -> oneshot::Receiver<bool> {
        let label = Arc::clone(&self.label);
        let message = message.into();
        tracing::info!("Revealing validation error: {}", message);
        self.animate_label(move || {
            let mut label = label.lock();
            label.visible = true;
            label.message = Some(message);
        })
    }

    /// Hide the error label
    pub fn hide_validation_error(&self) -> oneshot::Receiver<bool> {
        let label = Arc::clone(&self.label);
        self.animate_label(move || {
            let mut label = label.lock();
            label.visible = false;
            label.message = None;
        })
    }

    /// Shake the label left and right, ending at rest
    pub fn shake(&self) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        let offset = |label: &Arc<Mutex<ErrorLabel>>, x: f64| {
            let label = Arc::clone(label);
            move || label.lock().offset_x = x
        };

        let request = KeyframeAnimationRequest::new(
            ERROR_LABEL_KEY,
            SHAKE_DURATION,
            offset(&self.label, -SHAKE_OFFSET),
        )
        .with_options(
            KeyframeAnimationOptions::default()
                .with_calculation_mode(KeyframeCalculationMode::Cubic),
        )
        .with_keyframe(0.25, 0.25, offset(&self.label, SHAKE_OFFSET))
        .with_keyframe(0.5, 0.25, offset(&self.label, -SHAKE_OFFSET / 2.0))
        .with_keyframe(0.75, 0.25, offset(&self.label, 0.0))
        .on_completion(move |finished| {
            let _ = tx.send(finished);
        });

        self.scheduler.animate_keyframes(self.owner, request);
        rx
    }

    fn animate_label(&self, effect: impl FnOnce() + Send + 'static) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        let request = AnimationRequest::new(ERROR_LABEL_KEY, REVEAL_DURATION, effect)
            .with_options(
                AnimationOptions::default()
                    .with_curve(AnimationCurve::EaseOut)
                    .beginning_from_current_state(),
            )
            .on_completion(move |finished| {
                let _ = tx.send(finished);
            });
        self.scheduler.animate(self.owner, request);
        rx
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.scheduler.release_owner(self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_choreo_animation::{ChoreographyConfig, TimedAnimator};

    fn controller() -> FormController {
        let scheduler =
            AnimationScheduler::from_current(TimedAnimator, ChoreographyConfig::default()).unwrap();
        FormController::new(scheduler)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_then_hide_in_order() {
        let form = controller();
        let shown = form.show_validation_error("Invalid card number");
        let hidden = form.hide_validation_error();

        assert!(shown.await.unwrap());
        assert!(form.label().visible);

        assert!(hidden.await.unwrap());
        assert_eq!(form.label(), ErrorLabel::default());
        assert!(!form.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_message_wins() {
        let form = controller();
        let first = form.show_validation_error("Invalid card number");
        first.await.unwrap();
        let second = form.show_validation_error("Card expired");
        second.await.unwrap();
        assert_eq!(form.label().message.as_deref(), Some("Card expired"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shake_ends_at_rest() {
        let form = controller();
        let shown = form.show_validation_error("Invalid CVC");
        let shaken = form.shake();

        assert!(shown.await.unwrap());
        assert!(shaken.await.unwrap());
        assert_eq!(form.label().offset_x, 0.0);
        assert!(form.label().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_owner() {
        let scheduler =
            AnimationScheduler::from_current(TimedAnimator, ChoreographyConfig::default()).unwrap();
        let form = FormController::new(scheduler.clone());
        assert_eq!(scheduler.owners().owner_count(), 1);
        drop(form);
        assert_eq!(scheduler.owners().owner_count(), 0);
    }
}
