// SPDX-License-Identifier: MIT OR Apache-2.0
//! The host animation subsystem.
//!
//! The scheduler never interpolates anything itself. It hands the timing,
//! options and effect to an [`Animator`] and waits for the `finished` flag.

use crate::options::{AnimationOptions, KeyframeAnimationOptions};
use crate::request::{Effect, KeyframePhase, Timing};
use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;

/// Drives timed animations on behalf of the scheduler.
///
/// The returned future resolves once the animation ends. `false` means the
/// animation was interrupted before it finished.
pub trait Animator: Send + Sync + 'static {
    /// Run a single eased transition
    fn animate(
        &self,
        timing: Timing,
        options: AnimationOptions,
        effect: Effect,
    ) -> BoxFuture<'static, bool>;

    /// Run a multi-phase keyframe animation
    fn animate_keyframes(
        &self,
        timing: Timing,
        options: KeyframeAnimationOptions,
        effect: Effect,
        phases: Vec<KeyframePhase>,
    ) -> BoxFuture<'static, bool>;
}

/// Animator that applies effects on the tokio clock.
///
/// The effect is applied once the delay has elapsed; the animation then
/// occupies its running time and reports `finished = true`. A repeating
/// animation never resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimedAnimator;

impl Animator for TimedAnimator {
    fn animate(
        &self,
        timing: Timing,
        options: AnimationOptions,
        effect: Effect,
    ) -> BoxFuture<'static, bool> {
        let running_time = options.running_time(timing.duration);
        async move {
            tokio::time::sleep(timing.delay).await;
            effect();
            match running_time {
                Some(running_time) => {
                    tokio::time::sleep(running_time).await;
                    true
                }
                // Repeating animations never finish; the key stays held
                None => futures::future::pending().await,
            }
        }
        .boxed()
    }

    fn animate_keyframes(
        &self,
        timing: Timing,
        options: KeyframeAnimationOptions,
        effect: Effect,
        mut phases: Vec<KeyframePhase>,
    ) -> BoxFuture<'static, bool> {
        phases.sort_by(|a, b| a.relative_start.total_cmp(&b.relative_start));
        let running_time = options.running_time(timing.duration);
        async move {
            tokio::time::sleep(timing.delay).await;
            effect();

            let mut elapsed = Duration::ZERO;
            for phase in phases {
                let start = phase.start_offset(timing.duration);
                if start > elapsed {
                    tokio::time::sleep(start - elapsed).await;
                    elapsed = start;
                }
                (phase.effect)();
            }

            match running_time {
                Some(running_time) => {
                    tokio::time::sleep(running_time.saturating_sub(elapsed)).await;
                    true
                }
                None => futures::future::pending().await,
            }
        }
        .boxed()
    }
}
