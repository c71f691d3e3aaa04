// SPDX-License-Identifier: MIT OR Apache-2.0
//! Exclusive-by-key animation scheduling.
//!
//! This module handles:
//! - Running a request immediately when its key is free on the owner
//! - Deferring a request by a polling interval while its key is busy
//! - Invoking the caller's completion before releasing the key
//!
//! Deferred requests for the same key are not queued in order. Whichever retry
//! timer fires first after the key is released wins.

use crate::animator::Animator;
use crate::config::ChoreographyConfig;
use crate::error::Result;
use crate::registry::{OwnerId, OwnerRegistry, SharedKeyRegistry};
use crate::request::{AnimationRequest, KeyframeAnimationRequest, ScheduledAnimation};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Schedules simple and keyframe animations so that no two animations with
/// the same key run on the same owner at once.
///
/// Cloning is cheap; clones share owners, animator and configuration.
#[derive(Clone)]
pub struct AnimationScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    owners: OwnerRegistry,
    animator: Arc<dyn Animator>,
    config: ChoreographyConfig,
    runtime: Handle,
}

impl AnimationScheduler {
    /// Create a scheduler whose timers and animations run on `runtime`
    pub fn new(runtime: Handle, animator: impl Animator, config: ChoreographyConfig) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                owners: OwnerRegistry::new(),
                animator: Arc::new(animator),
                config,
                runtime,
            }),
        }
    }

    /// Create a scheduler on the tokio runtime the caller is running in
    pub fn from_current(animator: impl Animator, config: ChoreographyConfig) -> Result<Self> {
        Ok(Self::new(Handle::try_current()?, animator, config))
    }

    /// Owner key registries
    pub fn owners(&self) -> &OwnerRegistry {
        &self.inner.owners
    }

    /// Scheduler configuration
    pub fn config(&self) -> &ChoreographyConfig {
        &self.inner.config
    }

    /// Register a new visual owner
    pub fn register_owner(&self) -> OwnerId {
        self.inner.owners.register()
    }

    /// Forget an owner once it is destroyed
    pub fn release_owner(&self, owner: OwnerId) {
        self.inner.owners.release(owner);
    }

    /// Check whether an animation with `key` is in flight on `owner`
    pub fn is_animating(&self, owner: OwnerId, key: &str) -> bool {
        self.inner.owners.is_animating(owner, key)
    }

    /// Schedule a simple animation
    pub fn animate(&self, owner: OwnerId, request: AnimationRequest) {
        self.schedule(owner, request);
    }

    /// Schedule a keyframe animation
    pub fn animate_keyframes(&self, owner: OwnerId, request: KeyframeAnimationRequest) {
        self.schedule(owner, request);
    }

    /// Run the request now if its key is free on `owner`, otherwise retry
    /// after the configured polling interval. Results are observed through
    /// the request's completion handler.
    pub fn schedule(&self, owner: OwnerId, request: impl Into<ScheduledAnimation>) {
        self.attempt(owner, request.into(), 0);
    }

    fn attempt(&self, owner: OwnerId, request: ScheduledAnimation, retries: u32) {
        // Retries must not bring back an owner released while they waited
        let registry = if retries == 0 {
            self.inner.owners.registry(owner)
        } else if let Some(registry) = self.inner.owners.get(owner) {
            registry
        } else {
            tracing::debug!(
                "Dropping animation {:?}: owner {:?} was released",
                request.key(),
                owner
            );
            request.abandon();
            return;
        };
        let acquired = {
            let mut keys = registry.lock();
            if keys.contains(request.key()) {
                false
            } else {
                keys.insert(request.key())
            }
        };

        if acquired {
            self.run(owner, registry, request);
        } else {
            self.defer(owner, request, retries);
        }
    }

    fn run(&self, owner: OwnerId, registry: SharedKeyRegistry, request: ScheduledAnimation) {
        let key = request.key().to_owned();
        tracing::debug!("Running animation {:?} on {:?}", key, owner);

        let (animation, completion) = request.start(self.inner.animator.as_ref());
        self.inner.runtime.spawn(async move {
            let finished = animation.await;
            // The key stays held while the caller's completion runs
            if let Some(completion) = completion {
                completion(finished);
            }
            registry.lock().remove(&key);
            tracing::trace!("Released animation key {:?} on {:?} (finished: {})", key, owner, finished);
        });
    }

    fn defer(&self, owner: OwnerId, request: ScheduledAnimation, retries: u32) {
        if let Some(max_retries) = self.inner.config.max_retries {
            if retries >= max_retries {
                tracing::warn!(
                    "Dropping animation {:?} on {:?}: key still busy after {} retries",
                    request.key(),
                    owner,
                    retries
                );
                request.abandon();
                return;
            }
        }

        tracing::debug!("Deferring animation {:?} on {:?}: key busy", request.key(), owner);
        let scheduler = self.clone();
        let interval = self.inner.config.retry_interval();
        self.inner.runtime.spawn(async move {
            tokio::time::sleep(interval).await;
            scheduler.attempt(owner, request, retries + 1);
        });
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("owners", &self.inner.owners)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::TimedAnimator;
    use crate::options::{AnimationOptions, KeyframeAnimationOptions};
    use crate::request::{Effect, KeyframePhase, Timing};
    use futures::future::{BoxFuture, FutureExt};
    use parking_lot::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tokio::time::Instant;

    type EventLog = Arc<Mutex<Vec<String>>>;

    fn scheduler() -> AnimationScheduler {
        AnimationScheduler::from_current(TimedAnimator, ChoreographyConfig::default()).unwrap()
    }

    fn logged(log: &EventLog, event: &str) -> impl FnOnce() + Send + 'static {
        let log = Arc::clone(log);
        let event = event.to_string();
        move || log.lock().push(event)
    }

    fn logged_completion(
        log: &EventLog,
        event: &str,
    ) -> (impl FnOnce(bool) + Send + 'static, oneshot::Receiver<bool>) {
        let (tx, rx) = oneshot::channel();
        let log = Arc::clone(log);
        let event = event.to_string();
        let completion = move |finished: bool| {
            log.lock().push(event);
            let _ = tx.send(finished);
        };
        (completion, rx)
    }

    /// Animator whose animations end immediately with a fixed flag
    struct InterruptedAnimator;

    impl Animator for InterruptedAnimator {
        fn animate(
            &self,
            _timing: Timing,
            _options: AnimationOptions,
            effect: Effect,
        ) -> BoxFuture<'static, bool> {
            effect();
            async { false }.boxed()
        }

        fn animate_keyframes(
            &self,
            _timing: Timing,
            _options: KeyframeAnimationOptions,
            effect: Effect,
            _phases: Vec<KeyframePhase>,
        ) -> BoxFuture<'static, bool> {
            effect();
            async { false }.boxed()
        }
    }

    #[test]
    fn test_requires_runtime() {
        let result = AnimationScheduler::from_current(TimedAnimator, ChoreographyConfig::default());
        assert!(matches!(result, Err(crate::ChoreographyError::NoRuntime(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_key_is_exclusive() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let log = EventLog::default();
        let start = Instant::now();
        let second_started = Arc::new(Mutex::new(None));

        let (first_done, first_rx) = logged_completion(&log, "complete first");
        scheduler.animate(
            owner,
            AnimationRequest::new("error-reveal", Duration::from_millis(300), logged(&log, "effect first"))
                .on_completion(first_done),
        );
        assert!(scheduler.is_animating(owner, "error-reveal"));

        let (second_done, second_rx) = logged_completion(&log, "complete second");
        let started = Arc::clone(&second_started);
        let second_effect = logged(&log, "effect second");
        scheduler.animate(
            owner,
            AnimationRequest::new("error-reveal", Duration::from_millis(300), move || {
                *started.lock() = Some(Instant::now());
                second_effect();
            })
            .on_completion(second_done),
        );

        assert!(first_rx.await.unwrap());
        assert!(second_rx.await.unwrap());

        assert_eq!(
            *log.lock(),
            vec!["effect first", "complete first", "effect second", "complete second"]
        );
        // Runs within one polling interval of the release
        let waited = second_started.lock().unwrap() - start;
        assert!(waited >= Duration::from_millis(300));
        assert!(waited <= Duration::from_millis(400));
        assert!(!scheduler.is_animating(owner, "error-reveal"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_request_does_not_run_immediately() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let log = EventLog::default();

        let (first_done, first_rx) = logged_completion(&log, "complete first");
        scheduler.animate(
            owner,
            AnimationRequest::new("slide", Duration::from_millis(500), logged(&log, "effect first"))
                .on_completion(first_done),
        );
        scheduler.animate(
            owner,
            AnimationRequest::new("slide", Duration::from_millis(100), logged(&log, "effect second")),
        );

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*log.lock(), vec!["effect first"]);

        first_rx.await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(*log.lock(), vec!["effect first", "complete first", "effect second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_keys_overlap() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let log = EventLog::default();

        let (fade_done, fade_rx) = logged_completion(&log, "complete fade");
        let (slide_done, slide_rx) = logged_completion(&log, "complete slide");
        scheduler.animate(
            owner,
            AnimationRequest::new("fade", Duration::from_millis(200), logged(&log, "effect fade"))
                .on_completion(fade_done),
        );
        scheduler.animate(
            owner,
            AnimationRequest::new("slide", Duration::from_millis(200), logged(&log, "effect slide"))
                .on_completion(slide_done),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(scheduler.is_animating(owner, "fade"));
        assert!(scheduler.is_animating(owner, "slide"));

        fade_rx.await.unwrap();
        slide_rx.await.unwrap();
        let log = log.lock();
        assert_eq!(log[..2], ["effect fade", "effect slide"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_key_on_different_owners_overlap() {
        let scheduler = scheduler();
        let first = scheduler.register_owner();
        let second = scheduler.register_owner();
        let log = EventLog::default();

        scheduler.animate(
            first,
            AnimationRequest::new("error-reveal", Duration::from_millis(200), logged(&log, "first")),
        );
        scheduler.animate(
            second,
            AnimationRequest::new("error-reveal", Duration::from_millis(200), logged(&log, "second")),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*log.lock(), vec!["first", "second"]);
        assert!(scheduler.is_animating(first, "error-reveal"));
        assert!(scheduler.is_animating(second, "error-reveal"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_held_during_completion() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let log = EventLog::default();
        let (held_tx, held_rx) = oneshot::channel();
        let (chained_done, chained_rx) = logged_completion(&log, "complete chained");

        let chained_scheduler = scheduler.clone();
        let chained_effect = logged(&log, "effect chained");
        scheduler.animate(
            owner,
            AnimationRequest::new("pulse", Duration::from_millis(100), logged(&log, "effect first"))
                .on_completion(move |_| {
                    let _ = held_tx.send(chained_scheduler.is_animating(owner, "pulse"));
                    chained_scheduler.animate(
                        owner,
                        AnimationRequest::new("pulse", Duration::from_millis(100), chained_effect)
                            .on_completion(chained_done),
                    );
                }),
        );

        assert!(held_rx.await.unwrap());
        assert!(chained_rx.await.unwrap());
        assert_eq!(*log.lock(), vec!["effect first", "effect chained", "complete chained"]);
        assert!(!scheduler.is_animating(owner, "pulse"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unfinished_flag_is_passed_through() {
        let scheduler =
            AnimationScheduler::from_current(InterruptedAnimator, ChoreographyConfig::default())
                .unwrap();
        let owner = scheduler.register_owner();
        let (tx, rx) = oneshot::channel();

        scheduler.animate(
            owner,
            AnimationRequest::new("fade", Duration::from_millis(100), || {})
                .on_completion(move |finished| {
                    let _ = tx.send(finished);
                }),
        );

        assert!(!rx.await.unwrap());
        tokio::task::yield_now().await;
        assert!(!scheduler.is_animating(owner, "fade"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_budget_abandons_request() {
        let config = ChoreographyConfig::default().with_max_retries(2);
        let scheduler = AnimationScheduler::from_current(TimedAnimator, config).unwrap();
        let owner = scheduler.register_owner();
        let log = EventLog::default();
        let start = Instant::now();

        scheduler.animate(
            owner,
            AnimationRequest::new("slide", Duration::from_secs(1), logged(&log, "effect long")),
        );
        let (dropped_done, dropped_rx) = logged_completion(&log, "complete dropped");
        scheduler.animate(
            owner,
            AnimationRequest::new("slide", Duration::from_millis(100), logged(&log, "effect dropped"))
                .on_completion(dropped_done),
        );

        assert!(!dropped_rx.await.unwrap());
        // Two polling intervals, then the budget runs out
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(200) && waited < Duration::from_millis(210));
        assert_eq!(*log.lock(), vec!["effect long", "complete dropped"]);
        assert!(scheduler.is_animating(owner, "slide"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_drops_deferred_requests() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let log = EventLog::default();

        let (first_done, first_rx) = logged_completion(&log, "complete first");
        scheduler.animate(
            owner,
            AnimationRequest::new("error-reveal", Duration::from_millis(200), logged(&log, "effect first"))
                .on_completion(first_done),
        );
        let (deferred_done, deferred_rx) = logged_completion(&log, "complete deferred");
        scheduler.animate(
            owner,
            AnimationRequest::new("error-reveal", Duration::from_millis(100), logged(&log, "effect deferred"))
                .on_completion(deferred_done),
        );

        scheduler.release_owner(owner);
        assert_eq!(scheduler.owners().owner_count(), 0);

        assert!(!deferred_rx.await.unwrap());
        assert!(first_rx.await.unwrap());
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(scheduler.owners().owner_count(), 0);
        assert!(!scheduler.owners().contains_owner(owner));
        let log = log.lock();
        assert!(log.contains(&"effect first".to_string()));
        assert!(!log.contains(&"effect deferred".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeating_animation_holds_key() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let log = EventLog::default();

        scheduler.animate(
            owner,
            AnimationRequest::new("spinner", Duration::from_millis(100), logged(&log, "spin"))
                .with_options(AnimationOptions::default().repeating()),
        );
        scheduler.animate(
            owner,
            AnimationRequest::new("spinner", Duration::from_millis(100), logged(&log, "blocked")),
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(scheduler.is_animating(owner, "spinner"));
        assert_eq!(*log.lock(), vec!["spin"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyframe_requests_share_exclusivity() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let log = EventLog::default();

        let (shake_done, shake_rx) = logged_completion(&log, "complete shake");
        scheduler.animate_keyframes(
            owner,
            KeyframeAnimationRequest::new("shake", Duration::from_millis(200), logged(&log, "shake start"))
                .with_keyframe(0.5, 0.5, logged(&log, "shake back"))
                .on_completion(shake_done),
        );
        let (fade_done, fade_rx) = logged_completion(&log, "complete fade");
        scheduler.animate(
            owner,
            AnimationRequest::new("shake", Duration::from_millis(100), logged(&log, "effect fade"))
                .on_completion(fade_done),
        );

        assert!(shake_rx.await.unwrap());
        assert!(fade_rx.await.unwrap());
        assert_eq!(
            *log.lock(),
            vec!["shake start", "shake back", "complete shake", "effect fade", "complete fade"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_waiters_never_overlap() {
        let scheduler = scheduler();
        let owner = scheduler.register_owner();
        let running = Arc::new(Mutex::new(0usize));
        let peak = Arc::new(Mutex::new(0usize));
        let mut receivers = Vec::new();

        for _ in 0..5 {
            let (tx, rx) = oneshot::channel();
            let running_start = Arc::clone(&running);
            let running_end = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            scheduler.animate(
                owner,
                AnimationRequest::new("error-reveal", Duration::from_millis(150), move || {
                    let mut running = running_start.lock();
                    *running += 1;
                    let mut peak = peak.lock();
                    *peak = (*peak).max(*running);
                })
                .on_completion(move |finished| {
                    *running_end.lock() -= 1;
                    let _ = tx.send(finished);
                }),
            );
            receivers.push(rx);
        }

        for rx in receivers {
            assert!(rx.await.unwrap());
        }
        assert_eq!(*peak.lock(), 1);
        assert_eq!(*running.lock(), 0);
    }
}
