// SPDX-License-Identifier: MIT OR Apache-2.0
//! Key-exclusive animation scheduling for checkout UI choreography.
//!
//! Animations addressed at the same visual target never run at the same
//! time. Each owner (a view, a form row, a panel) carries a set of keys that
//! are currently in flight; a request whose key is busy is re-attempted after
//! a short polling interval instead of racing the running animation.
//!
//! ## Architecture
//!
//! The scheduler is built on:
//! - Per-owner key registries, looked up through an owner registry
//! - Simple and keyframe animation requests sharing one exclusivity protocol
//! - An [`Animator`] seam standing in for the host animation subsystem
//! - Tokio timers for deferred retries and animation timing

pub mod animator;
pub mod config;
pub mod error;
pub mod options;
pub mod registry;
pub mod request;
pub mod scheduler;

pub use animator::{Animator, TimedAnimator};
pub use config::{ChoreographyConfig, DEFAULT_RETRY_INTERVAL};
pub use error::{ChoreographyError, Result};
pub use options::{AnimationCurve, AnimationOptions, KeyframeAnimationOptions, KeyframeCalculationMode};
pub use registry::{KeyRegistry, OwnerId, OwnerRegistry, SharedKeyRegistry};
pub use request::{
    AnimationRequest, Completion, Effect, KeyframeAnimationRequest, KeyframePhase,
    ScheduledAnimation, Timing,
};
pub use scheduler::AnimationScheduler;
