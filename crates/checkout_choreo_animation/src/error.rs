// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised while setting up choreography.
//!
//! Scheduling itself never fails; an interrupted animation is reported
//! through the `finished` flag of the caller's completion instead.

use thiserror::Error;

/// Choreography setup errors
#[derive(Debug, Error)]
pub enum ChoreographyError {
    /// Scheduler constructed outside of a tokio runtime
    #[error("No async runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Configuration could not be serialized
    #[error("Configuration serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for choreography operations
pub type Result<T> = std::result::Result<T, ChoreographyError>;
