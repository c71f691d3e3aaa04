// SPDX-License-Identifier: MIT OR Apache-2.0
//! Presentation configuration errors.

use thiserror::Error;

/// Errors loading or saving presentation dimensions
#[derive(Debug, Error)]
pub enum PresentationError {
    /// Dimensions file could not be parsed
    #[error("Dimensions parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Dimensions could not be serialized
    #[error("Dimensions serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for presentation configuration
pub type Result<T> = std::result::Result<T, PresentationError>;
