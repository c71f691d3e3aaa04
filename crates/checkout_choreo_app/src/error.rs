// SPDX-License-Identifier: MIT OR Apache-2.0
//! Harness errors.

use thiserror::Error;

/// Errors that can stop the harness
#[derive(Debug, Error)]
pub enum AppError {
    /// Choreography setup failed
    #[error("Choreography error: {0}")]
    Choreography(#[from] checkout_choreo_animation::ChoreographyError),

    /// Presentation dimensions could not be loaded
    #[error("Presentation error: {0}")]
    Presentation(#[from] checkout_choreo_presentation::PresentationError),

    /// Snapshot could not be encoded
    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the harness
pub type Result<T> = std::result::Result<T, AppError>;
