// SPDX-License-Identifier: MIT OR Apache-2.0
//! Modal panel geometry for checkout UI choreography.
//!
//! This crate computes where a bottom-anchored, modally presented panel
//! sits inside its container:
//! - Width adaptation per device class
//! - Height clamping between a floor and a ceiling
//! - Bottom padding for the keyboard and safe area
//! - Applying the result to the panel's edge constraints

pub mod constraints;
pub mod dimensions;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod hierarchy;

pub use constraints::PanelConstraints;
pub use dimensions::Dimensions;
pub use error::{PresentationError, Result};
pub use frame::{compute_frame, PresentationGeometry};
pub use geometry::{DeviceClass, Orientation, Point, Rect, Size};
pub use hierarchy::{requires_keyboard_input, ContentKind, ContentNode};
