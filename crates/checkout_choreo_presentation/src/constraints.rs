// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge constraints pinning the presented panel inside its wrapper.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Constant offsets of the panel's edges from the wrapper's edges.
///
/// The bottom edge stays pinned; the top and both sides follow the computed
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelConstraints {
    /// Offset of the top edge from the wrapper's top
    pub top: f64,
    /// Offset of the bottom edge from the wrapper's bottom
    pub bottom: f64,
    /// Offset of the leading edge from the wrapper's leading edge
    pub leading: f64,
    /// Offset of the trailing edge from the wrapper's trailing edge
    pub trailing: f64,
}

impl PanelConstraints {
    /// Constraints filling the wrapper
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the constraints to lay the panel out at `frame`.
    ///
    /// Returns true if any constant changed.
    pub fn apply(&mut self, frame: Rect) -> bool {
        let updated = Self {
            top: frame.origin.y,
            bottom: self.bottom,
            leading: frame.origin.x,
            trailing: -frame.origin.x,
        };
        let changed = updated != *self;
        *self = updated;
        changed
    }
}
