// SPDX-License-Identifier: MIT OR Apache-2.0
//! Modal panel layout driven by host layout events.

use checkout_choreo_presentation::{
    compute_frame, requires_keyboard_input, ContentNode, Dimensions, Orientation,
    PanelConstraints, PresentationGeometry, Rect, Size,
};
use serde::Serialize;

/// Layout-affecting events delivered by the host UI framework
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// Interface rotated; the container bounds changed with it
    Rotated {
        /// New orientation
        orientation: Orientation,
        /// New container bounds
        container: Rect,
    },
    /// Keyboard frame changed; zero when hidden
    KeyboardChanged {
        /// Height overlapping the container
        height: f64,
    },
    /// Presented content asked for a new size
    ContentSizeChanged(Size),
}

/// Serializable view of the current layout
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSnapshot {
    /// Inputs of the last layout pass
    pub geometry: PresentationGeometry,
    /// Computed panel frame
    pub frame: Rect,
    /// Constraints applied to the panel
    pub constraints: PanelConstraints,
}

/// Keeps a presented panel's frame in sync with layout events
pub struct PresentationController {
    geometry: PresentationGeometry,
    dimensions: Dimensions,
    constraints: PanelConstraints,
    frame: Rect,
    listens_for_keyboard: bool,
}

impl PresentationController {
    /// Create a controller and lay out the panel once
    pub fn new(geometry: PresentationGeometry, dimensions: Dimensions, content: &ContentNode) -> Self {
        let listens_for_keyboard = requires_keyboard_input(content);
        tracing::debug!(
            "Presenting {:?} (keyboard input: {})",
            content.name,
            listens_for_keyboard
        );
        let mut controller = Self {
            geometry,
            dimensions,
            constraints: PanelConstraints::new(),
            frame: geometry.container,
            listens_for_keyboard,
        };
        controller.layout();
        controller
    }

    /// Current panel frame
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Current panel constraints
    pub fn constraints(&self) -> PanelConstraints {
        self.constraints
    }

    /// Snapshot of the current layout
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            geometry: self.geometry,
            frame: self.frame,
            constraints: self.constraints,
        }
    }

    /// Apply a layout event. Returns true if the panel moved.
    pub fn handle(&mut self, event: LayoutEvent) -> bool {
        match event {
            LayoutEvent::Rotated {
                orientation,
                container,
            } => {
                self.geometry.orientation = orientation;
                self.geometry.container = container;
            }
            LayoutEvent::KeyboardChanged { height } => {
                if !self.listens_for_keyboard {
                    return false;
                }
                self.geometry.keyboard_intrusion = height;
            }
            LayoutEvent::ContentSizeChanged(size) => {
                self.geometry.desired_content_size = size;
            }
        }
        self.layout()
    }

    fn layout(&mut self) -> bool {
        self.frame = compute_frame(&self.geometry, &self.dimensions);
        self.constraints.apply(self.frame)
    }
}
