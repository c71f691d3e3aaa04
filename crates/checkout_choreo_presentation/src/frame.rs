// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame computation for a bottom-anchored modal panel.
//!
//! Called on every layout-affecting event (rotation, keyboard show/hide,
//! content-size change). The result always stays inside the container
//! horizontally and, once the panel has a preferred size, between the
//! height floor and ceiling vertically.

use crate::dimensions::Dimensions;
use crate::geometry::{DeviceClass, Orientation, Rect, Size};
use serde::{Deserialize, Serialize};

/// Layout inputs for one pass. Built fresh each time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PresentationGeometry {
    /// Bounds of the presenting container
    pub container: Rect,
    /// Device form factor
    pub device_class: DeviceClass,
    /// Current interface orientation
    pub orientation: Orientation,
    /// Pixels per point of the display
    pub display_scale: f64,
    /// Size the panel's content would like; zero means unsized
    pub desired_content_size: Size,
    /// Height of the on-screen keyboard overlapping the container
    pub keyboard_intrusion: f64,
    /// Bottom safe-area inset of the container
    pub safe_area_bottom_inset: f64,
}

impl PresentationGeometry {
    /// Geometry for a container with no keyboard, insets or preferred size
    pub fn new(container: Rect, device_class: DeviceClass, orientation: Orientation) -> Self {
        Self {
            container,
            device_class,
            orientation,
            display_scale: 1.0,
            ..Self::default()
        }
    }

    /// Set the display scale
    pub fn with_display_scale(mut self, display_scale: f64) -> Self {
        self.display_scale = display_scale;
        self
    }

    /// Set the preferred content size
    pub fn with_desired_content_size(mut self, size: Size) -> Self {
        self.desired_content_size = size;
        self
    }

    /// Set the keyboard intrusion height
    pub fn with_keyboard_intrusion(mut self, height: f64) -> Self {
        self.keyboard_intrusion = height;
        self
    }

    /// Set the bottom safe-area inset
    pub fn with_safe_area_bottom_inset(mut self, inset: f64) -> Self {
        self.safe_area_bottom_inset = inset;
        self
    }

    /// Compute the panel frame for these inputs
    pub fn frame(&self, dimensions: &Dimensions) -> Rect {
        compute_frame(self, dimensions)
    }
}

/// Compute the panel frame.
///
/// Tablets get a width capped by [`Dimensions::greatest_presentable_width`]
/// and centered in the container. An unsized panel fills the (width-adapted)
/// container. Otherwise the panel height is the content height plus bottom
/// padding, clamped into the presentable range, with the bottom edge pinned
/// to the container's bottom edge.
pub fn compute_frame(geometry: &PresentationGeometry, dimensions: &Dimensions) -> Rect {
    let container = geometry.container;
    if !container.has_area() {
        return container;
    }

    let mut frame = container;
    if geometry.device_class == DeviceClass::Tablet {
        let width = dimensions.greatest_presentable_width(
            container.width(),
            geometry.device_class,
            geometry.display_scale,
        );
        frame.origin.x = container.origin.x + (container.width() - width) / 2.0;
        frame.size.width = width;
    }

    let min_height = container.height() * dimensions.least_presentable_height_scale;
    let max_height = container.height()
        * dimensions
            .greatest_presentable_height_scale(geometry.device_class, geometry.orientation);

    if geometry.desired_content_size.is_zero() {
        return frame;
    }

    let bottom_padding = geometry
        .keyboard_intrusion
        .abs()
        .max(geometry.safe_area_bottom_inset);
    let expected_height = geometry.desired_content_size.height + bottom_padding;

    let height = if expected_height < min_height {
        min_height
    } else if expected_height > max_height {
        max_height
    } else {
        expected_height
    };

    frame.origin.y += frame.size.height - height;
    frame.size.height = height;

    tracing::trace!(
        "Presentation frame {:?} (expected height {}, range {}..={})",
        frame,
        expected_height,
        min_height,
        max_height
    );
    frame
}
