// SPDX-License-Identifier: MIT OR Apache-2.0
//! Points, sizes, rectangles and the environment facts supplied by the host.

use serde::{Deserialize, Serialize};

/// A point in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position, growing downward
    pub y: f64,
}

impl Point {
    /// Origin point
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Size {
    /// The zero size, meaning "no preferred size"
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are zero
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Point,
    /// Extent
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its components
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Rectangle at the origin with the given size
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// Width
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Leftmost x
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    /// Rightmost x
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Top y
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    /// Bottom y
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Whether the rectangle has positive width and height
    pub fn has_area(&self) -> bool {
        self.size.width > 0.0 && self.size.height > 0.0
    }
}

/// Coarse form factor of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeviceClass {
    /// Handset
    #[default]
    Phone,
    /// Large-screen device
    Tablet,
}

/// Interface orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Orientation {
    /// Taller than wide
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
}

impl Orientation {
    /// Check if landscape
    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::Landscape)
    }
}
