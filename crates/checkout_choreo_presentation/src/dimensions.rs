// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adaptive dimension tunables for modal presentation.

use crate::error::Result;
use crate::geometry::{DeviceClass, Orientation};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scales and widths bounding a presented panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    /// Smallest panel height as a fraction of the container height
    pub least_presentable_height_scale: f64,
    /// Largest panel height as a fraction of the container height
    pub greatest_presentable_height_scale: f64,
    /// Reference panel width on tablets, in points before display scaling
    pub max_adaptive_width: f64,
    /// Largest panel width on tablets as a fraction of the container width
    pub tablet_width_fraction: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            least_presentable_height_scale: 0.25,
            greatest_presentable_height_scale: 0.9,
            max_adaptive_width: 375.0,
            tablet_width_fraction: 0.85,
        }
    }
}

impl Dimensions {
    /// Ceiling scale for the panel height.
    ///
    /// Phones in landscape get the full container height.
    pub fn greatest_presentable_height_scale(
        &self,
        device: DeviceClass,
        orientation: Orientation,
    ) -> f64 {
        if device == DeviceClass::Phone && orientation.is_landscape() {
            1.0
        } else {
            self.greatest_presentable_height_scale
        }
    }

    /// Widest a panel may be on a screen of `screen_width`
    pub fn greatest_presentable_width(
        &self,
        screen_width: f64,
        device: DeviceClass,
        display_scale: f64,
    ) -> f64 {
        match device {
            DeviceClass::Tablet => (screen_width * self.tablet_width_fraction)
                .min(self.max_adaptive_width * display_scale),
            DeviceClass::Phone => screen_width,
        }
    }

    /// Parse dimensions from RON text
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Serialize to pretty RON text
    pub fn to_ron_string(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load dimensions from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Save dimensions to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}
