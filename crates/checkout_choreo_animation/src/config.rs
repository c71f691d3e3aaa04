// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scheduler configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Interval between attempts to run an animation whose key is busy
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Whole milliseconds in `duration`, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Tunables for the animation scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographyConfig {
    /// Polling interval for deferred requests, in milliseconds
    pub retry_interval_ms: u64,
    /// Give up on a deferred request after this many retries (`None` = never)
    pub max_retries: Option<u32>,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            retry_interval_ms: millis(DEFAULT_RETRY_INTERVAL),
            max_retries: None,
        }
    }
}

impl ChoreographyConfig {
    /// Polling interval for deferred requests
    pub fn retry_interval(&self) -> Duration {
        // A zero interval would spin the runtime while a key is held
        Duration::from_millis(self.retry_interval_ms.max(1))
    }

    /// Set the polling interval
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval_ms = millis(interval);
        self
    }

    /// Bound the number of retries for a deferred request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Serialize this configuration to pretty RON text
    pub fn to_ron_string(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded choreography config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}
