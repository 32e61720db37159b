// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sink tuning

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Timing and file-mode settings for a [`BufferedSink`](crate::BufferedSink).
///
/// Loadable from TOML with human-readable durations:
///
/// ```toml
/// drain_interval = "25ms"
/// write_timeout = "10ms"
/// shutdown_grace = "50ms"
/// append = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SinkConfig {
    /// Pause between drains of the buffer
    #[serde(with = "humantime_serde")]
    pub drain_interval: Duration,
    /// Longest a producer waits for the buffer before dropping its chunk
    #[serde(with = "humantime_serde")]
    pub write_timeout: Duration,
    /// How long shutdown waits for the drain worker to notice
    #[serde(with = "humantime_serde")]
    pub shutdown_grace: Duration,
    /// Append to an existing target instead of truncating it
    pub append: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            drain_interval: Duration::from_millis(25),
            write_timeout: Duration::from_millis(10),
            shutdown_grace: Duration::from_millis(50),
            append: false,
        }
    }
}

impl SinkConfig {
    pub fn with_drain_interval(mut self, interval: Duration) -> Self {
        self.drain_interval = interval;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SinkConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.drain_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "drain_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
