//! Timing configuration, loaded from TOML.
//!
//! ```toml
//! [carousel]
//! transition_duration_ms = 1000
//! autoplay_interval_ms = 5000
//!
//! [paged]
//! autoplay_interval_ms = 4000
//! ```
//!
//! Every field is optional and falls back to the values in
//! [`crate::constants`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub carousel: CarouselConfig,
    pub paged: PagedConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.carousel.validate()?;
        self.paged.validate()
    }
}

/// Timings of the crossfading hero carousel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Delay between two discovery attempts.
    pub retry_interval_ms: u64,
    /// Failed discovery attempts tolerated before the carousel gives up.
    pub max_discovery_retries: u32,
    pub transition_duration_ms: u64,
    pub autoplay_interval_ms: u64,
    /// Start autoplay as soon as the carousel is mounted.
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            retry_interval_ms: RETRY_INTERVAL_MS,
            max_discovery_retries: MAX_DISCOVERY_RETRIES,
            transition_duration_ms: TRANSITION_DURATION_MS,
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            autoplay: true,
        }
    }
}

impl CarouselConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("carousel.retry_interval_ms", self.retry_interval_ms)?;
        non_zero("carousel.transition_duration_ms", self.transition_duration_ms)?;
        non_zero("carousel.autoplay_interval_ms", self.autoplay_interval_ms)
    }
}

/// Timings and geometry of the multi-card carousel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagedConfig {
    pub autoplay_interval_ms: u64,
    pub resize_debounce_ms: u64,
    /// Horizontal space between two cards.
    pub gap: f32,
}

impl Default for PagedConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: PAGED_AUTOPLAY_INTERVAL_MS,
            resize_debounce_ms: PAGED_RESIZE_DEBOUNCE_MS,
            gap: PAGED_GAP,
        }
    }
}

impl PagedConfig {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("paged.autoplay_interval_ms", self.autoplay_interval_ms)?;
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::Invalid {
                field: "paged.gap",
                reason: "must be a finite, non-negative number",
            });
        }
        Ok(())
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}
