//! Configuration types
//!
//! Board-agnostic settings for the whole device. With the `serde` feature
//! a configuration can be read from TOML; every field is optional there and
//! falls back to its default.
//!
//! ```toml
//! topic_prefix = "office/unicorn"
//!
//! [render]
//! rotate_180 = true
//! scroll_mode = "one-shot"
//!
//! [chirp]
//! enabled = false
//! ```

pub mod types;

pub use types::*;

use heapless::String;
use marquee_protocol::{TopicError, Topics};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum topic prefix length
pub const MAX_PREFIX_LEN: usize = 48;

/// Prefix used when none is configured
pub const DEFAULT_TOPIC_PREFIX: &str = "marquee";

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML syntax or type error
    Parse,
    /// Topic prefix rejected
    Topic(TopicError),
    /// A timing value that must be positive is zero
    ZeroInterval(&'static str),
    /// A level is outside 0.0..=1.0
    LevelOutOfRange(&'static str),
    /// Chirp is enabled without any tones
    NoTones,
}

impl From<TopicError> for ConfigError {
    fn from(e: TopicError) -> Self {
        ConfigError::Topic(e)
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarqueeConfig {
    /// Prefix of every topic, e.g. `office/unicorn`
    pub topic_prefix: String<MAX_PREFIX_LEN>,
    pub render: RenderConfig,
    pub connectivity: ConnectivityConfig,
    pub input: InputConfig,
    pub chirp: ChirpConfig,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        let mut topic_prefix = String::new();
        let _ = topic_prefix.push_str(DEFAULT_TOPIC_PREFIX);

        Self {
            topic_prefix,
            render: RenderConfig::default(),
            connectivity: ConnectivityConfig::default(),
            input: InputConfig::default(),
            chirp: ChirpConfig::default(),
        }
    }
}

impl MarqueeConfig {
    /// Parse and validate a TOML document
    #[cfg(feature = "serde")]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| {
            log::warn!("config parse error: {}", e);
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Topic names derived from the prefix
    pub fn topics(&self) -> Result<Topics, ConfigError> {
        Ok(Topics::new(&self.topic_prefix)?)
    }

    /// Check values the tasks rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topics()?;

        let intervals = [
            ("render.step_ms", self.render.step_ms),
            ("render.frame_interval_ms", self.render.frame_interval_ms),
            ("render.progress_interval_ms", self.render.progress_interval_ms),
            ("render.max_run_minutes", self.render.max_run_minutes),
            ("connectivity.status_interval_s", self.connectivity.status_interval_s),
            ("connectivity.heartbeat_disconnected_ms", self.connectivity.heartbeat_disconnected_ms),
            ("connectivity.heartbeat_link_up_ms", self.connectivity.heartbeat_link_up_ms),
            ("connectivity.heartbeat_operational_ms", self.connectivity.heartbeat_operational_ms),
            ("connectivity.uptime_tick_s", self.connectivity.uptime_tick_s),
            ("input.poll_interval_ms", self.input.poll_interval_ms),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroInterval(*name));
        }

        let levels = [
            ("input.default_brightness", self.input.default_brightness),
            ("input.default_volume", self.input.default_volume),
            ("input.brightness_step", self.input.brightness_step),
            ("input.volume_step", self.input.volume_step),
        ];
        if let Some((name, _)) = levels
            .iter()
            .find(|(_, value)| !(0.0..=1.0).contains(value))
        {
            return Err(ConfigError::LevelOutOfRange(*name));
        }

        if self.chirp.enabled && self.chirp.tones_hz.is_empty() {
            return Err(ConfigError::NoTones);
        }

        Ok(())
    }
}
