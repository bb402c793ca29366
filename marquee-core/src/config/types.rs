//! Configuration type definitions
//!
//! Defaults reproduce the stock Galactic Unicorn behaviour: 2 s dwell,
//! 30 ms per pixel, 60 minute run limit, status every 30 minutes.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::render::ScrollMode;

/// Maximum tones in the notification chirp
pub const MAX_CHIRP_TONES: usize = 8;

/// Render engine timing and layout
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Blank pixels kept either side of the banner
    pub padding: i32,
    /// Dwell before (and after, in one-shot mode) a scroll pass
    pub hold_ms: u32,
    /// Time per one-pixel scroll step
    pub step_ms: u32,
    /// Banner frame interval
    pub frame_interval_ms: u32,
    /// Progress bar redraw interval
    pub progress_interval_ms: u32,
    /// A session running this long is stopped and the display cleared
    pub max_run_minutes: u32,
    pub scroll_mode: ScrollMode,
    /// Turn the panel off once a one-shot banner has passed
    pub dim_after_one_shot: bool,
    /// Panel mounted upside down
    pub rotate_180: bool,
    /// Spaces in front of the banner text
    pub lead_blanks: usize,
    /// Spaces after the banner text
    pub trail_blanks: usize,
    /// Banner baseline row, normal orientation
    pub banner_y: i32,
    /// Banner baseline row, rotated
    pub banner_y_rotated: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: 2,
            hold_ms: 2000,
            step_ms: 30,
            frame_interval_ms: 10,
            progress_interval_ms: 1000,
            max_run_minutes: 60,
            scroll_mode: ScrollMode::Looping,
            dim_after_one_shot: true,
            rotate_180: false,
            lead_blanks: 16,
            trail_blanks: 13,
            banner_y: 2,
            banner_y_rotated: 8,
        }
    }
}

impl RenderConfig {
    pub fn max_run_ms(&self) -> u64 {
        u64::from(self.max_run_minutes) * 60 * 1000
    }
}

/// Connectivity loop, heartbeat and uptime timing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConnectivityConfig {
    /// Publish a status record at least this often
    pub status_interval_s: u32,
    /// Pause before restarting after a fatal transport error
    pub failure_backoff_s: u32,
    /// Upper bound of the random pause after each publish
    pub publish_jitter_s: u8,
    pub heartbeat_disconnected_ms: u32,
    pub heartbeat_link_up_ms: u32,
    pub heartbeat_operational_ms: u32,
    /// Uptime counter resolution
    pub uptime_tick_s: u32,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            status_interval_s: 1800,
            failure_backoff_s: 15,
            publish_jitter_s: 3,
            heartbeat_disconnected_ms: 250,
            heartbeat_link_up_ms: 1000,
            heartbeat_operational_ms: 3000,
            uptime_tick_s: 60,
        }
    }
}

/// Button polling and level steps
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    pub poll_interval_ms: u32,
    pub brightness_step: f32,
    pub volume_step: f32,
    pub default_brightness: f32,
    pub default_volume: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 200,
            brightness_step: 0.1,
            volume_step: 0.1,
            default_brightness: 0.5,
            default_volume: 1.0,
        }
    }
}

/// Notification chirp voice
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChirpConfig {
    pub enabled: bool,
    /// Tone sequence in Hz
    pub tones_hz: Vec<f32, MAX_CHIRP_TONES>,
    /// Length of each tone including its fade-out
    pub tone_ms: u32,
    /// Interval between vibrato/tremolo updates
    pub update_ms: u32,
    /// Random spread applied to each update interval (±)
    pub update_jitter_ms: u32,
    pub fade_steps: u8,
    pub fade_step_ms: u32,
    pub vibrato_hz: f32,
    pub vibrato_depth_hz: f32,
    pub tremolo_hz: f32,
}

impl Default for ChirpConfig {
    fn default() -> Self {
        let mut tones_hz = Vec::new();
        for tone in [523.25, 311.13, 392.0, 466.16] {
            // Capacity is larger than the default sequence
            let _ = tones_hz.push(tone);
        }

        Self {
            enabled: true,
            tones_hz,
            tone_ms: 200,
            update_ms: 10,
            update_jitter_ms: 2,
            fade_steps: 10,
            fade_step_ms: 5,
            vibrato_hz: 5.0,
            vibrato_depth_hz: 5.0,
            tremolo_hz: 3.0,
        }
    }
}
