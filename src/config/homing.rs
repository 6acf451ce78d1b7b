//! Homing sequence timing.

use serde::Deserialize;

/// Cadence of the seek-and-back-off homing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HomingConfig {
    /// Interval between pulses while seeking the lower switch.
    pub seek_interval_us: u32,

    /// Interval between pulses while backing off the asserted switch.
    pub backoff_interval_us: u32,

    /// Extra steps issued after the switch releases.
    pub settle_steps: u8,

    /// Interval between settle pulses. Zero pulses on every poll.
    pub settle_interval_us: u32,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            seek_interval_us: 5_000,
            backoff_interval_us: 50_000,
            settle_steps: 10,
            settle_interval_us: 0,
        }
    }
}
