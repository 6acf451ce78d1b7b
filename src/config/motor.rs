//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motion::RampFactor;

use super::homing::HomingConfig;
use super::limits::SoftLimits;

/// Default velocity for rotate-to-home/lower/upper, in steps/sec.
pub const DEFAULT_HOMING_SPEED: u32 = 3_000;

/// Default STEP pulse width in microseconds.
pub const DEFAULT_PULSE_WIDTH_US: u32 = 5;

/// Default delay between writing DIR and the first pulse, in microseconds.
pub const DEFAULT_DIRECTION_SETUP_US: u32 = 10;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Start-up ramp factor (0-9).
    #[serde(default)]
    pub ramp: RampFactor,

    /// Velocity used by rotate-to-home/lower/upper, in steps/sec.
    #[serde(default = "default_homing_speed")]
    pub homing_speed: u32,

    /// STEP pulse width in microseconds.
    #[serde(default = "default_pulse_width")]
    pub pulse_width_us: u32,

    /// Delay between writing DIR and the first pulse of a leg.
    #[serde(default = "default_direction_setup")]
    pub direction_setup_us: u32,

    /// Optional soft limits.
    #[serde(default)]
    pub limits: Option<SoftLimits>,

    /// Homing sequence cadence.
    #[serde(default)]
    pub homing: HomingConfig,
}

fn default_homing_speed() -> u32 {
    DEFAULT_HOMING_SPEED
}

fn default_pulse_width() -> u32 {
    DEFAULT_PULSE_WIDTH_US
}

fn default_direction_setup() -> u32 {
    DEFAULT_DIRECTION_SETUP_US
}

impl MotorConfig {
    /// Configuration with every field at its default.
    pub fn named(name: &str) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            ramp: RampFactor::DEFAULT,
            homing_speed: DEFAULT_HOMING_SPEED,
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
            direction_setup_us: DEFAULT_DIRECTION_SETUP_US,
            limits: None,
            homing: HomingConfig::default(),
        }
    }

    /// Soft limits, or the unbounded defaults.
    pub fn soft_limits(&self) -> SoftLimits {
        self.limits.unwrap_or_default()
    }
}
