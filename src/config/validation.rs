//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Soft limits satisfy lower <= 0 <= upper
/// - Homing speed is positive
/// - Step pulse width is positive
///
/// Ramp factors are range-checked while deserializing.
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }

    Ok(())
}

/// Validate a single motor configuration.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    if let Some(ref limits) = config.limits {
        if !limits.is_valid() {
            return Err(Error::Config(ConfigError::InvalidSoftLimits {
                lower: limits.lower,
                upper: limits.upper,
            }));
        }
    }

    if config.homing_speed == 0 {
        return Err(Error::Config(ConfigError::InvalidHomingSpeed(
            config.homing_speed,
        )));
    }

    if config.pulse_width_us == 0 {
        return Err(Error::Config(ConfigError::InvalidPulseWidth(
            config.pulse_width_us,
        )));
    }

    Ok(())
}
