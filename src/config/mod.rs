//! Configuration module for digital-stepper.
//!
//! Provides types for loading and validating motor configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod homing;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod motor;
mod system;
mod validation;

pub use homing::HomingConfig;
pub use limits::{LimitGuard, LimitViolation, SoftLimits, DEFAULT_LOWER_LIMIT, DEFAULT_UPPER_LIMIT};
pub use motor::{
    MotorConfig, DEFAULT_DIRECTION_SETUP_US, DEFAULT_HOMING_SPEED, DEFAULT_PULSE_WIDTH_US,
};
pub use system::SystemConfig;
pub use validation::{validate_config, validate_motor};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
