//! # digital-stepper
//!
//! Tick-driven controller for a single step/direction stepper driver, with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Non-blocking**: one STEP pulse at most per [`StepperMotor::tick`] call
//! - **Linear ramps**: trapezoid or triangle profiles from a 0-9 ramp factor
//! - **Safety**: HOME required before motion, inclusive soft limits, active-low limit switches, emergency stop
//! - **Homing**: limit-switch homing as a state machine driven by the same tick
//! - **Command protocol**: typed parser for the 2-letter serial protocol
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use digital_stepper::{RunStatus, StepperMotor};
//!
//! let config = digital_stepper::load_config("stepper.toml")?;
//!
//! let mut motor = StepperMotor::builder()
//!     .from_config(&config, "carriage")?
//!     .enable_pin(enable_pin)
//!     .dir_pin(dir_pin)
//!     .step_pin(step_pin)
//!     .delay(delay)
//!     .build()?;
//!
//! motor.enable()?;
//! motor.rotate_absolute(2000, 500)?;
//! while motor.tick(clock.now_us())? == RunStatus::Okay {}
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod command;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use command::{Command, LineBuffer, Response};
pub use config::{validate_config, HomingConfig, MotorConfig, SoftLimits, SystemConfig};
pub use error::{CommandError, ConfigError, Error, MotorError, Result};
pub use motion::{Direction, MotionPhase, RampFactor, RampPlan};
pub use motor::{MotorMode, NoSwitch, RunStatus, StepperMotor, StepperMotorBuilder, VERSION};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
