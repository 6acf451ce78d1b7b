//! Motor module for digital-stepper.
//!
//! Provides the stepper motor driver, its operating modes, position ledger
//! and homing sequence.

mod builder;
mod driver;
mod homing;
mod position;
mod state;
mod switch;

pub use builder::StepperMotorBuilder;
pub use driver::{StepperMotor, VERSION};
pub use homing::{HomingAction, HomingController, HomingPhase};
pub use position::PositionLedger;
pub use state::{MotorMode, RunStatus};
pub use switch::NoSwitch;
