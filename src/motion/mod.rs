//! Motion module for digital-stepper.
//!
//! Provides ramp planning and tick-driven step timing.

mod profile;
mod scheduler;

pub use profile::{Direction, MotionPhase, RampFactor, RampPlan, RAMP_SCALE};
pub use scheduler::StepScheduler;
