//! Ramp planning.
//!
//! Turns a move (current position, target position, peak velocity, ramp
//! factor) into a linear trapezoidal velocity plan expressed in whole steps.
//! When the distance is too short to reach the peak the plan degenerates to a
//! triangle whose ramp-up and ramp-down halves are each `distance / 2` steps.

use serde::Deserialize;

use crate::error::ConfigError;

/// Velocity delta per ramp unit, in steps/sec per step.
pub const RAMP_SCALE: u32 = 5;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (increasing position, DIR low).
    Clockwise,
    /// Counter-clockwise (decreasing position, DIR high).
    CounterClockwise,
}

impl Direction {
    /// Direction of travel from `current` to `target`. No travel counts as clockwise.
    #[inline]
    pub fn toward(current: i64, target: i64) -> Self {
        if target >= current {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// Level of the DIR signal for this direction (`true` = high).
    #[inline]
    pub fn dir_level(self) -> bool {
        matches!(self, Direction::CounterClockwise)
    }
}

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Accelerating from rest toward peak velocity.
    Accelerating,
    /// Moving at constant peak velocity.
    Cruising,
    /// Decelerating toward rest.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// Acceleration steepness dial, 0-9.
///
/// 0 disables ramping (full velocity from the first step), 1 is the steepest
/// ramp and 9 the gentlest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u8")]
pub struct RampFactor(u8);

impl RampFactor {
    /// No ramping.
    pub const NONE: Self = Self(0);
    /// Start-up default.
    pub const DEFAULT: Self = Self(5);
    /// Gentlest ramp.
    pub const MAX: Self = Self(9);

    /// Create a ramp factor, returning `None` outside 0-9.
    #[inline]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Per-step velocity delta for this factor.
    #[inline]
    pub const fn velocity_increment(self) -> u32 {
        if self.0 == 0 {
            0
        } else {
            RAMP_SCALE * (10 - self.0 as u32)
        }
    }
}

impl Default for RampFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for RampFactor {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ConfigError::InvalidRamp(value))
    }
}

/// Computed velocity plan for one leg of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampPlan {
    /// Requested peak velocity in steps/sec.
    pub max_velocity: u32,

    /// Steps in the leg (absolute value).
    pub total_steps: u64,

    /// Steps spent accelerating.
    pub ramp_steps: u64,

    /// Step count after which deceleration begins.
    pub ramp_down_step: u64,

    /// Velocity added or removed per ramp step.
    pub velocity_increment: u32,

    /// Velocity the leg starts at.
    pub initial_velocity: u32,

    /// Direction of travel.
    pub direction: Direction,
}

impl RampPlan {
    /// Plan a move from `current` to `target` peaking at `peak_velocity`.
    pub fn new(current: i64, target: i64, peak_velocity: u32, ramp: RampFactor) -> Self {
        let total_steps = target.abs_diff(current);
        let direction = Direction::toward(current, target);
        let velocity_increment = ramp.velocity_increment();

        let (mut ramp_steps, initial_velocity) = if velocity_increment == 0 {
            (0, peak_velocity)
        } else {
            let ramp_steps = u64::from(peak_velocity / velocity_increment);
            // A ramp of zero steps can't accelerate, so start at peak.
            let initial = if ramp_steps == 0 { peak_velocity } else { 0 };
            (ramp_steps, initial)
        };

        let ramp_down_step = if total_steps > 2 * ramp_steps {
            total_steps - ramp_steps
        } else {
            ramp_steps = total_steps / 2;
            ramp_steps
        };

        Self {
            max_velocity: peak_velocity,
            total_steps,
            ramp_steps,
            ramp_down_step,
            velocity_increment,
            initial_velocity,
            direction,
        }
    }

    /// Create a zero-length plan (no motion).
    pub fn zero() -> Self {
        Self {
            max_velocity: 0,
            total_steps: 0,
            ramp_steps: 0,
            ramp_down_step: 0,
            velocity_increment: 0,
            initial_velocity: 0,
            direction: Direction::Clockwise,
        }
    }

    /// Check if this is a zero-length plan.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.total_steps == 0
    }

    /// `true` when the distance is too short for a plateau at peak velocity.
    #[inline]
    pub fn is_triangle(&self) -> bool {
        self.ramp_down_step == self.ramp_steps
    }

    /// Steps held at constant velocity between the ramps.
    #[inline]
    pub fn plateau_steps(&self) -> u64 {
        self.ramp_down_step.saturating_sub(self.ramp_steps)
    }

    /// Steps spent decelerating.
    #[inline]
    pub fn ramp_down_steps(&self) -> u64 {
        self.total_steps - self.ramp_down_step
    }

    /// Get the phase once `steps_taken` steps of the leg have been issued.
    pub fn phase_at(&self, steps_taken: u64) -> MotionPhase {
        if steps_taken >= self.total_steps {
            MotionPhase::Complete
        } else if steps_taken < self.ramp_steps {
            MotionPhase::Accelerating
        } else if steps_taken < self.ramp_down_step {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Velocity after `steps_taken` steps, given the velocity before that step.
    ///
    /// Accelerates while `steps_taken <= ramp_steps`, decelerates once it
    /// exceeds `ramp_down_step`, and never drops below zero.
    #[inline]
    pub fn velocity_after(&self, steps_taken: u64, velocity: u32) -> u32 {
        if steps_taken <= self.ramp_steps {
            velocity.saturating_add(self.velocity_increment)
        } else if steps_taken > self.ramp_down_step {
            velocity.saturating_sub(self.velocity_increment)
        } else {
            velocity
        }
    }
}
