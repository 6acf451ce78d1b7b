//! Motor operating modes.
//!
//! ```text
//! Disabled ──Enable──▶ Enabled ──rotate──▶ Running ──done/limit──▶ Enabled
//!     ▲                   │ ▲                 │
//!     └──────Disable──────┘ └──Enable── EStopped ◀──EStop (any)
//! ```
//!
//! `Enable`, `Disable` and `EStop` are legal from every mode. Rotation is
//! only started from `Enabled` or `Running`, and only while the motor is homed.

/// Coarse operating mode of a motor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorMode {
    /// Driver released; the shaft can be turned by hand.
    #[default]
    Disabled,
    /// Driver energized and holding position.
    Enabled,
    /// Executing a rotation.
    Running,
    /// Emergency stopped; only `Enable` resumes.
    EStopped,
}

impl MotorMode {
    /// Get the mode name as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            MotorMode::Disabled => "Disabled",
            MotorMode::Enabled => "Enabled",
            MotorMode::Running => "Running",
            MotorMode::EStopped => "EStopped",
        }
    }

    /// `true` if a rotation may begin (or replace the current one) from this mode.
    #[inline]
    pub const fn can_rotate(self) -> bool {
        matches!(self, MotorMode::Enabled | MotorMode::Running)
    }
}

/// Outcome of one scheduler tick, surfaced to the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunStatus {
    /// Idle, or still moving.
    Okay,
    /// Reached the target position.
    RunComplete,
    /// Stopped: the next step would pass the lower soft limit.
    RangeErrorLower,
    /// Stopped: the next step would pass the upper soft limit.
    RangeErrorUpper,
    /// Stopped: the lower limit switch asserted.
    LimitSwitchLower,
    /// Stopped: the upper limit switch asserted.
    LimitSwitchUpper,
    /// The homing sequence finished and HOME was set.
    HomingComplete,
}

impl RunStatus {
    /// `true` for the four safety stops.
    #[inline]
    pub const fn is_fault(self) -> bool {
        matches!(
            self,
            RunStatus::RangeErrorLower
                | RunStatus::RangeErrorUpper
                | RunStatus::LimitSwitchLower
                | RunStatus::LimitSwitchUpper
        )
    }
}
