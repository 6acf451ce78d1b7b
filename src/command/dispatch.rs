//! Command execution against a motor.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{CommandError, Error, MotorError, Result};
use crate::motor::{StepperMotor, VERSION};

use super::parser::Command;

/// Result of executing one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Accepted (or silently ignored); no reply text.
    Ack,
    /// Query result.
    Value(i64),
    /// Version string.
    Version(&'static str),
    /// Host should blink the LED on `pin` to identify this device.
    Blink {
        /// LED pin number.
        pin: u8,
    },
    /// Packet could not be parsed.
    Rejected(CommandError),
}

impl Response {
    /// `true` when the reply text is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Response::Ack | Response::Blink { .. })
    }

    /// Reply text as a fixed-capacity string.
    pub fn reply(&self) -> heapless::String<32> {
        let mut out = heapless::String::new();
        // Every variant fits in 32 bytes.
        let _ = write!(out, "{}", self);
        out
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ack | Response::Blink { .. } => Ok(()),
            Response::Value(v) => write!(f, "{}", v),
            Response::Version(v) => f.write_str(v),
            Response::Rejected(e) => f.write_str(e.as_str()),
        }
    }
}

impl<EN, DIR, STEP, DELAY, LL, UL> StepperMotor<EN, DIR, STEP, DELAY, LL, UL>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
    LL: InputPin,
    UL: InputPin,
{
    /// Execute a parsed command.
    ///
    /// `FindHome` starts the non-blocking homing sequence; keep calling
    /// [`tick`](Self::tick) to drive it. Rotations that are not allowed
    /// return the motor error.
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        match command {
            Command::EStop => self.estop()?,
            Command::Enable => self.enable()?,
            Command::Disable => self.disable()?,
            Command::FindHome => {
                self.start_homing()?;
            }
            Command::SetHome => {
                self.set_home_position();
            }
            Command::SetLowerLimit(limit) => {
                self.set_lower_limit(limit.into());
            }
            Command::SetUpperLimit(limit) => {
                self.set_upper_limit(limit.into());
            }
            Command::SetRamp(ramp) => self.set_ramp(ramp),
            Command::RotateAbsolute { velocity, position } => {
                self.rotate_absolute(position.into(), velocity.into())?
            }
            Command::RotateRelative { velocity, steps } => {
                self.rotate_relative(steps.into(), velocity.into())?
            }
            Command::RotateHome => self.rotate_to_home()?,
            Command::RotateLower => self.rotate_to_lower_limit()?,
            Command::RotateUpper => self.rotate_to_upper_limit()?,
            Command::GetAbsolute => return Ok(Response::Value(self.absolute_position())),
            Command::GetRelative => return Ok(Response::Value(self.relative_position())),
            Command::GetLower => return Ok(Response::Value(self.lower_limit())),
            Command::GetUpper => return Ok(Response::Value(self.upper_limit())),
            Command::GetTime => {
                let ms = i64::try_from(self.remaining_time_ms()).unwrap_or(i64::MAX);
                return Ok(Response::Value(ms));
            }
            Command::GetVersion => return Ok(Response::Version(VERSION)),
            Command::Blink { pin } => return Ok(Response::Blink { pin }),
        }

        Ok(Response::Ack)
    }

    /// Parse and execute one text packet.
    ///
    /// Parse failures become [`Response::Rejected`]. Rotations refused because
    /// the motor is not homed (or similar) are silently acknowledged, as the
    /// protocol has no reply for them. Only pin failures are returned as errors.
    pub fn execute_command(&mut self, packet: &str) -> Result<Response> {
        let command = match Command::parse(packet) {
            Ok(command) => command,
            Err(e) => {
                warn!("rejected command: {}", e.as_str());
                return Ok(Response::Rejected(e));
            }
        };

        match self.execute(command) {
            Err(Error::Motor(
                MotorError::NotHomed
                | MotorError::ZeroVelocity
                | MotorError::PositionOverflow
                | MotorError::InvalidState(_),
            )) => Ok(Response::Ack),
            other => other,
        }
    }
}
