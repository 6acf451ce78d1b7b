//! Text command parsing.
//!
//! Packets are a 2-letter opcode followed by an opcode-specific payload with
//! no separators:
//!
//! ```text
//! RA vvvv ±sssssssss
//! │   │       └── target position / step count (decimal, optional sign)
//! │   └────────── velocity, exactly 4 chars, space padded ("500 ", "0050")
//! └────────────── opcode
//! ```
//!
//! Each packet is validated once here; execution only sees typed values.

use crate::error::CommandError;
use crate::motion::RampFactor;

/// A parsed protocol command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `ES`
    EStop,
    /// `EN`
    Enable,
    /// `DI`
    Disable,
    /// `FH`
    FindHome,
    /// `SH`
    SetHome,
    /// `SL<int>`
    SetLowerLimit(i32),
    /// `SU<int>`
    SetUpperLimit(i32),
    /// `SR<0-9>`
    SetRamp(RampFactor),
    /// `RA<vvvv><int>`
    RotateAbsolute {
        /// Peak velocity in steps/sec.
        velocity: u16,
        /// Absolute target position.
        position: i32,
    },
    /// `RR<vvvv><int>`
    RotateRelative {
        /// Peak velocity in steps/sec.
        velocity: u16,
        /// Signed step count.
        steps: i32,
    },
    /// `RH`
    RotateHome,
    /// `RL`
    RotateLower,
    /// `RU`
    RotateUpper,
    /// `GA`
    GetAbsolute,
    /// `GR`
    GetRelative,
    /// `GL`
    GetLower,
    /// `GU`
    GetUpper,
    /// `GT`
    GetTime,
    /// `GV`
    GetVersion,
    /// `BL<pin>`
    Blink {
        /// LED pin number.
        pin: u8,
    },
}

/// Width of the velocity field in rotate commands.
const VELOCITY_WIDTH: usize = 4;

/// Shortest valid rotate packet: opcode, velocity field, one digit.
const MIN_ROTATE_LEN: usize = 2 + VELOCITY_WIDTH + 1;

impl Command {
    /// Parse one packet (without line terminator; trailing whitespace is ignored).
    pub fn parse(packet: &str) -> Result<Self, CommandError> {
        let packet = packet.trim_end();
        if packet.len() < 2 {
            return Err(CommandError::BadCommand);
        }
        let opcode = packet.get(..2).ok_or(CommandError::BadCommand)?;
        let payload = &packet[2..];

        let command = match opcode {
            "ES" => Command::EStop,
            "EN" => Command::Enable,
            "DI" => Command::Disable,
            "FH" => Command::FindHome,
            "SH" => Command::SetHome,
            "SL" => Command::SetLowerLimit(parse_limit(payload)?),
            "SU" => Command::SetUpperLimit(parse_limit(payload)?),
            "SR" => Command::SetRamp(parse_ramp(payload)?),
            "RA" => {
                let (velocity, position) = parse_rotation(packet, payload)?;
                Command::RotateAbsolute { velocity, position }
            }
            "RR" => {
                let (velocity, steps) = parse_rotation(packet, payload)?;
                Command::RotateRelative { velocity, steps }
            }
            "RH" => Command::RotateHome,
            "RL" => Command::RotateLower,
            "RU" => Command::RotateUpper,
            "GA" => Command::GetAbsolute,
            "GR" => Command::GetRelative,
            "GL" => Command::GetLower,
            "GU" => Command::GetUpper,
            "GT" => Command::GetTime,
            "GV" => Command::GetVersion,
            "BL" => Command::Blink {
                pin: payload.trim().parse().map_err(|_| CommandError::BadCommand)?,
            },
            _ => return Err(CommandError::UnknownCommand),
        };

        Ok(command)
    }
}

fn parse_limit(payload: &str) -> Result<i32, CommandError> {
    if payload.is_empty() {
        return Err(CommandError::MissingLimitValue);
    }
    payload.trim().parse().map_err(|_| CommandError::BadCommand)
}

fn parse_ramp(payload: &str) -> Result<RampFactor, CommandError> {
    match payload.as_bytes() {
        [digit @ b'0'..=b'9'] => RampFactor::new(digit - b'0').ok_or(CommandError::MissingRampValue),
        _ => Err(CommandError::MissingRampValue),
    }
}

fn parse_rotation(packet: &str, payload: &str) -> Result<(u16, i32), CommandError> {
    if packet.len() < MIN_ROTATE_LEN {
        return Err(CommandError::BadCommand);
    }
    let velocity_field = payload.get(..VELOCITY_WIDTH).ok_or(CommandError::BadCommand)?;
    let velocity: u16 = velocity_field
        .trim()
        .parse()
        .map_err(|_| CommandError::BadCommand)?;
    if velocity == 0 {
        return Err(CommandError::BadCommand);
    }

    let position = payload[VELOCITY_WIDTH..]
        .trim()
        .parse()
        .map_err(|_| CommandError::BadCommand)?;

    Ok((velocity, position))
}
