//! Error types for digital-stepper.
//!
//! Provides unified error handling across configuration, motor control, and the command protocol.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all digital-stepper operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Command protocol error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Ramp factor outside 0-9
    InvalidRamp(u8),
    /// Soft limits must satisfy lower <= 0 <= upper
    InvalidSoftLimits {
        /// Lower limit in steps
        lower: i64,
        /// Upper limit in steps
        upper: i64,
    },
    /// Homing speed must be > 0
    InvalidHomingSpeed(u32),
    /// Step pulse width must be > 0
    InvalidPulseWidth(u32),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// A required pin or delay was not supplied to the builder
    MissingResource(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Motor has no established HOME position
    NotHomed,
    /// Rotation requested with a velocity of zero
    ZeroVelocity,
    /// Relative rotation target outside the position range
    PositionOverflow,
    /// Motor is in wrong state for requested operation
    InvalidState(&'static str),
}

/// Command protocol errors.
///
/// The `Display` text is the exact reply string sent back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Packet too short or a numeric field failed to parse
    BadCommand,
    /// Opcode not recognised
    UnknownCommand,
    /// `SL`/`SU` without a value
    MissingLimitValue,
    /// `SR` without exactly one digit
    MissingRampValue,
}

impl CommandError {
    /// Protocol reply text for this error.
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandError::BadCommand => "Bad command",
            CommandError::UnknownCommand => "Unknown command",
            CommandError::MissingLimitValue => "Missing limit value",
            CommandError::MissingRampValue => "Missing ramp value 0-9",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidRamp(v) => write!(f, "Invalid ramp factor: {}. Must be 0-9", v),
            ConfigError::InvalidSoftLimits { lower, upper } => {
                write!(f, "Invalid soft limits: lower ({}) must be <= 0 <= upper ({})", lower, upper)
            }
            ConfigError::InvalidHomingSpeed(v) => write!(f, "Invalid homing speed: {}. Must be > 0", v),
            ConfigError::InvalidPulseWidth(v) => write!(f, "Invalid pulse width: {}us. Must be > 0", v),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::MissingResource(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::NotHomed => write!(f, "Motor has no HOME position"),
            MotorError::ZeroVelocity => write!(f, "Velocity must be at least 1 step/s"),
            MotorError::PositionOverflow => write!(f, "Target position out of range"),
            MotorError::InvalidState(state) => write!(f, "Invalid motor state: {}", state),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
