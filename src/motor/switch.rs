//! Placeholder for an absent limit switch.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

/// Input type used when no limit switch is fitted.
///
/// The driver never polls an absent switch; this type only fills the generic
/// parameter. If read, it reports released (high, since switches are active-low).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSwitch;

impl ErrorType for NoSwitch {
    type Error = Infallible;
}

impl InputPin for NoSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}
