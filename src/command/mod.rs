//! Serial command protocol.
//!
//! Framing ([`LineBuffer`]), parsing ([`Command`]) and execution
//! ([`StepperMotor::execute`](crate::StepperMotor::execute)) are kept apart so
//! the motion core never sees raw text.

mod blink;
mod dispatch;
mod line;
mod parser;

pub use blink::{blink, BLINK_COUNT};
pub use dispatch::Response;
pub use line::{CommandLine, LineBuffer, LineError, MAX_COMMAND_LENGTH};
pub use parser::Command;
