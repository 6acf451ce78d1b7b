//! Line framing for the serial command stream.

use core::fmt;

/// Longest command line accepted by default, including room for the terminator.
pub const MAX_COMMAND_LENGTH: usize = 20;

/// Line buffer sized for the command protocol.
pub type CommandLine = LineBuffer<MAX_COMMAND_LENGTH>;

/// Framing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// More than `N - 1` characters before LF. The partial line is discarded.
    TooLong,
    /// Line was not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::TooLong => f.write_str("ERROR: Command is too long."),
            LineError::InvalidUtf8 => f.write_str("ERROR: Command is not text."),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LineError {}

/// Accumulates bytes into LF-terminated lines, ignoring CR.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    buf: heapless::Vec<u8, N>,
    complete: bool,
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            complete: false,
        }
    }

    /// Feed one byte.
    ///
    /// Returns the finished line on LF. The line stays borrowed until the
    /// next call, which starts a fresh one.
    pub fn push(&mut self, byte: u8) -> Option<Result<&str, LineError>> {
        if self.complete {
            self.buf.clear();
            self.complete = false;
        }

        match byte {
            b'\r' => None,
            b'\n' => {
                self.complete = true;
                Some(core::str::from_utf8(&self.buf).map_err(|_| LineError::InvalidUtf8))
            }
            _ if self.buf.len() + 1 < N => {
                // Capacity is N, so this cannot fail.
                let _ = self.buf.push(byte);
                None
            }
            _ => {
                self.buf.clear();
                Some(Err(LineError::TooLong))
            }
        }
    }

    /// Discard any partial line.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.complete = false;
    }
}
