//! Position tracking for stepper motors.

/// Step-count ledger for one motor.
///
/// `absolute` counts steps from HOME, `delta` counts steps since the current
/// leg began, `target` is where the current leg ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionLedger {
    absolute: i64,
    delta: i64,
    target: i64,
}

impl PositionLedger {
    /// Create a ledger at HOME.
    #[inline]
    pub const fn new() -> Self {
        Self {
            absolute: 0,
            delta: 0,
            target: 0,
        }
    }

    /// Steps from HOME.
    #[inline]
    pub fn absolute(&self) -> i64 {
        self.absolute
    }

    /// Steps since the current leg began.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.delta
    }

    /// End position of the current leg.
    #[inline]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Steps issued in the current leg.
    #[inline]
    pub fn steps_taken(&self) -> u64 {
        self.delta.unsigned_abs()
    }

    /// Steps left to reach the target.
    #[inline]
    pub fn distance_to_target(&self) -> u64 {
        self.target.abs_diff(self.absolute)
    }

    /// `true` once the absolute position equals the target.
    #[inline]
    pub fn at_target(&self) -> bool {
        self.absolute == self.target
    }

    /// Begin a new leg toward `target`.
    #[inline]
    pub fn begin_leg(&mut self, target: i64) {
        self.target = target;
        self.delta = 0;
    }

    /// Record one step of `increment` (+1 or -1).
    #[inline]
    pub fn advance(&mut self, increment: i64) {
        self.absolute += increment;
        self.delta += increment;
    }

    /// Make the current position HOME.
    #[inline]
    pub fn set_home(&mut self) {
        self.absolute = 0;
        self.delta = 0;
    }

    /// Cancel the current goal by targeting where the motor is now.
    #[inline]
    pub fn snap_target(&mut self) {
        self.target = self.absolute;
    }
}
