//! Soft limit configuration and the runtime limit guard.

use serde::Deserialize;

/// Default lower soft limit when none is configured.
pub const DEFAULT_LOWER_LIMIT: i64 = -2_000_000_000;

/// Default upper soft limit when none is configured.
pub const DEFAULT_UPPER_LIMIT: i64 = 2_000_000_000;

/// Soft limits in steps from HOME (from configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SoftLimits {
    /// Minimum allowed absolute position. Must be <= 0.
    pub lower: i64,

    /// Maximum allowed absolute position. Must be >= 0.
    pub upper: i64,
}

impl SoftLimits {
    /// Create new soft limits.
    pub fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    /// Check if limits are valid (lower <= 0 <= upper).
    pub fn is_valid(&self) -> bool {
        self.lower <= 0 && self.upper >= 0
    }
}

impl Default for SoftLimits {
    fn default() -> Self {
        Self::new(DEFAULT_LOWER_LIMIT, DEFAULT_UPPER_LIMIT)
    }
}

/// Which soft limit a step would cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitViolation {
    /// Position would drop below the lower limit.
    Lower,
    /// Position would rise above the upper limit.
    Upper,
}

/// Runtime soft limits.
///
/// Both bounds are inclusive: a step may land exactly on a limit but never
/// beyond it. Setters keep `lower <= 0 <= upper` and `lower <= upper`,
/// ignoring any value that would break them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitGuard {
    lower: i64,
    upper: i64,
}

impl Default for LimitGuard {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl LimitGuard {
    /// Guard with the default, effectively unbounded range.
    pub const fn unbounded() -> Self {
        Self {
            lower: DEFAULT_LOWER_LIMIT,
            upper: DEFAULT_UPPER_LIMIT,
        }
    }

    /// Guard from configured soft limits. Invalid bounds are ignored.
    pub fn from_soft_limits(limits: &SoftLimits) -> Self {
        let mut guard = Self::unbounded();
        guard.set_upper(limits.upper);
        guard.set_lower(limits.lower);
        guard
    }

    /// Lower limit in steps.
    #[inline]
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Upper limit in steps.
    #[inline]
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Set the lower limit. Returns `false` (and keeps the old bound) unless
    /// `lower <= 0` and `lower <= upper`.
    pub fn set_lower(&mut self, lower: i64) -> bool {
        if lower <= 0 && lower <= self.upper {
            self.lower = lower;
            true
        } else {
            false
        }
    }

    /// Set the upper limit. Returns `false` (and keeps the old bound) unless
    /// `upper >= 0` and `upper >= lower`.
    pub fn set_upper(&mut self, upper: i64) -> bool {
        if upper >= 0 && upper >= self.lower {
            self.upper = upper;
            true
        } else {
            false
        }
    }

    /// Check a proposed next position.
    #[inline]
    pub fn check(&self, next: i64) -> Option<LimitViolation> {
        if next < self.lower {
            Some(LimitViolation::Lower)
        } else if next > self.upper {
            Some(LimitViolation::Upper)
        } else {
            None
        }
    }
}
