//! Step timing.
//!
//! Tracks the runtime velocity of the current leg and the monotonic time at
//! which the next pulse may be issued. The scheduler never sleeps: callers
//! poll [`StepScheduler::is_due`] and only pulse when it returns `true`.
//!
//! Step periods are `1_000_000 / velocity` in integer microseconds, so each
//! period truncates by up to 1us. Over a long move the accumulated timing is
//! slightly faster than the nominal velocity; this is a known approximation.

use super::profile::{MotionPhase, RampPlan};

/// Runtime velocity state for one leg of motion.
#[derive(Debug, Clone)]
pub struct StepScheduler {
    /// The plan being executed.
    plan: RampPlan,

    /// Current velocity in steps/sec.
    velocity: u32,

    /// Time of the next permitted pulse. `None` until the first poll arms it.
    next_step_us: Option<u64>,

    /// Delay between the first poll of a leg and its first pulse.
    setup_us: u32,
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::idle()
    }
}

impl StepScheduler {
    /// A scheduler with nothing to do.
    pub fn idle() -> Self {
        Self {
            plan: RampPlan::zero(),
            velocity: 0,
            next_step_us: None,
            setup_us: 0,
        }
    }

    /// Start a new leg.
    ///
    /// The first pulse becomes due `setup_us` after the next call to
    /// [`is_due`](Self::is_due), giving the driver time to latch DIR.
    pub fn start(plan: RampPlan, setup_us: u32) -> Self {
        Self {
            velocity: plan.initial_velocity,
            plan,
            next_step_us: None,
            setup_us,
        }
    }

    /// Check whether a pulse may be issued at `now_us`.
    pub fn is_due(&mut self, now_us: u64) -> bool {
        match self.next_step_us {
            Some(at) => now_us >= at,
            None => {
                self.next_step_us = Some(now_us + u64::from(self.setup_us));
                false
            }
        }
    }

    /// Account for a pulse just issued, leaving `steps_taken` steps done in this leg.
    ///
    /// Adjusts velocity per the plan and pushes the next due time out by one
    /// period. A zero velocity schedules nothing, so the next poll is due
    /// immediately.
    pub fn on_step(&mut self, steps_taken: u64) {
        self.velocity = self.plan.velocity_after(steps_taken, self.velocity);

        if self.velocity > 0 {
            let period = u64::from(1_000_000 / self.velocity);
            if let Some(at) = self.next_step_us.as_mut() {
                *at += period;
            }
        }
    }

    /// The plan being executed.
    #[inline]
    pub fn plan(&self) -> &RampPlan {
        &self.plan
    }

    /// Current velocity in steps/sec.
    #[inline]
    pub fn velocity(&self) -> u32 {
        self.velocity
    }

    /// Time of the next permitted pulse, if armed.
    #[inline]
    pub fn next_step_us(&self) -> Option<u64> {
        self.next_step_us
    }

    /// Phase of the leg once `steps_taken` steps have been issued.
    #[inline]
    pub fn phase(&self, steps_taken: u64) -> MotionPhase {
        self.plan.phase_at(steps_taken)
    }
}
