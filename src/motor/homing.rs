//! Non-blocking homing sequence.
//!
//! Seeks counter-clockwise until the lower limit switch asserts, backs off
//! clockwise until it releases, then issues a few settle steps. The
//! controller only decides what to do; the driver owns the pins.

use crate::config::HomingConfig;
use crate::motion::Direction;

/// Phase of the homing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingPhase {
    /// Not homing.
    #[default]
    Idle,
    /// Stepping toward the lower switch.
    SeekingSwitch,
    /// Stepping away from the asserted switch.
    BackingOff,
    /// Extra steps past the release point.
    Settling {
        /// Steps left to issue.
        remaining: u8,
    },
}

/// What the driver should do after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingAction {
    /// Nothing due yet, or not homing.
    Wait,
    /// Issue one pulse in this direction.
    Step(Direction),
    /// Sequence finished; establish HOME here.
    Done,
}

/// Homing state machine, advanced once per tick.
#[derive(Debug, Clone)]
pub struct HomingController {
    config: HomingConfig,
    phase: HomingPhase,
    next_at_us: Option<u64>,
}

impl HomingController {
    /// Create an idle controller.
    pub fn new(config: HomingConfig) -> Self {
        Self {
            config,
            phase: HomingPhase::Idle,
            next_at_us: None,
        }
    }

    /// Begin seeking. The first pulse is due on the next poll.
    pub fn start(&mut self) {
        self.phase = HomingPhase::SeekingSwitch;
        self.next_at_us = None;
    }

    /// Abandon the sequence.
    pub fn cancel(&mut self) {
        self.phase = HomingPhase::Idle;
        self.next_at_us = None;
    }

    /// `true` while a sequence is in progress.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != HomingPhase::Idle
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> HomingPhase {
        self.phase
    }

    /// Time the next action is due, if armed.
    #[inline]
    pub fn next_at_us(&self) -> Option<u64> {
        self.next_at_us
    }

    /// Advance the sequence. `switch_asserted` is the lower switch state now.
    pub fn poll(&mut self, now_us: u64, switch_asserted: bool) -> HomingAction {
        if !self.is_active() {
            return HomingAction::Wait;
        }
        if let Some(at) = self.next_at_us {
            if now_us < at {
                return HomingAction::Wait;
            }
        }

        loop {
            match self.phase {
                HomingPhase::Idle => return HomingAction::Wait,
                HomingPhase::SeekingSwitch => {
                    if switch_asserted {
                        debug!("homing: switch found, backing off");
                        self.phase = HomingPhase::BackingOff;
                        continue;
                    }
                    self.next_at_us = Some(now_us + u64::from(self.config.seek_interval_us));
                    return HomingAction::Step(Direction::CounterClockwise);
                }
                HomingPhase::BackingOff => {
                    if !switch_asserted {
                        debug!("homing: switch released, settling");
                        self.phase = HomingPhase::Settling {
                            remaining: self.config.settle_steps,
                        };
                        continue;
                    }
                    self.next_at_us = Some(now_us + u64::from(self.config.backoff_interval_us));
                    return HomingAction::Step(Direction::Clockwise);
                }
                HomingPhase::Settling { remaining: 0 } => {
                    self.cancel();
                    return HomingAction::Done;
                }
                HomingPhase::Settling { remaining } => {
                    self.phase = HomingPhase::Settling {
                        remaining: remaining - 1,
                    };
                    self.next_at_us = Some(now_us + u64::from(self.config.settle_interval_us));
                    return HomingAction::Step(Direction::Clockwise);
                }
            }
        }
    }
}
