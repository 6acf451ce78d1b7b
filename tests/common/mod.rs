//! Simulated test bench shared by the integration tests.
//!
//! The three output pins and the limit switches share one state, so a STEP
//! pulse moves a simulated shaft in the direction the DIR line selects and
//! the switches trip at fixed shaft positions. This lets long tick loops run
//! without scripting every pin transaction.

#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use digital_stepper::{RunStatus, StepperMotor, StepperMotorBuilder};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, OutputPin};

/// Simulated time advanced per tick.
pub const TICK_US: u64 = 50;

/// Give up after this many ticks.
pub const MAX_TICKS: u32 = 10_000_000;

#[derive(Default)]
struct BenchState {
    enable: Cell<bool>,
    dir: Cell<bool>,
    step: Cell<bool>,
    pulses: Cell<u32>,
    shaft: Cell<i64>,
    lower_at: Cell<Option<i64>>,
    upper_at: Cell<Option<i64>>,
    step_release_fails: Cell<bool>,
}

/// Error raised by a bench pin wired to fail.
#[derive(Debug)]
pub struct BenchFault;

impl Error for BenchFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Shared bench state.
#[derive(Clone, Default)]
pub struct Bench {
    state: Rc<BenchState>,
}

#[derive(Clone, Copy)]
enum Line {
    Enable,
    Dir,
    Step,
}

/// Output pin wired into the bench.
pub struct BenchPin {
    bench: Bench,
    line: Line,
}

/// Active-low limit switch wired into the bench.
pub struct BenchSwitch {
    bench: Bench,
    lower: bool,
}

/// Delay that returns at once.
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_pin(&self) -> BenchPin {
        BenchPin { bench: self.clone(), line: Line::Enable }
    }

    pub fn dir_pin(&self) -> BenchPin {
        BenchPin { bench: self.clone(), line: Line::Dir }
    }

    pub fn step_pin(&self) -> BenchPin {
        BenchPin { bench: self.clone(), line: Line::Step }
    }

    pub fn lower_switch(&self, trips_at: i64) -> BenchSwitch {
        self.state.lower_at.set(Some(trips_at));
        BenchSwitch { bench: self.clone(), lower: true }
    }

    pub fn upper_switch(&self, trips_at: i64) -> BenchSwitch {
        self.state.upper_at.set(Some(trips_at));
        BenchSwitch { bench: self.clone(), lower: false }
    }

    /// `true` when the ENABLE line is high (driver released).
    pub fn enable_high(&self) -> bool {
        self.state.enable.get()
    }

    pub fn dir_high(&self) -> bool {
        self.state.dir.get()
    }

    pub fn step_high(&self) -> bool {
        self.state.step.get()
    }

    /// Make every following STEP release (set low) fail.
    pub fn fail_step_release(&self) {
        self.state.step_release_fails.set(true);
    }

    pub fn pulses(&self) -> u32 {
        self.state.pulses.get()
    }

    pub fn shaft(&self) -> i64 {
        self.state.shaft.get()
    }

    /// Builder with all outputs and the delay wired in.
    pub fn builder(&self) -> StepperMotorBuilder<BenchPin, BenchPin, BenchPin, NoopDelay> {
        StepperMotor::builder()
            .enable_pin(self.enable_pin())
            .dir_pin(self.dir_pin())
            .step_pin(self.step_pin())
            .delay(NoopDelay)
    }
}

impl ErrorType for BenchPin {
    type Error = BenchFault;
}

impl OutputPin for BenchPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let state = &self.bench.state;
        match self.line {
            Line::Enable => state.enable.set(false),
            Line::Dir => state.dir.set(false),
            Line::Step => {
                if state.step_release_fails.get() {
                    return Err(BenchFault);
                }
                state.step.set(false);
            }
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let state = &self.bench.state;
        match self.line {
            Line::Enable => state.enable.set(true),
            Line::Dir => state.dir.set(true),
            Line::Step => {
                if !state.step.get() {
                    state.pulses.set(state.pulses.get() + 1);
                    let increment = if state.dir.get() { -1 } else { 1 };
                    state.shaft.set(state.shaft.get() + increment);
                }
                state.step.set(true);
            }
        }
        Ok(())
    }
}

impl ErrorType for BenchSwitch {
    type Error = Infallible;
}

impl InputPin for BenchSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let state = &self.bench.state;
        let shaft = state.shaft.get();
        let pressed = if self.lower {
            state.lower_at.get().is_some_and(|at| shaft <= at)
        } else {
            state.upper_at.get().is_some_and(|at| shaft >= at)
        };
        Ok(pressed)
    }
}

/// Tick until the motor reports something other than `Okay`.
pub fn run_until_stopped<EN, DIR, STEP, DELAY, LL, UL>(
    motor: &mut StepperMotor<EN, DIR, STEP, DELAY, LL, UL>,
    clock: &mut u64,
) -> RunStatus
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
    LL: InputPin,
    UL: InputPin,
{
    for _ in 0..MAX_TICKS {
        *clock += TICK_US;
        let status = motor.tick(*clock).unwrap();
        if status != RunStatus::Okay {
            return status;
        }
    }
    panic!("motor did not stop within {} ticks", MAX_TICKS);
}

/// Tick until `done` holds, returning the status of the last tick.
pub fn run_until<EN, DIR, STEP, DELAY, LL, UL>(
    motor: &mut StepperMotor<EN, DIR, STEP, DELAY, LL, UL>,
    clock: &mut u64,
    mut done: impl FnMut(&StepperMotor<EN, DIR, STEP, DELAY, LL, UL>) -> bool,
) where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
    LL: InputPin,
    UL: InputPin,
{
    for _ in 0..MAX_TICKS {
        if done(motor) {
            return;
        }
        *clock += TICK_US;
        assert_eq!(motor.tick(*clock).unwrap(), RunStatus::Okay);
    }
    panic!("condition not reached within {} ticks", MAX_TICKS);
}
