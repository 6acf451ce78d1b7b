//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin types. All motion is cooperative: the
//! host loop calls [`StepperMotor::tick`] as often as it can with a monotonic
//! microsecond timestamp, and each call issues at most one STEP pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{LimitGuard, LimitViolation, MotorConfig};
use crate::error::{MotorError, Result};
use crate::motion::{Direction, MotionPhase, RampFactor, RampPlan, StepScheduler};

use super::homing::{HomingAction, HomingController, HomingPhase};
use super::position::PositionLedger;
use super::state::{MotorMode, RunStatus};
use super::switch::NoSwitch;

/// Version string reported by the `GV` query.
pub const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Stepper motor driver.
///
/// Generic over:
/// - `EN`: ENABLE pin (active low)
/// - `DIR`: DIR pin (low = clockwise / increasing position)
/// - `STEP`: STEP pin (active-high pulse)
/// - `DELAY`: Delay provider for the pulse width
/// - `LL`, `UL`: lower/upper limit switch inputs (active low), [`NoSwitch`] when absent
pub struct StepperMotor<EN, DIR, STEP, DELAY, LL = NoSwitch, UL = NoSwitch>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
    LL: InputPin,
    UL: InputPin,
{
    /// ENABLE pin.
    enable_pin: EN,

    /// DIR pin.
    dir_pin: DIR,

    /// STEP pin.
    step_pin: STEP,

    /// Delay provider for pulse timing.
    delay: DELAY,

    /// Lower limit switch, if fitted.
    lower_switch: Option<LL>,

    /// Upper limit switch, if fitted.
    upper_switch: Option<UL>,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Operating mode.
    mode: MotorMode,

    /// Whether the ledger is referenced to a trusted HOME.
    homed: bool,

    /// Step positions.
    ledger: PositionLedger,

    /// Soft limits.
    limits: LimitGuard,

    /// Ramp applied to new rotations.
    ramp: RampFactor,

    /// Timing of the current leg.
    scheduler: StepScheduler,

    /// Homing sequence.
    homing: HomingController,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Velocity for rotate-to-home/lower/upper.
    homing_speed: u32,

    /// STEP pulse width in microseconds.
    pulse_width_us: u32,

    /// Delay between DIR and the first pulse of a leg.
    direction_setup_us: u32,
}

impl<EN, DIR, STEP, DELAY, LL, UL> StepperMotor<EN, DIR, STEP, DELAY, LL, UL>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
    LL: InputPin,
    UL: InputPin,
{
    /// Create a disabled, un-homed motor and drive the outputs to idle levels.
    pub(crate) fn new(
        enable_pin: EN,
        dir_pin: DIR,
        step_pin: STEP,
        delay: DELAY,
        lower_switch: Option<LL>,
        upper_switch: Option<UL>,
        config: &MotorConfig,
    ) -> Result<Self> {
        let mut motor = Self {
            enable_pin,
            dir_pin,
            step_pin,
            delay,
            lower_switch,
            upper_switch,
            name: config.name.clone(),
            mode: MotorMode::Disabled,
            homed: false,
            ledger: PositionLedger::new(),
            limits: LimitGuard::from_soft_limits(&config.soft_limits()),
            ramp: config.ramp,
            scheduler: StepScheduler::idle(),
            homing: HomingController::new(config.homing),
            current_direction: None,
            homing_speed: config.homing_speed,
            pulse_width_us: config.pulse_width_us,
            direction_setup_us: config.direction_setup_us,
        };

        motor.enable_pin.set_high().map_err(|_| MotorError::PinError)?;
        motor.set_direction(Direction::Clockwise)?;
        motor.step_pin.set_low().map_err(|_| MotorError::PinError)?;

        Ok(motor)
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current operating mode.
    #[inline]
    pub fn mode(&self) -> MotorMode {
        self.mode
    }

    /// `true` once HOME has been established and not since lost.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// `true` while the homing sequence is running.
    #[inline]
    pub fn is_homing(&self) -> bool {
        self.homing.is_active()
    }

    /// Current homing phase.
    #[inline]
    pub fn homing_phase(&self) -> HomingPhase {
        self.homing.phase()
    }

    /// Steps from HOME.
    #[inline]
    pub fn absolute_position(&self) -> i64 {
        self.ledger.absolute()
    }

    /// Steps since the last rotation began.
    #[inline]
    pub fn relative_position(&self) -> i64 {
        self.ledger.delta()
    }

    /// End position of the current (or last) rotation.
    #[inline]
    pub fn target_position(&self) -> i64 {
        self.ledger.target()
    }

    /// Lower soft limit.
    #[inline]
    pub fn lower_limit(&self) -> i64 {
        self.limits.lower()
    }

    /// Upper soft limit.
    #[inline]
    pub fn upper_limit(&self) -> i64 {
        self.limits.upper()
    }

    /// Ramp applied to new rotations.
    #[inline]
    pub fn ramp(&self) -> RampFactor {
        self.ramp
    }

    /// Current velocity in steps/sec.
    #[inline]
    pub fn velocity(&self) -> u32 {
        self.scheduler.velocity()
    }

    /// Plan of the current (or last) rotation.
    #[inline]
    pub fn plan(&self) -> &RampPlan {
        self.scheduler.plan()
    }

    /// Phase of the current rotation.
    pub fn phase(&self) -> MotionPhase {
        if self.mode == MotorMode::Running {
            self.scheduler.phase(self.ledger.steps_taken())
        } else {
            MotionPhase::Complete
        }
    }

    /// Estimated milliseconds until the current rotation completes.
    ///
    /// Zero unless running. Adds a flat 500ms for ramping; not a deadline.
    pub fn remaining_time_ms(&self) -> u64 {
        let max_velocity = u64::from(self.scheduler.plan().max_velocity);
        if self.mode != MotorMode::Running || max_velocity == 0 {
            return 0;
        }

        (self
            .ledger
            .distance_to_target()
            .saturating_mul(1000)
            / max_velocity)
            .saturating_add(500)
    }

    /// Crate name and version.
    #[inline]
    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// Energize the driver and make the current position HOME.
    pub fn enable(&mut self) -> Result<()> {
        self.homing.cancel();
        self.enable_pin.set_low().map_err(|_| MotorError::PinError)?;
        self.mode = MotorMode::Enabled;
        self.set_home_position();
        info!("enabled, home set");
        Ok(())
    }

    /// Release the driver. HOME is lost since the shaft is now free.
    pub fn disable(&mut self) -> Result<()> {
        self.homing.cancel();
        self.mode = MotorMode::Disabled;
        self.homed = false;
        self.enable_pin.set_high().map_err(|_| MotorError::PinError)?;
        info!("disabled");
        Ok(())
    }

    /// Emergency stop: release the driver at once, no deceleration.
    ///
    /// State changes are applied before touching the pins, so the motor is
    /// stopped even if a pin write fails.
    pub fn estop(&mut self) -> Result<()> {
        self.homing.cancel();
        self.mode = MotorMode::EStopped;
        self.homed = false;
        self.ledger.snap_target();
        self.scheduler = StepScheduler::idle();

        let step = self.step_pin.set_low();
        let enable = self.enable_pin.set_high();
        warn!("emergency stop at {}", self.ledger.absolute());

        step.map_err(|_| MotorError::PinError)?;
        enable.map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    /// Make the current position HOME. Only effective while `Enabled`.
    pub fn set_home_position(&mut self) -> bool {
        if self.mode != MotorMode::Enabled {
            return false;
        }
        self.ledger.set_home();
        self.homed = true;
        true
    }

    /// Set the lower soft limit. Ignored unless `<= 0` and `<=` the upper limit.
    pub fn set_lower_limit(&mut self, lower: i64) -> bool {
        self.limits.set_lower(lower)
    }

    /// Set the upper soft limit. Ignored unless `>= 0` and `>=` the lower limit.
    pub fn set_upper_limit(&mut self, upper: i64) -> bool {
        self.limits.set_upper(upper)
    }

    /// Set the ramp used by subsequent rotations.
    pub fn set_ramp(&mut self, ramp: RampFactor) {
        self.ramp = ramp;
    }

    /// Rotate to an absolute position at up to `velocity` steps/sec.
    pub fn rotate_absolute(&mut self, target: i64, velocity: u32) -> Result<()> {
        self.begin_rotation(target, velocity)
    }

    /// Rotate `steps` from the current position. Zero steps does nothing.
    ///
    /// A target past the `i64` range is rejected with
    /// [`MotorError::PositionOverflow`].
    pub fn rotate_relative(&mut self, steps: i64, velocity: u32) -> Result<()> {
        if steps == 0 {
            return Ok(());
        }
        let target = self
            .ledger
            .absolute()
            .checked_add(steps)
            .ok_or(MotorError::PositionOverflow)?;
        self.begin_rotation(target, velocity)
    }

    /// Rotate to HOME at the homing speed.
    pub fn rotate_to_home(&mut self) -> Result<()> {
        self.begin_rotation(0, self.homing_speed)
    }

    /// Rotate to the lower soft limit at the homing speed.
    pub fn rotate_to_lower_limit(&mut self) -> Result<()> {
        self.begin_rotation(self.limits.lower(), self.homing_speed)
    }

    /// Rotate to the upper soft limit at the homing speed.
    pub fn rotate_to_upper_limit(&mut self) -> Result<()> {
        self.begin_rotation(self.limits.upper(), self.homing_speed)
    }

    /// Start a new leg from wherever the motor is now.
    ///
    /// Replaces any leg in progress; the new plan ramps from the current
    /// position rather than the old start point.
    fn begin_rotation(&mut self, target: i64, velocity: u32) -> Result<()> {
        if !self.homed {
            debug!("rotation rejected: not homed");
            return Err(MotorError::NotHomed.into());
        }
        if !self.mode.can_rotate() {
            return Err(MotorError::InvalidState(self.mode.name()).into());
        }
        if velocity == 0 {
            return Err(MotorError::ZeroVelocity.into());
        }

        self.homing.cancel();

        let plan = RampPlan::new(self.ledger.absolute(), target, velocity, self.ramp);
        self.set_direction(plan.direction)?;
        self.ledger.begin_leg(target);
        self.scheduler = StepScheduler::start(plan, self.direction_setup_us);
        self.mode = MotorMode::Running;

        debug!(
            "rotate to {} at {} steps/s: {} steps, ramp {} / plateau {}",
            target,
            velocity,
            plan.total_steps,
            plan.ramp_steps,
            plan.plateau_steps()
        );
        Ok(())
    }

    /// Advance motion by at most one step.
    ///
    /// Must be called repeatedly with a monotonic microsecond clock and no
    /// blocking in between. Returns [`RunStatus::Okay`] while idle or moving
    /// and a distinct status whenever motion ends. A pin error leaves the
    /// mode unchanged; the host decides whether to [`estop`](Self::estop).
    pub fn tick(&mut self, now_us: u64) -> Result<RunStatus> {
        if self.homing.is_active() {
            return self.tick_homing(now_us);
        }

        if self.mode != MotorMode::Running || !self.homed {
            return Ok(RunStatus::Okay);
        }

        if !self.scheduler.is_due(now_us) {
            return Ok(RunStatus::Okay);
        }

        if self.ledger.at_target() {
            self.mode = MotorMode::Enabled;
            info!("run complete at {}", self.ledger.absolute());
            return Ok(RunStatus::RunComplete);
        }

        let increment = self.scheduler.plan().direction.sign();
        let next = self.ledger.absolute() + increment;

        if let Some(violation) = self.limits.check(next) {
            self.mode = MotorMode::Enabled;
            warn!("range limit reached at {}", self.ledger.absolute());
            return Ok(match violation {
                LimitViolation::Lower => RunStatus::RangeErrorLower,
                LimitViolation::Upper => RunStatus::RangeErrorUpper,
            });
        }

        self.pulse(increment)?;

        if Self::switch_asserted(&mut self.lower_switch)? {
            self.mode = MotorMode::Enabled;
            warn!("lower limit switch at {}", self.ledger.absolute());
            return Ok(RunStatus::LimitSwitchLower);
        }

        if Self::switch_asserted(&mut self.upper_switch)? {
            self.mode = MotorMode::Enabled;
            warn!("upper limit switch at {}", self.ledger.absolute());
            return Ok(RunStatus::LimitSwitchUpper);
        }

        self.scheduler.on_step(self.ledger.steps_taken());
        Ok(RunStatus::Okay)
    }

    /// Begin the non-blocking homing sequence.
    ///
    /// Enables the driver and seeks the lower limit switch on subsequent
    /// ticks. Returns `false` (doing nothing) if no lower switch is fitted.
    pub fn start_homing(&mut self) -> Result<bool> {
        if self.lower_switch.is_none() {
            debug!("homing skipped: no lower switch");
            return Ok(false);
        }

        self.enable()?;
        self.set_direction(Direction::CounterClockwise)?;
        self.homing.start();
        info!("homing started");
        Ok(true)
    }

    /// Run the homing sequence to completion, blocking on the motor's delay.
    ///
    /// Blocks until the lower switch is found and released, so it must only be
    /// used on request, never from the polling loop. Returns `false` if no
    /// lower switch is fitted.
    pub fn find_home(&mut self) -> Result<bool> {
        if !self.start_homing()? {
            return Ok(false);
        }

        let mut now_us = 0u64;
        loop {
            if self.tick(now_us)? == RunStatus::HomingComplete {
                return Ok(true);
            }
            if !self.homing.is_active() {
                return Ok(false);
            }

            let wait = self
                .homing
                .next_at_us()
                .map_or(0, |at| at.saturating_sub(now_us));
            if wait > 0 {
                self.delay.delay_us(u32::try_from(wait).unwrap_or(u32::MAX));
                now_us += wait;
            }
        }
    }

    fn tick_homing(&mut self, now_us: u64) -> Result<RunStatus> {
        let asserted = Self::switch_asserted(&mut self.lower_switch)?;

        match self.homing.poll(now_us, asserted) {
            HomingAction::Wait => Ok(RunStatus::Okay),
            HomingAction::Step(direction) => {
                self.set_direction(direction)?;
                self.pulse(direction.sign())?;
                Ok(RunStatus::Okay)
            }
            HomingAction::Done => {
                self.set_home_position();
                info!("homing complete");
                Ok(RunStatus::HomingComplete)
            }
        }
    }

    // The step is counted once the rising edge is out, even if releasing
    // STEP then fails.
    fn pulse(&mut self, increment: i64) -> Result<()> {
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.ledger.advance(increment);
        self.delay.delay_us(self.pulse_width_us);
        self.step_pin.set_low().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        if direction.dir_level() {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    // Switches are active-low with pull-ups.
    fn switch_asserted<P: InputPin>(switch: &mut Option<P>) -> Result<bool> {
        match switch {
            Some(pin) => pin.is_low().map_err(|_| MotorError::PinError.into()),
            None => Ok(false),
        }
    }
}
