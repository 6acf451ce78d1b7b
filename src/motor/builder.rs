//! Builder pattern for StepperMotor.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{validate_motor, HomingConfig, MotorConfig, SoftLimits, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::RampFactor;

use super::driver::StepperMotor;
use super::switch::NoSwitch;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<EN, DIR, STEP, DELAY, LL = NoSwitch, UL = NoSwitch>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
    LL: InputPin,
    UL: InputPin,
{
    enable_pin: Option<EN>,
    dir_pin: Option<DIR>,
    step_pin: Option<STEP>,
    delay: Option<DELAY>,
    lower_switch: Option<LL>,
    upper_switch: Option<UL>,
    config: MotorConfig,
}

impl<EN, DIR, STEP, DELAY> Default for StepperMotorBuilder<EN, DIR, STEP, DELAY>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<EN, DIR, STEP, DELAY> StepperMotorBuilder<EN, DIR, STEP, DELAY>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder with no limit switches.
    pub fn new() -> Self {
        Self {
            enable_pin: None,
            dir_pin: None,
            step_pin: None,
            delay: None,
            lower_switch: None,
            upper_switch: None,
            config: MotorConfig::named("motor"),
        }
    }
}

impl<EN, DIR, STEP, DELAY> StepperMotor<EN, DIR, STEP, DELAY>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
{
    /// Start building a motor.
    pub fn builder() -> StepperMotorBuilder<EN, DIR, STEP, DELAY> {
        StepperMotorBuilder::new()
    }
}

impl<EN, DIR, STEP, DELAY, LL, UL> StepperMotorBuilder<EN, DIR, STEP, DELAY, LL, UL>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: OutputPin,
    DELAY: DelayNs,
    LL: InputPin,
    UL: InputPin,
{
    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fit a lower limit switch (active low).
    pub fn lower_switch<P: InputPin>(self, pin: P) -> StepperMotorBuilder<EN, DIR, STEP, DELAY, P, UL> {
        StepperMotorBuilder {
            enable_pin: self.enable_pin,
            dir_pin: self.dir_pin,
            step_pin: self.step_pin,
            delay: self.delay,
            lower_switch: Some(pin),
            upper_switch: self.upper_switch,
            config: self.config,
        }
    }

    /// Fit an upper limit switch (active low).
    pub fn upper_switch<P: InputPin>(self, pin: P) -> StepperMotorBuilder<EN, DIR, STEP, DELAY, LL, P> {
        StepperMotorBuilder {
            enable_pin: self.enable_pin,
            dir_pin: self.dir_pin,
            step_pin: self.step_pin,
            delay: self.delay,
            lower_switch: self.lower_switch,
            upper_switch: Some(pin),
            config: self.config,
        }
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        if let Ok(name) = heapless::String::try_from(name) {
            self.config.name = name;
        }
        self
    }

    /// Set the start-up ramp factor.
    pub fn ramp(mut self, ramp: RampFactor) -> Self {
        self.config.ramp = ramp;
        self
    }

    /// Set soft limits.
    pub fn limits(mut self, limits: SoftLimits) -> Self {
        self.config.limits = Some(limits);
        self
    }

    /// Set the velocity used by rotate-to-home/lower/upper.
    pub fn homing_speed(mut self, steps_per_sec: u32) -> Self {
        self.config.homing_speed = steps_per_sec;
        self
    }

    /// Set the STEP pulse width.
    pub fn pulse_width_us(mut self, us: u32) -> Self {
        self.config.pulse_width_us = us;
        self
    }

    /// Set the delay between DIR and the first pulse of a leg.
    pub fn direction_setup_us(mut self, us: u32) -> Self {
        self.config.direction_setup_us = us;
        self
    }

    /// Set the homing cadence.
    pub fn homing(mut self, homing: HomingConfig) -> Self {
        self.config.homing = homing;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config
            .motor(motor_name)
            .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(
                heapless::String::try_from(motor_name).unwrap_or_default(),
            )))?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the StepperMotor.
    ///
    /// The motor starts disabled and un-homed with ENABLE high, DIR low and
    /// STEP low.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the delay is missing, the settings fail
    /// validation, or an initial pin write fails.
    pub fn build(self) -> Result<StepperMotor<EN, DIR, STEP, DELAY, LL, UL>> {
        let enable_pin = self
            .enable_pin
            .ok_or(ConfigError::MissingResource("enable_pin"))?;
        let dir_pin = self.dir_pin.ok_or(ConfigError::MissingResource("dir_pin"))?;
        let step_pin = self.step_pin.ok_or(ConfigError::MissingResource("step_pin"))?;
        let delay = self.delay.ok_or(ConfigError::MissingResource("delay"))?;

        validate_motor(&self.config)?;

        StepperMotor::new(
            enable_pin,
            dir_pin,
            step_pin,
            delay,
            self.lower_switch,
            self.upper_switch,
            &self.config,
        )
    }
}
