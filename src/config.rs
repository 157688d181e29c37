//! Controller configuration and its validating builder.

use crate::time::{DEBOUNCE_TICK_HZ, Millis, PWM_TICK_HZ};
use crate::types::Buttons;

/// Tunables for a [`crate::Controller`].
///
/// [`Config::DEFAULT`] reproduces the reference hardware: 8-bit software PWM,
/// one animation tick per three debounce ticks (about 40 Hz at 120 Hz
/// sampling), a one second watchdog, and `setup + down` as the reset chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Subframes per PWM period. Duties at or above this value stay fully on.
    pub pwm_steps: u16,

    /// Debounce ticks per animation tick.
    pub animation_divider: u8,

    /// Watchdog timeout armed when the reset chord is held.
    pub watchdog_timeout: Millis,

    /// Exact debounced state that starts the reset sequence.
    pub reset_combination: Buttons,

    /// Animation ticks spent in each half of the reset flash.
    pub flash_phase_ticks: u8,
}

impl Config {
    pub const DEFAULT: Self = Self {
        pwm_steps: 256,
        animation_divider: 3,
        watchdog_timeout: Millis::from_secs(1),
        reset_combination: Buttons::SETUP.union(Buttons::DOWN),
        flash_phase_ticks: 4,
    };

    /// Wall time between animation ticks at the reference debounce rate.
    pub const fn animation_period(&self) -> Millis {
        Millis::from_ticks(self.animation_divider as u32, DEBOUNCE_TICK_HZ)
    }

    /// Wall time of one white or black half of the reset flash.
    pub const fn flash_half_period(&self) -> Millis {
        Millis::from_ticks(
            self.animation_divider as u32 * self.flash_phase_ticks as u32,
            DEBOUNCE_TICK_HZ,
        )
    }

    /// Full PWM periods per second at the reference PWM tick rate.
    pub const fn pwm_frequency_hz(&self) -> u32 {
        if self.pwm_steps == 0 {
            return 0;
        }
        PWM_TICK_HZ / self.pwm_steps as u32
    }

    /// Flash half-periods shown before the watchdog restarts the device.
    pub const fn flashes_before_restart(&self) -> u32 {
        let half = self.flash_half_period().as_millis();
        if half == 0 {
            return 0;
        }
        self.watchdog_timeout.as_millis() / half
    }

    /// Starts a builder seeded with [`Config::DEFAULT`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// PWM period of zero subframes.
    ZeroPwmSteps,

    /// Animation divider of zero debounce ticks.
    ZeroAnimationDivider,

    /// Watchdog would fire immediately.
    ZeroWatchdogTimeout,

    /// Reset chord with no buttons would match an idle keypad.
    EmptyResetCombination,

    /// A zero-tick flash phase freezes on white instead of flashing.
    ZeroFlashPhaseTicks,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroPwmSteps => write!(f, "PWM period must have at least one step"),
            ConfigError::ZeroAnimationDivider => {
                write!(f, "animation divider must be at least one debounce tick")
            }
            ConfigError::ZeroWatchdogTimeout => write!(f, "watchdog timeout must be non-zero"),
            ConfigError::EmptyResetCombination => {
                write!(f, "reset combination must include at least one button")
            }
            ConfigError::ZeroFlashPhaseTicks => {
                write!(f, "reset flash phases must last at least one animation tick")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Builder for validated [`Config`] values.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::DEFAULT,
        }
    }

    pub fn pwm_steps(mut self, steps: u16) -> Self {
        self.config.pwm_steps = steps;
        self
    }

    pub fn animation_divider(mut self, divider: u8) -> Self {
        self.config.animation_divider = divider;
        self
    }

    pub fn watchdog_timeout(mut self, timeout: Millis) -> Self {
        self.config.watchdog_timeout = timeout;
        self
    }

    pub fn reset_combination(mut self, buttons: Buttons) -> Self {
        self.config.reset_combination = buttons;
        self
    }

    pub fn flash_phase_ticks(mut self, ticks: u8) -> Self {
        self.config.flash_phase_ticks = ticks;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    /// * `ZeroPwmSteps` - `pwm_steps` is zero
    /// * `ZeroAnimationDivider` - `animation_divider` is zero
    /// * `ZeroWatchdogTimeout` - `watchdog_timeout` is zero
    /// * `EmptyResetCombination` - `reset_combination` has no buttons
    /// * `ZeroFlashPhaseTicks` - `flash_phase_ticks` is zero
    pub fn build(self) -> Result<Config, ConfigError> {
        let config = self.config;
        if config.pwm_steps == 0 {
            return Err(ConfigError::ZeroPwmSteps);
        }
        if config.animation_divider == 0 {
            return Err(ConfigError::ZeroAnimationDivider);
        }
        if config.watchdog_timeout == Millis::ZERO {
            return Err(ConfigError::ZeroWatchdogTimeout);
        }
        if config.reset_combination.is_empty() {
            return Err(ConfigError::EmptyResetCombination);
        }
        if config.flash_phase_ticks == 0 {
            return Err(ConfigError::ZeroFlashPhaseTicks);
        }
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
