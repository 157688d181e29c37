//! Interrupt and main-loop entry points over shared component state.
//!
//! Provides [`Controller`], which owns every component behind
//! `critical_section::Mutex` cells so it can live in a `static` and be
//! driven from three interrupt handlers plus the foreground loop:
//!
//! | Context            | Entry point                        |
//! |--------------------|------------------------------------|
//! | PWM timer          | [`Controller::on_pwm_tick`]        |
//! | Debounce timer     | [`Controller::on_debounce_tick`]   |
//! | SPI byte received  | [`Controller::on_spi_byte`]        |
//! | Foreground loop    | [`Controller::poll`]               |
//!
//! Every multi-step update (press read-and-clear, buffer swap, reset
//! staging) happens inside one critical section.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

use crate::animation::Animator;
use crate::command::{Command, CommandSlots};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::hal::{ButtonInputs, LedPort, ResetLines, SpiResponder, Watchdog};
use crate::protocol::{ProtocolError, Received, Receiver};
use crate::pwm::PwmGenerator;
use crate::reset::{ResetSequencer, ResetState};
use crate::types::{Buttons, OFF, Rgb8};

/// What a call to [`Controller::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// Not enough debounce ticks have elapsed for an animation tick.
    Waiting,

    /// One animation tick ran and new duty was published.
    Animated,

    /// The device is resetting. Keep polling so the flash pattern animates;
    /// the watchdog will restart the device.
    Resetting,
}

/// The whole controller core.
///
/// `const`-constructible for use as a `static`:
///
/// ```ignore
/// static CONTROLLER: Controller = Controller::new(Config::DEFAULT);
/// ```
pub struct Controller {
    config: Config,
    debouncer: Mutex<RefCell<Debouncer>>,
    receiver: Mutex<RefCell<Receiver>>,
    slots: Mutex<RefCell<CommandSlots>>,
    animator: Mutex<RefCell<Animator>>,
    reset: Mutex<RefCell<ResetSequencer>>,
    pwm: Mutex<RefCell<PwmGenerator>>,
    duty: Mutex<Cell<Rgb8>>,
    ticks: Mutex<Cell<u8>>,
}

impl Controller {
    /// Power-on state: buttons released, both slots empty, LED dark.
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            debouncer: Mutex::new(RefCell::new(Debouncer::new())),
            receiver: Mutex::new(RefCell::new(Receiver::new())),
            slots: Mutex::new(RefCell::new(CommandSlots::new())),
            animator: Mutex::new(RefCell::new(Animator::new())),
            reset: Mutex::new(RefCell::new(ResetSequencer::new(
                config.reset_combination,
                config.flash_phase_ticks,
            ))),
            pwm: Mutex::new(RefCell::new(PwmGenerator::new(config.pwm_steps))),
            duty: Mutex::new(Cell::new(OFF)),
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// PWM timer interrupt: renders one subframe as a single port write.
    pub fn on_pwm_tick<P: LedPort>(&self, port: &mut P) {
        let levels = critical_section::with(|cs| {
            let duty = self.duty.borrow(cs).get();
            self.pwm.borrow(cs).borrow_mut().tick(duty)
        });
        port.write(levels);
    }

    /// Debounce timer interrupt: samples the buttons and counts one tick for
    /// the foreground loop.
    pub fn on_debounce_tick<B: ButtonInputs>(&self, inputs: &mut B) {
        let raw = inputs.sample();
        critical_section::with(|cs| {
            self.debouncer.borrow(cs).borrow_mut().sample(raw);
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().saturating_add(1));
        });
    }

    /// SPI byte-received interrupt.
    ///
    /// Loads the debounced button state as the next outbound byte, then
    /// feeds the inbound byte to the parser. Interrupt handlers can discard
    /// the result; the parser has already resynchronised on error.
    ///
    /// # Errors
    /// * `InvalidHeader` - framing error, the byte was discarded
    pub fn on_spi_byte<S: SpiResponder>(
        &self,
        byte: u8,
        spi: &mut S,
    ) -> Result<Received, ProtocolError> {
        let result = critical_section::with(|cs| {
            let status = self.debouncer.borrow(cs).borrow().state().status_byte();
            spi.load(status);

            let mut slots = self.slots.borrow(cs).borrow_mut();
            self.receiver.borrow(cs).borrow_mut().push(byte, &mut slots)
        });

        #[cfg(feature = "defmt")]
        if let Err(err) = &result {
            defmt::warn!("protocol resync: {}", err);
        }

        result
    }

    /// One pass of the foreground loop. Never blocks.
    ///
    /// Checks the reset chord, then runs an animation tick once every
    /// `animation_divider` debounce ticks. When the chord engages, the flash
    /// pattern is animated immediately rather than on the next due tick.
    pub fn poll<R: ResetLines, W: Watchdog>(&self, lines: &mut R, watchdog: &mut W) -> PollOutcome {
        let engaged = critical_section::with(|cs| {
            let debounced = self.debouncer.borrow(cs).borrow().state();
            let mut slots = self.slots.borrow(cs).borrow_mut();
            self.reset.borrow(cs).borrow_mut().observe(debounced, &mut slots)
        });

        if engaged {
            #[cfg(feature = "defmt")]
            defmt::info!(
                "reset chord held, watchdog armed for {=u32} ms ({=u32} flashes)",
                self.config.watchdog_timeout.as_millis(),
                self.config.flashes_before_restart()
            );
            lines.enable_outputs();
            watchdog.arm(self.config.watchdog_timeout);
        }

        let due = critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            let divider = self.config.animation_divider.max(1);
            if ticks.get() < divider {
                return false;
            }
            ticks.set(ticks.get() - divider);
            true
        });

        if due || engaged {
            let _swapped = critical_section::with(|cs| {
                let mut slots = self.slots.borrow(cs).borrow_mut();
                let frame = self.animator.borrow(cs).borrow_mut().tick(&mut slots);
                self.duty.borrow(cs).set(frame.duty);
                frame.swapped
            });

            #[cfg(feature = "defmt")]
            if _swapped {
                defmt::debug!("command swapped in: {}", self.active_command());
            }
        }

        if self.reset_state() == ResetState::Resetting {
            PollOutcome::Resetting
        } else if due {
            PollOutcome::Animated
        } else {
            PollOutcome::Waiting
        }
    }

    /// Current debounced button state.
    pub fn buttons(&self) -> Buttons {
        critical_section::with(|cs| self.debouncer.borrow(cs).borrow().state())
    }

    /// Returns the press edges selected by `mask` and clears them, atomically
    /// with respect to the debounce interrupt.
    pub fn consume_press(&self, mask: Buttons) -> Buttons {
        critical_section::with(|cs| self.debouncer.borrow(cs).borrow_mut().consume_press(mask))
    }

    /// Linear duty currently rendered by the PWM generator.
    pub fn duty(&self) -> Rgb8 {
        critical_section::with(|cs| self.duty.borrow(cs).get())
    }

    pub fn reset_state(&self) -> ResetState {
        critical_section::with(|cs| self.reset.borrow(cs).borrow().state())
    }

    /// The command being animated.
    pub fn active_command(&self) -> Command {
        critical_section::with(|cs| self.slots.borrow(cs).borrow().active())
    }

    /// Snapshot of the animation cursor.
    pub fn animator(&self) -> Animator {
        critical_section::with(|cs| *self.animator.borrow(cs).borrow())
    }

    /// Whether a received command is waiting for the next animation tick.
    pub fn command_pending(&self) -> bool {
        critical_section::with(|cs| self.slots.borrow(cs).borrow().is_ready())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Config::DEFAULT)
    }
}
