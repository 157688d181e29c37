//! Button-chord triggered reset of the device and its downstream hardware.

use crate::command::{Command, CommandSlots};
use crate::types::Buttons;

/// Reset sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetState {
    /// Normal operation.
    #[default]
    Normal,

    /// Flash pattern showing, reset lines held, watchdog armed. Left only by
    /// the watchdog restarting the device.
    Resetting,
}

/// Watches the debounced state for the reserved chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetSequencer {
    state: ResetState,
    combination: Buttons,
    flash_ticks: u8,
}

impl ResetSequencer {
    /// `flash_ticks` below one is raised to one so the pattern always
    /// alternates.
    pub const fn new(combination: Buttons, flash_ticks: u8) -> Self {
        Self {
            state: ResetState::Normal,
            combination,
            flash_ticks: if flash_ticks == 0 { 1 } else { flash_ticks },
        }
    }

    #[inline]
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Checks `debounced` against the chord.
    ///
    /// On the first exact match, stages the flash pattern into the inactive
    /// slot, locks command reception and returns `true`. The caller must then
    /// enable the reset lines and arm the watchdog, in that order. Returns
    /// `false` otherwise, including on every call after the transition.
    pub fn observe(&mut self, debounced: Buttons, slots: &mut CommandSlots) -> bool {
        if self.state == ResetState::Resetting || debounced != self.combination {
            return false;
        }

        slots.stage(&Command::flash(self.flash_ticks));
        slots.lock();
        self.state = ResetState::Resetting;
        true
    }
}
