//! Vertical-counter button debouncing.
//!
//! All four buttons are filtered in parallel: each bit position owns a
//! two-bit counter split across `count0` (low bit) and `count1` (high bit).
//! A sample that disagrees with the debounced state advances the counter; a
//! sample that agrees clears it. When the counter reaches two the debounced
//! bit flips and the counter restarts, so a level must be seen on two
//! consecutive ticks before it is reported.

use crate::types::Buttons;

/// Debounced button state plus pending press edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    state: u8,
    count0: u8,
    count1: u8,
    pressed: u8,
}

impl Debouncer {
    /// All buttons released, no pending edges.
    pub const fn new() -> Self {
        Self {
            state: 0,
            count0: 0,
            count1: 0,
            pressed: 0,
        }
    }

    /// Feeds one raw sample (set bit = button currently closed).
    pub fn sample(&mut self, raw: Buttons) {
        let disagree = (self.state ^ raw.bits()) & Buttons::ALL.bits();

        let count0 = !self.count0 & disagree;
        let count1 = (self.count1 ^ self.count0) & disagree;
        let flip = count1 & !count0;

        self.count0 = count0 & !flip;
        self.count1 = count1 & !flip;
        self.state ^= flip;
        self.pressed |= self.state & flip;
    }

    /// Current debounced state.
    #[inline]
    pub const fn state(&self) -> Buttons {
        Buttons::from_bits_truncate(self.state)
    }

    /// Press edges not yet consumed.
    #[inline]
    pub const fn pending_presses(&self) -> Buttons {
        Buttons::from_bits_truncate(self.pressed)
    }

    /// Returns the pending press edges selected by `mask` and clears them.
    ///
    /// Callers outside the debounce interrupt must hold a critical section;
    /// [`crate::Controller::consume_press`] does that.
    pub fn consume_press(&mut self, mask: Buttons) -> Buttons {
        let hit = self.pressed & mask.bits();
        self.pressed &= !hit;
        Buttons::from_bits_truncate(hit)
    }
}
