//! Hardware seam.
//!
//! Implement these for your board (GPIO registers, SPI peripheral, watchdog)
//! to drive a [`crate::Controller`]. None of them can fail: handle hardware
//! errors inside the implementation.

use crate::time::Millis;
use crate::types::{Buttons, PortLevels};

/// The LED output port, written once per PWM subframe.
pub trait LedPort {
    /// Writes all port bits at once so channels never tear against each other.
    fn write(&mut self, levels: PortLevels);
}

/// Direction control for the auxiliary reset bits of the LED port.
pub trait ResetLines {
    /// Switches the [`PortLevels::RESET_LINES`] bits to outputs.
    ///
    /// [`LedPort::write`] always writes them low, so from this call on the
    /// external reset lines are held asserted.
    fn enable_outputs(&mut self);
}

/// The four button inputs.
pub trait ButtonInputs {
    /// Reads the raw lines; set bit = button closed (after any active-low
    /// inversion).
    fn sample(&mut self) -> Buttons;
}

/// The SPI slave transmit register.
pub trait SpiResponder {
    /// Loads the byte shifted out during the next transfer.
    fn load(&mut self, byte: u8);
}

/// Hardware watchdog that restarts the whole device.
pub trait Watchdog {
    /// Starts the watchdog with `timeout`. It is never fed afterwards.
    fn arm(&mut self, timeout: Millis);
}
