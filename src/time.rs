//! Tick rates and the millisecond duration handed to the watchdog.

/// Debounce timer rate in the reference hardware configuration.
pub const DEBOUNCE_TICK_HZ: u32 = 120;

/// Software PWM timer rate in the reference hardware configuration.
pub const PWM_TICK_HZ: u32 = 123_000;

/// A duration in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    pub const ZERO: Self = Millis(0);

    #[inline]
    pub const fn from_secs(secs: u32) -> Self {
        Millis(secs.saturating_mul(1000))
    }

    #[inline]
    pub const fn as_millis(&self) -> u32 {
        self.0
    }

    /// Wall time covered by `ticks` periods of a timer running at `hz`.
    ///
    /// Returns `ZERO` for a zero rate.
    #[inline]
    pub const fn from_ticks(ticks: u32, hz: u32) -> Self {
        if hz == 0 {
            return Self::ZERO;
        }
        Millis(((ticks as u64 * 1000) / hz as u64) as u32)
    }
}
