//! Core value types shared by every component.

use palette::Srgb;

/// Three 8-bit channel values.
///
/// Used both for internal (perceptual) levels and for linear PWM duties; the
/// meaning depends on which side of [`crate::curve`] the value sits.
pub type Rgb8 = Srgb<u8>;

/// Black in either scale.
pub const OFF: Rgb8 = Rgb8::new(0, 0, 0);

/// Full intensity on every channel in the internal scale.
pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

/// Bitmask of the four logical buttons.
///
/// Bit layout matches the status byte sent to the host: bit0 main, bit1 up,
/// bit2 down, bit3 setup. A set bit means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Self = Buttons(0);
    pub const MAIN: Self = Buttons(1 << 0);
    pub const UP: Self = Buttons(1 << 1);
    pub const DOWN: Self = Buttons(1 << 2);
    pub const SETUP: Self = Buttons(1 << 3);
    pub const ALL: Self = Buttons(0x0F);

    /// Builds a mask from raw bits, dropping anything above the four buttons.
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Buttons(bits & Self::ALL.0)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Buttons(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Buttons(self.0 & other.0)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The byte echoed to the host for every received byte. Reserved bits are zero.
    #[inline]
    pub const fn status_byte(self) -> u8 {
        self.0 & Self::ALL.0
    }
}

impl core::ops::BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl core::ops::BitAnd for Buttons {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

/// Levels written to the LED port on every PWM subframe.
///
/// Bits 0-2 drive the color channels. Bits 3-4 are the auxiliary reset lines;
/// they are always written low and only reach the pins once the reset
/// sequencer has switched them to outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortLevels(u8);

impl PortLevels {
    pub const RED: u8 = 1 << 0;
    pub const GREEN: u8 = 1 << 1;
    pub const BLUE: u8 = 1 << 2;
    /// Port bits that become active-low reset outputs while resetting.
    pub const RESET_LINES: u8 = (1 << 3) | (1 << 4);

    #[inline]
    pub const fn from_channels(red: bool, green: bool, blue: bool) -> Self {
        let mut bits = 0;
        if red {
            bits |= Self::RED;
        }
        if green {
            bits |= Self::GREEN;
        }
        if blue {
            bits |= Self::BLUE;
        }
        PortLevels(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn red(self) -> bool {
        self.0 & Self::RED != 0
    }

    #[inline]
    pub const fn green(self) -> bool {
        self.0 & Self::GREEN != 0
    }

    #[inline]
    pub const fn blue(self) -> bool {
        self.0 & Self::BLUE != 0
    }
}

/// One of the two phases a command alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    #[default]
    First,
    Second,
}

impl Phase {
    /// The phase the animation switches to when this one's time runs out.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Phase::First => Phase::Second,
            Phase::Second => Phase::First,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Phase::First => 0,
            Phase::Second => 1,
        }
    }
}

/// Target color plus timing for one animation phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPhase {
    /// Target levels in the internal (perceptual) scale.
    pub color: Rgb8,

    /// Maximum per-tick change of each channel. Zero means unlimited.
    pub slew: u8,

    /// Animation ticks spent in this phase before switching. Zero freezes.
    pub time: u8,
}

impl ColorPhase {
    /// Encoded size of one phase on the wire.
    pub const LEN: usize = 5;

    /// Black, no slew limit, held forever.
    pub const BLACK: Self = Self::new(OFF, 0, 0);

    #[inline]
    pub const fn new(color: Rgb8, slew: u8, time: u8) -> Self {
        Self { color, slew, time }
    }

    /// Reads `[red, green, blue, slew, time]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self::new(Rgb8::new(bytes[0], bytes[1], bytes[2]), bytes[3], bytes[4])
    }

    #[inline]
    pub const fn to_bytes(&self) -> [u8; Self::LEN] {
        [
            self.color.red,
            self.color.green,
            self.color.blue,
            self.slew,
            self.time,
        ]
    }

    /// Slew actually applied per tick: zero is treated as a full-range jump.
    #[inline]
    pub const fn effective_slew(&self) -> u8 {
        if self.slew == 0 { u8::MAX } else { self.slew }
    }

    /// Whether the phase never hands over to the other one.
    #[inline]
    pub const fn is_frozen(&self) -> bool {
        self.time == 0
    }
}

impl Default for ColorPhase {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ColorPhase {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ColorPhase {{ color: ({=u8}, {=u8}, {=u8}), slew: {=u8}, time: {=u8} }}",
            self.color.red,
            self.color.green,
            self.color.blue,
            self.slew,
            self.time
        )
    }
}
