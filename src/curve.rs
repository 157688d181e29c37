//! Internal-to-linear brightness mapping.
//!
//! Channel levels are animated in a perceptual scale so that fades look even
//! to the eye. The PWM stage needs linear duty, so every level passes through
//! a three-segment piecewise curve: half slope below 128, unit slope up to
//! 192, double slope above. The breakpoints are fixed; output must match the
//! deployed hardware bit for bit.

use crate::types::Rgb8;

/// Maps one internal channel level to a linear duty value.
#[inline]
pub const fn to_linear(internal: u8) -> u8 {
    match internal {
        0..=127 => internal / 2,
        128..=191 => 64 + (internal - 128),
        _ => 128 + (internal - 192) * 2,
    }
}

/// [`to_linear`] for every input, for table lookups in tight loops.
pub const LINEAR_DUTY: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = to_linear(i as u8);
        i += 1;
    }
    table
};

/// Applies the curve to each channel.
#[inline]
pub fn linearize(internal: Rgb8) -> Rgb8 {
    Rgb8::new(
        LINEAR_DUTY[internal.red as usize],
        LINEAR_DUTY[internal.green as usize],
        LINEAR_DUTY[internal.blue as usize],
    )
}
