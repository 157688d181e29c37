//! Software PWM for the three color channels.

use crate::types::{PortLevels, Rgb8};

/// Wrapping subframe counter.
///
/// Each call to [`PwmGenerator::tick`] renders one subframe: a channel is on
/// while the counter is below its duty. The counter wraps every `steps`
/// subframes, so with the default 256 steps a duty of `d` lights the channel
/// for `d/256` of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmGenerator {
    index: u16,
    steps: u16,
}

impl PwmGenerator {
    /// Creates a generator with `steps` subframes per period (at least one).
    pub const fn new(steps: u16) -> Self {
        Self {
            index: 0,
            steps: if steps == 0 { 1 } else { steps },
        }
    }

    #[inline]
    pub const fn index(&self) -> u16 {
        self.index
    }

    #[inline]
    pub const fn steps(&self) -> u16 {
        self.steps
    }

    /// Renders the current subframe for `duty` and advances the counter.
    pub fn tick(&mut self, duty: Rgb8) -> PortLevels {
        let levels = render(self.index, duty);
        self.index += 1;
        if self.index >= self.steps {
            self.index = 0;
        }
        levels
    }
}

/// Port levels for subframe `index`: channel on iff `index < duty`.
#[inline]
pub const fn render(index: u16, duty: Rgb8) -> PortLevels {
    PortLevels::from_channels(
        index < duty.red as u16,
        index < duty.green as u16,
        index < duty.blue as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_count(steps: u16, duty: Rgb8) -> (u16, u16, u16) {
        let mut pwm = PwmGenerator::new(steps);
        let (mut r, mut g, mut b) = (0, 0, 0);
        for _ in 0..steps {
            let levels = pwm.tick(duty);
            r += levels.red() as u16;
            g += levels.green() as u16;
            b += levels.blue() as u16;
        }
        (r, g, b)
    }

    #[test]
    fn duty_sets_on_time() {
        assert_eq!(on_count(256, Rgb8::new(0, 128, 255)), (0, 128, 255));
    }

    #[test]
    fn counter_wraps_at_steps() {
        let mut pwm = PwmGenerator::new(4);
        for _ in 0..4 {
            pwm.tick(Rgb8::new(0, 0, 0));
        }
        assert_eq!(pwm.index(), 0);
    }

    #[test]
    fn short_period_saturates() {
        assert_eq!(on_count(100, Rgb8::new(200, 50, 0)), (100, 50, 0));
    }

    #[test]
    fn zero_steps_clamped() {
        assert_eq!(PwmGenerator::new(0).steps(), 1);
    }

    #[test]
    fn reset_bits_are_never_driven_high() {
        for index in 0..256 {
            let levels = render(index, Rgb8::new(255, 255, 255));
            assert_eq!(levels.bits() & PortLevels::RESET_LINES, 0);
        }
    }
}
