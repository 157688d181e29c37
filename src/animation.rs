//! Slew-limited two-phase animation.
//!
//! Provides [`Animator`], which walks the current color toward the active
//! phase's target on every animation tick and hands the result to the PWM
//! stage as linear duty.

use crate::command::{Command, CommandSlots};
use crate::curve;
use crate::types::{OFF, Phase, Rgb8};

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Linear duty to publish to the PWM generator.
    pub duty: Rgb8,

    /// Whether a new command was swapped in at the start of this tick.
    pub swapped: bool,
}

/// Animation cursor: which phase is running, how long it has run, and where
/// each channel currently sits in the internal scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    phase: Phase,
    ticks_in_phase: u8,
    current: Rgb8,
}

impl Animator {
    /// Phase 0, no elapsed ticks, all channels dark.
    pub const fn new() -> Self {
        Self {
            phase: Phase::First,
            ticks_in_phase: 0,
            current: OFF,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn ticks_in_phase(&self) -> u8 {
        self.ticks_in_phase
    }

    /// Current channel levels in the internal scale.
    #[inline]
    pub fn current(&self) -> Rgb8 {
        self.current
    }

    /// Runs one animation tick against the slot pair.
    ///
    /// A ready command is swapped in first so it animates from this very
    /// tick. Swapping restarts the phase cursor but keeps the current color,
    /// so the new command fades in from wherever the old one left off.
    pub fn tick(&mut self, slots: &mut CommandSlots) -> Frame {
        let swapped = slots.take_ready().is_some();
        if swapped {
            self.phase = Phase::First;
            self.ticks_in_phase = 0;
        }

        let duty = self.step(&slots.active());
        Frame { duty, swapped }
    }

    /// Advances toward `command`'s active phase and returns linear duty.
    pub fn step(&mut self, command: &Command) -> Rgb8 {
        let phase = command.phase(self.phase);
        let slew = phase.effective_slew();
        let target = phase.color;

        self.current = Rgb8::new(
            approach(self.current.red, target.red, slew),
            approach(self.current.green, target.green, slew),
            approach(self.current.blue, target.blue, slew),
        );

        if !phase.is_frozen() {
            self.ticks_in_phase = self.ticks_in_phase.saturating_add(1);
            if self.ticks_in_phase >= phase.time {
                self.ticks_in_phase = 0;
                self.phase = self.phase.other();
            }
        }

        curve::linearize(self.current)
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Animator {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Animator {{ phase: {}, ticks: {=u8}, current: ({=u8}, {=u8}, {=u8}) }}",
            self.phase,
            self.ticks_in_phase,
            self.current.red,
            self.current.green,
            self.current.blue
        )
    }
}

/// Moves `current` toward `target` by at most `slew`, never past it.
#[inline]
pub const fn approach(current: u8, target: u8, slew: u8) -> u8 {
    if target > current {
        let gap = target - current;
        current + if slew < gap { slew } else { gap }
    } else {
        let gap = current - target;
        current - if slew < gap { slew } else { gap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorPhase, WHITE};

    #[test]
    fn approach_clamps_at_target() {
        assert_eq!(approach(0, 10, 4), 4);
        assert_eq!(approach(8, 10, 4), 10);
        assert_eq!(approach(10, 0, 4), 6);
        assert_eq!(approach(2, 0, 4), 0);
        assert_eq!(approach(5, 5, 255), 5);
        assert_eq!(approach(0, 255, 255), 255);
    }

    #[test]
    fn zero_slew_jumps_in_one_tick() {
        let mut animator = Animator::new();
        let command = Command::new(ColorPhase::new(Rgb8::new(200, 0, 255), 0, 0), ColorPhase::BLACK);
        let duty = animator.step(&command);
        assert_eq!(animator.current(), Rgb8::new(200, 0, 255));
        assert_eq!(duty, Rgb8::new(144, 0, 254));
    }

    #[test]
    fn slew_limits_per_tick_change() {
        let mut animator = Animator::new();
        let command = Command::new(ColorPhase::new(WHITE, 100, 0), ColorPhase::BLACK);
        animator.step(&command);
        assert_eq!(animator.current(), Rgb8::new(100, 100, 100));
        animator.step(&command);
        assert_eq!(animator.current(), Rgb8::new(200, 200, 200));
        animator.step(&command);
        assert_eq!(animator.current(), WHITE);
    }

    #[test]
    fn frozen_phase_never_advances() {
        let mut animator = Animator::new();
        let command = Command::new(ColorPhase::new(WHITE, 0, 0), ColorPhase::BLACK);
        for _ in 0..1000 {
            animator.step(&command);
        }
        assert_eq!(animator.phase(), Phase::First);
        assert_eq!(animator.ticks_in_phase(), 0);
    }

    #[test]
    fn timed_phases_alternate_without_reset() {
        let mut animator = Animator::new();
        let command = Command::new(
            ColorPhase::new(Rgb8::new(100, 0, 0), 0, 2),
            ColorPhase::new(Rgb8::new(0, 0, 0), 30, 2),
        );

        animator.step(&command);
        assert_eq!(animator.phase(), Phase::First);
        animator.step(&command);
        assert_eq!(animator.phase(), Phase::Second);

        // Second phase ramps down from the level reached, not from zero.
        animator.step(&command);
        assert_eq!(animator.current().red, 70);
        animator.step(&command);
        assert_eq!(animator.current().red, 40);
        assert_eq!(animator.phase(), Phase::First);
    }

    #[test]
    fn tick_swaps_before_stepping() {
        let mut slots = CommandSlots::new();
        let mut animator = Animator::new();
        slots.stage(&Command::new(ColorPhase::new(WHITE, 0, 0), ColorPhase::BLACK));

        let frame = animator.tick(&mut slots);
        assert!(frame.swapped);
        assert_eq!(frame.duty, Rgb8::new(254, 254, 254));

        let frame = animator.tick(&mut slots);
        assert!(!frame.swapped);
    }

    #[test]
    fn swap_restarts_cursor_but_keeps_color() {
        let mut slots = CommandSlots::new();
        let mut animator = Animator::new();
        slots.stage(&Command::new(ColorPhase::new(WHITE, 0, 1), ColorPhase::BLACK));
        animator.tick(&mut slots);
        assert_eq!(animator.phase(), Phase::Second);

        slots.stage(&Command::new(ColorPhase::new(OFF, 5, 0), ColorPhase::BLACK));
        animator.tick(&mut slots);
        assert_eq!(animator.phase(), Phase::First);
        assert_eq!(animator.current(), Rgb8::new(250, 250, 250));
    }

    #[test]
    fn empty_slots_animate_to_black() {
        let mut slots = CommandSlots::new();
        let mut animator = Animator::new();
        let frame = animator.tick(&mut slots);
        assert_eq!(frame.duty, OFF);
        assert_eq!(animator.phase(), Phase::First);
    }
}
