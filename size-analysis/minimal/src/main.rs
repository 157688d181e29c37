#![no_std]
#![no_main]

use core::hint::black_box;

use cortex_m_rt::entry;
use panic_halt as _;
use spi_rgb_controller::{
    ButtonInputs, Buttons, Config, Controller, LedPort, Millis, PortLevels, ResetLines,
    SpiResponder, Watchdog,
};

static CONTROLLER: Controller = Controller::new(Config::DEFAULT);

// ============================================================================
// No-op Board
// ============================================================================

/// Zero-size board implementation for measuring library overhead
pub struct MinimalBoard;

impl LedPort for MinimalBoard {
    fn write(&mut self, levels: PortLevels) {
        black_box(levels);
    }
}

impl ButtonInputs for MinimalBoard {
    fn sample(&mut self) -> Buttons {
        black_box(Buttons::NONE)
    }
}

impl SpiResponder for MinimalBoard {
    fn load(&mut self, byte: u8) {
        black_box(byte);
    }
}

impl ResetLines for MinimalBoard {
    fn enable_outputs(&mut self) {
        black_box(());
    }
}

pub struct MinimalWatchdog;

impl Watchdog for MinimalWatchdog {
    fn arm(&mut self, timeout: Millis) {
        black_box(timeout);
    }
}

// ============================================================================
// Entry Points
// ============================================================================

// Drives every entry point so the optimizer keeps the whole core
#[inline(never)]
fn exercise() {
    let mut board = MinimalBoard;
    let mut lines = MinimalBoard;
    let mut watchdog = MinimalWatchdog;

    CONTROLLER.on_debounce_tick(&mut board);
    let _ = CONTROLLER.on_spi_byte(black_box(0x8A), &mut board);
    CONTROLLER.on_pwm_tick(&mut board);
    black_box(CONTROLLER.poll(&mut lines, &mut watchdog));
    black_box(CONTROLLER.consume_press(Buttons::ALL));
}

#[entry]
fn main() -> ! {
    exercise();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
