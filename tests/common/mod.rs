//! Shared test infrastructure for spi-rgb-controller integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use spi_rgb_controller::{
    ButtonInputs, Controller, LedPort, Millis, PollOutcome, PortLevels, ProtocolError, Received,
    ResetLines, SpiResponder, Watchdog,
};

// ============================================================================
// Mock Board
// ============================================================================

/// Mock board: button lines, SPI transmit register and LED port in one place
pub struct MockBoard {
    pub raw: spi_rgb_controller::Buttons,
    pub outbound: heapless::Vec<u8, 64>,
    pub port: PortLevels,
    pub port_writes: usize,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            raw: spi_rgb_controller::Buttons::NONE,
            outbound: heapless::Vec::new(),
            port: PortLevels::default(),
            port_writes: 0,
        }
    }

    pub fn last_outbound(&self) -> Option<u8> {
        self.outbound.last().copied()
    }
}

impl ButtonInputs for MockBoard {
    fn sample(&mut self) -> spi_rgb_controller::Buttons {
        self.raw
    }
}

impl SpiResponder for MockBoard {
    fn load(&mut self, byte: u8) {
        if self.outbound.is_full() {
            self.outbound.clear();
        }
        let _ = self.outbound.push(byte);
    }
}

impl LedPort for MockBoard {
    fn write(&mut self, levels: PortLevels) {
        self.port = levels;
        self.port_writes += 1;
    }
}

// ============================================================================
// Mock Reset Lines and Watchdog
// ============================================================================

/// Records whether the reset bits were switched to outputs
#[derive(Default)]
pub struct MockResetLines {
    pub outputs_enabled: bool,
}

impl ResetLines for MockResetLines {
    fn enable_outputs(&mut self) {
        self.outputs_enabled = true;
    }
}

/// Records every arm request
#[derive(Default)]
pub struct MockWatchdog {
    pub armed: Option<Millis>,
    pub arm_count: usize,
}

impl Watchdog for MockWatchdog {
    fn arm(&mut self, timeout: Millis) {
        self.armed = Some(timeout);
        self.arm_count += 1;
    }
}

// ============================================================================
// Rig: controller plus all mocks
// ============================================================================

pub struct Rig {
    pub controller: Controller,
    pub board: MockBoard,
    pub lines: MockResetLines,
    pub watchdog: MockWatchdog,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_controller(Controller::default())
    }

    pub fn with_controller(controller: Controller) -> Self {
        Self {
            controller,
            board: MockBoard::new(),
            lines: MockResetLines::default(),
            watchdog: MockWatchdog::default(),
        }
    }

    /// Clocks `bytes` in over SPI, returning the parser result for each
    pub fn send(&mut self, bytes: &[u8]) -> heapless::Vec<Result<Received, ProtocolError>, 32> {
        let mut results = heapless::Vec::new();
        for &byte in bytes {
            let result = self.controller.on_spi_byte(byte, &mut self.board);
            let _ = results.push(result);
        }
        results
    }

    /// One debounce timer interrupt followed by one foreground poll
    pub fn debounce_tick(&mut self) -> PollOutcome {
        self.controller.on_debounce_tick(&mut self.board);
        self.controller.poll(&mut self.lines, &mut self.watchdog)
    }

    /// Runs debounce ticks until `count` animation ticks have happened
    pub fn animation_ticks(&mut self, count: usize) {
        let divider = self.controller.config().animation_divider as usize;
        for _ in 0..count * divider {
            self.debounce_tick();
        }
    }

    /// Runs one full PWM period and returns on-subframes per channel
    pub fn pwm_period(&mut self) -> (u16, u16, u16) {
        let steps = self.controller.config().pwm_steps;
        let (mut r, mut g, mut b) = (0u16, 0u16, 0u16);
        for _ in 0..steps {
            self.controller.on_pwm_tick(&mut self.board);
            r += self.board.port.red() as u16;
            g += self.board.port.green() as u16;
            b += self.board.port.blue() as u16;
        }
        (r, g, b)
    }

    /// Whether the external reset lines are currently driven low
    pub fn reset_lines_asserted(&self) -> bool {
        self.lines.outputs_enabled
            && self.board.port_writes > 0
            && self.board.port.bits() & PortLevels::RESET_LINES == 0
    }
}
