//! Two-phase animation commands and the double-buffered slots they arrive in.

use crate::types::{ColorPhase, OFF, Phase, WHITE};
use heapless::Vec;

/// Payload bytes of a full command: two five-byte phases.
pub const COMMAND_LEN: usize = 2 * ColorPhase::LEN;

/// Header byte announcing a full command.
pub const COMMAND_HEADER: u8 = 0x80 | COMMAND_LEN as u8;

/// Raw payload storage for one slot.
pub type CommandBuffer = Vec<u8, COMMAND_LEN>;

/// An animation command: two phases the engine alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Command {
    pub phases: [ColorPhase; 2],
}

impl Command {
    /// Animates to black and stays there. Also what an empty slot decodes to.
    pub const OFF: Self = Self::new(ColorPhase::BLACK, ColorPhase::BLACK);

    pub const fn new(first: ColorPhase, second: ColorPhase) -> Self {
        Self {
            phases: [first, second],
        }
    }

    /// Full-intensity white/black toggle with no fade, `ticks` per half period.
    pub const fn flash(ticks: u8) -> Self {
        Self::new(
            ColorPhase::new(WHITE, 0, ticks),
            ColorPhase::new(OFF, 0, ticks),
        )
    }

    /// Decodes `[r0, g0, b0, slew0, time0, r1, g1, b1, slew1, time1]`.
    ///
    /// Missing trailing bytes read as zero and extra bytes are ignored, so a
    /// short or oversized payload still yields a well-formed (if dull)
    /// command.
    pub fn from_payload(payload: &[u8]) -> Self {
        let mut bytes = [0u8; COMMAND_LEN];
        let len = payload.len().min(COMMAND_LEN);
        bytes[..len].copy_from_slice(&payload[..len]);

        Self::new(
            ColorPhase::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]),
            ColorPhase::from_bytes([bytes[5], bytes[6], bytes[7], bytes[8], bytes[9]]),
        )
    }

    /// Payload bytes in wire order.
    pub fn payload(&self) -> [u8; COMMAND_LEN] {
        let mut bytes = [0u8; COMMAND_LEN];
        bytes[..ColorPhase::LEN].copy_from_slice(&self.phases[0].to_bytes());
        bytes[ColorPhase::LEN..].copy_from_slice(&self.phases[1].to_bytes());
        bytes
    }

    /// Header plus payload, ready to clock out over SPI.
    pub fn frame(&self) -> [u8; COMMAND_LEN + 1] {
        let mut frame = [0u8; COMMAND_LEN + 1];
        frame[0] = COMMAND_HEADER;
        frame[1..].copy_from_slice(&self.payload());
        frame
    }

    #[inline]
    pub fn phase(&self, phase: Phase) -> &ColorPhase {
        &self.phases[phase.index()]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Command {{ {}, {} }}", self.phases[0], self.phases[1])
    }
}

/// The active/next pair of command buffers.
///
/// The receiver only ever writes the inactive slot, and only
/// [`CommandSlots::take_ready`] changes which slot is active. A slot is only
/// swapped in once it has been marked complete, so a partial payload never
/// reaches the animation engine.
#[derive(Debug, Clone)]
pub struct CommandSlots {
    buffers: [CommandBuffer; 2],
    active: usize,
    ready: bool,
    locked: bool,
}

impl CommandSlots {
    pub const fn new() -> Self {
        Self {
            buffers: [Vec::new(), Vec::new()],
            active: 0,
            ready: false,
            locked: false,
        }
    }

    #[inline]
    fn inactive(&self) -> usize {
        self.active ^ 1
    }

    /// Decoded contents of the active slot.
    pub fn active(&self) -> Command {
        Command::from_payload(&self.buffers[self.active])
    }

    /// Raw bytes of the slot being filled.
    pub fn pending(&self) -> &[u8] {
        &self.buffers[self.inactive()]
    }

    /// Whether a complete command is waiting to be swapped in.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether reception has been shut off for good.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Empties the inactive slot for a new payload.
    ///
    /// A completed command that has not been swapped in yet is superseded.
    pub fn begin(&mut self) {
        if self.locked {
            return;
        }
        self.ready = false;
        let inactive = self.inactive();
        self.buffers[inactive].clear();
    }

    /// Appends a payload byte to the inactive slot.
    ///
    /// Returns `false` when the byte was dropped because the slot is full or
    /// reception is locked.
    pub fn write(&mut self, byte: u8) -> bool {
        if self.locked {
            return false;
        }
        let inactive = self.inactive();
        self.buffers[inactive].push(byte).is_ok()
    }

    /// Marks the inactive slot as a complete command.
    pub fn complete(&mut self) {
        if !self.locked {
            self.ready = true;
        }
    }

    /// Swaps a completed command in and clears the slot it replaced.
    ///
    /// Returns the newly active command, or `None` if nothing was ready.
    pub fn take_ready(&mut self) -> Option<Command> {
        if !self.ready {
            return None;
        }
        self.ready = false;
        self.active = self.inactive();
        let inactive = self.inactive();
        self.buffers[inactive].clear();
        Some(self.active())
    }

    /// Writes `command` straight into the inactive slot and marks it ready,
    /// bypassing the protocol.
    pub fn stage(&mut self, command: &Command) {
        let inactive = self.inactive();
        let buffer = &mut self.buffers[inactive];
        buffer.clear();
        for byte in command.payload() {
            if buffer.push(byte).is_err() {
                break;
            }
        }
        self.ready = true;
    }

    /// Stops accepting protocol writes. There is no unlock; only a restart
    /// clears it.
    pub fn lock(&mut self) {
        self.locked = true;
    }
}

impl Default for CommandSlots {
    fn default() -> Self {
        Self::new()
    }
}
