//! Byte-at-a-time parser for the length-prefixed SPI command stream.
//!
//! A frame is a header `0x8N` followed by `N` payload bytes. While waiting
//! for a header, bytes with a zero high nibble are idle filler (hosts clock
//! them out to read the button status). Any other header nibble is a framing
//! error: the byte is discarded and the parser stays in sync-hunting mode.

use crate::command::CommandSlots;

/// High nibble that marks a header byte.
pub const HEADER_TAG: u8 = 0x80;

/// Protocol errors reported by [`Receiver::push`].
///
/// These never reach the host; the parser has already resynchronised by the
/// time one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// A byte arrived where a header was expected but its high nibble is
    /// neither `0x8` nor `0x0`.
    InvalidHeader(u8),
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProtocolError::InvalidHeader(byte) => {
                write!(f, "invalid header byte 0x{:02X}", byte)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

/// What a successfully parsed byte did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Received {
    /// Idle filler between frames.
    Idle,

    /// A header announcing no payload.
    Empty,

    /// A header opening a frame of `len` payload bytes.
    Header { len: u8 },

    /// A payload byte; `remaining` more are expected.
    Payload { remaining: u8 },

    /// The last payload byte; the command is ready to be swapped in.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    AwaitingHeader,
    Payload { expected: u8, received: u8 },
}

/// Command stream parser.
///
/// Holds only the framing position; payload bytes go straight into the
/// inactive slot of a [`CommandSlots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Receiver {
    state: State,
}

impl Receiver {
    pub const fn new() -> Self {
        Self {
            state: State::AwaitingHeader,
        }
    }

    /// Whether the parser sits between frames.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == State::AwaitingHeader
    }

    /// Consumes one byte from the wire.
    ///
    /// Never blocks and never touches the active slot.
    ///
    /// # Errors
    /// * `InvalidHeader` - unrecognised header; nothing was written and the
    ///   parser is waiting for the next header
    pub fn push(&mut self, byte: u8, slots: &mut CommandSlots) -> Result<Received, ProtocolError> {
        match self.state {
            State::AwaitingHeader => match byte & 0xF0 {
                HEADER_TAG => {
                    let len = byte & 0x0F;
                    if len == 0 {
                        return Ok(Received::Empty);
                    }
                    slots.begin();
                    self.state = State::Payload {
                        expected: len,
                        received: 0,
                    };
                    Ok(Received::Header { len })
                }
                0x00 => Ok(Received::Idle),
                _ => Err(ProtocolError::InvalidHeader(byte)),
            },
            State::Payload { expected, received } => {
                // Bytes past the slot capacity still count toward the frame.
                slots.write(byte);
                let received = received + 1;
                if received == expected {
                    slots.complete();
                    self.state = State::AwaitingHeader;
                    Ok(Received::Complete)
                } else {
                    self.state = State::Payload { expected, received };
                    Ok(Received::Payload {
                        remaining: expected - received,
                    })
                }
            }
        }
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}
