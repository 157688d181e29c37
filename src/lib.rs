#![cfg_attr(not(feature = "std"), no_std)]

//! Interrupt-driven core for an SPI-controlled RGB LED with four buttons.
//!
//! A host clocks commands into the device over SPI; for every byte it sends,
//! it receives one byte back carrying the debounced button state. Commands
//! describe two color phases the LED alternates between, each with a target
//! color, a fade rate and a hold time.
//!
//! # Core Concepts
//!
//! - **`Controller`**: Owns all component state; its methods are the
//!   interrupt and main-loop entry points
//! - **`Debouncer`**: Vertical-counter debouncing of the four buttons with
//!   one-shot press edges
//! - **`Receiver`**: Length-prefixed SPI command parser (`0x8N` + N bytes)
//! - **`CommandSlots`**: Active/next double buffer; partial commands never
//!   become active
//! - **`Animator`**: Slew-limited fade between two phases, then the
//!   piecewise perceptual-to-linear curve
//! - **`PwmGenerator`**: Software PWM rendering duty as port writes
//! - **`ResetSequencer`**: `setup + down` flashes the LED, holds external
//!   reset lines low and lets the watchdog restart the device
//! - **`LedPort`**, **`ButtonInputs`**, **`SpiResponder`**, **`ResetLines`**,
//!   **`Watchdog`**: Traits to implement for your board
//!
//! Channel values are `Srgb<u8>` ([`Rgb8`]). Phase targets and the animation
//! cursor use the internal perceptual scale; [`Controller::duty`] is linear.
//!
//! Shared state sits behind `critical_section::Mutex`. On a single-core MCU
//! enable your HAL's `critical-section-single-core` (or equivalent)
//! implementation.

pub use palette::Srgb;

pub mod animation;
pub mod command;
pub mod config;
pub mod controller;
pub mod curve;
pub mod debounce;
pub mod hal;
pub mod protocol;
pub mod pwm;
pub mod reset;
pub mod time;
pub mod types;

pub use animation::{Animator, Frame};
pub use command::{COMMAND_HEADER, COMMAND_LEN, Command, CommandSlots};
pub use config::{Config, ConfigBuilder, ConfigError};
pub use controller::{Controller, PollOutcome};
pub use debounce::Debouncer;
pub use hal::{ButtonInputs, LedPort, ResetLines, SpiResponder, Watchdog};
pub use protocol::{ProtocolError, Received, Receiver};
pub use pwm::PwmGenerator;
pub use reset::{ResetSequencer, ResetState};
pub use time::Millis;
pub use types::{Buttons, ColorPhase, OFF, Phase, PortLevels, Rgb8, WHITE};
