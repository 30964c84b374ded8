//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.
//!
//! [`Emulator`] owns all machine state and executes one instruction per cycle.
//! Everything around it (reading keys, showing the screen, beeping and deciding
//! how often to cycle) goes through the traits in [`input`] and [`output`],
//! tied together by a [`driver::Driver`].

#[allow(clippy::module_inception)]
pub mod emulator;
pub mod driver;
pub mod error;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod output;
pub mod random;
pub mod screen;
pub mod timers;

pub use emulator::Emulator;
pub use error::{Error, Result};
