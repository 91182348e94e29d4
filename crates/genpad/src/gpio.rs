//! GPIO capability
//!
//! This module provides the [`Gpio`] trait, the only way the protocol code
//! touches hardware. A target implements it once over its own registers or
//! HAL; the detector and poller never see register addresses.
//!
//! The model follows the AVR port layout the board was designed around:
//! each bank has a direction register and a level register, and writing a 1
//! to the level of an input pin enables its pull-up.
//!
//! ## Example
//!
//! ```rust,ignore
//! use genpad::{Gpio, Level, STROBE};
//!
//! gpio.set_bank_direction(Bank::B, 0xFF)?;
//! gpio.write(STROBE, Level::High)?;
//! let level = gpio.read(JoystickLine::AB.pin())?;
//! ```

use core::fmt::Debug;

use crate::pin_map::{Bank, Pin};

/// Electrical level of a pin
pub use embedded_hal::digital::PinState as Level;

/// Pin direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Digital pin access over three 8-bit banks
///
/// Every operation takes effect immediately; there is no buffering between
/// a write and the pin.
pub trait Gpio {
    /// Error type for pin operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Configure a single pin as input or output
    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), Self::Error>;

    /// Set the level of a single pin
    ///
    /// On an input pin this toggles the pull-up.
    fn write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error>;

    /// Sample the current level of a single pin
    fn read(&mut self, pin: Pin) -> Result<Level, Self::Error>;

    /// Configure a whole bank at once (bit set = output)
    fn set_bank_direction(&mut self, bank: Bank, outputs: u8) -> Result<(), Self::Error>;

    /// Write the level register of a whole bank at once
    fn write_bank(&mut self, bank: Bank, levels: u8) -> Result<(), Self::Error>;
}

impl<G: Gpio + ?Sized> Gpio for &mut G {
    type Error = G::Error;

    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), Self::Error> {
        G::set_direction(self, pin, direction)
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error> {
        G::write(self, pin, level)
    }

    fn read(&mut self, pin: Pin) -> Result<Level, Self::Error> {
        G::read(self, pin)
    }

    fn set_bank_direction(&mut self, bank: Bank, outputs: u8) -> Result<(), Self::Error> {
        G::set_bank_direction(self, bank, outputs)
    }

    fn write_bank(&mut self, bank: Bank, levels: u8) -> Result<(), Self::Error> {
        G::write_bank(self, bank, levels)
    }
}
