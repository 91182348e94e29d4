//! [`Gpio`] over ESP-IDF pin drivers, emulating AVR-style banks
//!
//! Keeps shadow copies of each bank's direction and level registers and
//! applies changed bits to the wired pins. A 1 in the level register of an
//! input enables its pull-up, as on the AVR the board was laid out for.

use core::fmt;

use esp_idf_svc::hal::gpio::{self, AnyIOPin, Input, Output, PinDriver, Pull};
use esp_idf_svc::sys::EspError;
use genpad::{Bank, Direction, Gpio, Level, Pin};

use crate::wiring::Wiring;

#[derive(Debug)]
pub enum PortError {
    /// Bank bit with no pin behind it, or whose driver was lost in a failed
    /// direction change
    Unwired { bank: Bank, bit: u8 },
    Esp(EspError),
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::Unwired { bank, bit } => write!(f, "Bank {:?} bit {} is not wired", bank, bit),
            PortError::Esp(e) => write!(f, "ESP-IDF error: {}", e),
        }
    }
}

impl std::error::Error for PortError {}

impl From<EspError> for PortError {
    fn from(e: EspError) -> Self {
        PortError::Esp(e)
    }
}

/// One wired bank bit, in its current mode
enum Line {
    Input(PinDriver<'static, AnyIOPin, Input>),
    Output(PinDriver<'static, AnyIOPin, Output>),
}

impl Line {
    fn into_mode(self, output: bool) -> Result<Self, EspError> {
        Ok(match (self, output) {
            (Line::Input(pin), true) => Line::Output(pin.into_output()?),
            (Line::Output(pin), false) => Line::Input(pin.into_input()?),
            (line, _) => line,
        })
    }
}

fn hal_level(high: bool) -> gpio::Level {
    if high {
        gpio::Level::High
    } else {
        gpio::Level::Low
    }
}

pub struct EspPorts {
    lines: [[Option<Line>; 8]; 3],
    direction: [u8; 3],
    level: [u8; 3],
}

impl EspPorts {
    /// Take every wired pin as a floating input
    pub fn new(wiring: Wiring) -> Result<Self, PortError> {
        let mut lines: [[Option<Line>; 8]; 3] = Default::default();
        let mut wired = 0;
        for (bank, pins) in wiring.into_iter().enumerate() {
            for (bit, pin) in pins.into_iter().enumerate() {
                if let Some(pin) = pin {
                    let mut driver = PinDriver::input(pin)?;
                    driver.set_pull(Pull::Floating)?;
                    lines[bank][bit] = Some(Line::Input(driver));
                    wired += 1;
                }
            }
        }
        log::info!("Took {} wired GPIOs", wired);
        Ok(Self {
            lines,
            direction: [0; 3],
            level: [0; 3],
        })
    }

    fn line(&mut self, pin: Pin) -> Result<&mut Line, PortError> {
        self.lines[pin.bank.index()][usize::from(pin.bit)]
            .as_mut()
            .ok_or(PortError::Unwired {
                bank: pin.bank,
                bit: pin.bit,
            })
    }

    fn is_output(&self, pin: Pin) -> bool {
        self.direction[pin.bank.index()] & pin.mask() != 0
    }

    fn level_bit(&self, pin: Pin) -> bool {
        self.level[pin.bank.index()] & pin.mask() != 0
    }

    /// Apply the shadow registers of one bit to its pin
    fn sync(&mut self, pin: Pin) -> Result<(), PortError> {
        let output = self.is_output(pin);
        let high = self.level_bit(pin);
        let slot = &mut self.lines[pin.bank.index()][usize::from(pin.bit)];
        if let Some(line) = slot.take() {
            *slot = Some(line.into_mode(output)?);
        }
        match self.line(pin)? {
            Line::Output(driver) => driver.set_level(hal_level(high))?,
            Line::Input(driver) => {
                driver.set_pull(if high { Pull::Up } else { Pull::Floating })?
            }
        }
        Ok(())
    }

    /// Sync every wired bit of a bank
    fn sync_bank(&mut self, bank: Bank) -> Result<(), PortError> {
        for bit in 0..8 {
            if self.lines[bank.index()][usize::from(bit)].is_some() {
                self.sync(Pin::new(bank, bit, genpad::Polarity::ActiveHigh))?;
            }
        }
        Ok(())
    }
}

fn set_bit(register: &mut u8, mask: u8, on: bool) {
    if on {
        *register |= mask;
    } else {
        *register &= !mask;
    }
}

impl Gpio for EspPorts {
    type Error = PortError;

    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), Self::Error> {
        self.line(pin)?;
        set_bit(
            &mut self.direction[pin.bank.index()],
            pin.mask(),
            direction == Direction::Output,
        );
        self.sync(pin)
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error> {
        let high = level == Level::High;
        set_bit(&mut self.level[pin.bank.index()], pin.mask(), high);
        match self.line(pin)? {
            // hot path: already an output
            Line::Output(driver) => {
                driver.set_level(hal_level(high))?;
                Ok(())
            }
            Line::Input(_) => self.sync(pin),
        }
    }

    fn read(&mut self, pin: Pin) -> Result<Level, Self::Error> {
        let shadow = self.level_bit(pin);
        match self.line(pin)? {
            // output mode has the input buffer off; report the driven level
            Line::Output(_) => Ok(Level::from(shadow)),
            Line::Input(driver) => Ok(Level::from(driver.get_level() == gpio::Level::High)),
        }
    }

    fn set_bank_direction(&mut self, bank: Bank, outputs: u8) -> Result<(), Self::Error> {
        self.direction[bank.index()] = outputs;
        self.sync_bank(bank)
    }

    fn write_bank(&mut self, bank: Bank, levels: u8) -> Result<(), Self::Error> {
        self.level[bank.index()] = levels;
        self.sync_bank(bank)
    }
}
