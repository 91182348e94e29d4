//! Physical wiring of the breakout board
//!
//! Every signal lives on one of three 8-bit banks. The table below is the
//! board's fixed ABI; the joystick connector and the output header are
//! soldered to exactly these bits.
//!
//! ```text
//! Joystick (9-pin)          Bank   | Output header    Bank
//! -------------------------------- | ------------------------
//! 1 Up / Up / Z             A2     | Up               D4
//! 2 Down / Down / Y         D0     | Down             D5
//! 3 Low / Left / X          D1     | Left             D6
//! 4 Low / Right             A1     | Right            B0
//! 6 A / B                   A0     | A                B1
//! 7 Select                  D2     | B                B2
//! 9 Start / C               D3     | C                B3
//!                                  | X                B4
//!                                  | Y                B5
//!                                  | Z                B6
//!                                  | Start            B7
//! ```

use crate::gpio::Level;

/// One of the three 8-bit GPIO banks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bank {
    A,
    B,
    D,
}

impl Bank {
    /// All banks, in boot setup order
    pub const ALL: [Bank; 3] = [Bank::A, Bank::B, Bank::D];

    /// Dense index (0..3), handy for register arrays
    pub const fn index(self) -> usize {
        match self {
            Bank::A => 0,
            Bank::B => 1,
            Bank::D => 2,
        }
    }
}

/// Which electrical level means "on" for a pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Level that means "on"
    pub const fn active_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::High,
            Polarity::ActiveLow => Level::Low,
        }
    }

    /// Level that means "off"
    pub const fn idle_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::Low,
            Polarity::ActiveLow => Level::High,
        }
    }

    pub fn is_active(self, level: Level) -> bool {
        level == self.active_level()
    }
}

/// A single physical pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    pub bank: Bank,
    /// Bit index within the bank, 0..=7
    pub bit: u8,
    pub polarity: Polarity,
}

impl Pin {
    pub const fn new(bank: Bank, bit: u8, polarity: Polarity) -> Self {
        Self {
            bank,
            bit,
            polarity,
        }
    }

    /// Single-bit mask for this pin within its bank
    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }
}

/// Select line on joystick pin 7
pub const STROBE: Pin = Pin::new(Bank::D, 2, Polarity::ActiveHigh);

/// The six multiplexed joystick input lines
///
/// All are pulled high and read low when the switch behind them is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoystickLine {
    /// Up; Z during the extended six-button phase
    Up,
    /// Down; Y during the extended six-button phase
    Down,
    /// Left; X during the extended six-button phase
    LeftX,
    Right,
    /// A with select low, B with select high
    AB,
    /// Start with select low, C with select high
    StartC,
}

impl JoystickLine {
    pub const ALL: [JoystickLine; 6] = [
        JoystickLine::Up,
        JoystickLine::Down,
        JoystickLine::LeftX,
        JoystickLine::Right,
        JoystickLine::AB,
        JoystickLine::StartC,
    ];

    pub const fn pin(self) -> Pin {
        match self {
            JoystickLine::Up => Pin::new(Bank::A, 2, Polarity::ActiveLow),
            JoystickLine::Down => Pin::new(Bank::D, 0, Polarity::ActiveLow),
            JoystickLine::LeftX => Pin::new(Bank::D, 1, Polarity::ActiveLow),
            JoystickLine::Right => Pin::new(Bank::A, 1, Polarity::ActiveLow),
            JoystickLine::AB => Pin::new(Bank::A, 0, Polarity::ActiveLow),
            JoystickLine::StartC => Pin::new(Bank::D, 3, Polarity::ActiveLow),
        }
    }
}

/// A logical button, and the output line that carries it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    C,
    X,
    Y,
    Z,
    Start,
}

impl Button {
    pub const ALL: [Button; 11] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::C,
        Button::X,
        Button::Y,
        Button::Z,
        Button::Start,
    ];

    /// Output pin; the consuming hardware reads these active-low
    pub const fn pin(self) -> Pin {
        match self {
            Button::Up => Pin::new(Bank::D, 4, Polarity::ActiveLow),
            Button::Down => Pin::new(Bank::D, 5, Polarity::ActiveLow),
            Button::Left => Pin::new(Bank::D, 6, Polarity::ActiveLow),
            Button::Right => Pin::new(Bank::B, 0, Polarity::ActiveLow),
            Button::A => Pin::new(Bank::B, 1, Polarity::ActiveLow),
            Button::B => Pin::new(Bank::B, 2, Polarity::ActiveLow),
            Button::C => Pin::new(Bank::B, 3, Polarity::ActiveLow),
            Button::X => Pin::new(Bank::B, 4, Polarity::ActiveLow),
            Button::Y => Pin::new(Bank::B, 5, Polarity::ActiveLow),
            Button::Z => Pin::new(Bank::B, 6, Polarity::ActiveLow),
            Button::Start => Pin::new(Bank::B, 7, Polarity::ActiveLow),
        }
    }
}

/// Direction and level written to a whole bank at boot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankSetup {
    pub bank: Bank,
    /// 1 = output
    pub direction: u8,
    /// Outputs: driven level. Inputs: 1 enables the pull-up.
    pub level: u8,
}

/// Boot-time bank configuration, applied in order
///
/// Inputs get pull-ups, outputs idle high (released, since the consuming
/// hardware is active-low), and the strobe starts high.
pub const BOOT_SETUP: [BankSetup; 3] = [
    BankSetup {
        bank: Bank::A,
        direction: 0x00,
        level: 0xFF,
    },
    BankSetup {
        bank: Bank::B,
        direction: 0xFF,
        level: 0xFF,
    },
    BankSetup {
        bank: Bank::D,
        direction: 0b0111_0100,
        level: 0b0111_1111,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_for(bank: Bank) -> BankSetup {
        *BOOT_SETUP
            .iter()
            .find(|setup| setup.bank == bank)
            .expect("every bank has a boot setup")
    }

    #[test]
    fn test_no_two_signals_share_a_pin() {
        let mut pins = vec![STROBE];
        pins.extend(JoystickLine::ALL.iter().map(|line| line.pin()));
        pins.extend(Button::ALL.iter().map(|button| button.pin()));

        for (i, a) in pins.iter().enumerate() {
            for b in &pins[i + 1..] {
                assert!(
                    a.bank != b.bank || a.bit != b.bit,
                    "{:?} and {:?} collide",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_boot_directions_match_pin_roles() {
        for line in JoystickLine::ALL {
            let pin = line.pin();
            assert_eq!(setup_for(pin.bank).direction & pin.mask(), 0, "{line:?}");
            // pull-up enabled
            assert_ne!(setup_for(pin.bank).level & pin.mask(), 0, "{line:?}");
        }
        for button in Button::ALL {
            let pin = button.pin();
            assert_ne!(setup_for(pin.bank).direction & pin.mask(), 0, "{button:?}");
        }
        assert_ne!(setup_for(Bank::D).direction & STROBE.mask(), 0);
    }

    #[test]
    fn test_outputs_boot_released() {
        for button in Button::ALL {
            let pin = button.pin();
            let level = if setup_for(pin.bank).level & pin.mask() != 0 {
                Level::High
            } else {
                Level::Low
            };
            assert_eq!(level, pin.polarity.idle_level(), "{button:?}");
        }
    }

    #[test]
    fn test_polarity_levels() {
        assert!(Polarity::ActiveLow.is_active(Level::Low));
        assert!(!Polarity::ActiveLow.is_active(Level::High));
        assert!(Polarity::ActiveHigh.is_active(Level::High));
        assert_eq!(STROBE.mask(), 0b0000_0100);
    }
}
