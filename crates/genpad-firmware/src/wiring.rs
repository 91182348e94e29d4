//! Bank emulation wiring for the ESP32-S3 board
//!
//! The breakout's pin map is defined over three 8-bit banks (A, B, D). On
//! the S3 each used bank bit is soldered to one GPIO; unused bits are `None`.
//!
//! ```text
//! Bank A  bit 0..2   -> GPIO 1, 2, 3
//! Bank D  bit 0..6   -> GPIO 4..10
//! Bank B  bit 0..7   -> GPIO 11..18
//! ```

use esp_idf_svc::hal::gpio::{AnyIOPin, IOPin, Pins};

/// Pin behind every (bank, bit), indexed by [`genpad::Bank::index`]
pub type Wiring = [[Option<AnyIOPin>; 8]; 3];

pub fn esp32s3_wiring(pins: Pins) -> Wiring {
    [
        // Bank A: joystick A/B, Right, Up
        [
            Some(pins.gpio1.downgrade()),
            Some(pins.gpio2.downgrade()),
            Some(pins.gpio3.downgrade()),
            None,
            None,
            None,
            None,
            None,
        ],
        // Bank B: Right, A, B, C, X, Y, Z, Start outputs
        [
            Some(pins.gpio11.downgrade()),
            Some(pins.gpio12.downgrade()),
            Some(pins.gpio13.downgrade()),
            Some(pins.gpio14.downgrade()),
            Some(pins.gpio15.downgrade()),
            Some(pins.gpio16.downgrade()),
            Some(pins.gpio17.downgrade()),
            Some(pins.gpio18.downgrade()),
        ],
        // Bank D: Down, Left/X, select, Start/C, Up/Down/Left outputs
        [
            Some(pins.gpio4.downgrade()),
            Some(pins.gpio5.downgrade()),
            Some(pins.gpio6.downgrade()),
            Some(pins.gpio7.downgrade()),
            Some(pins.gpio8.downgrade()),
            Some(pins.gpio9.downgrade()),
            Some(pins.gpio10.downgrade()),
            None,
        ],
    ]
}
