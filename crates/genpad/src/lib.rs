//! Breakout driver for Sega Genesis / Mega Drive joysticks.
//!
//! The 9-pin Genesis port multiplexes twelve buttons over six input lines,
//! switched by a single select line (the "strobe"). This crate polls that
//! protocol and re-drives every direction and button on its own output line,
//! so the stick can feed hardware that expects one wire per switch.
//!
//! ## Flow
//!
//! 1. [`Breakout::new`] takes a [`Gpio`] implementation, a
//!    [`DelayNs`](embedded_hal::delay::DelayNs) and a [`Config`].
//! 2. [`Breakout::start`] applies the boot pin setup, probes the stick once
//!    and returns a [`Poller`] locked to the detected [`ControllerVariant`].
//! 3. [`Poller::run`] polls forever at the configured period.
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "std")]
//! # {
//! use genpad::mock_port::MockPort;
//! use genpad::{Breakout, Builder, Button, ControllerVariant, Level};
//!
//! let port = MockPort::new();
//! let delay = port.delay();
//! let config = Builder::new().build().expect("default timing is valid");
//!
//! let mut poller = Breakout::new(port.clone(), delay, config)
//!     .start()
//!     .expect("mock port never fails");
//! assert_eq!(poller.variant(), ControllerVariant::SixButton);
//!
//! poller.poll().expect("mock port never fails");
//! assert_eq!(port.output_level(Button::Start), Level::High);
//! # }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

#[cfg(any(test, feature = "std"))]
extern crate alloc;

pub mod board;
pub mod config;
pub mod detect;
pub mod error;
pub mod gpio;
#[cfg(any(test, feature = "std"))]
pub mod mock_port;
pub mod phase;
pub mod pin_map;
pub mod poller;
pub mod variant;

pub use board::{Breakout, init_pins};
pub use config::{Builder, Config};
pub use detect::detect;
pub use error::{BuilderError, Error};
pub use gpio::{Direction, Gpio, Level};
pub use phase::{Applies, PHASES, Phase, Route, phases_for};
pub use pin_map::{Bank, BankSetup, Button, JoystickLine, Pin, Polarity, BOOT_SETUP, STROBE};
pub use poller::Poller;
pub use variant::ControllerVariant;
