//! Poll cycle phase table
//!
//! One poll cycle is the ordered table [`PHASES`]. The poller walks it front
//! to back, skipping phases whose [`Applies`] does not match the detected
//! variant. For each phase it drives the select levels in `before` (settling
//! after each), performs the reads in `routes` (each read drives its output
//! right away), then drives the levels in `after`.
//!
//! ```text
//! select  ‾‾‾\____/‾‾‾‾‾‾‾‾‾‾‾\____/‾‾‾‾‾‾‾\____/‾‾‾‾   six-button
//!             A,St    U,D,L,R    X,Y,Z
//!                     B,C
//! ```

use crate::gpio::Level;
use crate::pin_map::JoystickLine as In;
use crate::pin_map::{Button, JoystickLine};
use crate::variant::ControllerVariant;

/// Which variants a phase runs for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applies {
    All,
    /// Six- and three-button pads
    Multiplexed,
    SixButton,
    ThreeButton,
    AlternateTwoButton,
}

impl Applies {
    pub const fn matches(self, variant: ControllerVariant) -> bool {
        match self {
            Applies::All => true,
            Applies::Multiplexed => variant.is_multiplexed(),
            Applies::SixButton => matches!(variant, ControllerVariant::SixButton),
            Applies::ThreeButton => matches!(variant, ControllerVariant::ThreeButton),
            Applies::AlternateTwoButton => {
                matches!(variant, ControllerVariant::AlternateTwoButton)
            }
        }
    }
}

/// Read one input line and copy its level to one output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub line: JoystickLine,
    pub button: Button,
}

const fn route(line: JoystickLine, button: Button) -> Route {
    Route { line, button }
}

/// One step of the poll cycle
#[derive(Clone, Copy, Debug)]
pub struct Phase {
    pub name: &'static str,
    pub applies: Applies,
    /// Select levels driven before reading, each followed by a settle wait
    pub before: &'static [Level],
    pub routes: &'static [Route],
    /// Select levels driven after reading, each followed by a settle wait
    pub after: &'static [Level],
}

impl Phase {
    /// Select writes this phase performs
    pub fn strobe_writes(&self) -> usize {
        self.before.len() + self.after.len()
    }
}

/// The full poll cycle, in execution order
pub static PHASES: [Phase; 9] = [
    // Primes the six-button pad's internal counter.
    Phase {
        name: "lead pulse",
        applies: Applies::SixButton,
        before: &[Level::High, Level::Low],
        routes: &[],
        after: &[],
    },
    Phase {
        name: "select-low reads",
        applies: Applies::SixButton,
        before: &[],
        routes: &[route(In::AB, Button::A), route(In::StartC, Button::Start)],
        after: &[],
    },
    // No lead pulse here, select is still high from the last reset pulse.
    Phase {
        name: "select-low reads, start as Z",
        applies: Applies::ThreeButton,
        before: &[Level::Low],
        routes: &[route(In::AB, Button::A), route(In::StartC, Button::Z)],
        after: &[],
    },
    Phase {
        name: "raise select",
        applies: Applies::Multiplexed,
        before: &[Level::High],
        routes: &[],
        after: &[],
    },
    Phase {
        name: "directions",
        applies: Applies::All,
        before: &[],
        routes: &[
            route(In::Up, Button::Up),
            route(In::Down, Button::Down),
            route(In::LeftX, Button::Left),
            route(In::Right, Button::Right),
        ],
        after: &[],
    },
    Phase {
        name: "fire buttons, two-button stick",
        applies: Applies::AlternateTwoButton,
        before: &[],
        routes: &[route(In::AB, Button::A), route(In::StartC, Button::C)],
        after: &[],
    },
    Phase {
        name: "fire buttons",
        applies: Applies::Multiplexed,
        before: &[],
        routes: &[route(In::AB, Button::B), route(In::StartC, Button::C)],
        after: &[],
    },
    Phase {
        name: "extended buttons",
        applies: Applies::SixButton,
        before: &[Level::Low, Level::High],
        routes: &[
            route(In::LeftX, Button::X),
            route(In::Down, Button::Y),
            route(In::Up, Button::Z),
        ],
        after: &[Level::Low],
    },
    Phase {
        name: "reset pulse",
        applies: Applies::Multiplexed,
        before: &[Level::Low, Level::High],
        routes: &[],
        after: &[],
    },
];

/// Phases that run for `variant`, in order
pub fn phases_for(variant: ControllerVariant) -> impl Iterator<Item = &'static Phase> {
    PHASES
        .iter()
        .filter(move |phase| phase.applies.matches(variant))
}
