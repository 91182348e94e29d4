//! Controller variants

use core::fmt;

use crate::phase::PHASES;
use crate::pin_map::Button;

/// Kind of stick attached, detected once at boot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerVariant {
    /// Genesis six-button pad: A, B, C, X, Y, Z, Start
    #[default]
    SixButton,
    /// Genesis pad with only the three-button lines trusted.
    /// Start is remapped to Z to give a fourth fire button.
    ThreeButton,
    /// Legacy two-button stick without select multiplexing.
    /// Its power rides on the select line, so select stays high.
    AlternateTwoButton,
}

impl ControllerVariant {
    /// Whether the stick answers the select line
    pub const fn is_multiplexed(self) -> bool {
        !matches!(self, ControllerVariant::AlternateTwoButton)
    }

    /// Output lines this variant drives during a poll cycle
    ///
    /// Outputs outside this set keep their boot idle level forever.
    pub fn driven_buttons(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |button| {
            PHASES
                .iter()
                .filter(|phase| phase.applies.matches(self))
                .any(|phase| phase.routes.iter().any(|route| route.button == *button))
        })
    }
}

impl fmt::Display for ControllerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerVariant::SixButton => "six-button",
            ControllerVariant::ThreeButton => "three-button",
            ControllerVariant::AlternateTwoButton => "two-button (legacy)",
        };
        f.write_str(name)
    }
}
