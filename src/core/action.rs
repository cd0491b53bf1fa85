//! Player actions: roll, mark a cell, or signal done.
//!
//! Presentation layers and the automated-player driver both go through
//! [`Action`]; every action is accepted or rejected as a whole.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// One of the two move phases of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// White-dice sum, open to every player.
    WhiteSum,
    /// One white die plus one colored die, rolling player only.
    ColoredCombination,
}

impl Stage {
    /// 1 or 2, as the stages are called at the table.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Stage::WhiteSum => 1,
            Stage::ColoredCombination => 2,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {}", self.number())
    }
}

/// A candidate mark: a number in a color row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    pub number: u8,
}

impl Move {
    #[must_use]
    pub const fn new(color: Color, number: u8) -> Self {
        Self { color, number }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.number)
    }
}

/// A complete player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Roll the dice (rolling player, awaiting roll).
    Roll,
    /// Mark a number in a row.
    Mark(Move),
    /// Finished with the open stage.
    Done,
}
