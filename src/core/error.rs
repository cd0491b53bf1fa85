//! Error taxonomy.
//!
//! - [`MarkRejection`]: why a single row refuses a number.
//! - [`RuleViolation`]: an ordinary illegal action. State is untouched.
//! - [`GameError`]: what session entry points return. `GameOver` and
//!   `UnknownPlayer` mean the caller misused the session; `Rule` wraps an
//!   ordinary rejection.
//! - [`ConfigError`]: invalid setup.

use thiserror::Error;

use super::action::Stage;
use super::color::Color;
use super::player::PlayerId;
use super::state::TurnState;

/// Reason a row refuses to mark a number.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MarkRejection {
    #[error("row is locked")]
    Locked,
    #[error("number is already marked")]
    AlreadyMarked,
    #[error("number is not on this row")]
    NotInRow,
    #[error("number lies left of the rightmost mark")]
    BehindRightmost,
    #[error("terminal number needs at least 5 marks first")]
    TerminalTooEarly,
}

/// An illegal action. Reported as a failure, never fatal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("dice can only be rolled while awaiting a roll (currently {0})")]
    NotAwaitingRoll(TurnState),
    #[error("no move stage is open (currently {0})")]
    NoOpenStage(TurnState),
    #[error("{0} is not the rolling player")]
    NotRollingPlayer(PlayerId),
    #[error("{player} has already finished {stage}")]
    AlreadyDone { player: PlayerId, stage: Stage },
    #[error("{0} has already used the white sum this turn")]
    WhiteSumUsed(PlayerId),
    #[error("{0} has no colored combination left this turn")]
    ColoredCombinationUsed(PlayerId),
    #[error("the dice do not offer {number} for the {color} row")]
    NotOffered { color: Color, number: u8 },
    #[error("the {0} row is locked")]
    ColorLocked(Color),
    #[error("cannot mark {number} in the {color} row: {reason}")]
    Row {
        color: Color,
        number: u8,
        reason: MarkRejection,
    },
}

/// Error returned by session entry points.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error(transparent)]
    Rule(#[from] RuleViolation),
}

impl GameError {
    /// True for caller misuse, false for an ordinary rule rejection.
    #[must_use]
    pub fn is_misuse(&self) -> bool {
        !matches!(self, GameError::Rule(_))
    }

    #[must_use]
    pub fn as_rule_violation(&self) -> Option<&RuleViolation> {
        match self {
            GameError::Rule(violation) => Some(violation),
            _ => None,
        }
    }
}

/// Invalid game setup.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need at least {min} players, got {got}")]
    TooFewPlayers { min: usize, got: usize },
    #[error("at most {max} players supported, got {got}")]
    TooManyPlayers { max: usize, got: usize },
    #[error("player {0} has an empty name")]
    EmptyName(usize),
    #[error("scripted dice need at least one roll")]
    EmptyDiceScript,
}
