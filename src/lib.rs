//! # qwixx-engine
//!
//! Rule engine and heuristic opponents for the Qwixx dice game.
//!
//! ## Design Principles
//!
//! 1. **Explicit Session**: Every game is a [`GameSession`] value. No
//!    process-wide state; presentation layers hold the session.
//!
//! 2. **Rows Guard Themselves**: A row refuses illegal marks on its own.
//!    The session layers turn rules (stage, dice, allowances) on top.
//!
//! 3. **Deterministic**: Dice and automated decisions draw from separate
//!    seeded ChaCha streams, so a seed replays a game exactly. Dice can
//!    also be scripted for tests.
//!
//! 4. **Rejections Are Values**: Illegal actions return a
//!    [`RuleViolation`] and change nothing. Misuse (acting on a finished
//!    game, unknown seats) is a distinct [`GameError`] variant.
//!
//! ## Modules
//!
//! - `core`: Colors, players, actions, turn state, RNG, config, errors, event log
//! - `dice`: Dice roller and roll results
//! - `sheet`: Rows and scoresheets
//! - `rules`: Stage legality and game-over detection
//! - `game`: The session state machine and the automated-player driver
//! - `ai`: Move evaluation and decision procedure
//!
//! ## Example
//!
//! ```
//! use qwixx_engine::{Difficulty, GameConfig, GameSession, PlayerSetup};
//!
//! let config = GameConfig::new(vec![
//!     PlayerSetup::automated("Ann", Difficulty::Medium),
//!     PlayerSetup::automated("Bob", Difficulty::Hard),
//! ])
//! .with_seed(7);
//!
//! let mut game = GameSession::new(config).unwrap();
//! let result = game.play_to_end(1_000).unwrap();
//! assert!(result.is_some());
//! println!("{}", game.message());
//! ```

pub mod ai;
pub mod core;
pub mod dice;
pub mod game;
pub mod rules;
pub mod sheet;

// Re-export commonly used types
pub use crate::core::{
    Action, Color, ConfigError, Difficulty, EventLog, EventRecord, GameConfig, GameError, GameEvent,
    GameRng, LockSet, MarkRejection, Move, PlayerId, PlayerKind, PlayerSetup, RuleViolation,
    ScoringRule, Stage, TurnState,
};

pub use crate::dice::{DiceResult, DiceRoller};

pub use crate::sheet::{Row, Scoresheet};

pub use crate::rules::{GameOverReason, GameResult};

pub use crate::game::{GameSession, GameSnapshot, MarkOutcome, PlayerRecord, PlayerSnapshot};

pub use crate::ai::{AiConfig, Decision, EvalWeights, TierParams};
