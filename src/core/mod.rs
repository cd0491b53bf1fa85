//! Core engine types: colors, players, actions, turn state, RNG,
//! configuration, errors and the event log.

pub mod action;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, Move, Stage};
pub use color::{Color, DieColor, Direction, LockSet, LOCK_THRESHOLD, ROW_LEN, TERMINAL_INDEX};
pub use config::{Difficulty, GameConfig, PlayerKind, PlayerSetup, ScoringRule, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{ConfigError, GameError, MarkRejection, RuleViolation};
pub use event::{EventLog, EventRecord, GameEvent, PenaltyReason};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::TurnState;
