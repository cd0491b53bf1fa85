//! Turn-level rules.
//!
//! - `legality`: which marks the dice allow a player in the open stage
//! - `outcome`: when the game ends and who wins
//!
//! The session calls into these but never re-implements them.

pub mod legality;
pub mod outcome;

pub use legality::{MoveList, StageContext};
pub use outcome::{decide_result, game_over_reason, GameOverReason, GameResult, LOCKS_TO_END};
