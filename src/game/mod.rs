//! Game sessions.
//!
//! A [`GameSession`] owns everything about one game: configuration, player
//! records, dice, turn state, locked colors and the event log. There is no
//! global game; callers hold the session and pass it around.

mod driver;
mod player;
mod session;
mod snapshot;

pub use player::{PlayerRecord, TurnCounters, MAX_MARKS_PER_TURN};
pub use session::{GameSession, MarkOutcome};
pub use snapshot::{GameSnapshot, PlayerSnapshot, RowSnapshot};
