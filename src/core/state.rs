//! Turn state of a game session.
//!
//! ```text
//! AwaitingRoll ──roll──▶ DiceRolled ──▶ Stage1Moves ──all done──▶ Stage2Moves ──done──▶ (end of turn)
//!                                   ├──▶ Stage2Moves (nobody can use the white sum)
//!                                   └──▶ (end of turn, penalty: no legal move at all)
//! end of turn ──▶ AwaitingRoll (next player) | GameOver
//! ```
//!
//! Only the session moves between states.

use serde::{Deserialize, Serialize};

use super::action::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingRoll,
    /// Transient: dice are on the table and the stage is being routed.
    DiceRolled,
    Stage1Moves,
    Stage2Moves,
    GameOver,
}

impl TurnState {
    /// The move stage open in this state, if any.
    #[must_use]
    pub const fn open_stage(self) -> Option<Stage> {
        match self {
            TurnState::Stage1Moves => Some(Stage::WhiteSum),
            TurnState::Stage2Moves => Some(Stage::ColoredCombination),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnState::GameOver)
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnState::AwaitingRoll => "awaiting roll",
            TurnState::DiceRolled => "dice rolled",
            TurnState::Stage1Moves => "stage 1 moves",
            TurnState::Stage2Moves => "stage 2 moves",
            TurnState::GameOver => "game over",
        };
        f.write_str(name)
    }
}
