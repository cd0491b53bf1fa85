//! Read-only view of a session for presentation layers.

use serde::{Deserialize, Serialize};

use crate::core::{Color, PlayerId, PlayerKind, ScoringRule, TurnState};
use crate::dice::DiceResult;
use crate::rules::GameResult;
use crate::sheet::Row;

use super::player::PlayerRecord;

/// One row as shown on a scoresheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub color: Color,
    pub marked: Vec<u8>,
    pub locked: bool,
    pub score: i32,
}

impl RowSnapshot {
    fn new(row: &Row, scoring: ScoringRule) -> Self {
        Self {
            color: row.color(),
            marked: row.marked_numbers().collect(),
            locked: row.is_locked(),
            score: row.score_with(scoring),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub active: bool,
    pub rows: Vec<RowSnapshot>,
    pub penalties: u8,
    pub total: i32,
}

impl PlayerSnapshot {
    pub(crate) fn new(record: &PlayerRecord, scoring: ScoringRule) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            kind: record.kind,
            active: record.active,
            rows: record
                .sheet
                .rows()
                .map(|row| RowSnapshot::new(row, scoring))
                .collect(),
            penalties: record.sheet.penalties(),
            total: record.sheet.total_score(scoring),
        }
    }
}

/// Everything a presentation layer needs to draw the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: TurnState,
    pub turn: u32,
    pub rolling_player: PlayerId,
    pub dice: Option<DiceResult>,
    pub locked_colors: Vec<Color>,
    pub players: Vec<PlayerSnapshot>,
    pub message: String,
    pub result: Option<GameResult>,
}
