//! Structured game-event log.
//!
//! Every accepted state change appends one [`EventRecord`]. Rejected actions
//! leave no trace. The log is an `im::Vector`, so snapshots share it instead
//! of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Move, Stage};
use super::color::Color;
use super::player::PlayerId;
use crate::dice::DiceResult;
use crate::rules::{GameOverReason, GameResult};

/// Why a penalty was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyReason {
    /// Nobody could use the roll at all.
    NoLegalMoves,
    /// The rolling player finished both stages without a mark.
    NoMarks,
}

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayersSetup {
        names: Vec<String>,
    },
    DiceRolled {
        player: PlayerId,
        dice: DiceResult,
    },
    StageOpened(Stage),
    Marked {
        player: PlayerId,
        color: Color,
        number: u8,
        stage: Stage,
    },
    RowLocked {
        player: PlayerId,
        color: Color,
    },
    PlayerDone {
        player: PlayerId,
        stage: Stage,
    },
    PenaltyApplied {
        player: PlayerId,
        reason: PenaltyReason,
        total: u8,
    },
    TurnChanged {
        from: PlayerId,
        to: PlayerId,
    },
    AutomatedDecision {
        player: PlayerId,
        stage: Stage,
        choice: Option<Move>,
        best_score: Option<f64>,
    },
    GameOver {
        reason: GameOverReason,
        result: GameResult,
    },
}

/// A logged event with its position in the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number when the event happened (starts at 1).
    pub turn: u32,

    /// Order within the turn.
    pub sequence: u32,

    pub event: GameEvent,
}

/// Append-only event log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLog {
    records: Vector<EventRecord>,
    turn: u32,
    sequence: u32,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vector::new(),
            turn: 1,
            sequence: 0,
        }
    }

    /// Append an event to the current turn.
    pub fn record(&mut self, event: GameEvent) {
        let record = EventRecord {
            turn: self.turn,
            sequence: self.sequence,
            event,
        };
        self.sequence += 1;
        self.records.push_back(record);
    }

    /// Start numbering events for the next turn.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        self.sequence = 0;
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&EventRecord> {
        self.records.back()
    }

    /// Events of one turn, in order.
    pub fn for_turn(&self, turn: u32) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(move |r| r.turn == turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_resets_per_turn() {
        let mut log = EventLog::new();
        log.record(GameEvent::StageOpened(Stage::WhiteSum));
        log.record(GameEvent::StageOpened(Stage::ColoredCombination));
        log.advance_turn();
        log.record(GameEvent::TurnChanged {
            from: PlayerId(0),
            to: PlayerId(1),
        });

        let records: Vec<_> = log.iter().map(|r| (r.turn, r.sequence)).collect();
        assert_eq!(records, vec![(1, 0), (1, 1), (2, 0)]);
        assert_eq!(log.for_turn(1).count(), 2);
        assert_eq!(log.turn(), 2);
    }

    #[test]
    fn test_clone_shares_history() {
        let mut log = EventLog::new();
        log.record(GameEvent::PlayersSetup {
            names: vec!["Ann".into(), "Bob".into()],
        });

        let snapshot = log.clone();
        log.record(GameEvent::StageOpened(Stage::WhiteSum));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
        assert!(matches!(
            log.last().map(|r| &r.event),
            Some(GameEvent::StageOpened(Stage::WhiteSum))
        ));
    }

    #[test]
    fn test_record_serde() {
        let mut log = EventLog::new();
        log.record(GameEvent::PenaltyApplied {
            player: PlayerId(1),
            reason: PenaltyReason::NoMarks,
            total: 2,
        });
        let json = serde_json::to_string(&log).unwrap();
        let back: EventLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.last(), log.last());
    }
}
