//! Per-player state: scoresheet plus the allowances of the current turn.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerKind, Stage};
use crate::sheet::Scoresheet;

/// Marks one player may make in a single turn.
pub const MAX_MARKS_PER_TURN: u8 = 2;

/// Move usage within the current turn. Reset when the turn rotates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCounters {
    white_sum: u8,
    colored: u8,
    stage1_done: bool,
}

impl TurnCounters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            white_sum: 0,
            colored: 0,
            stage1_done: false,
        }
    }

    /// Marks made this turn, across both stages.
    #[must_use]
    pub const fn marks(&self) -> u8 {
        self.white_sum + self.colored
    }

    #[must_use]
    pub const fn can_use_white_sum(&self) -> bool {
        self.white_sum == 0 && self.marks() < MAX_MARKS_PER_TURN
    }

    /// Only the rolling player ever has a colored combination.
    #[must_use]
    pub const fn can_use_colored(&self, is_rolling: bool) -> bool {
        is_rolling && self.colored == 0 && self.marks() < MAX_MARKS_PER_TURN
    }

    /// Count a mark made in `stage`.
    pub fn record(&mut self, stage: Stage) {
        match stage {
            Stage::WhiteSum => {
                self.white_sum += 1;
                self.stage1_done = true;
            }
            Stage::ColoredCombination => self.colored += 1,
        }
    }

    pub fn finish_stage1(&mut self) {
        self.stage1_done = true;
    }

    #[must_use]
    pub const fn is_stage1_done(&self) -> bool {
        self.stage1_done
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub sheet: Scoresheet,

    /// True for the rolling player of the current turn.
    pub active: bool,

    pub counters: TurnCounters,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            sheet: Scoresheet::new(),
            active: false,
            counters: TurnCounters::new(),
        }
    }

    #[must_use]
    pub fn is_automated(&self) -> bool {
        self.kind.is_automated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Difficulty;

    #[test]
    fn test_rolling_player_gets_two_marks() {
        let mut counters = TurnCounters::new();
        assert!(counters.can_use_white_sum());
        assert!(counters.can_use_colored(true));
        assert!(!counters.can_use_colored(false));

        counters.record(Stage::WhiteSum);
        assert!(counters.is_stage1_done());
        assert!(!counters.can_use_white_sum());
        assert!(counters.can_use_colored(true));

        counters.record(Stage::ColoredCombination);
        assert_eq!(counters.marks(), 2);
        assert!(!counters.can_use_colored(true));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut counters = TurnCounters::new();
        counters.record(Stage::WhiteSum);
        counters.finish_stage1();
        counters.reset();
        assert_eq!(counters, TurnCounters::default());
        assert!(!counters.is_stage1_done());
    }

    #[test]
    fn test_new_record() {
        let record = PlayerRecord::new(PlayerId(1), "AI Player", PlayerKind::Automated(Difficulty::Hard));
        assert!(record.is_automated());
        assert!(!record.active);
        assert_eq!(record.sheet, Scoresheet::new());
        assert_eq!(record.counters.marks(), 0);
    }
}
