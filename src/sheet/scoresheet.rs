//! A player's scoresheet: four rows and a penalty box.

use serde::{Deserialize, Serialize};

use crate::core::{Color, MarkRejection, ScoringRule};

use super::row::Row;

/// Penalties that end the game.
pub const MAX_PENALTIES: u8 = 4;

/// Points lost per penalty.
pub const PENALTY_POINTS: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoresheet {
    rows: [Row; 4],
    penalties: u8,
}

impl Default for Scoresheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoresheet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [
                Row::new(Color::Red),
                Row::new(Color::Yellow),
                Row::new(Color::Green),
                Row::new(Color::Blue),
            ],
            penalties: 0,
        }
    }

    #[must_use]
    pub const fn row(&self, color: Color) -> &Row {
        &self.rows[color.index()]
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn check_mark(&self, color: Color, number: u8) -> Result<(), MarkRejection> {
        self.row(color).check_mark(number)
    }

    #[must_use]
    pub fn can_mark(&self, color: Color, number: u8) -> bool {
        self.row(color).can_mark(number)
    }

    pub fn mark(&mut self, color: Color, number: u8) -> bool {
        self.rows[color.index()].mark(number)
    }

    #[must_use]
    pub const fn can_lock(&self, color: Color) -> bool {
        self.row(color).can_lock()
    }

    pub fn lock(&mut self, color: Color) -> bool {
        self.rows[color.index()].lock()
    }

    #[must_use]
    pub const fn penalties(&self) -> u8 {
        self.penalties
    }

    /// Add one penalty. `false` if the box is already full.
    pub fn add_penalty(&mut self) -> bool {
        if self.penalties >= MAX_PENALTIES {
            return false;
        }
        self.penalties += 1;
        true
    }

    /// Penalty box full.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.penalties >= MAX_PENALTIES
    }

    /// Marks across all rows.
    #[must_use]
    pub fn total_marks(&self) -> usize {
        self.rows.iter().map(Row::marked_count).sum()
    }

    /// Sum of row scores minus 5 per penalty.
    #[must_use]
    pub fn total_score(&self, rule: ScoringRule) -> i32 {
        let rows: i32 = self.rows.iter().map(|r| r.score_with(rule)).sum();
        rows - PENALTY_POINTS * i32::from(self.penalties)
    }
}
