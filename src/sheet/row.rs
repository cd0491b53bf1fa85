//! One colored row of a scoresheet.
//!
//! ## Marking rules
//!
//! - Marks only move rightwards: a number may be marked only at or past the
//!   rightmost marked position, never twice, never on a locked row.
//! - The terminal number (12 or 2) needs at least 5 marks already on the row.
//! - Marking the terminal number is what makes the row lockable.

use serde::{Deserialize, Serialize};

use crate::core::{Color, MarkRejection, ScoringRule, LOCK_THRESHOLD, ROW_LEN, TERMINAL_INDEX};

/// A single color row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    color: Color,
    /// Bit `i` set when position `i` is marked.
    marks: u16,
    rightmost: Option<usize>,
    locked: bool,
}

impl Row {
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            marks: 0,
            rightmost: None,
            locked: false,
        }
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Position of the rightmost mark, `None` on an empty row.
    #[must_use]
    pub const fn rightmost_index(&self) -> Option<usize> {
        self.rightmost
    }

    #[must_use]
    pub const fn marked_count(&self) -> usize {
        self.marks.count_ones() as usize
    }

    #[must_use]
    pub const fn is_marked_at(&self, position: usize) -> bool {
        position < ROW_LEN && self.marks & (1 << position) != 0
    }

    #[must_use]
    pub fn is_marked(&self, number: u8) -> bool {
        self.color
            .position_of(number)
            .is_some_and(|p| self.is_marked_at(p))
    }

    /// Marked numbers in row order.
    pub fn marked_numbers(&self) -> impl Iterator<Item = u8> + '_ {
        (0..ROW_LEN)
            .filter(|p| self.is_marked_at(*p))
            .filter_map(|p| self.color.number_at(p))
    }

    /// Unmarked cells strictly right of `position`. Every one is still markable
    /// in principle, since marks never go left.
    #[must_use]
    pub const fn cells_after(position: usize) -> usize {
        TERMINAL_INDEX.saturating_sub(position)
    }

    /// Open cells a mark at `position` closes off: those between the
    /// rightmost mark (or the row start) and `position`.
    #[must_use]
    pub const fn skipped_by(&self, position: usize) -> usize {
        let start = match self.rightmost {
            Some(r) => r + 1,
            None => 0,
        };
        position.saturating_sub(start)
    }

    /// Explain why `number` cannot be marked, or `Ok(())` if it can.
    pub fn check_mark(&self, number: u8) -> Result<(), MarkRejection> {
        if self.locked {
            return Err(MarkRejection::Locked);
        }
        let position = self.color.position_of(number).ok_or(MarkRejection::NotInRow)?;
        if self.is_marked_at(position) {
            return Err(MarkRejection::AlreadyMarked);
        }
        if self.rightmost.is_some_and(|r| position < r) {
            return Err(MarkRejection::BehindRightmost);
        }
        if position == TERMINAL_INDEX && self.marked_count() < LOCK_THRESHOLD {
            return Err(MarkRejection::TerminalTooEarly);
        }
        Ok(())
    }

    #[must_use]
    pub fn can_mark(&self, number: u8) -> bool {
        self.check_mark(number).is_ok()
    }

    /// Mark `number`. Returns `false` and changes nothing if not allowed.
    pub fn mark(&mut self, number: u8) -> bool {
        if !self.can_mark(number) {
            return false;
        }
        let Some(position) = self.color.position_of(number) else {
            return false;
        };
        self.marks |= 1 << position;
        self.rightmost = Some(self.rightmost.map_or(position, |r| r.max(position)));
        true
    }

    /// At least 5 marks and the terminal number marked.
    #[must_use]
    pub const fn can_lock(&self) -> bool {
        !self.locked
            && self.marked_count() >= LOCK_THRESHOLD
            && self.is_marked_at(TERMINAL_INDEX)
    }

    /// Lock the row. `false` if already locked or not lockable.
    pub fn lock(&mut self) -> bool {
        if !self.can_lock() {
            return false;
        }
        self.locked = true;
        true
    }

    /// Triangular score of the marked count.
    #[must_use]
    pub const fn score(&self) -> i32 {
        ScoringRule::Triangular.row_points(self.marked_count(), self.locked)
    }

    /// Score under an explicit rule.
    #[must_use]
    pub const fn score_with(&self, rule: ScoringRule) -> i32 {
        rule.row_points(self.marked_count(), self.locked)
    }
}
