//! Move evaluation.
//!
//! A move's score is a sum of named terms, each a pure function of the
//! player's sheet, the opponents' sheets and the locked colors. The basic
//! evaluator uses the first seven terms; the advanced evaluator adds the
//! rest.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Color, LockSet, Move, ScoringRule, LOCK_THRESHOLD, TERMINAL_INDEX};
use crate::sheet::{Row, Scoresheet};

use super::config::EvalWeights;

/// What an automated player can see when choosing a move.
#[derive(Clone, Debug)]
pub struct PlayerView<'a> {
    pub sheet: &'a Scoresheet,
    pub opponents: SmallVec<[&'a Scoresheet; 4]>,
    pub locked: LockSet,
    pub is_rolling: bool,
}

impl<'a> PlayerView<'a> {
    /// Opponents' marks in one color, summed.
    #[must_use]
    pub fn opponent_marks(&self, color: Color) -> usize {
        self.opponents
            .iter()
            .map(|sheet| sheet.row(color).marked_count())
            .sum()
    }
}

/// Score of one move, term by term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub marks: f64,
    pub early_position: f64,
    pub end_number: f64,
    pub progress: f64,
    pub lock_enable: f64,
    pub penalty_avoidance: f64,
    pub falling_behind: f64,
    pub opponent_blocking: f64,
    pub rarity: f64,
    pub game_phase: f64,
    pub lock_value: f64,
    pub synergy: f64,
    pub endgame_potential: f64,
    pub skip_cost: f64,
    pub sustainability: f64,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.marks
            + self.early_position
            + self.end_number
            + self.progress
            + self.lock_enable
            + self.penalty_avoidance
            + self.falling_behind
            + self.opponent_blocking
            + self.rarity
            + self.game_phase
            + self.lock_value
            + self.synergy
            + self.endgame_potential
            + self.skip_cost
            + self.sustainability
    }
}

/// Evaluate `mv` for the player in `view`.
///
/// Positions outside the row score as the first cell; callers only pass
/// legal moves.
#[must_use]
pub fn evaluate(view: &PlayerView<'_>, mv: Move, weights: &EvalWeights, advanced: bool) -> ScoreBreakdown {
    let row = view.sheet.row(mv.color);
    let position = mv.color.position_of(mv.number).unwrap_or(0);
    let skipped = row.skipped_by(position);

    let mut score = ScoreBreakdown {
        marks: row.marked_count() as f64 * weights.per_mark,
        early_position: early_position_penalty(row.marked_count(), skipped),
        end_number: end_number_bonus(position, weights),
        progress: progress_bonus(row.marked_count(), position, weights),
        lock_enable: if enables_lock(row, mv.number) {
            weights.lock_enable_bonus
        } else {
            0.0
        },
        penalty_avoidance: penalty_avoidance_bonus(view.sheet.penalties()),
        falling_behind: falling_behind_penalty(row.marked_count(), view.opponent_marks(mv.color), weights),
        ..ScoreBreakdown::default()
    };

    if advanced {
        score.opponent_blocking = opponent_blocking_bonus(view, mv.color, position);
        score.rarity = rarity_bonus(mv.number, weights);
        score.game_phase = game_phase_bonus(view.sheet, row, !view.locked.is_empty());
        score.lock_value = lock_value(view, row, mv.number, weights);
        score.synergy = synergy_bonus(view.sheet, row);
        score.endgame_potential = endgame_potential(row, !view.locked.is_empty(), weights);
        score.skip_cost = skip_cost(row.marked_count(), skipped);
        score.sustainability = sustainability_penalty(row, position, weights);
    }

    score
}

/// Heavy discount for skipping many open cells while the row is young.
#[must_use]
pub fn early_position_penalty(marked: usize, skipped: usize) -> f64 {
    match marked {
        0 if skipped >= 9 => -40.0,
        0 if skipped >= 7 => -30.0,
        0 if skipped >= 5 => -15.0,
        1 if skipped >= 8 => -25.0,
        1 if skipped >= 6 => -15.0,
        2 if skipped >= 7 => -20.0,
        _ => 0.0,
    }
}

/// The terminal number and the two cells before it.
#[must_use]
pub fn end_number_bonus(position: usize, weights: &EvalWeights) -> f64 {
    if position >= TERMINAL_INDEX {
        weights.terminal_bonus
    } else if position >= TERMINAL_INDEX - 2 {
        weights.near_end_bonus
    } else {
        0.0
    }
}

/// Progress along the row, withheld for a far first mark.
#[must_use]
pub fn progress_bonus(marked: usize, position: usize, weights: &EvalWeights) -> f64 {
    if marked == 0 && position >= 7 {
        return 0.0;
    }
    weights.progress * position as f64 / TERMINAL_INDEX as f64
}

/// Whether marking `number` would leave the row lockable.
#[must_use]
pub fn enables_lock(row: &Row, number: u8) -> bool {
    let mut after = *row;
    after.mark(number) && after.can_lock()
}

#[must_use]
pub fn penalty_avoidance_bonus(penalties: u8) -> f64 {
    match penalties {
        0 => 0.0,
        1 => 1.0,
        2 => 2.0,
        _ => 3.0,
    }
}

#[must_use]
pub fn falling_behind_penalty(own: usize, opponents: usize, weights: &EvalWeights) -> f64 {
    if opponents > own + 2 {
        -weights.falling_behind_penalty
    } else {
        0.0
    }
}

/// Racing opponents who are close to locking this color.
#[must_use]
pub fn opponent_blocking_bonus(view: &PlayerView<'_>, color: Color, position: usize) -> f64 {
    view.opponents
        .iter()
        .map(|sheet| match sheet.row(color).marked_count() {
            n if n >= 4 && position == TERMINAL_INDEX => 6.0,
            n if n >= 4 => 3.0,
            n if n >= 2 => 1.5,
            _ => 0.0,
        })
        .sum()
}

/// Chance of rolling `sum` with two dice.
#[must_use]
pub fn sum_probability(sum: u8) -> f64 {
    let distance = (i32::from(sum) - 7).abs();
    f64::from((6 - distance).max(0)) / 36.0
}

/// Rare sums are worth taking while they are offered.
#[must_use]
pub fn rarity_bonus(number: u8, weights: &EvalWeights) -> f64 {
    (0.2 - sum_probability(number)) * weights.rarity
}

/// Spread marks early, concentrate them late.
#[must_use]
pub fn game_phase_bonus(sheet: &Scoresheet, row: &Row, any_locked: bool) -> f64 {
    let total = sheet.total_marks();
    let marked = row.marked_count();
    if total <= 8 {
        match marked {
            0 => 2.0,
            1 | 2 => 1.0,
            _ => 0.0,
        }
    } else if total <= 16 {
        if marked >= 2 {
            2.0
        } else {
            0.0
        }
    } else if marked >= 3 {
        if any_locked {
            5.0
        } else {
            4.0
        }
    } else {
        0.0
    }
}

/// Points a lock adds, plus the rows it closes on opponents.
#[must_use]
pub fn lock_value(view: &PlayerView<'_>, row: &Row, number: u8, weights: &EvalWeights) -> f64 {
    if !enables_lock(row, number) {
        return 0.0;
    }
    let marked = row.marked_count();
    let gain = ScoringRule::Triangular.row_points(marked + 1, true)
        - ScoringRule::Triangular.row_points(marked, false);

    let denial: f64 = view
        .opponents
        .iter()
        .map(|sheet| sheet.row(row.color()).marked_count())
        .filter(|&n| n >= 2)
        .map(|n| n as f64 * weights.lock_denial)
        .sum();

    f64::from(gain) * weights.lock_value + denial
}

/// Keep the player's rows roughly level.
#[must_use]
pub fn synergy_bonus(sheet: &Scoresheet, row: &Row) -> f64 {
    let average = sheet.total_marks() as f64 / Color::ALL.len() as f64;
    let current = row.marked_count() as f64;
    if (current - average).abs() <= 1.0 {
        1.5
    } else if current < average - 2.0 {
        2.0
    } else if current > average + 3.0 {
        -1.0
    } else {
        0.0
    }
}

/// Once the end is in sight, favor rows that score most with one more mark.
#[must_use]
pub fn endgame_potential(row: &Row, any_locked: bool, weights: &EvalWeights) -> f64 {
    if !any_locked {
        return 0.0;
    }
    let potential = ScoringRule::Triangular.row_points(row.marked_count() + 1, false);
    f64::from(potential) * weights.endgame_potential
}

/// Cost of the `skipped` open cells a mark gives up for good.
#[must_use]
pub fn skip_cost(marked: usize, skipped: usize) -> f64 {
    if marked <= 2 {
        match skipped {
            b if b >= 8 => -50.0,
            b if b >= 6 => -35.0,
            b if b >= 4 => -20.0,
            b if b <= 1 => 12.0,
            2 => 8.0,
            _ => 0.0,
        }
    } else if marked <= 4 {
        match skipped {
            b if b >= 6 => -20.0,
            b if b <= 2 => 6.0,
            _ => 0.0,
        }
    } else {
        0.0
    }
}

/// Most non-terminal marks the row can still collect.
#[must_use]
pub fn lock_reach(row: &Row) -> usize {
    let start = row.rightmost_index().map_or(0, |r| r + 1);
    row.marked_count() + TERMINAL_INDEX.saturating_sub(start)
}

/// [`lock_reach`] after marking the cell at `position`.
#[must_use]
pub fn lock_reach_after(row: &Row, position: usize) -> usize {
    if position >= TERMINAL_INDEX {
        return row.marked_count();
    }
    // the new mark plus every non-terminal cell after it
    row.marked_count() + Row::cells_after(position)
}

/// False if the move turns a row that could still be locked into one
/// that never can be.
#[must_use]
pub fn is_lock_sustainable(row: &Row, number: u8) -> bool {
    let Some(position) = row.color().position_of(number) else {
        return true;
    };
    lock_reach(row) < LOCK_THRESHOLD || lock_reach_after(row, position) >= LOCK_THRESHOLD
}

#[must_use]
pub fn sustainability_penalty(row: &Row, position: usize, weights: &EvalWeights) -> f64 {
    if position >= TERMINAL_INDEX || lock_reach(row) < LOCK_THRESHOLD {
        return 0.0;
    }
    match lock_reach_after(row, position) {
        r if r < LOCK_THRESHOLD => -weights.unsustainable_penalty,
        r if r == LOCK_THRESHOLD => -weights.tight_lock_penalty,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(sheet: &'a Scoresheet, opponents: &[&'a Scoresheet]) -> PlayerView<'a> {
        PlayerView {
            sheet,
            opponents: opponents.iter().copied().collect(),
            locked: LockSet::new(),
            is_rolling: true,
        }
    }

    #[test]
    fn test_early_position_penalty_steps() {
        assert_eq!(early_position_penalty(0, 0), 0.0);
        assert_eq!(early_position_penalty(0, 5), -15.0);
        assert_eq!(early_position_penalty(0, 7), -30.0);
        assert_eq!(early_position_penalty(0, 9), -40.0);
        assert_eq!(early_position_penalty(1, 8), -25.0);
        assert_eq!(early_position_penalty(1, 0), 0.0);
        assert_eq!(early_position_penalty(3, 9), 0.0);
    }

    #[test]
    fn test_adjacent_mark_beats_long_jump() {
        let weights = EvalWeights::default();
        let mv = Move::new(Color::Red, 10);

        // rightmost at 9, so 10 is the next open cell
        let mut extended = Scoresheet::new();
        extended.mark(Color::Red, 2);
        extended.mark(Color::Red, 9);
        // same mark count, but 10 closes off 4 through 9
        let mut sparse = Scoresheet::new();
        sparse.mark(Color::Red, 2);
        sparse.mark(Color::Red, 3);

        let adjacent = evaluate(&view(&extended, &[]), mv, &weights, true);
        let jump = evaluate(&view(&sparse, &[]), mv, &weights, true);
        assert_eq!(adjacent.early_position, 0.0);
        assert!(adjacent.skip_cost > jump.skip_cost);
        assert!(adjacent.early_position >= jump.early_position);

        let fresh = evaluate(&view(&Scoresheet::new(), &[]), mv, &weights, true);
        assert!(adjacent.skip_cost > fresh.skip_cost);
    }

    #[test]
    fn test_small_steps_beat_big_jumps() {
        let sheet = Scoresheet::new();
        let weights = EvalWeights::default();
        let v = view(&sheet, &[]);

        for advanced in [false, true] {
            let near = evaluate(&v, Move::new(Color::Red, 3), &weights, advanced).total();
            let far = evaluate(&v, Move::new(Color::Red, 11), &weights, advanced).total();
            assert!(near > far, "advanced={advanced}: {near} <= {far}");
        }
    }

    #[test]
    fn test_descending_rows_mirror_ascending() {
        let sheet = Scoresheet::new();
        let weights = EvalWeights::default();
        let v = view(&sheet, &[]);

        let red = evaluate(&v, Move::new(Color::Red, 4), &weights, false);
        let green = evaluate(&v, Move::new(Color::Green, 10), &weights, false);
        assert_eq!(red, green);
    }

    #[test]
    fn test_enables_lock() {
        let mut sheet = Scoresheet::new();
        for n in [2, 3, 4, 5, 6] {
            sheet.mark(Color::Yellow, n);
        }
        let row = sheet.row(Color::Yellow);
        assert!(enables_lock(row, 12));
        assert!(!enables_lock(row, 11));

        let weights = EvalWeights::default();
        let v = view(&sheet, &[]);
        let score = evaluate(&v, Move::new(Color::Yellow, 12), &weights, true);
        assert_eq!(score.lock_enable, weights.lock_enable_bonus);
        // 6th mark adds 6 points
        assert_eq!(score.lock_value, 12.0);
    }

    #[test]
    fn test_falling_behind() {
        let own = Scoresheet::new();
        let mut opponent = Scoresheet::new();
        for n in [2, 3, 4] {
            opponent.mark(Color::Red, n);
        }
        let weights = EvalWeights::default();
        let v = view(&own, &[&opponent]);
        assert_eq!(v.opponent_marks(Color::Red), 3);

        let score = evaluate(&v, Move::new(Color::Red, 5), &weights, true);
        assert_eq!(score.falling_behind, -2.0);
        assert_eq!(score.opponent_blocking, 1.5);
    }

    #[test]
    fn test_rarity_favors_extremes() {
        let weights = EvalWeights::default();
        assert!(rarity_bonus(2, &weights) > rarity_bonus(7, &weights));
        assert!((sum_probability(7) - 6.0 / 36.0).abs() < 1e-12);
        assert!((sum_probability(12) - 1.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn test_lock_sustainability() {
        let mut row = Row::new(Color::Red);
        row.mark(2);
        row.mark(3);
        // reach = 2 + 8 = 10
        assert_eq!(lock_reach(&row), 10);
        // 11 is position 9: 2 + 1 + 0 = 3 marks at most
        assert!(!is_lock_sustainable(&row, 11));
        assert!(is_lock_sustainable(&row, 8));

        // 9 is position 7: 2 + 1 + 2 = 5, every remaining cell needed
        let weights = EvalWeights::default();
        assert_eq!(sustainability_penalty(&row, 7, &weights), -15.0);
        assert_eq!(sustainability_penalty(&row, 9, &weights), -40.0);
        assert_eq!(sustainability_penalty(&row, 3, &weights), 0.0);
    }

    #[test]
    fn test_already_unlockable_row_not_penalized() {
        let mut row = Row::new(Color::Blue);
        row.mark(4);
        // position 8, reach = 1 + 1 = 2
        assert!(lock_reach(&row) < LOCK_THRESHOLD);
        assert!(is_lock_sustainable(&row, 3));
        let weights = EvalWeights::default();
        assert_eq!(sustainability_penalty(&row, 9, &weights), 0.0);
    }

    #[test]
    fn test_endgame_potential_needs_a_lock() {
        let mut row = Row::new(Color::Green);
        row.mark(12);
        row.mark(11);
        let weights = EvalWeights::default();
        assert_eq!(endgame_potential(&row, false, &weights), 0.0);
        assert!((endgame_potential(&row, true, &weights) - 6.0 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_basic_evaluator_ignores_advanced_terms() {
        let sheet = Scoresheet::new();
        let weights = EvalWeights::default();
        let v = view(&sheet, &[]);
        let score = evaluate(&v, Move::new(Color::Blue, 11), &weights, false);
        assert_eq!(score.rarity, 0.0);
        assert_eq!(score.skip_cost, 0.0);
        assert_eq!(score.sustainability, 0.0);
    }
}
