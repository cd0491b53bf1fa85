//! End-of-game detection and winner selection.

use serde::{Deserialize, Serialize};

use crate::core::{LockSet, PlayerId};
use crate::sheet::Scoresheet;

/// Colors that must be locked to end the game.
pub const LOCKS_TO_END: usize = 2;

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Two different colors were locked.
    RowsLocked,
    /// A player filled the penalty box.
    PenaltyLimit(PlayerId),
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single highest total.
    Winner(PlayerId),
    /// Several players share the highest total.
    Tie(Vec<PlayerId>),
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Tie(ps) => ps.contains(&player),
        }
    }

    /// Every player with the highest total.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Tie(ps) => ps.clone(),
        }
    }
}

/// Check whether the game has ended.
///
/// Locks are checked first, then penalty boxes in seat order.
pub fn game_over_reason<'a>(
    locked: LockSet,
    sheets: impl IntoIterator<Item = (PlayerId, &'a Scoresheet)>,
) -> Option<GameOverReason> {
    if locked.len() >= LOCKS_TO_END {
        return Some(GameOverReason::RowsLocked);
    }
    sheets
        .into_iter()
        .find(|(_, sheet)| sheet.is_finished())
        .map(|(id, _)| GameOverReason::PenaltyLimit(id))
}

/// Pick the winner(s) from final totals. Ties are never broken.
///
/// Returns `None` if there are no players.
pub fn decide_result(totals: impl IntoIterator<Item = (PlayerId, i32)>) -> Option<GameResult> {
    let totals: Vec<_> = totals.into_iter().collect();
    let best = totals.iter().map(|(_, t)| *t).max()?;
    let mut leaders: Vec<PlayerId> = totals
        .iter()
        .filter(|(_, t)| *t == best)
        .map(|(id, _)| *id)
        .collect();

    if leaders.len() == 1 {
        leaders.pop().map(GameResult::Winner)
    } else {
        Some(GameResult::Tie(leaders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId(1));
        assert!(!result.is_winner(PlayerId(0)));
        assert!(result.is_winner(PlayerId(1)));

        let tie = GameResult::Tie(vec![PlayerId(0), PlayerId(2)]);
        assert!(tie.is_winner(PlayerId(0)));
        assert!(!tie.is_winner(PlayerId(1)));
        assert_eq!(tie.winners(), vec![PlayerId(0), PlayerId(2)]);
    }

    #[test]
    fn test_two_locks_end_game() {
        let sheets = [Scoresheet::new(), Scoresheet::new()];
        let one: LockSet = [Color::Red].into_iter().collect();
        assert_eq!(game_over_reason(one, [(PlayerId(0), &sheets[0])]), None);

        let two: LockSet = [Color::Red, Color::Blue].into_iter().collect();
        assert_eq!(
            game_over_reason(two, [(PlayerId(0), &sheets[0])]),
            Some(GameOverReason::RowsLocked)
        );
    }

    #[test]
    fn test_penalty_limit_ends_game() {
        let mut full = Scoresheet::new();
        for _ in 0..4 {
            full.add_penalty();
        }
        let empty = Scoresheet::new();
        assert_eq!(
            game_over_reason(LockSet::new(), [(PlayerId(0), &empty), (PlayerId(1), &full)]),
            Some(GameOverReason::PenaltyLimit(PlayerId(1)))
        );
    }

    #[test]
    fn test_decide_single_winner() {
        let result = decide_result([(PlayerId(0), 40), (PlayerId(1), 33)]);
        assert_eq!(result, Some(GameResult::Winner(PlayerId(0))));
    }

    #[test]
    fn test_decide_tie_among_leaders_only() {
        let result = decide_result([(PlayerId(0), 33), (PlayerId(1), 12), (PlayerId(2), 33)]);
        assert_eq!(result, Some(GameResult::Tie(vec![PlayerId(0), PlayerId(2)])));
    }

    #[test]
    fn test_decide_no_players() {
        assert_eq!(decide_result(Vec::new()), None);
    }
}
