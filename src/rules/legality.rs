//! Stage legality: which marks the dice allow for a given player.
//!
//! Row-level checks live in [`crate::sheet::Row`]; this layer adds what the
//! turn decides: the dice on the table, the open stage, the rolling player,
//! the per-turn allowances and the globally locked colors.

use smallvec::SmallVec;

use crate::core::{Color, LockSet, Move, RuleViolation, Stage};
use crate::dice::DiceResult;
use crate::game::PlayerRecord;

/// Candidate moves for one player in one stage. A stage offers at most
/// 4 (white sum) or 8 (colored combinations) moves.
pub type MoveList = SmallVec<[Move; 8]>;

/// What the table offers in the current turn.
#[derive(Clone, Copy, Debug)]
pub struct StageContext<'a> {
    pub dice: &'a DiceResult,
    pub locked: LockSet,
}

impl<'a> StageContext<'a> {
    pub fn new(dice: &'a DiceResult, locked: LockSet) -> Self {
        Self { dice, locked }
    }

    /// Check that `player` may mark `mv` in `stage`.
    pub fn check_move(
        &self,
        stage: Stage,
        player: &PlayerRecord,
        is_rolling: bool,
        mv: Move,
    ) -> Result<(), RuleViolation> {
        let Move { color, number } = mv;

        if self.locked.contains(color) {
            return Err(RuleViolation::ColorLocked(color));
        }

        match stage {
            Stage::WhiteSum => {
                if number != self.dice.white_sum() {
                    return Err(RuleViolation::NotOffered { color, number });
                }
                if !player.counters.can_use_white_sum() {
                    return Err(RuleViolation::WhiteSumUsed(player.id));
                }
            }
            Stage::ColoredCombination => {
                if !is_rolling {
                    return Err(RuleViolation::NotRollingPlayer(player.id));
                }
                if !self.dice.offers_combination(color, number) {
                    return Err(RuleViolation::NotOffered { color, number });
                }
                if !player.counters.can_use_colored(is_rolling) {
                    return Err(RuleViolation::ColoredCombinationUsed(player.id));
                }
            }
        }

        player
            .sheet
            .check_mark(color, number)
            .map_err(|reason| RuleViolation::Row {
                color,
                number,
                reason,
            })
    }

    /// All moves `player` may make in `stage`, in sheet order.
    pub fn legal_moves(&self, stage: Stage, player: &PlayerRecord, is_rolling: bool) -> MoveList {
        let mut moves = MoveList::new();
        for color in Color::ALL {
            for number in self.offered(stage, color) {
                let mv = Move::new(color, number);
                if !moves.contains(&mv) && self.check_move(stage, player, is_rolling, mv).is_ok() {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Whether `player` has any move at all in `stage`.
    pub fn has_move(&self, stage: Stage, player: &PlayerRecord, is_rolling: bool) -> bool {
        Color::ALL.into_iter().any(|color| {
            self.offered(stage, color)
                .into_iter()
                .any(|n| self.check_move(stage, player, is_rolling, Move::new(color, n)).is_ok())
        })
    }

    fn offered(&self, stage: Stage, color: Color) -> SmallVec<[u8; 2]> {
        match stage {
            Stage::WhiteSum => SmallVec::from_slice(&[self.dice.white_sum()]),
            Stage::ColoredCombination => self
                .dice
                .colored_sums(color)
                .map(|sums| SmallVec::from_slice(&sums))
                .unwrap_or_default(),
        }
    }
}
