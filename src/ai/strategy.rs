//! Move selection for automated players.
//!
//! 1. Hard tier drops moves that would make a lockable row unlockable.
//! 2. Optionally roll whether to take part in the stage at all.
//! 3. Score the rest and decline if the best score is under the tier's
//!    threshold for the player's role.
//! 4. Take the best move with probability `p`, else a uniform pick from the
//!    top three.

use smallvec::SmallVec;

use crate::core::{Difficulty, GameRng, Move, Stage};

use super::config::{AiConfig, EvalWeights, TierParams};
use super::eval::{evaluate, is_lock_sustainable, PlayerView};

/// Floor and ceiling of the participation chance.
const PARTICIPATION_RANGE: (f64, f64) = (0.1, 0.98);

/// Uniform jitter added to the participation chance.
const PARTICIPATION_JITTER: f64 = 0.05;

/// Moves sampled from when the best one is not taken.
const TOP_MOVES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

/// Outcome of one automated decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    /// Move to mark, or `None` to pass.
    pub choice: Option<Move>,

    /// Score of the best candidate, if there was any.
    pub best_score: Option<f64>,

    /// False if the participation roll said to sit this stage out.
    pub participated: bool,
}

impl Decision {
    const fn pass(best_score: Option<f64>, participated: bool) -> Self {
        Self {
            choice: None,
            best_score,
            participated,
        }
    }
}

/// Score every move, best first. Ties keep sheet order.
#[must_use]
pub fn score_moves(
    view: &PlayerView<'_>,
    moves: &[Move],
    weights: &EvalWeights,
    advanced: bool,
) -> SmallVec<[ScoredMove; 8]> {
    let mut scored: SmallVec<[ScoredMove; 8]> = moves
        .iter()
        .map(|&mv| ScoredMove {
            mv,
            score: evaluate(view, mv, weights, advanced).total(),
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Chance of taking the best move rather than one of the top three.
#[must_use]
pub fn best_move_probability(tier: &TierParams, penalties: u8, is_rolling: bool) -> f64 {
    let mut p = tier.best_move_probability + 0.03 * f64::from(penalties);
    if !is_rolling {
        p -= 0.1;
    }
    p.clamp(0.0, 1.0)
}

/// Chance of taking part in `stage`, before jitter.
#[must_use]
pub fn participation_probability(
    tier: &TierParams,
    stage: Stage,
    is_rolling: bool,
    penalties: u8,
    best_score: Option<f64>,
) -> f64 {
    let (floor, ceiling) = PARTICIPATION_RANGE;
    let mut p = tier.base_participation(stage);

    if !is_rolling && stage == Stage::WhiteSum {
        p = (p - 0.3).max(0.4);
    }

    p = match penalties {
        0 => p,
        1 => (p + 0.05).min(0.95),
        2 => (p + 0.15).min(ceiling),
        _ => ceiling,
    };

    match best_score {
        Some(s) if s >= 10.0 => p = (p + 0.15).min(ceiling),
        Some(s) if s >= 5.0 => p = (p + 0.08).min(0.96),
        Some(s) if s <= 0.0 => {
            let reduction = if is_rolling { 0.2 } else { 0.4 };
            p = (p - reduction).max(floor);
        }
        _ => {}
    }

    p.clamp(floor, ceiling)
}

/// Pick a move (or pass) among `moves`, the legal moves of the open stage.
pub fn decide(
    view: &PlayerView<'_>,
    moves: &[Move],
    difficulty: Difficulty,
    stage: Stage,
    config: &AiConfig,
    rng: &mut GameRng,
) -> Decision {
    let tier = TierParams::for_difficulty(difficulty);

    let candidates: SmallVec<[Move; 8]> = moves
        .iter()
        .copied()
        .filter(|mv| !tier.sustainability_check || is_lock_sustainable(view.sheet.row(mv.color), mv.number))
        .collect();

    let scored = score_moves(view, &candidates, &config.weights, tier.advanced);
    let Some(best) = scored.first().copied() else {
        return Decision::pass(None, true);
    };
    let penalties = view.sheet.penalties();

    if config.participation {
        let (floor, ceiling) = PARTICIPATION_RANGE;
        let jitter = rng.gen_range_f64(-PARTICIPATION_JITTER, PARTICIPATION_JITTER);
        let p = participation_probability(&tier, stage, view.is_rolling, penalties, Some(best.score));
        if !rng.gen_bool((p + jitter).clamp(floor, ceiling)) {
            return Decision::pass(Some(best.score), false);
        }
    }

    if best.score < tier.threshold(view.is_rolling) {
        return Decision::pass(Some(best.score), true);
    }

    let choice = if rng.gen_bool(best_move_probability(&tier, penalties, view.is_rolling)) {
        best.mv
    } else {
        let top = &scored[..scored.len().min(TOP_MOVES)];
        rng.choose(top).map_or(best.mv, |s| s.mv)
    };

    Decision {
        choice: Some(choice),
        best_score: Some(best.score),
        participated: true,
    }
}
