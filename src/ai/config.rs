//! Heuristic weights and per-tier decision parameters.

use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, Stage};

/// Weights of the move evaluator.
///
/// The stepped tables (early positioning, skip cost, opponent blocking)
/// live next to the terms that use them; these are the linear factors and
/// flat bonuses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Per mark already in the row.
    pub per_mark: f64,

    /// Multiplier on normalized row progress (0 at the first cell, 1 at the terminal).
    pub progress: f64,

    /// Marking the terminal number.
    pub terminal_bonus: f64,

    /// Numbers one or two cells before the terminal.
    pub near_end_bonus: f64,

    /// The move makes the row lockable.
    pub lock_enable_bonus: f64,

    /// Opponents hold more than two marks more in this color.
    pub falling_behind_penalty: f64,

    /// Multiplier on how much rarer than average a sum is.
    pub rarity: f64,

    /// Multiplier on the row's next-mark potential once any color is locked.
    pub endgame_potential: f64,

    /// Multiplier on the points a lock would add.
    pub lock_value: f64,

    /// Per opponent mark in a row we would close.
    pub lock_denial: f64,

    /// The move makes the row impossible to lock.
    pub unsustainable_penalty: f64,

    /// After the move every remaining cell is needed to lock.
    pub tight_lock_penalty: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            per_mark: 2.0,
            progress: 3.0,
            terminal_bonus: 4.0,
            near_end_bonus: 2.0,
            lock_enable_bonus: 8.0,
            falling_behind_penalty: 2.0,
            rarity: 10.0,
            endgame_potential: 0.7,
            lock_value: 2.0,
            lock_denial: 1.5,
            unsustainable_penalty: 40.0,
            tight_lock_penalty: 15.0,
        }
    }
}

/// Automated-player configuration shared by every automated seat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub weights: EvalWeights,

    /// Roll whether to take part in a stage before choosing a move.
    /// Disable for fully greedy play.
    pub participation: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            weights: EvalWeights::default(),
            participation: true,
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_participation(mut self, participation: bool) -> Self {
        self.participation = participation;
        self
    }
}

/// Decision parameters of one difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    /// Chance to take the best-scored move rather than one of the top three.
    pub best_move_probability: f64,

    /// Minimum best score to move at all as the rolling player.
    pub active_threshold: f64,

    /// Minimum best score to move at all as a passive player.
    pub passive_threshold: f64,

    /// Base participation chance in stage 1.
    pub stage1_participation: f64,

    /// Base participation chance in stage 2.
    pub stage2_participation: f64,

    /// Use the advanced evaluator (opponents, rarity, game phase).
    pub advanced: bool,

    /// Never play a move that makes a lockable row unlockable.
    pub sustainability_check: bool,
}

impl TierParams {
    #[must_use]
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                best_move_probability: 0.5,
                active_threshold: -25.0,
                passive_threshold: 0.0,
                stage1_participation: 0.75,
                stage2_participation: 0.8,
                advanced: false,
                sustainability_check: false,
            },
            Difficulty::Medium => Self {
                best_move_probability: 0.85,
                active_threshold: 0.0,
                passive_threshold: 2.0,
                stage1_participation: 0.85,
                stage2_participation: 0.9,
                advanced: false,
                sustainability_check: false,
            },
            Difficulty::Hard => Self {
                best_move_probability: 0.97,
                active_threshold: -15.0,
                passive_threshold: 2.0,
                stage1_participation: 0.9,
                stage2_participation: 0.95,
                advanced: true,
                sustainability_check: true,
            },
        }
    }

    #[must_use]
    pub const fn threshold(&self, is_rolling: bool) -> f64 {
        if is_rolling {
            self.active_threshold
        } else {
            self.passive_threshold
        }
    }

    #[must_use]
    pub const fn base_participation(&self, stage: Stage) -> f64 {
        match stage {
            Stage::WhiteSum => self.stage1_participation,
            Stage::ColoredCombination => self.stage2_participation,
        }
    }
}
