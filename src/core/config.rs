//! Game setup: who plays, which scoring rule, which seed.
//!
//! A configuration is fixed when the session is created and never changes
//! during the game.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::ai::AiConfig;

/// Smallest table.
pub const MIN_PLAYERS: usize = 2;

/// Largest table.
pub const MAX_PLAYERS: usize = 5;

/// Strength tier of an automated player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// Who controls a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Automated(Difficulty),
}

impl PlayerKind {
    #[must_use]
    pub const fn is_automated(self) -> bool {
        matches!(self, PlayerKind::Automated(_))
    }
}

/// How a row's marks turn into points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringRule {
    /// `n(n+1)/2` for `n` marks.
    #[default]
    Triangular,
    /// As `Triangular`, but a locked row counts one extra mark.
    LockBonus,
}

impl ScoringRule {
    /// Points for a row with `marks` marks.
    ///
    /// ```
    /// use qwixx_engine::core::ScoringRule;
    ///
    /// assert_eq!(ScoringRule::Triangular.row_points(6, true), 21);
    /// assert_eq!(ScoringRule::LockBonus.row_points(6, true), 28);
    /// assert_eq!(ScoringRule::LockBonus.row_points(6, false), 21);
    /// ```
    #[must_use]
    pub const fn row_points(self, marks: usize, locked: bool) -> i32 {
        let counted = match self {
            ScoringRule::LockBonus if locked => marks + 1,
            _ => marks,
        };
        let n = counted as i32;
        n * (n + 1) / 2
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerSetup {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn automated(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Automated(difficulty),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats in turn order. Seat 0 rolls first.
    pub players: Vec<PlayerSetup>,

    /// Seed for dice and automated-player sampling.
    pub seed: u64,

    /// Row scoring rule, applied to every row.
    pub scoring: ScoringRule,

    /// Heuristic weights and sampling switches for automated players.
    pub ai: AiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::single_player(Difficulty::default())
    }
}

impl GameConfig {
    pub fn new(players: Vec<PlayerSetup>) -> Self {
        Self {
            players,
            seed: 42,
            scoring: ScoringRule::default(),
            ai: AiConfig::default(),
        }
    }

    /// One human against one automated player.
    pub fn single_player(difficulty: Difficulty) -> Self {
        Self::new(vec![
            PlayerSetup::human("Player 1"),
            PlayerSetup::automated("AI Player", difficulty),
        ])
    }

    /// Two humans at one table.
    pub fn two_players() -> Self {
        Self::new(vec![PlayerSetup::human("Player 1"), PlayerSetup::human("Player 2")])
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let got = self.players.len();
        if got < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers { min: MIN_PLAYERS, got });
        }
        if got > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers { max: MAX_PLAYERS, got });
        }
        if let Some(seat) = self.players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(ConfigError::EmptyName(seat));
        }
        Ok(())
    }
}
