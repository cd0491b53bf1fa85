//! Dice roller: two white dice and one die per row color.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Color, ConfigError, DieColor, GameRng, LockSet};

/// One physical die.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Die {
    color: DieColor,
    value: Option<u8>,
}

impl Die {
    #[must_use]
    pub const fn new(color: DieColor) -> Self {
        Self { color, value: None }
    }

    #[must_use]
    pub const fn color(&self) -> DieColor {
        self.color
    }

    /// Last rolled face, `None` before the first roll.
    #[must_use]
    pub const fn value(&self) -> Option<u8> {
        self.value
    }
}

/// Immutable snapshot of one roll.
///
/// A colored value is `None` when that color was locked at roll time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceResult {
    pub white: [u8; 2],
    pub colored: [Option<u8>; 4],
}

impl DiceResult {
    #[must_use]
    pub const fn white_sum(&self) -> u8 {
        self.white[0] + self.white[1]
    }

    #[must_use]
    pub const fn colored(&self, color: Color) -> Option<u8> {
        self.colored[color.index()]
    }

    /// `[white1 + colored, white2 + colored]`, or `None` for a locked color.
    ///
    /// ```
    /// use qwixx_engine::core::Color;
    /// use qwixx_engine::dice::DiceResult;
    ///
    /// let dice = DiceResult { white: [3, 4], colored: [Some(2), None, Some(6), Some(1)] };
    /// assert_eq!(dice.colored_sums(Color::Red), Some([5, 6]));
    /// assert_eq!(dice.colored_sums(Color::Yellow), None);
    /// ```
    #[must_use]
    pub const fn colored_sums(&self, color: Color) -> Option<[u8; 2]> {
        match self.colored[color.index()] {
            Some(c) => Some([self.white[0] + c, self.white[1] + c]),
            None => None,
        }
    }

    /// Whether `number` is one of the two white+colored sums for `color`.
    #[must_use]
    pub fn offers_combination(&self, color: Color, number: u8) -> bool {
        self.colored_sums(color).is_some_and(|sums| sums.contains(&number))
    }
}

/// Where faces come from.
#[derive(Clone, Debug)]
enum DiceSource {
    /// Uniform faces from a seeded RNG.
    Seeded(GameRng),
    /// Fixed faces `[white1, white2, red, yellow, green, blue]`, cycled.
    Scripted { rolls: Vec<[u8; 6]>, next: usize },
}

impl DiceSource {
    fn faces(&mut self) -> [u8; 6] {
        match self {
            DiceSource::Seeded(rng) => {
                let mut faces = [0u8; 6];
                for face in &mut faces {
                    *face = rng.roll_die();
                }
                faces
            }
            DiceSource::Scripted { rolls, next } => {
                let faces = rolls[*next % rolls.len()];
                *next += 1;
                faces
            }
        }
    }
}

/// Owns all six dice and produces a fresh [`DiceResult`] per roll.
#[derive(Clone, Debug)]
pub struct DiceRoller {
    white: [Die; 2],
    colored: [Die; 4],
    source: DiceSource,
}

impl DiceRoller {
    /// Roller drawing uniform faces from `rng`.
    #[must_use]
    pub fn seeded(rng: GameRng) -> Self {
        Self::with_source(DiceSource::Seeded(rng))
    }

    /// Roller replaying fixed faces, in order `[white1, white2, red, yellow,
    /// green, blue]`, wrapping around when the script runs out.
    ///
    /// Faces outside `1..=6` are clamped. An empty script is rejected.
    pub fn scripted(rolls: impl IntoIterator<Item = [u8; 6]>) -> Result<Self, ConfigError> {
        let rolls: Vec<[u8; 6]> = rolls
            .into_iter()
            .map(|faces| faces.map(|f| f.clamp(1, 6)))
            .collect();
        if rolls.is_empty() {
            return Err(ConfigError::EmptyDiceScript);
        }
        Ok(Self::with_source(DiceSource::Scripted { rolls, next: 0 }))
    }

    fn with_source(source: DiceSource) -> Self {
        Self {
            white: [Die::new(DieColor::White), Die::new(DieColor::White)],
            colored: Color::ALL.map(|c| Die::new(c.into())),
            source,
        }
    }

    /// Roll both white dice and every colored die whose color is not locked.
    ///
    /// Locked colors report no value and their die keeps no value.
    pub fn roll_all(&mut self, locked: LockSet) -> DiceResult {
        let faces = self.source.faces();

        for (die, face) in self.white.iter_mut().zip(&faces[..2]) {
            die.value = Some(*face);
        }

        let mut colored = [None; 4];
        for (color, die) in Color::ALL.into_iter().zip(self.colored.iter_mut()) {
            die.value = if locked.contains(color) {
                None
            } else {
                Some(faces[2 + color.index()])
            };
            colored[color.index()] = die.value;
        }

        DiceResult {
            white: [faces[0], faces[1]],
            colored,
        }
    }

    /// Sums of each unlocked colored die with each white die, from the last roll.
    ///
    /// Empty before the first roll.
    pub fn white_plus_colored_sums(&self, locked: LockSet) -> FxHashMap<Color, [u8; 2]> {
        let mut sums = FxHashMap::default();
        let (Some(w1), Some(w2)) = (self.white[0].value, self.white[1].value) else {
            return sums;
        };

        for (color, die) in Color::ALL.into_iter().zip(&self.colored) {
            if locked.contains(color) {
                continue;
            }
            if let Some(c) = die.value {
                sums.insert(color, [w1 + c, w2 + c]);
            }
        }
        sums
    }

    /// Result of the last roll, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<DiceResult> {
        let white = [self.white[0].value?, self.white[1].value?];
        Some(DiceResult {
            white,
            colored: self.colored.map(|d| d.value),
        })
    }

    pub fn white_dice(&self) -> &[Die; 2] {
        &self.white
    }

    pub fn colored_dice(&self) -> &[Die; 4] {
        &self.colored
    }
}
