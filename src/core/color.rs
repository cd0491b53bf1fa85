//! Row colors, die colors and the global lock set.
//!
//! ## Row layout
//!
//! Every scoresheet has four rows of eleven numbers:
//! - Red and yellow ascend: `2, 3, ..., 12`
//! - Green and blue descend: `12, 11, ..., 2`
//!
//! The last cell of a row (12 or 2) is its terminal number; marking it is
//! what locks the row.

use serde::{Deserialize, Serialize};

/// Number of cells in every row.
pub const ROW_LEN: usize = 11;

/// Index of the terminal cell.
pub const TERMINAL_INDEX: usize = ROW_LEN - 1;

/// Marks needed before the terminal number may be marked.
pub const LOCK_THRESHOLD: usize = 5;

/// Direction a row is read in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 2 → 12.
    Ascending,
    /// 12 → 2.
    Descending,
}

/// Color of a scoresheet row (and of its colored die).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    /// All row colors in sheet order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Dense index (0..4) for array-backed storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Yellow => 1,
            Color::Green => 2,
            Color::Blue => 3,
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Color::Red | Color::Yellow => Direction::Ascending,
            Color::Green | Color::Blue => Direction::Descending,
        }
    }

    /// Number printed at `position` (0-based) in this color's row.
    ///
    /// Returns `None` past the end of the row.
    #[must_use]
    pub const fn number_at(self, position: usize) -> Option<u8> {
        if position >= ROW_LEN {
            return None;
        }
        Some(match self.direction() {
            Direction::Ascending => 2 + position as u8,
            Direction::Descending => 12 - position as u8,
        })
    }

    /// Position (0-based) of `number` in this color's row.
    ///
    /// ```
    /// use qwixx_engine::core::Color;
    ///
    /// assert_eq!(Color::Red.position_of(7), Some(5));
    /// assert_eq!(Color::Blue.position_of(12), Some(0));
    /// assert_eq!(Color::Green.position_of(13), None);
    /// ```
    #[must_use]
    pub const fn position_of(self, number: u8) -> Option<usize> {
        if number < 2 || number > 12 {
            return None;
        }
        Some(match self.direction() {
            Direction::Ascending => (number - 2) as usize,
            Direction::Descending => (12 - number) as usize,
        })
    }

    /// The row's last number: 12 for ascending rows, 2 for descending rows.
    #[must_use]
    pub const fn terminal_number(self) -> u8 {
        match self.direction() {
            Direction::Ascending => 12,
            Direction::Descending => 2,
        }
    }

    /// All eleven numbers of the row in play order.
    pub fn numbers(self) -> impl Iterator<Item = u8> {
        (0..ROW_LEN).filter_map(move |i| self.number_at(i))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Color tag carried by a physical die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieColor {
    White,
    Red,
    Yellow,
    Green,
    Blue,
}

impl From<Color> for DieColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => DieColor::Red,
            Color::Yellow => DieColor::Yellow,
            Color::Green => DieColor::Green,
            Color::Blue => DieColor::Blue,
        }
    }
}

/// Set of colors locked by any player.
///
/// Once a color is in the set it stays there: no player may mark it and its
/// die is no longer rolled. Two locked colors end the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockSet {
    bits: u8,
}

impl LockSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Add a color. Returns `true` if it was not already present.
    pub fn insert(&mut self, color: Color) -> bool {
        let bit = 1u8 << color.index();
        let fresh = self.bits & bit == 0;
        self.bits |= bit;
        fresh
    }

    #[must_use]
    pub const fn contains(&self, color: Color) -> bool {
        self.bits & (1u8 << color.index()) != 0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Locked colors in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        Color::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Color> for LockSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = LockSet::new();
        for color in iter {
            set.insert(color);
        }
        set
    }
}
