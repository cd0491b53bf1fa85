//! Dice subsystem.
//!
//! The roller owns the six dice exclusively. Every roll yields a fresh,
//! immutable [`DiceResult`]; nothing outside the roller changes a die.

mod roller;

pub use roller::{DiceResult, DiceRoller, Die};
