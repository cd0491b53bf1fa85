//! Row engine and scoresheets.
//!
//! Rows enforce the marking invariants on their own; the session only adds
//! the turn-level rules (which dice, which stage, who may act).

mod row;
mod scoresheet;

pub use row::Row;
pub use scoresheet::{Scoresheet, MAX_PENALTIES, PENALTY_POINTS};
