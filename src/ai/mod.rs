//! Heuristic opponents.
//!
//! - `config`: evaluator weights and per-tier decision parameters
//! - `eval`: pure move scoring, one function per term
//! - `strategy`: participation, threshold and top-k sampling
//!
//! The evaluator holds no state. Randomness comes from the session's AI
//! stream, so seeded games replay exactly.

pub mod config;
pub mod eval;
pub mod strategy;

pub use config::{AiConfig, EvalWeights, TierParams};
pub use eval::{evaluate, is_lock_sustainable, PlayerView, ScoreBreakdown};
pub use strategy::{decide, score_moves, Decision, ScoredMove};
