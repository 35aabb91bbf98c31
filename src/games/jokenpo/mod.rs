//! Jokenpô (rock-paper-scissors) rules, moves and CPU move sources.

mod opponent;
mod rules;
mod types;

pub use opponent::{MoveSource, RandomMoves, ScriptedMoves};
pub use rules::{Resolution, outcome_of, resolve};
pub use types::{Move, Outcome};
