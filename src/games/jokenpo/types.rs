//! Core domain types for jokenpô (rock-paper-scissors).

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in the game.
///
/// The three moves form a cycle: each beats exactly one other move and
/// loses to exactly one other move. Text parsing is case-insensitive and also
/// accepts the Portuguese names used by the original arena clients.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Move {
    /// Rock (pedra). Blunts scissors.
    #[serde(rename = "ROCK", alias = "PEDRA")]
    #[strum(to_string = "ROCK", serialize = "PEDRA")]
    Rock,
    /// Paper (papel). Wraps rock.
    #[serde(rename = "PAPER", alias = "PAPEL")]
    #[strum(to_string = "PAPER", serialize = "PAPEL")]
    Paper,
    /// Scissors (tesoura). Cut paper.
    #[serde(rename = "SCISSORS", alias = "TESOURA")]
    #[strum(to_string = "SCISSORS", serialize = "TESOURA")]
    Scissors,
}

impl Move {
    /// Every move, in a fixed order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Returns the single move this one defeats.
    #[instrument]
    pub fn beats(self) -> Move {
        match self {
            Self::Rock => Self::Scissors,
            Self::Scissors => Self::Paper,
            Self::Paper => Self::Rock,
        }
    }

    /// Converts the move to the string stored in the database.
    #[instrument]
    pub fn to_db_string(self) -> &'static str {
        match self {
            Self::Rock => "ROCK",
            Self::Paper => "PAPER",
            Self::Scissors => "SCISSORS",
        }
    }
}

/// Match outcome from the submitting player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Outcome {
    /// Player's move beat the opponent's.
    Win,
    /// Opponent's move beat the player's.
    Lose,
    /// Both chose the same move.
    Draw,
}

impl Outcome {
    /// Returns the same result seen from the other side of the table.
    #[instrument]
    pub fn reversed(self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
            Self::Draw => Self::Draw,
        }
    }
}
