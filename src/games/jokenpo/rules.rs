//! Match resolution for jokenpô.

use super::types::{Move, Outcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of resolving one player move against one opponent move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Resolution {
    /// Outcome for the player.
    outcome: Outcome,
    /// Human-readable explanation naming the winning and losing moves.
    message: String,
}

/// Resolves `player` against `opponent`.
///
/// Equal moves draw. Otherwise the player wins exactly when their move
/// beats the opponent's, and loses in every other case.
#[instrument]
pub fn resolve(player: Move, opponent: Move) -> Resolution {
    let outcome = outcome_of(player, opponent);
    let message = match outcome {
        Outcome::Draw => format!("Draw! Both chose {}.", player),
        Outcome::Win => format!("{} beats {}. You win!", player, opponent),
        Outcome::Lose => format!("{} beats {}. The CPU wins!", opponent, player),
    };
    Resolution { outcome, message }
}

/// Returns only the outcome of `player` against `opponent`.
#[instrument]
pub fn outcome_of(player: Move, opponent: Move) -> Outcome {
    if player == opponent {
        Outcome::Draw
    } else if player.beats() == opponent {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_beats_scissors() {
        let res = resolve(Move::Rock, Move::Scissors);
        assert_eq!(*res.outcome(), Outcome::Win);
        assert_eq!(res.message(), "ROCK beats SCISSORS. You win!");
    }

    #[test]
    fn test_paper_loses_to_scissors() {
        let res = resolve(Move::Paper, Move::Scissors);
        assert_eq!(*res.outcome(), Outcome::Lose);
        assert_eq!(res.message(), "SCISSORS beats PAPER. The CPU wins!");
    }

    #[test]
    fn test_same_move_draws() {
        let res = resolve(Move::Paper, Move::Paper);
        assert_eq!(*res.outcome(), Outcome::Draw);
        assert_eq!(res.message(), "Draw! Both chose PAPER.");
    }

    #[test]
    fn test_outcome_of_agrees_with_resolve() {
        for a in Move::ALL {
            for b in Move::ALL {
                assert_eq!(outcome_of(a, b), *resolve(a, b).outcome());
            }
        }
    }
}
