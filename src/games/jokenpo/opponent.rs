//! Sources for the CPU opponent's moves.

use super::types::Move;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Supplies the opponent's move for each match.
pub trait MoveSource: Send {
    /// Draws the next opponent move.
    fn draw(&mut self) -> Move;
}

/// Uniformly random opponent moves.
#[derive(Debug, Clone)]
pub struct RandomMoves {
    rng: StdRng,
}

impl RandomMoves {
    /// Creates a source seeded from operating system entropy.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible source from a fixed seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMoves {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MoveSource for RandomMoves {
    fn draw(&mut self) -> Move {
        let mv = Move::ALL[self.rng.gen_range(0..Move::ALL.len())];
        debug!(opponent_move = %mv, "Drew random opponent move");
        mv
    }
}

/// Replays a fixed sequence of moves, wrapping around at the end.
///
/// An empty script always plays [`Move::Rock`].
#[derive(Debug, Clone)]
pub struct ScriptedMoves {
    script: Vec<Move>,
    next: usize,
}

impl ScriptedMoves {
    /// Creates a source that plays `script` in order.
    #[instrument]
    pub fn new(script: Vec<Move>) -> Self {
        Self { script, next: 0 }
    }
}

impl MoveSource for ScriptedMoves {
    fn draw(&mut self) -> Move {
        if self.script.is_empty() {
            return Move::Rock;
        }
        let mv = self.script[self.next % self.script.len()];
        self.next += 1;
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_moves_wrap_around() {
        let mut src = ScriptedMoves::new(vec![Move::Paper, Move::Scissors]);
        let drawn: Vec<Move> = (0..5).map(|_| src.draw()).collect();
        assert_eq!(
            drawn,
            vec![
                Move::Paper,
                Move::Scissors,
                Move::Paper,
                Move::Scissors,
                Move::Paper
            ]
        );
    }

    #[test]
    fn test_seeded_moves_are_reproducible() {
        let mut a = RandomMoves::seeded(42);
        let mut b = RandomMoves::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_random_moves_cover_every_move() {
        let mut src = RandomMoves::seeded(7);
        let drawn: Vec<Move> = (0..300).map(|_| src.draw()).collect();
        for mv in Move::ALL {
            assert!(drawn.contains(&mv), "{mv} never drawn");
        }
    }
}
