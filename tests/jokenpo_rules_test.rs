//! Property tests for move resolution.

use strictly_jokenpo::{Move, Outcome, resolve};

#[test]
fn test_draw_iff_moves_equal() {
    for a in Move::ALL {
        for b in Move::ALL {
            let outcome = *resolve(a, b).outcome();
            assert_eq!(outcome == Outcome::Draw, a == b, "{a} vs {b}");
        }
    }
}

#[test]
fn test_swapping_moves_reverses_outcome() {
    for a in Move::ALL {
        for b in Move::ALL {
            let forward = *resolve(a, b).outcome();
            let backward = *resolve(b, a).outcome();
            assert_eq!(forward.reversed(), backward, "{a} vs {b}");
            if a != b {
                assert_ne!(forward, backward);
            }
        }
    }
}

#[test]
fn test_each_move_wins_once_loses_once_draws_once() {
    for a in Move::ALL {
        let outcomes: Vec<Outcome> = Move::ALL.iter().map(|b| *resolve(a, *b).outcome()).collect();
        for expected in [Outcome::Win, Outcome::Lose, Outcome::Draw] {
            assert_eq!(outcomes.iter().filter(|o| **o == expected).count(), 1);
        }
    }
}

#[test]
fn test_classic_table() {
    assert_eq!(*resolve(Move::Rock, Move::Scissors).outcome(), Outcome::Win);
    assert_eq!(*resolve(Move::Scissors, Move::Paper).outcome(), Outcome::Win);
    assert_eq!(*resolve(Move::Paper, Move::Rock).outcome(), Outcome::Win);
}

#[test]
fn test_message_names_winner_and_loser() {
    let win = resolve(Move::Scissors, Move::Paper);
    assert!(win.message().starts_with("SCISSORS beats PAPER"));

    let lose = resolve(Move::Scissors, Move::Rock);
    assert!(lose.message().starts_with("ROCK beats SCISSORS"));

    let draw = resolve(Move::Rock, Move::Rock);
    assert!(draw.message().contains("Draw"));
}
