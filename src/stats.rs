//! Per-player history and the global scoreboard.
//!
//! Everything here is recomputed from the ledger on each call.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ArenaError;
use crate::games::jokenpo::Outcome;
use crate::ledger::{Match, MatchLedger};
use crate::registry::PlayerRegistry;

/// One scoreboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScoreboardRow {
    player_id: i32,
    name: String,
    wins: u32,
    losses: u32,
    draws: u32,
    total_games: u32,
}

impl ScoreboardRow {
    /// Tallies `matches` for one player.
    #[instrument(skip(name, matches))]
    fn tally<'a>(player_id: i32, name: String, matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut row = Self {
            player_id,
            name,
            wins: 0,
            losses: 0,
            draws: 0,
            total_games: 0,
        };
        for m in matches {
            match m.outcome() {
                Outcome::Win => row.wins += 1,
                Outcome::Lose => row.losses += 1,
                Outcome::Draw => row.draws += 1,
            }
            row.total_games += 1;
        }
        row
    }

    /// Win rate as a percentage (0.0–100.0).
    #[instrument(skip(self))]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

/// Matches played by a registered player, in ledger order.
///
/// # Errors
///
/// Returns a not-found error if `player_id` is not registered, even when the
/// ledger still holds matches for it.
#[instrument(skip(registry, ledger))]
pub fn history<'a>(
    registry: &PlayerRegistry,
    ledger: &'a MatchLedger,
    player_id: i32,
) -> Result<Vec<&'a Match>, ArenaError> {
    registry.get(player_id)?;
    let matches = ledger.all_for(player_id);
    debug!(player_id, count = matches.len(), "History loaded");
    Ok(matches)
}

/// Scoreboard row for a single registered player.
///
/// # Errors
///
/// Returns a not-found error if `player_id` is not registered.
#[instrument(skip(registry, ledger))]
pub fn standing(
    registry: &PlayerRegistry,
    ledger: &MatchLedger,
    player_id: i32,
) -> Result<ScoreboardRow, ArenaError> {
    let player = registry.get(player_id)?;
    Ok(ScoreboardRow::tally(
        player_id,
        player.name().clone(),
        ledger.all_for(player_id),
    ))
}

/// One row per registered player, most wins first.
///
/// Ties keep registration order. Matches of removed players are not counted.
#[instrument(skip(registry, ledger))]
pub fn scoreboard(registry: &PlayerRegistry, ledger: &MatchLedger) -> Vec<ScoreboardRow> {
    let mut rows: Vec<ScoreboardRow> = registry
        .list()
        .iter()
        .map(|p| ScoreboardRow::tally(*p.id(), p.name().clone(), ledger.all_for(*p.id())))
        .collect();
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));

    info!(rows = rows.len(), matches = ledger.len(), "Scoreboard computed");
    rows
}
