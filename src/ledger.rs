//! Append-only match ledger.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument};

use crate::db::{ArenaRepository, DbError};
use crate::games::jokenpo::{Move, Outcome, outcome_of};

/// One resolved match.
///
/// The outcome is not stored; it is derived from the two moves on demand.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Match {
    /// Submitting player's id. Non-owning; the player may since have been removed.
    player_id: i32,
    /// Player's name at the time of play.
    player_name: String,
    /// Move submitted by the player.
    player_move: Move,
    /// Move drawn for the CPU.
    opponent_move: Move,
    /// When the match was played (UTC).
    played_at: NaiveDateTime,
}

impl Match {
    /// Outcome for the submitting player.
    #[instrument(skip(self))]
    pub fn outcome(&self) -> Outcome {
        outcome_of(self.player_move, self.opponent_move)
    }
}

/// In-memory view of the stored ledger, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MatchLedger {
    matches: Vec<Match>,
}

impl MatchLedger {
    /// Creates an empty ledger.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the full ledger from the repository.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored ledger cannot be read.
    #[instrument(skip(repository))]
    pub fn load(repository: &mut ArenaRepository) -> Result<Self, DbError> {
        let matches = repository.load_matches()?;
        info!(count = matches.len(), "Match ledger loaded");
        Ok(Self { matches })
    }

    /// Appends a match. The in-memory ledger only grows once the stored
    /// append has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored append fails; the ledger is unchanged.
    #[instrument(skip(self, repository, record), fields(player_id = record.player_id()))]
    pub fn append(
        &mut self,
        repository: &mut ArenaRepository,
        record: Match,
    ) -> Result<Match, DbError> {
        let stored = repository.insert_match(&record)?;
        self.matches.push(stored.clone());
        debug!(len = self.matches.len(), "Match appended");
        Ok(stored)
    }

    /// All matches for `player_id`, in ledger order.
    #[instrument(skip(self))]
    pub fn all_for(&self, player_id: i32) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| m.player_id == player_id)
            .collect()
    }

    /// The full ledger, in insertion order.
    #[instrument(skip(self))]
    pub fn all(&self) -> &[Match] {
        &self.matches
    }

    /// Number of matches recorded.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if no match has been recorded.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Highest player id referenced by any match, if any.
    #[instrument(skip(self))]
    pub fn max_player_id(&self) -> Option<i32> {
        self.matches.iter().map(|m| m.player_id).max()
    }
}
