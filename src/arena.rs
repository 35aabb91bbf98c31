//! Game session façade: the single entry point for gameplay.

use chrono::Utc;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::ArenaConfig;
use crate::db::{ArenaRepository, Player};
use crate::error::ArenaError;
use crate::games::jokenpo::{Move, MoveSource, Outcome, RandomMoves, resolve};
use crate::ledger::{Match, MatchLedger};
use crate::registry::PlayerRegistry;
use crate::stats::{self, ScoreboardRow};

/// Result of one `play` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayResult {
    player_id: i32,
    player_move: Move,
    #[serde(rename = "cpu_move")]
    opponent_move: Move,
    #[serde(rename = "result")]
    outcome: Outcome,
    message: String,
}

/// Owns the player registry, match ledger, durable store and the CPU's
/// move source.
///
/// All mutations go through `&mut self`; share it behind a single lock
/// when serving concurrent requests.
pub struct Arena {
    repository: ArenaRepository,
    registry: PlayerRegistry,
    ledger: MatchLedger,
    opponent: Box<dyn MoveSource>,
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("repository", &self.repository)
            .field("players", &self.registry.list().len())
            .field("matches", &self.ledger.len())
            .finish_non_exhaustive()
    }
}

impl Arena {
    /// Opens the arena stored at `db_path`, reloading players and the full
    /// ledger before returning.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError`] if the store cannot be opened or read.
    #[instrument(skip(db_path, opponent), fields(db_path = %db_path.as_ref()))]
    pub fn open(
        db_path: impl AsRef<str>,
        opponent: Box<dyn MoveSource>,
    ) -> Result<Self, ArenaError> {
        let mut repository = ArenaRepository::open(db_path)?;
        let ledger = MatchLedger::load(&mut repository)?;
        let registry = PlayerRegistry::load(&mut repository, ledger.max_player_id())?;

        info!(
            players = registry.list().len(),
            matches = ledger.len(),
            "Arena ready"
        );
        Ok(Self {
            repository,
            registry,
            ledger,
            opponent,
        })
    }

    /// Opens the arena described by `config`.
    ///
    /// Uses a seeded CPU when `config.seed` is set, OS entropy otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError`] if the store cannot be opened or read.
    #[instrument(skip(config), fields(db_path = %config.db_path()))]
    pub fn from_config(config: &ArenaConfig) -> Result<Self, ArenaError> {
        let opponent = match config.seed() {
            Some(seed) => {
                debug!(seed, "Using seeded CPU");
                RandomMoves::seeded(*seed)
            }
            None => RandomMoves::from_entropy(),
        };
        Self::open(config.db_path(), Box::new(opponent))
    }

    /// Opens an ephemeral arena that lives only as long as the value.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError`] if the in-memory store cannot be created.
    #[instrument(skip(opponent))]
    pub fn in_memory(opponent: Box<dyn MoveSource>) -> Result<Self, ArenaError> {
        Self::open(":memory:", opponent)
    }

    /// Registers a new player.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or a storage error.
    #[instrument(skip(self))]
    pub fn register(&mut self, name: &str) -> Result<Player, ArenaError> {
        self.registry.register(&mut self.repository, name)
    }

    /// Looks up a registered player.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id.
    #[instrument(skip(self))]
    pub fn get(&self, player_id: i32) -> Result<&Player, ArenaError> {
        self.registry.get(player_id)
    }

    /// All registered players, in registration order.
    #[instrument(skip(self))]
    pub fn list(&self) -> &[Player] {
        self.registry.list()
    }

    /// Removes a player and returns its name. Its matches stay in the ledger.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, or a storage error.
    #[instrument(skip(self))]
    pub fn remove(&mut self, player_id: i32) -> Result<String, ArenaError> {
        self.registry.remove(&mut self.repository, player_id)
    }

    /// Plays `player_move` for `player_id` against a freshly drawn CPU move
    /// and records the match.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id (nothing is drawn or
    /// recorded), or a storage error if the match could not be stored (the
    /// ledger is unchanged).
    #[instrument(skip(self))]
    pub fn play(&mut self, player_id: i32, player_move: Move) -> Result<PlayResult, ArenaError> {
        let player_name = self.registry.get(player_id)?.name().clone();

        let opponent_move = self.opponent.draw();
        let resolution = resolve(player_move, opponent_move);

        let record = Match::new(
            player_id,
            player_name,
            player_move,
            opponent_move,
            Utc::now().naive_utc(),
        );
        self.ledger.append(&mut self.repository, record)?;

        info!(
            player_id,
            player_move = %player_move,
            opponent_move = %opponent_move,
            outcome = %resolution.outcome(),
            "Match played"
        );
        Ok(PlayResult {
            player_id,
            player_move,
            opponent_move,
            outcome: *resolution.outcome(),
            message: resolution.message().clone(),
        })
    }

    /// Matches played by a registered player, in the order they were played.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown or removed id.
    #[instrument(skip(self))]
    pub fn history(&self, player_id: i32) -> Result<Vec<&Match>, ArenaError> {
        stats::history(&self.registry, &self.ledger, player_id)
    }

    /// Ranked statistics for every registered player.
    #[instrument(skip(self))]
    pub fn scoreboard(&self) -> Vec<ScoreboardRow> {
        stats::scoreboard(&self.registry, &self.ledger)
    }

    /// Scoreboard row for one registered player.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id.
    #[instrument(skip(self))]
    pub fn standing(&self, player_id: i32) -> Result<ScoreboardRow, ArenaError> {
        stats::standing(&self.registry, &self.ledger, player_id)
    }

    /// Identifier the next registration will receive.
    #[instrument(skip(self))]
    pub fn next_id(&self) -> i32 {
        self.registry.next_id()
    }

    /// The full ledger, including matches of removed players.
    #[instrument(skip(self))]
    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }
}
