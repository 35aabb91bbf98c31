//! Database repository for players and the match ledger.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, MatchRow, NewMatchRow, Player, schema};
use crate::ledger::Match;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Durable store for the player collection and the match ledger.
///
/// Holds a single connection for its whole life, so `":memory:"` gives an
/// ephemeral store that survives across calls (useful for tests).
pub struct ArenaRepository {
    db_path: String,
    conn: SqliteConnection,
}

impl std::fmt::Debug for ArenaRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaRepository")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl ArenaRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, DbError> {
        let db_path = db_path.as_ref().to_string();
        info!(path = %db_path, "Opening ArenaRepository");

        let mut conn = SqliteConnection::establish(&db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", db_path, e)))?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(DbError::migration)?;
        debug!(count = applied.len(), "Migrations applied");

        Ok(Self { db_path, conn })
    }

    /// Returns the path this repository was opened with.
    #[instrument(skip(self))]
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Loads every stored player, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn load_players(&mut self) -> Result<Vec<Player>, DbError> {
        debug!("Loading players");
        let players: Vec<Player> = schema::players::table
            .order(schema::players::id.asc())
            .select(Player::as_select())
            .load(&mut self.conn)?;

        info!(count = players.len(), "Players loaded");
        Ok(players)
    }

    /// Stores a new player and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the id is taken or a database error occurs.
    #[instrument(skip(self, player), fields(player_id = player.id(), name = %player.name()))]
    pub fn insert_player(&mut self, player: &Player) -> Result<Player, DbError> {
        debug!("Inserting player");
        let stored: Player = diesel::insert_into(schema::players::table)
            .values(player)
            .returning(Player::as_returning())
            .get_result(&mut self.conn)?;

        info!(player_id = stored.id(), "Player stored");
        Ok(stored)
    }

    /// Deletes a player record. Returns the number of rows removed.
    ///
    /// Matches referencing the player are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_player(&mut self, player_id: i32) -> Result<usize, DbError> {
        debug!(player_id, "Deleting player");
        let removed = diesel::delete(schema::players::table.find(player_id))
            .execute(&mut self.conn)?;

        info!(player_id, removed, "Player deleted");
        Ok(removed)
    }

    /// Loads the full ledger in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a stored move
    /// cannot be parsed.
    #[instrument(skip(self))]
    pub fn load_matches(&mut self) -> Result<Vec<Match>, DbError> {
        debug!("Loading ledger");
        let rows: Vec<MatchRow> = schema::matches::table
            .order(schema::matches::seq.asc())
            .select(MatchRow::as_select())
            .load(&mut self.conn)?;

        let matches = rows
            .into_iter()
            .map(MatchRow::into_match)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = matches.len(), "Ledger loaded");
        Ok(matches)
    }

    /// Appends a match to the stored ledger and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, record), fields(player_id = record.player_id()))]
    pub fn insert_match(&mut self, record: &Match) -> Result<Match, DbError> {
        debug!("Appending match");
        let row: MatchRow = diesel::insert_into(schema::matches::table)
            .values(NewMatchRow::from(record))
            .returning(MatchRow::as_returning())
            .get_result(&mut self.conn)?;

        info!(seq = row.seq(), player_id = row.player_id(), "Match stored");
        row.into_match()
    }
}
