//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::jokenpo::Move;
use crate::ledger::Match;

/// Registered player.
///
/// Players are never mutated after registration.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Queryable,
    Selectable,
    Insertable,
    Getters,
    Serialize,
    Deserialize,
    new,
)]
#[diesel(table_name = schema::players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Player {
    id: i32,
    name: String,
    created_at: NaiveDateTime,
}

/// Stored ledger row. `seq` is the ledger position.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::matches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MatchRow {
    seq: i32,
    player_id: i32,
    player_name: String,
    player_move: String,
    opponent_move: String,
    played_at: NaiveDateTime,
}

impl MatchRow {
    /// Parses the stored moves into a ledger [`Match`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if either move column holds an unknown move.
    #[instrument(skip(self), fields(seq = self.seq))]
    pub fn into_match(self) -> Result<Match, DbError> {
        let player_move = parse_move(&self.player_move)?;
        let opponent_move = parse_move(&self.opponent_move)?;
        Ok(Match::new(
            self.player_id,
            self.player_name,
            player_move,
            opponent_move,
            self.played_at,
        ))
    }
}

/// Insertable ledger row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::matches)]
pub struct NewMatchRow {
    player_id: i32,
    player_name: String,
    player_move: String,
    opponent_move: String,
    played_at: NaiveDateTime,
}

impl From<&Match> for NewMatchRow {
    fn from(m: &Match) -> Self {
        Self::new(
            *m.player_id(),
            m.player_name().clone(),
            m.player_move().to_db_string().to_string(),
            m.opponent_move().to_db_string().to_string(),
            *m.played_at(),
        )
    }
}

#[instrument(skip(s), fields(s = %s))]
fn parse_move(s: &str) -> Result<Move, DbError> {
    s.parse::<Move>()
        .map_err(|_| DbError::new(format!("Invalid move: '{}'", s)))
}
