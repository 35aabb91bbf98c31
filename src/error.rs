//! Arena error types.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::db::DbError;

/// What went wrong in an arena operation.
#[derive(Debug, Clone, Display)]
pub enum ArenaErrorKind {
    /// Malformed input, rejected before any state change.
    #[display("Validation failed: {message}")]
    Validation {
        /// Why the input was rejected.
        message: String,
    },
    /// Reference to a player that is not registered.
    #[display("Player {player_id} not found")]
    NotFound {
        /// The unknown player id.
        player_id: i32,
    },
    /// The durable store failed; in-memory state was left unchanged.
    #[display("{_0}")]
    Storage(DbError),
}

/// Arena error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct ArenaError {
    /// Error category and details.
    pub kind: ArenaErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ArenaError {
    /// Creates a new arena error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ArenaErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> &ArenaErrorKind {
        &self.kind
    }

    /// Returns `true` for rejected input.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ArenaErrorKind::Validation { .. })
    }

    /// Returns `true` for unknown player references.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ArenaErrorKind::NotFound { .. })
    }

    /// Returns `true` for storage failures.
    pub fn is_storage(&self) -> bool {
        matches!(self.kind, ArenaErrorKind::Storage(_))
    }
}

impl From<DbError> for ArenaError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        Self::new(ArenaErrorKind::Storage(err))
    }
}
