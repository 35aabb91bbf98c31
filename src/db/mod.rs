//! SQLite persistence for players and the match ledger.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{MatchRow, NewMatchRow, Player};
pub use repository::ArenaRepository;
