//! Strictly Jokenpô - rock-paper-scissors against the CPU
//!
//! Players register, submit moves against a randomly drawn CPU move, and
//! read back their match history and a global scoreboard. Players and the
//! match ledger are stored in SQLite and reloaded in full on startup.
//!
//! # Architecture
//!
//! - **Rules**: pure move resolution ([`resolve`])
//! - **Registry**: player identities ([`PlayerRegistry`])
//! - **Ledger**: append-only match record ([`MatchLedger`])
//! - **Stats**: history and scoreboard derived from the ledger
//! - **Arena**: the façade that ties them together ([`Arena`])
//! - **Server**: REST API over a shared arena
//!
//! # Example
//!
//! ```no_run
//! use strictly_jokenpo::{Arena, Move, ScriptedMoves};
//!
//! # fn example() -> Result<(), strictly_jokenpo::ArenaError> {
//! let mut arena = Arena::in_memory(Box::new(ScriptedMoves::new(vec![Move::Scissors])))?;
//! let ana = arena.register("Ana")?;
//! let result = arena.play(*ana.id(), Move::Rock)?;
//! println!("{}", result.message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arena;
mod config;
mod db;
mod error;
mod games;
mod ledger;
mod registry;
mod stats;

pub mod server;

// Crate-level exports - Game rules
pub use games::jokenpo::{
    Move, MoveSource, Outcome, RandomMoves, Resolution, ScriptedMoves, outcome_of, resolve,
};

// Crate-level exports - Persistence
pub use db::{ArenaRepository, DbError, MatchRow, NewMatchRow, Player};

// Crate-level exports - Registry, ledger and statistics
pub use ledger::{Match, MatchLedger};
pub use registry::PlayerRegistry;
pub use stats::{ScoreboardRow, history, scoreboard, standing};

// Crate-level exports - Façade, config and errors
pub use arena::{Arena, PlayResult};
pub use config::{ArenaConfig, ConfigError};
pub use error::{ArenaError, ArenaErrorKind};
