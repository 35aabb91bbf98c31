//! Command-line interface for strictly_jokenpo.

use clap::{Parser, Subcommand};

/// Strictly Jokenpô - rock-paper-scissors against the CPU
#[derive(Parser, Debug)]
#[command(name = "strictly_jokenpo")]
#[command(about = "Rock-paper-scissors arena with a persistent scoreboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it doesn't exist)
    #[arg(short, long, default_value = "jokenpo.toml")]
    pub config: std::path::PathBuf,

    /// Path to the database file, overriding the config
    #[arg(long)]
    pub db_path: Option<String>,

    /// Fixed seed for the CPU's moves, overriding the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Host to bind to, overriding the config
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overriding the config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Register a new player
    Register {
        /// Display name (surrounding whitespace is trimmed)
        name: String,
    },

    /// List registered players
    Players,

    /// Remove a player (their matches stay in the ledger)
    Remove {
        /// Player id
        id: i32,
    },

    /// Play one round against the CPU
    Play {
        /// Player id
        id: i32,

        /// ROCK, PAPER or SCISSORS (PEDRA, PAPEL, TESOURA also accepted)
        #[arg(value_parser = parse_move)]
        player_move: strictly_jokenpo::Move,
    },

    /// Show a player's match history
    History {
        /// Player id
        id: i32,
    },

    /// Show the scoreboard
    Scoreboard,
}

fn parse_move(s: &str) -> Result<strictly_jokenpo::Move, String> {
    s.parse()
        .map_err(|_| format!("unknown move '{}': expected ROCK, PAPER or SCISSORS", s))
}
