//! Strictly Jokenpô - Unified CLI
//!
//! Runs the HTTP arena server or a single arena operation against the
//! configured database.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use strictly_jokenpo::server::{self, MatchRecord};
use strictly_jokenpo::{Arena, ArenaConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.host().clone());
            let port = port.unwrap_or(*config.port());
            run_server(config, host, port).await
        }
        Command::Register { name } => {
            let mut arena = Arena::from_config(&config)?;
            print_json(&arena.register(&name)?)
        }
        Command::Players => {
            let arena = Arena::from_config(&config)?;
            print_json(&arena.list())
        }
        Command::Remove { id } => {
            let mut arena = Arena::from_config(&config)?;
            let name = arena.remove(id)?;
            print_json(&serde_json::json!({ "message": format!("Player {} removed", name) }))
        }
        Command::Play { id, player_move } => {
            let mut arena = Arena::from_config(&config)?;
            print_json(&arena.play(id, player_move)?)
        }
        Command::History { id } => {
            let arena = Arena::from_config(&config)?;
            let records: Vec<MatchRecord> = arena
                .history(id)?
                .into_iter()
                .map(MatchRecord::from)
                .collect();
            print_json(&records)
        }
        Command::Scoreboard => {
            let arena = Arena::from_config(&config)?;
            print_json(&arena.scoreboard())
        }
    }
}

/// Run the HTTP API server
#[instrument(skip(config))]
async fn run_server(config: ArenaConfig, host: String, port: u16) -> Result<()> {
    info!("Starting Strictly Jokenpô HTTP server");
    let arena = Arena::from_config(&config)?;
    server::serve(arena, &host, port).await?;
    Ok(())
}

/// Loads the config file and applies command-line overrides.
#[instrument(skip(cli), fields(config_path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<ArenaConfig> {
    let mut config = ArenaConfig::from_file_or_default(&cli.config)?;

    if let Some(db_path) = &cli.db_path {
        info!(db_path = %db_path, "Overriding database path");
        config = config.with_db_path(db_path.clone());
    }
    if let Some(seed) = cli.seed {
        info!(seed, "Overriding CPU seed");
        config = config.with_seed(Some(seed));
    }

    Ok(config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_jokenpo=debug")),
        )
        .init();
}
