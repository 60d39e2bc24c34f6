//! Pokedex CLI
//!
//! Interactive shell for browsing PokeAPI locations and catching Pokémon.

mod commands;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::{ApiConfig, PokeApiClient};

use crate::commands::Session;

/// Pokedex - browse locations and catch Pokémon from the terminal
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "POKEDEX_JSON_LOGS")]
    json_logs: bool,

    /// PokeAPI root URL (overrides POKEAPI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Seconds to keep location responses cached
    #[arg(long)]
    location_ttl: Option<u64>,

    /// Seconds to keep Pokemon responses cached
    #[arg(long)]
    pokemon_ttl: Option<u64>,
}

impl Cli {
    fn api_config(&self) -> Result<ApiConfig> {
        let mut config = ApiConfig::from_env().context("Invalid environment configuration")?;

        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(seconds) = self.timeout {
            config = config.with_timeout_seconds(seconds);
        }
        if let Some(seconds) = self.location_ttl {
            config = config.with_location_ttl_seconds(seconds);
        }
        if let Some(seconds) = self.pokemon_ttl {
            config = config.with_pokemon_ttl_seconds(seconds);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the shell
    let filter = if cli.verbose {
        "pokedex=debug,info"
    } else {
        "pokedex=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let config = cli.api_config()?;
    tracing::debug!(?config, "Starting Pokedex");

    let client = PokeApiClient::with_config(config).context("Failed to create PokeAPI client")?;
    let mut session = Session::new(client);

    let result = repl::run(&mut session).await;
    session.close();

    result.context("Terminal I/O failed")
}
