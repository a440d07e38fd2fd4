//! # adquote CLI
//!
//! Quotes advertisement checkouts described in a TOML file.
//!
//! ## Startup Sequence
//! ```text
//! main()
//!   │
//!   ├── init_tracing()          RUST_LOG, logs to stderr
//!   ├── Cli::parse()            --config, --json
//!   └── run(cli)
//!         ├── QuoteConfig::load()
//!         ├── scenario::quote_all()
//!         └── present::render_*() → stdout
//! ```
//!
//! ## Modules
//!
//! - [`config`] - TOML + environment configuration
//! - [`scenario`] - Builds pricing rules and quotes scenarios
//! - [`present`] - AUD formatting, text and JSON output
//! - [`error`] - CLI error types

pub mod config;
pub mod error;
pub mod present;
pub mod scenario;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::QuoteConfig;
use crate::error::AppResult;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "adquote", version, about = "Quote advertisement checkouts")]
pub struct Cli {
    /// Config file (defaults to $ADQUOTE_CONFIG, then the platform config dir)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print quotes as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show price resolution for every item
/// - `RUST_LOG=adquote_core=trace` - Core crate only
/// - Default: warnings, plus INFO from this crate
///
/// Logs go to stderr so `--json` output stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,adquote_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config, quotes every scenario and prints the result.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = QuoteConfig::load(cli.config)?;
    info!(
        customers = config.customers.len(),
        special_prices = config.special_prices.len(),
        scenarios = config.scenarios.len(),
        "Configuration loaded"
    );

    let quotes = scenario::quote_all(&config).await?;

    if cli.json {
        println!("{}", present::render_json(&quotes)?);
    } else {
        for quote in &quotes {
            println!("{}", present::render_quote(quote));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["adquote", "--config", "quote.toml", "--json"]);
        assert_eq!(cli.config, Some(PathBuf::from("quote.toml")));
        assert!(cli.json);

        let cli = Cli::parse_from(["adquote"]);
        assert!(cli.config.is_none());
        assert!(!cli.json);
    }
}
