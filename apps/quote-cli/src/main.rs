//! # adquote Entry Point
//!
//! ```bash
//! # Quote the built-in scenarios
//! cargo run -p adquote-cli
//!
//! # Use a custom config and print JSON
//! cargo run -p adquote-cli -- --config ./quote.toml --json
//!
//! # Override a default price
//! ADQUOTE_PREMIUM_PRICE=399 cargo run -p adquote-cli
//! ```

use adquote_cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    adquote_cli::init_tracing();

    let cli = Cli::parse();
    adquote_cli::run(cli).await?;

    Ok(())
}
