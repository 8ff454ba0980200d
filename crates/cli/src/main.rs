//! Ponsiv CLI - Database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ponsiv-cli migrate
//!
//! # Seed the catalog from a YAML file
//! ponsiv-cli seed --file catalog.yaml
//!
//! # Replace the existing catalog entirely
//! ponsiv-cli seed --file catalog.yaml --clear
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Load brands, categories, and products from a YAML catalog file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ponsiv-cli")]
#[command(author, version, about = "Ponsiv CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog from a YAML file
    Seed {
        /// Path to the YAML catalog file
        #[arg(short, long)]
        file: String,

        /// Delete the existing catalog before seeding
        #[arg(long, default_value_t = false)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, clear } => commands::seed::catalog(&file, clear).await?,
    }
    Ok(())
}
