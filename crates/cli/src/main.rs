//! Woodnook CLI - Browse the catalog and check product data from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every product
//! woodnook products
//!
//! # Filter by category (or "all") and search by name
//! woodnook products -c Sofa -s bed
//!
//! # Show the category bar's fixed set
//! woodnook categories
//!
//! # Probe whether a URL serves a displayable image
//! woodnook image check https://img.example/sofa.jpg
//! ```
//!
//! # Environment Variables
//!
//! - `WOODNOOK_SERVICE_URL` - Base URL of the hosted data service
//! - `WOODNOOK_SERVICE_KEY` - API key for the data service

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use woodnook_core::CategoryFilter;

mod commands;

#[derive(Parser)]
#[command(name = "woodnook")]
#[command(author, version, about = "Woodnook storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the catalog
    Products {
        /// Category to filter on (or "all")
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Case-insensitive name search term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the fixed category set
    Categories,
    /// Image URL tools
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },
}

#[derive(Subcommand)]
enum ImageAction {
    /// Probe whether a URL serves a displayable image
    Check {
        /// The URL to probe
        url: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { category, search } => {
            commands::products::list(category, search.as_deref()).await?;
        }
        Commands::Categories => commands::products::categories(),
        Commands::Image { action } => match action {
            ImageAction::Check { url } => commands::image::check(&url).await?,
        },
    }
    Ok(())
}
