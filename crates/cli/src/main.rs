//! Loomline CLI - Catalog and back-office management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! loom-cli catalog list --category hoodies --query space --sort price
//! loom-cli catalog themes --category bags
//!
//! # Manage products
//! loom-cli products create --category tshirts --name "Tide Tee" --price 950 --inspiration ocean
//! loom-cli products delete --category tshirts --id 8 --yes
//!
//! # Manage orders and inquiries
//! loom-cli orders list --status pending
//! loom-cli orders complete --id 31
//! loom-cli inquiries stats
//!
//! # Store overview
//! loom-cli dashboard
//! ```
//!
//! The API base URL comes from `--api-base-url`, the `API_BASE_URL`
//! environment variable, or the localhost default, in that order.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use commands::{catalog, dashboard, inquiries, orders, products};

#[derive(Parser)]
#[command(name = "loom-cli")]
#[command(author, version, about = "Loomline management tools")]
struct Cli {
    /// Remote API base URL (defaults to $API_BASE_URL, then localhost)
    #[arg(long)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: catalog::CatalogAction,
    },
    /// Create, update, and delete products
    Products {
        #[command(subcommand)]
        action: products::ProductAction,
    },
    /// Manage customer orders
    Orders {
        #[command(subcommand)]
        action: orders::OrderAction,
    },
    /// Manage custom-order inquiries
    Inquiries {
        #[command(subcommand)]
        action: inquiries::InquiryAction,
    },
    /// Show store-wide metrics
    Dashboard,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = cli
        .api_base_url
        .or_else(|| std::env::var("API_BASE_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:5555".to_string());
    let api = loomline_api::ApiClient::new(&base_url)?;

    match cli.command {
        Commands::Catalog { action } => catalog::run(&api, action).await?,
        Commands::Products { action } => products::run(&api, action).await?,
        Commands::Orders { action } => orders::run(&api, action).await?,
        Commands::Inquiries { action } => inquiries::run(&api, action).await?,
        Commands::Dashboard => dashboard::run(&api).await?,
    }
    Ok(())
}
