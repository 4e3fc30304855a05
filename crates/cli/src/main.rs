//! Kiogloss CLI - storefront client from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kg catalog list --page 0 --size 12
//! kg catalog show rose-gloss
//! kg catalog tags
//!
//! # Manage the session
//! kg auth login -e ana@example.com -p secret
//! kg auth whoami
//! kg auth logout
//!
//! # Work the cart
//! kg cart add rose-gloss -q 2 --size 10ml --color coral
//! kg cart show
//! kg cart clear
//!
//! # Order history and checkout
//! kg orders list
//! kg checkout --capture-id CAP-123 --amount 25.00
//! ```
//!
//! Configuration comes from the environment (`KIOGLOSS_API_URL`,
//! `KIOGLOSS_STORAGE_DIR`, `KIOGLOSS_TIMEOUT_SECS`).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use kiogloss_client::Storefront;

mod commands;

#[derive(Parser)]
#[command(name = "kg")]
#[command(author, version, about = "Kiogloss storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the public catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Sign in, sign out, or inspect the session
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// List past orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Record an order for an already-captured payment
    Checkout {
        /// Payment provider capture id
        #[arg(long)]
        capture_id: String,

        /// Captured amount, e.g. 25.00
        #[arg(long)]
        amount: rust_decimal::Decimal,
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
    let storefront = Storefront::from_env()?;
    storefront.session.bootstrap().await;

    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(&storefront, action).await?,
        Commands::Auth { action } => commands::auth::run(&storefront, action).await?,
        Commands::Cart { action } => commands::cart::run(&storefront, action).await?,
        Commands::Orders { action } => commands::orders::run(&storefront, action).await?,
        Commands::Checkout { capture_id, amount } => {
            commands::checkout::run(&storefront, capture_id, amount).await?;
        }
    }
    Ok(())
}
