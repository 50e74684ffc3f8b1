//! Rocket Shoes CLI - a command-line shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! rs-cart show
//!
//! # Add one unit of product 3
//! rs-cart add 3
//!
//! # Set product 3 to two units
//! rs-cart update 3 2
//!
//! # Remove product 3
//! rs-cart remove 3
//!
//! # Empty the cart
//! rs-cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `CART_API_URL` - Inventory API base URL (default: `http://localhost:3333`)
//! - `CART_API_TIMEOUT_SECS` - Inventory request timeout (default: 10)
//! - `CART_STORAGE_PATH` - Cart snapshot file (default: `.rocket-shoes/storage.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

/// Log filter used when `RUST_LOG` is unset. The binary's own target is
/// its crate name (`rs_cart`), not the package name.
const DEFAULT_LOG_FILTER: &str = concat!(
    env!("CARGO_CRATE_NAME"),
    "=info,rocket_shoes_cart=error"
);

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "Rocket Shoes cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cart contents and subtotal
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: i32,
    },
    /// Set the amount of a product already in the cart
    Update {
        /// Product ID
        product_id: i32,

        /// New amount (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Remove every product from the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so `show` output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::open_store()?;

    match cli.command {
        Commands::Show => commands::show(&store),
        Commands::Add { product_id } => commands::add(&store, product_id).await?,
        Commands::Remove { product_id } => commands::remove(&store, product_id).await?,
        Commands::Update { product_id, amount } => {
            commands::update(&store, product_id, amount).await?;
        }
        Commands::Clear => commands::clear(&store).await?,
    }
    Ok(())
}
