//! Cart commands.
//!
//! Each mutating command runs one cart store operation. Rejected operations
//! print their notice to stderr (through [`StderrNotifier`]) and fail the
//! process.

mod render;

use std::sync::Arc;

use rocket_shoes_cart::{
    CartConfig, CartError, CartStore, ConfigError, FileStorage, InventoryClient, InventoryError,
    NotificationSink, Outcome,
};
use rocket_shoes_core::{ProductId, UpdateProductAmount};
use thiserror::Error;

pub use render::render_cart;

/// The store as wired by the CLI.
pub type Store = CartStore<InventoryClient, FileStorage>;

/// Errors that can occur while setting up the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("inventory client error: {0}")]
    Inventory(#[from] InventoryError),
}

/// Prints notices to stderr, the terminal's toast.
struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    #[allow(clippy::print_stderr)]
    fn error(&self, message: &str) {
        eprintln!("✖ {message}");
    }
}

/// Build the store from environment configuration.
pub fn open_store() -> Result<Store, CliError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(
        api = %config.api.base_url,
        storage = %config.storage_path.display(),
        "Opening cart"
    );

    Ok(CartStore::load(
        InventoryClient::new(&config.api)?,
        FileStorage::new(&config.storage_path),
        Arc::new(StderrNotifier),
    ))
}

#[allow(clippy::print_stdout)]
pub fn show(store: &Store) {
    print!("{}", render_cart(&store.cart()));
}

pub async fn add(store: &Store, product_id: i32) -> Result<(), CartError> {
    store.add_product(ProductId::new(product_id)).await?;
    tracing::info!(product_id, "Product added");
    Ok(())
}

pub async fn remove(store: &Store, product_id: i32) -> Result<(), CartError> {
    store.remove_product(ProductId::new(product_id)).await?;
    tracing::info!(product_id, "Product removed");
    Ok(())
}

pub async fn update(store: &Store, product_id: i32, amount: i64) -> Result<(), CartError> {
    let outcome = store
        .update_product_amount(UpdateProductAmount {
            product_id: ProductId::new(product_id),
            amount,
        })
        .await?;

    match outcome {
        Outcome::Committed => tracing::info!(product_id, amount, "Amount updated"),
        Outcome::Ignored => tracing::info!(product_id, amount, "Amount below 1, nothing to do"),
    }
    Ok(())
}

pub async fn clear(store: &Store) -> Result<(), CartError> {
    store.clear().await?;
    tracing::info!("Cart cleared");
    Ok(())
}
