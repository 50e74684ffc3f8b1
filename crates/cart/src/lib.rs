//! Rocket Shoes cart store.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the in-memory cart and mirrors it to a
//!   [`KeyValueStore`] after every successful mutation
//! - Stock and product records come from an [`Inventory`]; the HTTP
//!   implementation is [`InventoryClient`]
//! - Failed mutations return a [`CartError`] and push its notice to the
//!   injected [`NotificationSink`]
//! - Consumers observe commits through [`CartStore::subscribe`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocket_shoes_cart::{CartConfig, CartStore, FileStorage, InventoryClient, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::load(
//!     InventoryClient::new(&config.api)?,
//!     FileStorage::new(&config.storage_path),
//!     Arc::new(TracingNotifier),
//! );
//!
//! store.add_product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError, InventoryApiConfig};
pub use error::{CartError, CartErrorKind, CartOperation, FailureCause};
pub use inventory::{Inventory, InventoryClient, InventoryError};
pub use notify::{NotificationSink, RecordingNotifier, TracingNotifier};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore, Outcome};
