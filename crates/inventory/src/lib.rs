//! Rocket Shoes inventory API library.
//!
//! Serves stock and product records from a JSON seed file. The binary wraps
//! [`routes::app`] with Sentry and a TCP listener; tests mount the router
//! directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod request_id;
pub mod routes;
pub mod state;

pub use catalog::{Catalog, CatalogError};
pub use config::InventoryConfig;
pub use routes::app;
pub use state::AppState;
