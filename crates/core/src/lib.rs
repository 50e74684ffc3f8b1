//! Rocket Shoes Core - Shared types library.
//!
//! This crate provides common types used across all Rocket Shoes components:
//! - `cart` - Cart store, inventory client and snapshot persistence
//! - `inventory` - Simulated inventory API
//! - `cli` - Command-line cart front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, catalog records, stock records and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
