//! Core types for Rocket Shoes.
//!
//! This module provides type-safe wrappers for the catalog and cart.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{Cart, CartContentsError, Item};
pub use id::*;
pub use product::{Product, StockRecord};

/// Request to set the quantity of a cart item.
///
/// `amount` is signed on purpose: callers may hand over zero or negative
/// values, which the cart store ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}
