//! Cart contents.
//!
//! A [`Cart`] serializes as a bare JSON array of [`Item`]s, each item being
//! the product record with an `amount` field next to its attributes:
//!
//! ```json
//! [{ "id": 5, "title": "Tênis VR Caminhada", "price": 139.9, "amount": 2 }]
//! ```

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// Errors for cart contents that break the one-item-per-product rule.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartContentsError {
    /// The same product appears twice.
    #[error("product {0} appears more than once in the cart")]
    DuplicateItem(ProductId),
}

/// A product in the cart together with the requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(flatten)]
    pub product: Product,
    pub amount: NonZeroU32,
}

impl Item {
    /// Create an item from a catalog record.
    ///
    /// Any `amount` attribute the catalog sent is dropped; the cart owns that
    /// field.
    #[must_use]
    pub fn new(mut product: Product, amount: NonZeroU32) -> Self {
        product.attributes.remove("amount");
        Self { product, amount }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Line total, `None` when the product has no usable price.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.product
            .price()
            .map(|price| price * Decimal::from(self.amount.get()))
    }
}

/// The user's in-progress selection, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Item>", try_from = "Vec<Item>")]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from items, rejecting duplicate product ids.
    ///
    /// # Errors
    ///
    /// Returns [`CartContentsError::DuplicateItem`] if two items share an id.
    pub fn from_items(items: Vec<Item>) -> Result<Self, CartContentsError> {
        let mut cart = Self::new();
        for item in items {
            cart.push(item)?;
        }
        Ok(cart)
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all amounts (header badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.amount.get()))
            .sum()
    }

    /// Sum of line totals. Items without a usable price count as zero.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().filter_map(Item::line_total).sum()
    }

    /// Append an item.
    ///
    /// # Errors
    ///
    /// Returns [`CartContentsError::DuplicateItem`] if the product is already
    /// present; the cart is left untouched.
    pub fn push(&mut self, item: Item) -> Result<(), CartContentsError> {
        if self.contains(item.id()) {
            return Err(CartContentsError::DuplicateItem(item.id()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Set the amount of an existing item. Returns `false` if it is absent.
    pub fn set_amount(&mut self, id: ProductId, amount: NonZeroU32) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove an item, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl From<Cart> for Vec<Item> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl TryFrom<Vec<Item>> for Cart {
    type Error = CartContentsError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}
