//! The cart store.
//!
//! Every mutation follows the same sequence:
//! 1. Take the mutation lock and copy the current cart
//! 2. Query the inventory where the operation needs it
//! 3. Write the new snapshot to storage
//! 4. Publish the new cart to memory and subscribers
//!
//! A failure at any step leaves both the in-memory cart and the stored
//! snapshot as they were, sends the error's notice to the notification sink
//! and returns the error.

use std::num::NonZeroU32;
use std::sync::Arc;

use rocket_shoes_core::{Cart, Item, ProductId, UpdateProductAmount};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, instrument, warn};

use crate::error::{CartError, CartErrorKind, CartOperation};
use crate::inventory::Inventory;
use crate::notify::NotificationSink;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the persisted cart snapshot.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Result of a mutation that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The new cart was persisted and published.
    Committed,
    /// The request was a no-op; nothing was fetched, written or published.
    Ignored,
}

/// Shopping cart state with stock-checked mutations.
///
/// Construct once per session with [`CartStore::load`] and share it by
/// reference or `Arc`. Mutations are serialized: each one runs its
/// read-fetch-commit sequence to completion before the next starts.
pub struct CartStore<I, S> {
    inventory: I,
    storage: S,
    notifier: Arc<dyn NotificationSink>,
    state: watch::Sender<Cart>,
    mutation_lock: Mutex<()>,
}

impl<I, S> std::fmt::Debug for CartStore<I, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<I: Inventory, S: KeyValueStore> CartStore<I, S> {
    /// Create the store from the persisted snapshot.
    ///
    /// An absent, unreadable or invalid snapshot yields an empty cart.
    pub fn load(inventory: I, storage: S, notifier: Arc<dyn NotificationSink>) -> Self {
        let cart = read_snapshot(&storage);
        debug!(items = cart.len(), "Loaded cart");

        Self {
            inventory,
            storage,
            notifier,
            state: watch::Sender::new(cart),
            mutation_lock: Mutex::new(()),
        }
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Observe the cart. The receiver sees every committed cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is fetched from the catalog and added
    /// with amount 1.
    ///
    /// # Errors
    ///
    /// - `StockExceeded` if one more unit is above the stock record
    /// - `Failure` if the inventory or storage fails
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Outcome, CartError> {
        let _guard = self.mutation_lock.lock().await;
        let result = self.try_add_product(product_id).await;
        self.finish(CartOperation::Add, result)
    }

    /// Remove a product regardless of its amount.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the product is not in the cart
    /// - `Failure` if storage fails
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Outcome, CartError> {
        let _guard = self.mutation_lock.lock().await;
        let result = self.try_remove_product(product_id);
        self.finish(CartOperation::Remove, result)
    }

    /// Set the amount of a product already in the cart.
    ///
    /// Amounts below 1 are ignored without a notice.
    ///
    /// # Errors
    ///
    /// - `StockExceeded` if `amount` is above the stock record
    /// - `ItemNotFound` if the product is not in the cart
    /// - `Failure` if the inventory or storage fails
    #[instrument(skip(self, request), fields(product_id = %request.product_id, amount = request.amount))]
    pub async fn update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<Outcome, CartError> {
        if request.amount < 1 {
            debug!("Ignoring non-positive amount");
            return Ok(Outcome::Ignored);
        }

        let _guard = self.mutation_lock.lock().await;
        let result = self.try_update_product_amount(request).await;
        self.finish(CartOperation::UpdateAmount, result)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `Failure` if storage fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<Outcome, CartError> {
        let _guard = self.mutation_lock.lock().await;
        let result = self.commit(Cart::new());
        self.finish(CartOperation::Clear, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Outcome, CartErrorKind> {
        let mut cart = self.cart();
        let current = cart.get(product_id).map(|item| item.amount);

        let stock = self.inventory.stock(product_id).await?;
        let desired = current.map_or(1, |amount| u64::from(amount.get()) + 1);

        if !stock.allows(desired) {
            return Err(CartErrorKind::StockExceeded {
                product_id,
                requested: desired,
                available: stock.amount,
            });
        }

        match current.and_then(|amount| amount.checked_add(1)) {
            Some(amount) => {
                cart.set_amount(product_id, amount);
            }
            None => {
                let product = self.inventory.product(product_id).await?;
                cart.push(Item::new(product, NonZeroU32::MIN))?;
            }
        }

        self.commit(cart)
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<Outcome, CartErrorKind> {
        let mut cart = self.cart();

        if cart.remove(product_id).is_none() {
            return Err(CartErrorKind::ItemNotFound(product_id));
        }

        self.commit(cart)
    }

    async fn try_update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<Outcome, CartErrorKind> {
        let UpdateProductAmount { product_id, amount } = request;
        let mut cart = self.cart();

        let stock = self.inventory.stock(product_id).await?;
        let requested = u64::try_from(amount).unwrap_or_default();

        let exceeded = || CartErrorKind::StockExceeded {
            product_id,
            requested,
            available: stock.amount,
        };

        if !stock.allows(requested) {
            return Err(exceeded());
        }

        let Some(amount) = u32::try_from(requested).ok().and_then(NonZeroU32::new) else {
            return Err(exceeded());
        };

        if !cart.set_amount(product_id, amount) {
            return Err(CartErrorKind::ItemNotFound(product_id));
        }

        self.commit(cart)
    }

    /// Persist, then publish. Storage failure publishes nothing.
    fn commit(&self, cart: Cart) -> Result<Outcome, CartErrorKind> {
        let snapshot = serde_json::to_string(&cart).map_err(StorageError::from)?;

        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &snapshot) {
            error!(error = %e, "Failed to persist cart snapshot");
            return Err(e.into());
        }

        debug!(
            items = cart.len(),
            quantity = cart.total_quantity(),
            "Committed cart"
        );
        self.state.send_replace(cart);
        Ok(Outcome::Committed)
    }

    fn finish(
        &self,
        operation: CartOperation,
        result: Result<Outcome, CartErrorKind>,
    ) -> Result<Outcome, CartError> {
        result.map_err(|kind| {
            let err = CartError::new(operation, kind);
            warn!(error = %err, "Cart mutation rejected");
            self.notifier.error(err.notice());
            err
        })
    }
}

fn read_snapshot<S: KeyValueStore>(storage: &S) -> Cart {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, "Could not read cart snapshot, starting empty");
            return Cart::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Invalid cart snapshot, starting empty");
        Cart::new()
    })
}
