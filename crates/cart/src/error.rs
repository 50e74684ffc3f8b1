//! Cart mutation errors and the notices shown for them.

use rocket_shoes_core::{CartContentsError, ProductId};
use thiserror::Error;

use crate::inventory::InventoryError;
use crate::storage::StorageError;

/// Notice for a requested quantity above the available stock.
pub const OUT_OF_STOCK_NOTICE: &str = "Quantidade solicitada fora de estoque";
/// Notice for a failed add.
pub const ADD_FAILED_NOTICE: &str = "Erro na adição do produto";
/// Notice for a failed remove.
pub const REMOVE_FAILED_NOTICE: &str = "Erro na remoção do produto";
/// Notice for a failed quantity update.
pub const UPDATE_FAILED_NOTICE: &str = "Erro na alteração de quantidade do produto";
/// Notice for a failed clear.
pub const CLEAR_FAILED_NOTICE: &str = "Erro ao esvaziar o carrinho";

/// The mutation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
    Clear,
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add product"),
            Self::Remove => write!(f, "remove product"),
            Self::UpdateAmount => write!(f, "update product amount"),
            Self::Clear => write!(f, "clear cart"),
        }
    }
}

/// Why a mutation was rejected.
#[derive(Debug, Error)]
pub enum CartErrorKind {
    /// The requested quantity is above the stock record.
    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// Inventory, storage or any other failure.
    #[error(transparent)]
    Failure(#[from] FailureCause),
}

/// Underlying cause of a [`CartErrorKind::Failure`].
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid cart contents: {0}")]
    Contents(#[from] CartContentsError),
}

impl From<InventoryError> for CartErrorKind {
    fn from(err: InventoryError) -> Self {
        Self::Failure(err.into())
    }
}

impl From<StorageError> for CartErrorKind {
    fn from(err: StorageError) -> Self {
        Self::Failure(err.into())
    }
}

impl From<CartContentsError> for CartErrorKind {
    fn from(err: CartContentsError) -> Self {
        Self::Failure(err.into())
    }
}

/// A rejected cart mutation. The cart and its snapshot are unchanged.
#[derive(Debug, Error)]
#[error("{operation} failed: {kind}")]
pub struct CartError {
    pub operation: CartOperation,
    pub kind: CartErrorKind,
}

impl CartError {
    #[must_use]
    pub const fn new(operation: CartOperation, kind: CartErrorKind) -> Self {
        Self { operation, kind }
    }

    /// The user-facing notice for this error.
    #[must_use]
    pub const fn notice(&self) -> &'static str {
        if matches!(self.kind, CartErrorKind::StockExceeded { .. }) {
            return OUT_OF_STOCK_NOTICE;
        }

        match self.operation {
            CartOperation::Add => ADD_FAILED_NOTICE,
            CartOperation::Remove => REMOVE_FAILED_NOTICE,
            CartOperation::UpdateAmount => UPDATE_FAILED_NOTICE,
            CartOperation::Clear => CLEAR_FAILED_NOTICE,
        }
    }

    #[must_use]
    pub const fn is_stock_exceeded(&self) -> bool {
        matches!(self.kind, CartErrorKind::StockExceeded { .. })
    }

    #[must_use]
    pub const fn is_item_not_found(&self) -> bool {
        matches!(self.kind, CartErrorKind::ItemNotFound(_))
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.kind, CartErrorKind::Failure(_))
    }
}
