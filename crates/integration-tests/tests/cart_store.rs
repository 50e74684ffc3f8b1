//! Integration tests for the cart store against a live inventory API.
//!
//! Each test starts the inventory router on an ephemeral port and drives a
//! `CartStore<InventoryClient, FileStorage>` through it.

#![allow(clippy::unwrap_used)]

use rocket_shoes_cart::error::{
    ADD_FAILED_NOTICE, OUT_OF_STOCK_NOTICE, REMOVE_FAILED_NOTICE, UPDATE_FAILED_NOTICE,
};
use rocket_shoes_cart::{FailureCause, InventoryError, Outcome};
use rocket_shoes_core::{ProductId, UpdateProductAmount};
use rocket_shoes_integration_tests::TestContext;

fn pid(id: i32) -> ProductId {
    ProductId::new(id)
}

fn update(id: i32, amount: i64) -> UpdateProductAmount {
    UpdateProductAmount {
        product_id: pid(id),
        amount,
    }
}

// ============================================================================
// Add
// ============================================================================

#[tokio::test]
async fn test_add_new_product_fetches_details_and_persists() {
    let ctx = TestContext::new().await;
    let store = ctx.store();

    let outcome = store.add_product(pid(1)).await.unwrap();
    assert_eq!(outcome, Outcome::Committed);

    let cart = store.cart();
    let item = cart.get(pid(1)).unwrap();
    assert_eq!(item.amount.get(), 1);
    assert_eq!(
        item.product.title(),
        Some("Tênis de Caminhada Leve Confortável")
    );

    let snapshot = ctx.snapshot().unwrap();
    assert_eq!(snapshot, serde_json::to_value(&cart).unwrap());
    assert_eq!(snapshot[0]["id"], 1);
    assert_eq!(snapshot[0]["amount"], 1);
    assert!(ctx.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_add_existing_product_increments_up_to_stock() {
    let ctx = TestContext::new().await;
    let store = ctx.store();

    for _ in 0..3 {
        store.add_product(pid(1)).await.unwrap();
    }
    assert_eq!(store.cart().get(pid(1)).unwrap().amount.get(), 3);

    // Stock for product 1 is 3
    let err = store.add_product(pid(1)).await.unwrap_err();
    assert!(err.is_stock_exceeded());
    assert_eq!(store.cart().get(pid(1)).unwrap().amount.get(), 3);
    assert_eq!(ctx.snapshot().unwrap()[0]["amount"], 3);
    assert_eq!(ctx.notifier.messages(), vec![OUT_OF_STOCK_NOTICE]);
}

#[tokio::test]
async fn test_add_single_unit_stock() {
    let ctx = TestContext::new().await;
    let store = ctx.store();

    store.add_product(pid(4)).await.unwrap();
    let err = store.add_product(pid(4)).await.unwrap_err();

    assert!(err.is_stock_exceeded());
    assert_eq!(err.notice(), OUT_OF_STOCK_NOTICE);
    assert_eq!(store.cart().total_quantity(), 1);
}

#[tokio::test]
async fn test_add_unknown_product_fails_without_changes() {
    let ctx = TestContext::new().await;
    let store = ctx.store();

    let err = store.add_product(pid(99)).await.unwrap_err();

    assert!(err.is_failure());
    let rocket_shoes_cart::CartErrorKind::Failure(FailureCause::Inventory(inventory_err)) =
        &err.kind
    else {
        panic!("expected an inventory failure, got {err:?}");
    };
    assert!(matches!(inventory_err, InventoryError::NotFound { .. }));
    // The API's correlation id travels back with the error
    assert!(inventory_err.request_id().is_some_and(|id| !id.is_empty()));
    assert!(err.to_string().contains("(request "));
    assert!(store.cart().is_empty());
    assert!(ctx.snapshot().is_none());
    assert_eq!(ctx.notifier.messages(), vec![ADD_FAILED_NOTICE]);
}

#[tokio::test]
async fn test_add_product_with_stock_but_no_details_fails() {
    let ctx = TestContext::new().await;
    let store = ctx.store();

    // Product 7 has a stock record but no catalog entry
    let err = store.add_product(pid(7)).await.unwrap_err();

    assert!(err.is_failure());
    assert!(store.cart().is_empty());
    assert_eq!(ctx.notifier.messages(), vec![ADD_FAILED_NOTICE]);
}

#[tokio::test]
async fn test_add_with_api_down_fails() {
    let ctx = TestContext::new().await;

    // Reserve a port then release it so nothing is listening there
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = closed.local_addr().unwrap();
    drop(closed);

    let store = ctx.store_for(&format!("http://{addr}"));
    let err = store.add_product(pid(1)).await.unwrap_err();

    assert!(matches!(
        err.kind,
        rocket_shoes_cart::CartErrorKind::Failure(FailureCause::Inventory(InventoryError::Http(
            _
        )))
    ));
    assert!(store.cart().is_empty());
    assert_eq!(ctx.notifier.messages(), vec![ADD_FAILED_NOTICE]);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_within_stock() {
    let ctx = TestContext::new().await;
    let store = ctx.store();
    store.add_product(pid(2)).await.unwrap();

    let outcome = store.update_product_amount(update(2, 5)).await.unwrap();

    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(store.cart().get(pid(2)).unwrap().amount.get(), 5);
    assert_eq!(ctx.snapshot().unwrap()[0]["amount"], 5);
}

#[tokio::test]
async fn test_update_above_stock_is_rejected() {
    let ctx = TestContext::new().await;
    let store = ctx.store();
    store.add_product(pid(2)).await.unwrap();

    let err = store.update_product_amount(update(2, 6)).await.unwrap_err();

    assert!(err.is_stock_exceeded());
    assert_eq!(store.cart().get(pid(2)).unwrap().amount.get(), 1);
    assert_eq!(ctx.notifier.messages(), vec![OUT_OF_STOCK_NOTICE]);
}

#[tokio::test]
async fn test_update_absent_item_fails() {
    let ctx = TestContext::new().await;
    let store = ctx.store();

    let err = store.update_product_amount(update(1, 2)).await.unwrap_err();

    assert!(err.is_item_not_found());
    assert_eq!(ctx.notifier.messages(), vec![UPDATE_FAILED_NOTICE]);
}

#[tokio::test]
async fn test_update_below_one_is_ignored() {
    let ctx = TestContext::new().await;
    let store = ctx.store();
    store.add_product(pid(1)).await.unwrap();

    let outcome = store.update_product_amount(update(1, 0)).await.unwrap();

    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(store.cart().get(pid(1)).unwrap().amount.get(), 1);
    assert!(ctx.notifier.messages().is_empty());
}

// ============================================================================
// Remove and clear
// ============================================================================

#[tokio::test]
async fn test_remove_present_and_absent() {
    let ctx = TestContext::new().await;
    let store = ctx.store();
    store.add_product(pid(1)).await.unwrap();
    store.add_product(pid(2)).await.unwrap();

    store.remove_product(pid(1)).await.unwrap();
    assert!(!store.cart().contains(pid(1)));
    assert_eq!(ctx.snapshot().unwrap().as_array().unwrap().len(), 1);

    let err = store.remove_product(pid(1)).await.unwrap_err();
    assert!(err.is_item_not_found());
    assert_eq!(ctx.notifier.messages(), vec![REMOVE_FAILED_NOTICE]);
}

#[tokio::test]
async fn test_clear_persists_empty_cart() {
    let ctx = TestContext::new().await;
    let store = ctx.store();
    store.add_product(pid(1)).await.unwrap();

    store.clear().await.unwrap();

    assert!(store.cart().is_empty());
    assert_eq!(ctx.snapshot().unwrap(), serde_json::json!([]));
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_cart_survives_reload() {
    let ctx = TestContext::new().await;

    {
        let store = ctx.store();
        store.add_product(pid(1)).await.unwrap();
        store.add_product(pid(2)).await.unwrap();
        store.update_product_amount(update(2, 4)).await.unwrap();
    }

    let reloaded = ctx.store();
    let cart = reloaded.cart();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.items()[0].id(), pid(1));
    assert_eq!(cart.get(pid(2)).unwrap().amount.get(), 4);
    assert_eq!(cart.total_quantity(), 5);
}

#[tokio::test]
async fn test_subscribers_see_commits() {
    let ctx = TestContext::new().await;
    let store = ctx.store();
    let mut rx = store.subscribe();

    store.add_product(pid(1)).await.unwrap();

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().contains(pid(1)));
}
