//! Integration tests for Rocket Shoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocket-shoes-integration-tests
//! ```
//!
//! Every test gets its own inventory API on an ephemeral port and its own
//! snapshot file in a temporary directory; nothing external is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use rocket_shoes_cart::{
    CART_STORAGE_KEY, CartStore, FileStorage, InventoryApiConfig, InventoryClient, KeyValueStore,
    RecordingNotifier,
};
use rocket_shoes_inventory::{AppState, Catalog};
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Catalog served to the tests.
pub const SEED: &str = r#"{
    "stock": [
        { "id": 1, "amount": 3 },
        { "id": 2, "amount": 5 },
        { "id": 4, "amount": 1 },
        { "id": 7, "amount": 2 }
    ],
    "products": [
        { "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "1.jpg" },
        { "id": 2, "title": "Tênis VR Caminhada Confortável", "price": 139.9, "image": "2.jpg" },
        { "id": 4, "title": "Tênis Adidas Duramo Lite 2.0", "price": 219.9, "image": "4.jpg" }
    ]
}"#;

/// The store type exercised end to end.
pub type Store = CartStore<InventoryClient, FileStorage>;

/// A running inventory API plus a scratch directory for snapshots.
pub struct TestContext {
    pub addr: SocketAddr,
    pub notifier: Arc<RecordingNotifier>,
    dir: TempDir,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start an inventory API serving [`SEED`].
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the seed is invalid.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        let catalog = Catalog::from_json(SEED).expect("Seed catalog must parse");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = rocket_shoes_inventory::app(AppState::new(catalog));
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            notifier: Arc::new(RecordingNotifier::new()),
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
            server,
        }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Base URL of the running inventory API.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Open a store against the running API and the scratch snapshot file.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn store(&self) -> Store {
        self.store_for(&self.api_url())
    }

    /// Open a store against an arbitrary API URL.
    ///
    /// # Panics
    ///
    /// Panics if the URL or client is invalid.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn store_for(&self, api_url: &str) -> Store {
        let config = InventoryApiConfig::new(api_url).expect("Valid API URL");
        CartStore::load(
            InventoryClient::new(&config).expect("Client builds"),
            FileStorage::new(self.storage_path()),
            self.notifier.clone(),
        )
    }

    /// Raw snapshot currently on disk, parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the storage file or snapshot is unreadable.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn snapshot(&self) -> Option<serde_json::Value> {
        FileStorage::new(self.storage_path())
            .get(CART_STORAGE_KEY)
            .expect("Storage readable")
            .map(|raw| serde_json::from_str(&raw).expect("Snapshot is JSON"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}
