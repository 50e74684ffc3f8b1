//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog is read-only once loaded.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { catalog }),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
