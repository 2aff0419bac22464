//! Application state shared across handlers.

use std::sync::Arc;

use supermarket_core::CatalogStore;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Generic over the catalog backend so the binary runs on Postgres while
/// tests run on the in-memory catalog. Cheaply cloneable via `Arc`.
pub struct AppState<C> {
    inner: Arc<AppStateInner<C>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<C> {
    config: StorefrontConfig,
    catalog: C,
}

impl<C: CatalogStore> AppState<C> {
    /// Create a new application state.
    pub fn new(config: StorefrontConfig, catalog: C) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.inner.catalog
    }
}
