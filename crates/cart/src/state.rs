//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CartConfig;
use crate::db::CartStore;
use crate::service::CartService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// cart service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CartConfig,
    cart: CartService,
}

impl AppState {
    /// Create a new application state over a cart store.
    #[must_use]
    pub fn new(config: CartConfig, store: Arc<dyn CartStore>) -> Self {
        let cart = CartService::new(store);

        Self {
            inner: Arc::new(AppStateInner { config, cart }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &CartConfig {
        &self.inner.config
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }
}
