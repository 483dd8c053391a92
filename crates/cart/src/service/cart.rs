//! Cart merge engine and read projection.

use std::sync::Arc;

use paddock_core::{ProductId, UserKey};

use crate::db::{CartStore, RepositoryError};
use crate::models::{CartLine, CartLineView, Page, PageRequest};

use super::lock::KeyLockTable;

/// Applies quantity deltas to cart lines and serves the paginated read
/// model.
///
/// Concurrent merges for the same `(user_key, product_id)` pair are
/// serialized by the key lock table for the whole read-modify-write cycle,
/// so a sequence of merges always lands as if applied one at a time. The
/// store's uniqueness constraint backstops any create/create race that a
/// multi-instance deployment could still produce.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
    locks: Arc<KeyLockTable>,
}

impl CartService {
    /// Create a cart service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self {
            store,
            locks: Arc::new(KeyLockTable::new()),
        }
    }

    /// Apply a signed quantity delta to the user's line for one product.
    ///
    /// A zero delta is fully inert: no lock, no read, no write. Otherwise
    /// the line is loaded (or created) under the per-key lock and the delta
    /// is merged in; a resulting quantity of zero or below deletes the line
    /// instead of storing it. A line deleted this way is forgotten: a later
    /// positive delta starts again from zero, not from the negative
    /// remainder.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingProduct` if the product is not in
    /// the catalog and `RepositoryError::Conflict` if the uniqueness
    /// backstop rejects a racing create. Storage errors propagate
    /// unchanged.
    pub async fn add_to_cart(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
        delta: i32,
    ) -> Result<(), RepositoryError> {
        if delta == 0 {
            return Ok(());
        }

        let _guard = self.locks.lock(user_key, product_id).await;

        match self.store.find_for_update(user_key, product_id).await? {
            Some(line) => {
                let new_quantity = line.quantity.saturating_add(delta);
                if new_quantity > 0 {
                    self.store
                        .save(CartLine {
                            quantity: new_quantity,
                            ..line
                        })
                        .await?;
                } else if let Some(id) = line.id {
                    self.store.delete_by_id(id).await?;
                }
            }
            None => {
                if delta > 0 {
                    self.store
                        .save(CartLine::new(user_key.clone(), product_id, delta))
                        .await?;
                }
            }
        }

        tracing::debug!(%user_key, %product_id, delta, "merged cart delta");
        Ok(())
    }

    /// Remove the user's line for one product. Idempotent.
    ///
    /// Takes the same per-key lock as a merge, so a concurrent merge either
    /// fully precedes or fully follows the removal.
    ///
    /// # Errors
    ///
    /// Storage errors propagate unchanged.
    pub async fn remove_from_cart(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let _guard = self.locks.lock(user_key, product_id).await;
        self.store
            .delete_by_user_and_product(user_key, product_id)
            .await
    }

    /// Remove every line in the user's cart. Idempotent.
    ///
    /// Issued as a single atomic bulk delete at the store.
    ///
    /// # Errors
    ///
    /// Storage errors propagate unchanged.
    pub async fn clear_cart(&self, user_key: &UserKey) -> Result<(), RepositoryError> {
        self.store.delete_all_by_user(user_key).await
    }

    /// List the user's cart, joined with catalog data.
    ///
    /// Pure read: takes no locks and reflects all writes committed before
    /// the read began. `request` of `None` returns everything as a single
    /// unpaged result; otherwise a 0-indexed window sorted by line id
    /// ascending.
    ///
    /// # Errors
    ///
    /// Storage errors propagate unchanged.
    pub async fn list_cart(
        &self,
        user_key: &UserKey,
        request: Option<PageRequest>,
    ) -> Result<Page<CartLineView>, RepositoryError> {
        self.store.page_by_user(user_key, request).await
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it is unreachable.
    pub async fn health_check(&self) -> Result<(), RepositoryError> {
        self.store.health_check().await
    }
}
