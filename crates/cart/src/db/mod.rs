//! Cart line storage.
//!
//! # Database: `paddock_cart`
//!
//! The service owns two tables (see `crates/cart/migrations/`):
//!
//! - `product` - Read-only catalog data (name, description, price, currency)
//! - `cart_line` - One row per `(user_key, product_id)` pair, with a
//!   `UNIQUE (user_key, product_id)` constraint and `CHECK (quantity > 0)`
//!
//! Both tables draw surrogate ids from the shared `common_id_seq` sequence,
//! which allocates in blocks; ids are ordered but not contiguous.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/cart/migrations/` and run via:
//! ```bash
//! cargo run -p paddock-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use paddock_core::{CartLineId, ProductId, UserKey};

use crate::models::{CartLine, CartLineView, Page, PageRequest};

pub use memory::MemoryCartStore;
pub use postgres::PgCartStore;

/// Errors that can occur during store operations.
///
/// The merge engine and read projection propagate these unchanged; all
/// translation to a client-facing shape happens at the HTTP boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The `(user_key, product_id)` uniqueness constraint was violated.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The referenced product does not exist in the catalog.
    #[error("no product with id {0}")]
    MissingProduct(ProductId),
}

/// Durable keyed storage for cart lines.
///
/// One row exists per `(user_key, product_id)` pair; the store enforces
/// that uniqueness as a hard constraint, which backstops create/create
/// races that slip past the merge engine's per-key lock.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Look up the line for a `(user_key, product_id)` pair.
    ///
    /// Absence is not an error and nothing is locked for an absent line.
    /// Callers performing a read-modify-write cycle must hold the per-key
    /// lock (see [`crate::service::KeyLockTable`]) across this call and the
    /// following `save` or `delete_by_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_for_update(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, RepositoryError>;

    /// Upsert a cart line.
    ///
    /// Assigns a new id if the line has none, otherwise updates the row in
    /// place. An id is never changed once assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a row for the same
    /// `(user_key, product_id)` already exists, and
    /// `RepositoryError::MissingProduct` if the product is not in the
    /// catalog.
    async fn save(&self, line: CartLine) -> Result<CartLine, RepositoryError>;

    /// Delete a line by id. Idempotent; absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    async fn delete_by_id(&self, id: CartLineId) -> Result<(), RepositoryError>;

    /// Delete the line for a `(user_key, product_id)` pair. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    async fn delete_by_user_and_product(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
    ) -> Result<(), RepositoryError>;

    /// Delete every line for a user. Idempotent; an empty cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    async fn delete_all_by_user(&self, user_key: &UserKey) -> Result<(), RepositoryError>;

    /// Page through a user's cart joined with catalog data.
    ///
    /// Ordered by line id ascending so that pagination stays stable across
    /// calls even as other keys churn. `None` means unpaged: everything in
    /// one page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    async fn page_by_user(
        &self,
        user_key: &UserKey,
        request: Option<PageRequest>,
    ) -> Result<Page<CartLineView>, RepositoryError>;

    /// Check that the store is reachable. Used by the readiness probe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store is unreachable.
    async fn health_check(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
