//! `PostgreSQL`-backed cart store.

use async_trait::async_trait;
use sqlx::PgPool;

use paddock_core::{CartLineId, ProductId, UserKey};

use super::{CartStore, RepositoryError};
use crate::models::{CartLine, CartLineView, Page, PageRequest};

/// Cart store backed by the `cart_line` and `product` tables.
///
/// The schema carries the hard invariants: `UNIQUE (user_key, product_id)`
/// rejects duplicate lines and the foreign key on `product_id` rejects
/// dangling catalog references. Mutual exclusion for read-modify-write
/// cycles is provided by the merge engine's per-key lock table, not by row
/// locks, so every method here is a single self-contained statement.
#[derive(Debug, Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    id: CartLineId,
    user_key: UserKey,
    product_id: ProductId,
    quantity: i32,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: Some(row.id),
            user_key: row.user_key,
            product_id: row.product_id,
            quantity: row.quantity,
        }
    }
}

impl PgCartStore {
    /// Create a new store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_save_error(e: sqlx::Error, product_id: ProductId) -> RepositoryError {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return RepositoryError::Conflict(
                    "cart line already exists for this user and product".to_owned(),
                );
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::MissingProduct(product_id);
            }
        }
        RepositoryError::Database(e)
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn find_for_update(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT id, user_key, product_id, quantity
            FROM cart_line
            WHERE user_key = $1 AND product_id = $2
            ",
        )
        .bind(user_key)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartLine::from))
    }

    async fn save(&self, line: CartLine) -> Result<CartLine, RepositoryError> {
        match line.id {
            None => {
                let id: CartLineId = sqlx::query_scalar(
                    r"
                    INSERT INTO cart_line (user_key, product_id, quantity)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    ",
                )
                .bind(&line.user_key)
                .bind(line.product_id)
                .bind(line.quantity)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| Self::map_save_error(e, line.product_id))?;

                Ok(CartLine {
                    id: Some(id),
                    ..line
                })
            }
            Some(id) => {
                sqlx::query(
                    r"
                    UPDATE cart_line
                    SET quantity = $1
                    WHERE id = $2
                    ",
                )
                .bind(line.quantity)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| Self::map_save_error(e, line.product_id))?;

                Ok(line)
            }
        }
    }

    async fn delete_by_id(&self, id: CartLineId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_line WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_by_user_and_product(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_line WHERE user_key = $1 AND product_id = $2")
            .bind(user_key)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_by_user(&self, user_key: &UserKey) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_line WHERE user_key = $1")
            .bind(user_key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn page_by_user(
        &self,
        user_key: &UserKey,
        request: Option<PageRequest>,
    ) -> Result<Page<CartLineView>, RepositoryError> {
        const SELECT_VIEWS: &str = r"
            SELECT p.id AS product_id, p.product_name, p.description,
                   c.quantity, p.price, p.currency
            FROM cart_line c
            JOIN product p ON p.id = c.product_id
            WHERE c.user_key = $1
            ORDER BY c.id ASC
            ";

        match request {
            Some(request) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM cart_line WHERE user_key = $1")
                        .bind(user_key)
                        .fetch_one(&self.pool)
                        .await?;

                let views = sqlx::query_as::<_, CartLineView>(&format!(
                    "{SELECT_VIEWS} LIMIT $2 OFFSET $3"
                ))
                .bind(user_key)
                .bind(i64::from(request.size))
                .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
                .fetch_all(&self.pool)
                .await?;

                Ok(Page::paged(
                    views,
                    request,
                    u64::try_from(total).unwrap_or(0),
                ))
            }
            None => {
                let views = sqlx::query_as::<_, CartLineView>(SELECT_VIEWS)
                    .bind(user_key)
                    .fetch_all(&self.pool)
                    .await?;

                Ok(Page::unpaged(views))
            }
        }
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
