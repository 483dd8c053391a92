//! In-memory cart store.
//!
//! Backs the test suite and enforces the same invariants as the Postgres
//! schema: one line per `(user_key, product_id)` pair and no lines for
//! products missing from the catalog. Each method is a single atomic step
//! under one lock, mirroring the single-statement semantics of the SQL
//! store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use paddock_core::{CartLineId, ProductId, UserKey};

use super::{CartStore, RepositoryError};
use crate::models::{CartLine, CartLineView, Page, PageRequest, Product};

/// Cart store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    products: HashMap<ProductId, Product>,
    // BTreeMap keeps lines in id order, which is the pagination sort key.
    lines: BTreeMap<CartLineId, CartLine>,
}

impl Inner {
    fn allocate_id(&mut self) -> CartLineId {
        self.next_id += 1;
        CartLineId::new(self.next_id)
    }
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product into the catalog.
    ///
    /// The cart service never writes products; this exists so tests can
    /// seed the catalog the `cart_line` foreign key is checked against.
    pub async fn insert_product(&self, product: Product) {
        let mut inner = self.inner.write().await;
        inner.products.insert(product.id, product);
    }

    /// Number of stored cart lines across all users.
    pub async fn line_count(&self) -> usize {
        self.inner.read().await.lines.len()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn find_for_update(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .lines
            .values()
            .find(|line| line.user_key == *user_key && line.product_id == product_id)
            .cloned())
    }

    async fn save(&self, line: CartLine) -> Result<CartLine, RepositoryError> {
        let mut inner = self.inner.write().await;

        if !inner.products.contains_key(&line.product_id) {
            return Err(RepositoryError::MissingProduct(line.product_id));
        }

        match line.id {
            None => {
                // Uniqueness backstop, as the SQL schema's UNIQUE constraint.
                let duplicate = inner.lines.values().any(|existing| {
                    existing.user_key == line.user_key && existing.product_id == line.product_id
                });
                if duplicate {
                    return Err(RepositoryError::Conflict(
                        "cart line already exists for this user and product".to_owned(),
                    ));
                }

                let id = inner.allocate_id();
                let line = CartLine {
                    id: Some(id),
                    ..line
                };
                inner.lines.insert(id, line.clone());
                Ok(line)
            }
            Some(id) => {
                // Update-in-place only; a row deleted since the line was
                // loaded stays deleted, as a SQL UPDATE by id would no-op.
                if let Some(slot) = inner.lines.get_mut(&id) {
                    *slot = line.clone();
                }
                Ok(line)
            }
        }
    }

    async fn delete_by_id(&self, id: CartLineId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.lines.remove(&id);
        Ok(())
    }

    async fn delete_by_user_and_product(
        &self,
        user_key: &UserKey,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.lines.retain(|_, line| {
            !(line.user_key == *user_key && line.product_id == product_id)
        });
        Ok(())
    }

    async fn delete_all_by_user(&self, user_key: &UserKey) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.lines.retain(|_, line| line.user_key != *user_key);
        Ok(())
    }

    async fn page_by_user(
        &self,
        user_key: &UserKey,
        request: Option<PageRequest>,
    ) -> Result<Page<CartLineView>, RepositoryError> {
        let inner = self.inner.read().await;

        // BTreeMap iteration is id-ascending already.
        let views: Vec<CartLineView> = inner
            .lines
            .values()
            .filter(|line| line.user_key == *user_key)
            .map(|line| {
                let product = inner.products.get(&line.product_id).ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "cart line references unknown product {}",
                        line.product_id
                    ))
                })?;
                Ok(CartLineView {
                    product_id: product.id,
                    product_name: product.product_name.clone(),
                    description: product.description.clone(),
                    quantity: line.quantity,
                    price: product.price,
                    currency: product.currency.clone(),
                })
            })
            .collect::<Result<_, RepositoryError>>()?;

        match request {
            Some(request) => {
                let total = views.len() as u64;
                let windowed: Vec<CartLineView> = views
                    .into_iter()
                    .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
                    .take(request.size.try_into().unwrap_or(usize::MAX))
                    .collect();
                Ok(Page::paged(windowed, request, total))
            }
            None => Ok(Page::unpaged(views)),
        }
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
