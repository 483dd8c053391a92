//! The cart line entity.

use paddock_core::{CartLineId, ProductId, UserKey};

/// One row of a user's cart: "this user has this quantity of this product".
///
/// A line has no id until it is first persisted; the store assigns one and
/// it is immutable afterwards. Equality follows stored identity: two lines
/// are equal iff both have an assigned id and the ids match. A line without
/// an id compares unequal to every other line, including another unsaved
/// line with identical fields.
///
/// A quantity of zero or below is a transient in-memory state only; the
/// merge engine resolves it to deletion before anything is committed.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Surrogate key, assigned on first persist.
    pub id: Option<CartLineId>,
    /// Owner of the cart.
    pub user_key: UserKey,
    /// The product this line refers to. The catalog owns the product.
    pub product_id: ProductId,
    /// Signed quantity. Persisted lines always carry a positive value.
    pub quantity: i32,
}

impl CartLine {
    /// Create a new, not-yet-persisted cart line.
    #[must_use]
    pub const fn new(user_key: UserKey, product_id: ProductId, quantity: i32) -> Self {
        Self {
            id: None,
            user_key,
            product_id,
            quantity,
        }
    }
}

impl PartialEq for CartLine {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
