//! Read-only catalog product data.

use paddock_core::ProductId;
use rust_decimal::Decimal;

/// A catalog product as seen by the cart service.
///
/// Products are owned by the catalog; the cart service only reads the
/// denormalized fields it needs for the read projection and never mutates
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub description: String,
    pub price: Decimal,
    /// ISO 4217 currency code, as stored by the catalog.
    pub currency: String,
}
