//! The cart line read projection.

use paddock_core::ProductId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A cart line joined with its catalog data, shaped for presentation.
///
/// Produced fresh on every read; never cached and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    pub product_name: String,
    pub description: String,
    pub quantity: i32,
    pub price: Decimal,
    pub currency: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let view = CartLineView {
            product_id: ProductId::new(26),
            product_name: "Merino ewes".to_owned(),
            description: "Two-year-old ewes".to_owned(),
            quantity: 2,
            price: Decimal::new(950_000, 2),
            currency: "USD".to_owned(),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["productId"], 26);
        assert_eq!(json["productName"], "Merino ewes");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["currency"], "USD");
    }
}
