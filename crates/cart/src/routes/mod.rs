//! HTTP route handlers for the cart service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (store connectivity)
//!
//! # Cart
//! GET    /cart?userKey=&page=&size= - Paginated cart listing
//! POST   /cart/items                - Merge a quantity delta (body JSON)
//! DELETE /cart/items/{productId}?userKey= - Remove one product
//! DELETE /cart?userKey=             - Clear the cart
//! ```

pub mod cart;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{product_id}", delete(cart::remove))
}

/// Create all routes for the cart service.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/cart", cart_routes())
}
