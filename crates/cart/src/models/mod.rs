//! Domain models for the cart service.
//!
//! - [`cart_line`] - The stored unit: one user, one product, one quantity
//! - [`product`] - Read-only catalog data joined into the read projection
//! - [`view`] - The denormalized cart line view returned to clients
//! - [`page`] - Pagination request and result types

pub mod cart_line;
pub mod page;
pub mod product;
pub mod view;

pub use cart_line::CartLine;
pub use page::{Page, PageRequest};
pub use product::Product;
pub use view::CartLineView;
