//! Cart business logic.
//!
//! - [`cart`] - The merge engine and read projection
//! - [`lock`] - Key-sharded mutual exclusion for read-modify-write cycles

pub mod cart;
pub mod lock;

pub use cart::CartService;
pub use lock::KeyLockTable;
