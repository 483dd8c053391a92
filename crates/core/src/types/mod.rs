//! Core types for Paddock.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod user_key;

pub use id::*;
pub use user_key::{UserKey, UserKeyError};
