//! Products domain module.
//!
//! This crate contains the catalog entry entity and its business rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::{LOW_STOCK_LIMIT, Product};
