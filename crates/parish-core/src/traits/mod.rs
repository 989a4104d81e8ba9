//! Core traits for store backends.

mod store;

pub use store::Store;
