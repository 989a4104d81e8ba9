//! Core store addressing types.
//!
//! These types enforce the store's naming rules at construction time,
//! so an invalid collection, key or path never reaches a backend.

mod collection;
mod push_key;
mod record_id;
mod record_path;
mod store_url;

pub use collection::Collection;
pub use push_key::PushKeyGenerator;
pub use record_id::RecordId;
pub use record_path::RecordPath;
pub use store_url::{StoreKind, StoreUrl};
