//! parish-core - Core types, store contract and record accessors for parish
//! records.

pub mod accessor;
pub mod display;
pub mod entities;
pub mod error;
pub mod memory;
pub mod repo;
pub mod traits;
pub mod types;
pub mod user;
pub mod workflow;

pub use accessor::{Accessor, CollectionHandle};
pub use entities::CollectionKind;
pub use error::Error;
pub use memory::MemoryStore;
pub use repo::{Document, Record, RecordMeta};
pub use traits::Store;
pub use types::{Collection, PushKeyGenerator, RecordId, RecordPath, StoreUrl};
pub use user::User;
pub use workflow::Workflow;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
