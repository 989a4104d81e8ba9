//! Record representations.
//!
//! [`Document`] is the untyped body kept at a record path; [`Record`] is the
//! typed view used by [`Accessor`](crate::Accessor).

mod document;
mod types;

pub use document::{CREATED_FIELD, Document, ID_FIELD, UPDATED_FIELD};
pub use types::{Record, RecordMeta, format_timestamp};
