//! parish-file - Filesystem-backed record store.

mod store;

pub use store::FileStore;
