//! parish-rest - HTTP-backed record store.
//!
//! Talks to a hosted realtime database over its REST interface: every
//! record path maps to `{base}/{path}.json`, reads are `GET`, whole-document
//! writes are `PUT`, merges are `PATCH` and deletes are `DELETE`.

mod client;
mod store;

pub use client::RestClient;
pub use store::RestStore;
