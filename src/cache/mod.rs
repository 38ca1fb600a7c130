//! Response caching and request deduplication
//!
//! Responses are kept in memory for [`CACHE_DURATION_MS`] and keyed by a
//! fingerprint that ignores per-request auth fields. Identical requests that
//! overlap in time share a single upstream call.

pub mod dedup;
pub mod key;
pub mod storage;

pub use dedup::Deduplicator;
pub use key::fingerprint;
pub use storage::{CACHE_DURATION_MS, ResponseCache};
