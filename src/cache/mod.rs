//! Cache Module
//!
//! Provides the in-memory result cache with TTL expiration and an optional
//! capacity bound with least-recently-used eviction.

mod entry;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use order::AccessOrder;
pub use stats::CacheStats;
pub use store::{SharedCache, TtlCache};
