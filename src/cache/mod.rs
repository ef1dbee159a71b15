//! Local cache for report downloads
//!
//! SQLite-backed storage with file blobs for large instance lists, so
//! repeated `show` runs for the same period skip the download.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Cache TTL per data type
pub struct CacheTtl;

impl CacheTtl {
    /// Published instance lists only change when a period is regenerated
    pub const INSTANCES: Duration = Duration::from_secs(60 * 60); // 1 hr
}

pub use client::CachedAllocationClient;
pub use key::cache_key;
pub use storage::CacheStorage;
