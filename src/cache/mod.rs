//! Bounded LRU + TTL cache of finished company analyses.

pub mod clock;
pub mod store;
pub mod types;


#[cfg(any(test, feature = "mock"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use store::{CacheStats, CacheStore, spawn_expiry_sweeper};
pub use types::{CacheStatus, ESG_CACHE_STATUS_HEADER};
