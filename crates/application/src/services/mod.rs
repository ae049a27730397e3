pub mod record_cache;

pub use record_cache::{CacheEntry, CacheSignal, CachedDomain, RecordCache};
