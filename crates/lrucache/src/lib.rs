//! # lrucache
//!
//! Fixed-capacity Least-Recently-Used cache over keys.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1) lookup)
//! - **Recency list**: arena-backed doubly-linked list, LRU at the head,
//!   MRU at the tail (O(1) promotion and eviction)
//! - **Controller**: [`LruCache`] keeps both in step and enforces capacity
//!
//! ```
//! use lrucache::{LruCache, Touch};
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.touch("a");
//! cache.touch("b");
//! assert_eq!(cache.touch("c"), Touch::Evicted("a"));
//! assert_eq!(cache.snapshot(), vec!["c", "b"]);
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod order;
mod stats;

pub use cache::{LruCache, Touch};
pub use error::{Error, Result};
pub use order::Iter;
pub use stats::CacheStats;
