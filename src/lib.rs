//! # Elastic Map
//!
//! A Rust hash map built on open addressing with a bounded, two-dimensional
//! ("elastic") probe sequence.
//!
//! A key with hash `h` in a table of `capacity` slots is looked for at
//! `(h + level * attempt) & (capacity - 1)` for every `level` in `1..=log2(capacity)`
//! and every `attempt` in `0..probe_limit`. Each level restarts at the home slot
//! with a wider stride, so no operation ever visits more than
//! `log2(capacity) * probe_limit` slots.
//!
//! - Lookups keep probing past empty slots, so removal leaves a plain hole
//!   instead of a tombstone.
//! - The table doubles once the number of entries reaches
//!   `capacity * load_factor`, checked before every insert.
//! - Because the probe sequence is bounded, an insert can fail even below the
//!   load factor. That failure is returned as
//!   [`ElasticMapError::InsertionCapacityExceeded`] instead of being hidden.
//!
//! ## Basic Usage
//!
//! ```rust
//! use elastic_map::ElasticMap;
//!
//! # fn main() -> elastic_map::Result<()> {
//! // Create a new hash map
//! let mut map = ElasticMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1)?;
//! map.insert("banana".to_string(), 2)?;
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! assert_eq!(map.insert("apple".to_string(), 10)?, Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(map.remove("apple"), Some(10));
//! assert_eq!(map.get("apple"), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Tuning the probe sequence
//!
//! ```rust
//! use elastic_map::{ElasticConfig, ElasticMap, ElasticMapError, MapViews};
//!
//! let config = ElasticConfig::new().with_capacity(16).with_load_factor(1.0).with_probe_limit(1);
//! let mut map = ElasticMap::try_with_config(config)?;
//!
//! // With a single attempt per level, keys sharing a home slot cannot coexist
//! let mut failures = 0;
//! for i in 0..64_u32 {
//!     if let Err(ElasticMapError::InsertionCapacityExceeded { .. }) = map.insert(i, i) {
//!         failures += 1;
//!     }
//! }
//! assert_eq!(map.len() + failures, 64);
//! assert_eq!(map.keys().len(), map.len());
//! # Ok::<(), ElasticMapError>(())
//! ```

/// Construction parameters and their validation
mod config;
/// Module implementing the single-threaded hash map with elastic probing
mod elastic_map;
/// Error types
mod error;
/// The probe sequence shared by all table operations
mod probe;
/// Snapshot views and bulk-copy helpers
mod views;

pub use config::{
    DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, DEFAULT_PROBE_LIMIT, ElasticConfig, MIN_CAPACITY,
};
pub use elastic_map::{ElasticMap, Iter};
pub use error::{ElasticMapError, Result};
pub use views::{MapViews, copy_into, from_pairs};
