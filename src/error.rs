//! Error types for `ElasticMap`

use thiserror::Error;

/// Errors reported by `ElasticMap` and `ElasticConfig`
///
/// A missing key is never an error: lookups and removals return `None` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ElasticMapError {
    /// Every candidate slot of the probe sequence was occupied by other keys.
    ///
    /// Returned by inserts, including the growth an insert triggers. The probing
    /// configuration is too tight for the observed key distribution; rebuilding
    /// with a larger probe limit or a lower load factor is the usual remedy.
    #[error(
        "failed to insert key: probe sequence exhausted \
         (capacity {capacity}, {levels} levels x {probe_limit} attempts)"
    )]
    InsertionCapacityExceeded {
        /// Capacity of the slot array that was probed
        capacity: usize,
        /// Number of probing levels for that capacity
        levels: usize,
        /// Attempts per level
        probe_limit: usize,
    },

    /// Load factor outside of `(0, 1]`
    #[error("invalid load factor {0}: expected a value in (0, 1]")]
    InvalidLoadFactor(f64),

    /// Probe limit of zero
    #[error("invalid probe limit: at least one attempt per level is required")]
    InvalidProbeLimit,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ElasticMapError>;
