//! Construction parameters for `ElasticMap`

use crate::error::{ElasticMapError, Result};

/// Initial capacity used by `ElasticMap::new`
pub const DEFAULT_CAPACITY: usize = 16;
/// Fraction of the capacity at which the table grows
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
/// Attempts per probing level
pub const DEFAULT_PROBE_LIMIT: usize = 10;
/// Smallest slot array; a single slot would leave zero probing levels
pub const MIN_CAPACITY: usize = 2;
/// Largest power of two representable in `usize`
const MAX_CAPACITY: usize = 1 << (usize::BITS - 1);

/// Parameters fixed at construction of an `ElasticMap`.
///
/// Only the capacity changes over the life of a map, and it only ever doubles.
///
/// ```rust
/// use elastic_map::{ElasticConfig, ElasticMap};
///
/// let config = ElasticConfig::new().with_capacity(100).with_load_factor(0.5).with_probe_limit(4);
/// assert!(config.validate().is_ok());
///
/// let map: ElasticMap<u32, u32> = ElasticMap::with_config(config);
/// assert_eq!(map.capacity(), 128);
/// assert_eq!(map.probe_limit(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticConfig {
    /// Requested number of slots, rounded up to a power of two on use
    initial_capacity: usize,
    /// Growth threshold as a fraction of the capacity, in `(0, 1]`
    load_factor: f64,
    /// Attempts per probing level, at least 1
    probe_limit: usize,
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ElasticConfig {
    /// Creates the default configuration: 16 slots, load factor 0.75, probe limit 10
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }

    /// Sets the requested initial capacity
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor at which the table doubles
    #[must_use]
    pub const fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the number of attempts made on each probing level
    #[must_use]
    pub const fn with_probe_limit(mut self, probe_limit: usize) -> Self {
        self.probe_limit = probe_limit;
        self
    }

    /// Requested initial capacity, as given
    #[must_use]
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Configured load factor, as given
    #[must_use]
    pub const fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Configured probe limit, as given
    #[must_use]
    pub const fn probe_limit(&self) -> usize {
        self.probe_limit
    }

    /// Checks that the load factor lies in `(0, 1]` and the probe limit is positive
    ///
    /// # Errors
    ///
    /// Returns `InvalidLoadFactor` or `InvalidProbeLimit` for the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(ElasticMapError::InvalidLoadFactor(self.load_factor));
        }
        if self.probe_limit == 0 {
            return Err(ElasticMapError::InvalidProbeLimit);
        }
        Ok(())
    }

    /// Returns a copy that is safe to build a table from.
    ///
    /// The capacity is rounded up to a power of two no smaller than `MIN_CAPACITY`,
    /// a load factor above 1 is lowered to 1, a load factor that is NaN or not positive
    /// falls back to `DEFAULT_LOAD_FACTOR`, and the probe limit is raised to at least 1.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        // NaN fails the comparison and takes the default too
        let load_factor = if self.load_factor > 0.0 {
            self.load_factor.min(1.0)
        } else {
            DEFAULT_LOAD_FACTOR
        };

        Self {
            initial_capacity: round_capacity(self.initial_capacity),
            load_factor,
            probe_limit: self.probe_limit.max(1),
        }
    }
}

/// Rounds a requested capacity up to a usable power of two
pub(crate) fn round_capacity(capacity: usize) -> usize {
    capacity.max(MIN_CAPACITY).checked_next_power_of_two().unwrap_or(MAX_CAPACITY)
}

/// Number of occupied slots at which a table of `capacity` slots must grow
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn growth_threshold(capacity: usize, load_factor: f64) -> usize {
    (capacity as f64 * load_factor).ceil() as usize
}
