use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
    iter, mem,
};

use crate::{
    config::{ElasticConfig, growth_threshold},
    error::{ElasticMapError, Result},
    probe::{ProbeSeq, num_levels},
};

/// A key-value pair stored in a slot
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
    /// Full hash of the key, kept so growth never rehashes
    hash: u64,
}

/// Outcome of walking a key's probe sequence for an insert
enum Placement {
    /// The key already lives at this index
    Occupied(usize),
    /// The key is absent and this is the first empty candidate slot
    Vacant(usize),
    /// Neither the key nor an empty slot was found
    Exhausted,
}

/// A hash table with elastic, level-strided probing.
///
/// Every key has a bounded probe sequence of `levels * probe_limit` candidate slots,
/// where `levels` is `log2(capacity)`. Each level restarts at the key's home slot
/// and steps through `probe_limit` slots with a stride equal to the level number.
/// Lookups do not stop at empty slots, which lets removal leave plain holes
/// instead of tombstones.
///
/// Growth doubles the slot array once the number of entries reaches the load factor
/// threshold. Because the probe sequence is bounded, an insert can still run out of
/// candidate slots; that is reported as [`ElasticMapError::InsertionCapacityExceeded`].
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Clone)]
pub struct ElasticMap<K, V, S = RandomState> {
    /// The slots storing the key-value pairs
    slots: Vec<Option<Entry<K, V>>>,
    /// Current number of elements in the hash table
    size: usize,
    /// Number of elements at which the next insert grows the table
    threshold: usize,
    /// Configured load factor in `(0, 1]`
    max_load_factor: f64,
    /// Attempts per probing level
    probe_limit: usize,
    /// Set by removals; while clear, the first empty slot proves a key is absent
    has_holes: bool,
    /// Hasher factory for keys
    hash_builder: S,
}

impl<K, V> ElasticMap<K, V, RandomState> {
    /// Creates an empty `ElasticMap` with 16 slots, load factor 0.75 and probe limit 10
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ElasticConfig::new())
    }

    /// Creates an empty `ElasticMap` with at least `capacity` slots and default parameters
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(ElasticConfig::new().with_capacity(capacity))
    }

    /// Creates an empty `ElasticMap` from `config`, sanitizing out-of-range parameters
    #[must_use]
    pub fn with_config(config: ElasticConfig) -> Self {
        Self::with_config_and_hasher(config, RandomState::new())
    }

    /// Creates an empty `ElasticMap` from `config`, rejecting out-of-range parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidLoadFactor` or `InvalidProbeLimit` when `config` does not validate.
    pub fn try_with_config(config: ElasticConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }
}

impl<K, V, S> ElasticMap<K, V, S> {
    /// Creates an empty `ElasticMap` with default parameters that hashes keys with `hash_builder`
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(ElasticConfig::new(), hash_builder)
    }

    /// Creates an empty `ElasticMap` from `config` that hashes keys with `hash_builder`
    pub fn with_config_and_hasher(config: ElasticConfig, hash_builder: S) -> Self {
        let config = config.sanitized();
        let capacity = config.initial_capacity();

        Self {
            slots: empty_slots(capacity),
            size: 0,
            threshold: growth_threshold(capacity, config.load_factor()),
            max_load_factor: config.load_factor(),
            probe_limit: config.probe_limit(),
            has_holes: false,
            hash_builder,
        }
    }

    /// Returns the number of elements in the hash table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the hash table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the hash table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor of the hash table
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the load factor at which the table grows
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns the number of attempts made on each probing level
    #[must_use]
    pub fn probe_limit(&self) -> usize {
        self.probe_limit
    }

    /// Returns the number of probing levels for the current capacity
    #[must_use]
    pub fn num_levels(&self) -> usize {
        num_levels(self.slots.len())
    }

    /// Returns a reference to the map's hasher factory
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Clears the hash map, removing all key-value pairs. The capacity is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.size = 0;
        self.has_holes = false;
    }

    /// Returns an iterator over the key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter(), remaining: self.size }
    }

    /// Returns true if some entry holds a value equal to `value`
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Starts the probe sequence for `hash` against the current slot array
    fn probe_seq(&self, hash: u64) -> ProbeSeq {
        ProbeSeq::new(hash, self.slots.len(), self.probe_limit)
    }

    /// Error describing an exhausted probe sequence on a table of `capacity` slots
    fn exhausted(&self, capacity: usize) -> ElasticMapError {
        ElasticMapError::InsertionCapacityExceeded {
            capacity,
            levels: num_levels(capacity),
            probe_limit: self.probe_limit,
        }
    }
}

impl<K, V, S> ElasticMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Computes the hash for a key
    fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        self.hash_builder.hash_one(key)
    }

    /// Position within the probe sequence and slot index of `key`, if present
    fn find<Q>(&self, hash: u64, key: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.probe_seq(hash).enumerate().find(|&(_, index)| {
            matches!(
                self.slots.get(index),
                Some(Some(entry)) if entry.hash == hash && entry.key.borrow() == key
            )
        })
    }

    /// Walks the probe sequence for an insert of `key`
    fn place(&self, hash: u64, key: &K) -> Placement {
        let mut vacant = None;

        for index in self.probe_seq(hash) {
            match self.slots.get(index) {
                Some(Some(entry)) => {
                    if entry.hash == hash && entry.key == *key {
                        return Placement::Occupied(index);
                    }
                }
                Some(None) => {
                    if vacant.is_none() {
                        vacant = Some(index);
                    }
                    // Without removals an empty candidate means the key was never stored
                    // further along its sequence
                    if !self.has_holes {
                        break;
                    }
                }
                None => break,
            }
        }

        vacant.map_or(Placement::Exhausted, Placement::Vacant)
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (_, index) = self.find(self.hash(key), key)?;
        self.slots.get(index)?.as_ref().map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (_, index) = self.find(self.hash(key), key)?;
        self.slots.get_mut(index)?.as_mut().map(|entry| &mut entry.value)
    }

    /// Returns true if the hash table contains the given key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Number of slots a lookup of `key` visits before finding it, or `None` if absent
    pub fn probe_length<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.hash(key), key).map(|(position, _)| position.saturating_add(1))
    }

    /// Insert a key-value pair into the hash table.
    ///
    /// Grows the table first when it holds `capacity * load_factor` entries or more.
    /// Returns the previous value if the key was already present.
    ///
    /// # Errors
    ///
    /// Returns `InsertionCapacityExceeded` when every slot of the key's probe sequence
    /// holds another key, or when the growth triggered by this call cannot rehome
    /// every existing entry. The map is left unchanged in both cases.
    ///
    /// A failed growth is retried by the next call, so until a `remove` brings `len()`
    /// below the threshold every insert fails the same way, even one that would only
    /// overwrite a key already in the map.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        if self.size >= self.threshold {
            self.grow()?;
        }

        let hash = self.hash(&key);
        match self.place(hash, &key) {
            Placement::Occupied(index) => {
                let entry = self.slots.get_mut(index).and_then(Option::as_mut);
                Ok(entry.map(|entry| mem::replace(&mut entry.value, value)))
            }
            Placement::Vacant(index) => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Some(Entry { key, value, hash });
                    self.size = self.size.saturating_add(1);
                }
                Ok(None)
            }
            Placement::Exhausted => Err(self.exhausted(self.slots.len())),
        }
    }

    /// Inserts every pair of `pairs` in iteration order, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first `InsertionCapacityExceeded` hit. Pairs inserted before it stay.
    pub fn put_all<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.insert(key, value)?;
        }
        Ok(())
    }

    /// Removes a key-value pair from the hash table, leaving an empty slot behind
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (_, index) = self.find(self.hash(key), key)?;
        let entry = self.slots.get_mut(index)?.take()?;

        self.size = self.size.saturating_sub(1);
        self.has_holes = true;
        Some(entry.value)
    }

    /// Doubles the slot array and reinserts every entry in slot order.
    ///
    /// Placement in the new array is decided before anything moves, so a failure
    /// leaves the table exactly as it was.
    fn grow(&mut self) -> Result<()> {
        let old_capacity = self.slots.len();
        let new_capacity =
            old_capacity.checked_mul(2).ok_or_else(|| self.exhausted(old_capacity))?;

        let mut taken = vec![false; new_capacity];
        let mut moves = Vec::with_capacity(self.size);

        for (old_index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = slot else { continue };

            // Keys are distinct and the new array has no holes, so the first free
            // candidate is where an insert would put the entry
            let new_index = ProbeSeq::new(entry.hash, new_capacity, self.probe_limit)
                .find(|&index| taken.get(index) == Some(&false))
                .ok_or_else(|| self.exhausted(new_capacity))?;

            if let Some(flag) = taken.get_mut(new_index) {
                *flag = true;
            }
            moves.push((old_index, new_index));
        }

        let mut slots = empty_slots(new_capacity);
        for (old_index, new_index) in moves {
            let entry = self.slots.get_mut(old_index).and_then(Option::take);
            if let Some(to) = slots.get_mut(new_index) {
                *to = entry;
            }
        }

        self.slots = slots;
        self.threshold = growth_threshold(new_capacity, self.max_load_factor);
        self.has_holes = false;
        Ok(())
    }
}

impl<K, V> Default for ElasticMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for ElasticMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a ElasticMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Vec<Option<Entry<K, V>>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots not yet visited
    slots: std::slice::Iter<'a, Option<Entry<K, V>>>,
    /// Occupied slots not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Option::as_ref)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
