//! The elastic probe sequence shared by every table operation.
//!
//! A key with hash `h` in a table of `capacity` slots visits, for each level
//! `1..=log2(capacity)` and each attempt `0..probe_limit`, the slot
//! `(h + level * attempt) & (capacity - 1)`. Every level restarts at the home
//! slot with a wider stride, so an operation never looks at more than
//! `levels * probe_limit` slots no matter how large the table is.

/// Number of probing levels for a power-of-two `capacity`
pub(crate) fn num_levels(capacity: usize) -> usize {
    capacity.checked_ilog2().unwrap_or(0) as usize
}

/// Iterator over the candidate slot indices of a single hash.
///
/// Lookup, insertion, removal and growth all walk this same sequence; an entry
/// is only ever stored at one of the indices it yields for the entry's hash.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    /// Hash truncated to the pointer width
    hash: usize,
    /// `capacity - 1`
    mask: usize,
    /// Last level to visit (inclusive)
    levels: usize,
    /// Attempts per level
    probe_limit: usize,
    /// Current level, starting at 1; past `levels` once exhausted
    level: usize,
    /// Current attempt within the level
    attempt: usize,
}

impl ProbeSeq {
    /// Starts the sequence for `hash` in a table of `capacity` slots
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn new(hash: u64, capacity: usize, probe_limit: usize) -> Self {
        Self {
            hash: hash as usize,
            mask: capacity.saturating_sub(1),
            levels: num_levels(capacity),
            probe_limit: probe_limit.max(1),
            level: 1,
            attempt: 0,
        }
    }

    /// Slots left to visit
    fn remaining(&self) -> usize {
        if self.level > self.levels {
            return 0;
        }
        let done = self
            .level
            .saturating_sub(1)
            .saturating_mul(self.probe_limit)
            .saturating_add(self.attempt);
        self.levels.saturating_mul(self.probe_limit).saturating_sub(done)
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.level > self.levels {
            return None;
        }

        let index = self.hash.wrapping_add(self.level.wrapping_mul(self.attempt)) & self.mask;

        self.attempt = self.attempt.saturating_add(1);
        if self.attempt >= self.probe_limit {
            self.attempt = 0;
            self.level = self.level.saturating_add(1);
        }

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_levels() {
        assert_eq!(num_levels(1), 0);
        assert_eq!(num_levels(2), 1);
        assert_eq!(num_levels(16), 4);
        assert_eq!(num_levels(1024), 10);
    }

    #[test]
    fn test_sequence_order() {
        // capacity 16 -> 4 levels, 3 attempts each
        let seq: Vec<usize> = ProbeSeq::new(5, 16, 3).collect();
        assert_eq!(seq, vec![5, 6, 7, 5, 7, 9, 5, 8, 11, 5, 9, 13]);
    }

    #[test]
    fn test_sequence_wraps_around_mask() {
        let seq: Vec<usize> = ProbeSeq::new(15, 16, 2).collect();
        assert_eq!(seq, vec![15, 0, 15, 1, 15, 2, 15, 3]);
    }

    #[test]
    fn test_hash_overflow_wraps() {
        let seq: Vec<usize> = ProbeSeq::new(u64::MAX, 4, 2).collect();
        assert_eq!(seq, vec![3, 0, 3, 1]);
    }

    #[test]
    fn test_length_is_levels_times_limit() {
        let seq = ProbeSeq::new(42, 1024, 7);
        assert_eq!(seq.len(), 70);
        assert_eq!(seq.count(), 70);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut seq = ProbeSeq::new(0, 8, 2);
        assert_eq!(seq.size_hint(), (6, Some(6)));
        seq.next();
        seq.next();
        seq.next();
        assert_eq!(seq.size_hint(), (3, Some(3)));
        assert_eq!(seq.by_ref().count(), 3);
        assert_eq!(seq.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_probe_limit_of_one_stays_home() {
        let seq: Vec<usize> = ProbeSeq::new(9, 16, 1).collect();
        assert_eq!(seq, vec![9, 9, 9, 9]);
    }

    #[test]
    fn test_single_slot_table_has_no_candidates() {
        assert_eq!(ProbeSeq::new(3, 1, 10).count(), 0);
    }
}
