//! Sparse slot index: Robin Hood linear probing over a power-of-two slot
//! array, with backward-shift removal instead of tombstones.
//!
//! Each slot holds either [`EMPTY`] or a dense position into the entry store.
//! The occupied slots always form a bijection onto the live positions. All
//! probing decisions read cached digests through a `digest_of` closure
//! supplied by the caller, so this layer never touches keys or values.

use crate::dense_store::CapacityError;

pub(crate) const EMPTY: u32 = u32::MAX;

pub(crate) struct BucketIndex {
    slots: Box<[u32]>,
    mask: usize,
}

impl BucketIndex {
    /// `bucket_count` must be a power of two.
    pub(crate) fn new(bucket_count: usize) -> Self {
        debug_assert!(bucket_count.is_power_of_two());
        Self {
            slots: vec![EMPTY; bucket_count].into_boxed_slice(),
            mask: bucket_count - 1,
        }
    }

    /// Fallible variant for growth: nothing is touched on allocation failure.
    pub(crate) fn try_new(bucket_count: usize) -> Result<Self, CapacityError> {
        debug_assert!(bucket_count.is_power_of_two());
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(bucket_count)
            .map_err(|_| CapacityError::OutOfMemory)?;
        slots.resize(bucket_count, EMPTY);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            mask: bucket_count - 1,
        })
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.mask + 1
    }

    #[inline]
    fn ideal_slot(&self, digest: u64) -> usize {
        digest as usize & self.mask
    }

    /// Distance of `slot` from `ideal`, modulo the table size.
    #[inline]
    fn probe_distance(&self, slot: usize, ideal: usize) -> usize {
        slot.wrapping_sub(ideal) & self.mask
    }

    /// Probes for an entry matching `eq`, starting at the digest's ideal
    /// slot. Returns the slot and the dense position on a match. Probing
    /// stops without a match at an empty slot, or as soon as an incumbent
    /// sits closer to its own ideal slot than we are to ours: past that
    /// point the sought entry would have been placed earlier.
    pub(crate) fn find(
        &self,
        digest: u64,
        digest_of: impl Fn(u32) -> u64,
        mut eq: impl FnMut(u32) -> bool,
    ) -> Option<(usize, u32)> {
        let mut slot = self.ideal_slot(digest);
        let mut dist = 0;
        loop {
            let pos = self.slots[slot];
            if pos == EMPTY {
                return None;
            }
            let incumbent_dist = self.probe_distance(slot, self.ideal_slot(digest_of(pos)));
            if incumbent_dist < dist {
                return None;
            }
            if eq(pos) {
                return Some((slot, pos));
            }
            slot = (slot + 1) & self.mask;
            dist += 1;
        }
    }

    /// Robin Hood placement of `pos`. The caller guarantees at least one
    /// empty slot exists (the load factor policy keeps the table from
    /// filling) and that `pos` is not already indexed.
    pub(crate) fn place(&mut self, pos: u32, digest: u64, digest_of: impl Fn(u32) -> u64) {
        let mut pos = pos;
        let mut slot = self.ideal_slot(digest);
        let mut dist = 0;
        loop {
            let incumbent = self.slots[slot];
            if incumbent == EMPTY {
                self.slots[slot] = pos;
                return;
            }
            let incumbent_dist = self.probe_distance(slot, self.ideal_slot(digest_of(incumbent)));
            if incumbent_dist < dist {
                // The incumbent is richer: it yields its slot and continues
                // probing in our place, carrying the distance it had here.
                self.slots[slot] = pos;
                pos = incumbent;
                dist = incumbent_dist;
            }
            slot = (slot + 1) & self.mask;
            dist += 1;
        }
    }

    /// Backward-shift repair after the entry in `slot` was unlinked. Entries
    /// past the hole move one slot back whenever that strictly shortens
    /// their distance to their ideal slot; the first genuinely empty slot
    /// ends the scan and the hole is marked [`EMPTY`]. No tombstone is ever
    /// written, so probe sequences stay contiguous for later lookups.
    pub(crate) fn remove(&mut self, slot: usize, digest_of: impl Fn(u32) -> u64) {
        let mut hole = slot;
        let mut next = (hole + 1) & self.mask;
        loop {
            let pos = self.slots[next];
            if pos == EMPTY {
                self.slots[hole] = EMPTY;
                return;
            }
            let ideal = self.ideal_slot(digest_of(pos));
            if self.probe_distance(hole, ideal) < self.probe_distance(next, ideal) {
                self.slots[hole] = pos;
                hole = next;
            }
            next = (next + 1) & self.mask;
        }
    }

    /// Repoints the slot referencing `old_pos` at `new_pos`, re-probing from
    /// the entry's ideal slot. The bijection invariant guarantees exactly one
    /// such slot exists.
    pub(crate) fn repoint(&mut self, digest: u64, old_pos: u32, new_pos: u32) {
        let mut slot = self.ideal_slot(digest);
        loop {
            if self.slots[slot] == old_pos {
                self.slots[slot] = new_pos;
                return;
            }
            slot = (slot + 1) & self.mask;
        }
    }

    /// Occupied slots and the dense positions they reference.
    #[cfg(test)]
    fn occupied(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, &pos)| (pos != EMPTY).then_some((slot, pos)))
    }

    /// Checks the bijection onto `{0, .., live-1}` and the approximate
    /// monotonicity of probe distances.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self, live: usize, digest_of: impl Fn(u32) -> u64) {
        let mut seen = vec![false; live];
        for (slot, pos) in self.occupied() {
            let pos = pos as usize;
            assert!(pos < live, "slot {slot} references position {pos}, length {live}");
            assert!(!seen[pos], "position {pos} referenced by more than one slot");
            seen[pos] = true;
        }
        assert!(
            seen.iter().all(|&hit| hit),
            "every live position must be referenced by exactly one slot"
        );
        for (slot, pos) in self.occupied() {
            let dist = self.probe_distance(slot, self.ideal_slot(digest_of(pos)));
            if dist > 0 {
                let prev = slot.wrapping_sub(1) & self.mask;
                let prev_pos = self.slots[prev];
                assert_ne!(
                    prev_pos, EMPTY,
                    "slot {slot} at distance {dist} follows an empty slot"
                );
                let prev_dist = self.probe_distance(prev, self.ideal_slot(digest_of(prev_pos)));
                assert!(
                    prev_dist + 1 >= dist,
                    "slot {slot}: distance {dist} after distance {prev_dist}"
                );
            }
        }
    }
}
