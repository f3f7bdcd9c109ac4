// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public keyed `BoxIndex` API, generic over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// A mutable bounding-box index keyed by caller-owned ids.
///
/// `BoxIndex` maps each key to exactly one box. Keys are expected to be
/// small copyable handles (an id newtype, an integer); the caller is
/// responsible for their uniqueness. Mutations take effect immediately —
/// there is no batching step, so a query issued right after a mutation sees
/// the post-mutation state.
///
/// Queries are two-phase: the backend structurally narrows to slots whose
/// box *overlaps* the probe rectangle, and the index then filters to boxes
/// *fully contained* in it. Backends only guarantee overlap detection,
/// which is why the containment check lives here.
pub struct BoxIndex<K, B> {
    entries: Vec<Option<(K, Aabb2D)>>,
    slot_of: HashMap<K, usize>,
    free_list: Vec<usize>,
    backend: B,
}

impl<K, B> BoxIndex<K, B>
where
    K: Copy + Eq + Hash + Debug,
    B: Backend + Default,
{
    /// Create an empty index using the backend's default constructor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<K, B> Default for BoxIndex<K, B>
where
    K: Copy + Eq + Hash + Debug,
    B: Backend + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, B> BoxIndex<K, B>
where
    K: Copy + Eq + Hash + Debug,
    B: Backend,
{
    /// Create an empty index using an explicit backend instance.
    ///
    /// This is useful when higher layers want to choose a backend type or
    /// configure it before wiring it into the index.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            slot_of: HashMap::new(),
            free_list: Vec::new(),
            backend,
        }
    }

    /// Number of keys currently indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slot_of.len()
    }

    /// Whether the index holds no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot_of.is_empty()
    }

    /// The box currently indexed under `key`, if any.
    #[must_use]
    pub fn get(&self, key: K) -> Option<Aabb2D> {
        let slot = *self.slot_of.get(&key)?;
        self.entries[slot].as_ref().map(|(_, aabb)| *aabb)
    }

    /// Index `aabb` under `key`.
    ///
    /// Re-inserting a key that is already present replaces its box.
    pub fn insert(&mut self, key: K, aabb: Aabb2D) {
        if let Some(&slot) = self.slot_of.get(&key) {
            self.entries[slot] = Some((key, aabb));
            self.backend.update(slot, aabb);
            return;
        }

        let slot = if let Some(slot) = self.free_list.pop() {
            self.entries[slot] = Some((key, aabb));
            slot
        } else {
            self.entries.push(Some((key, aabb)));
            self.entries.len() - 1
        };
        self.slot_of.insert(key, slot);
        self.backend.insert(slot, aabb);
    }

    /// Drop `key` from the index. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: K) {
        let Some(slot) = self.slot_of.remove(&key) else {
            return;
        };
        self.entries[slot] = None;
        self.free_list.push(slot);
        self.backend.remove(slot);
    }

    /// Re-index `key` under a new box, as a removal followed by an insert.
    pub fn update(&mut self, key: K, aabb: Aabb2D) {
        self.remove(key);
        self.insert(key, aabb);
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slot_of.clear();
        self.free_list.clear();
        self.backend.clear();
    }

    /// Keys whose box lies fully inside `rect`.
    ///
    /// The backend supplies overlap candidates; boxes merely crossing the
    /// probe's edge are filtered out here.
    #[must_use]
    pub fn query_contained(&self, rect: Aabb2D) -> Vec<K> {
        let mut out = Vec::new();
        self.visit_contained(rect, |k| out.push(k));
        out
    }

    /// Visit keys whose box lies fully inside `rect` (does not allocate
    /// result storage).
    ///
    /// Calls `f(key)` for each match. The order is backend-dependent.
    pub fn visit_contained<F: FnMut(K)>(&self, rect: Aabb2D, mut f: F) {
        self.backend.visit_overlaps(rect, |slot| {
            if let Some(Some((key, aabb))) = self.entries.get(slot)
                && rect.contains(aabb)
            {
                f(*key);
            }
        });
    }
}

impl<K, B> Debug for BoxIndex<K, B>
where
    K: Copy + Eq + Hash + Debug,
    B: Backend + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoxIndex")
            .field("len", &self.len())
            .field("free_slots", &self.free_list.len())
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::FlatVec;
    #[cfg(feature = "backend_grid")]
    use crate::backends::Grid;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn contained_not_merely_overlapping() {
        let mut idx: BoxIndex<u64, FlatVec> = BoxIndex::new();
        idx.insert(1, Aabb2D::from_origin_size(0, 0, 10, 10));
        idx.insert(2, Aabb2D::from_origin_size(4, 4, 20, 20));

        // Both boxes overlap the window, only the first fits inside it.
        let hits = idx.query_contained(Aabb2D::new(0, 0, 15, 15));
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn reinsert_replaces_box() {
        let mut idx: BoxIndex<u64, FlatVec> = BoxIndex::new();
        idx.insert(7, Aabb2D::new(0, 0, 9, 9));
        idx.insert(7, Aabb2D::new(100, 100, 109, 109));
        assert_eq!(idx.len(), 1);

        assert!(idx.query_contained(Aabb2D::new(0, 0, 50, 50)).is_empty());
        assert_eq!(
            idx.query_contained(Aabb2D::new(90, 90, 120, 120)),
            vec![7]
        );
    }

    #[test]
    fn remove_absent_key_is_noop() {
        let mut idx: BoxIndex<u64, FlatVec> = BoxIndex::new();
        idx.remove(42);
        idx.insert(1, Aabb2D::new(0, 0, 1, 1));
        idx.remove(42);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get(1), Some(Aabb2D::new(0, 0, 1, 1)));
    }

    #[test]
    fn slots_are_recycled_without_stale_hits() {
        let mut idx: BoxIndex<u64, FlatVec> = BoxIndex::new();
        idx.insert(1, Aabb2D::new(0, 0, 9, 9));
        idx.remove(1);
        idx.insert(2, Aabb2D::new(50, 50, 59, 59));

        let hits = idx.query_contained(Aabb2D::new(0, 0, 100, 100));
        assert_eq!(hits, vec![2]);
        assert_eq!(idx.get(1), None);
    }

    /// Small deterministic generator for the cross-check below.
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn in_range(&mut self, lo: i64, hi: i64) -> i64 {
            let span = (hi - lo) as u64;
            lo + (self.next() % span) as i64
        }
    }

    #[cfg(feature = "backend_grid")]
    #[test]
    fn grid_matches_flat_scan_on_random_boxes() {
        let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
        let mut grid: BoxIndex<u64, Grid> = BoxIndex::with_backend(Grid::new(16));
        let mut flat: BoxIndex<u64, FlatVec> = BoxIndex::new();

        for key in 0..256_u64 {
            let x = rng.in_range(-200, 200);
            let y = rng.in_range(-200, 200);
            let w = rng.in_range(1, 60);
            let h = rng.in_range(1, 60);
            let aabb = Aabb2D::from_origin_size(x, y, w, h);
            grid.insert(key, aabb);
            flat.insert(key, aabb);
        }

        // Churn: move a third of the boxes, drop a few.
        for key in (0..256_u64).step_by(3) {
            let x = rng.in_range(-200, 200);
            let y = rng.in_range(-200, 200);
            let aabb = Aabb2D::from_origin_size(x, y, 10, 10);
            grid.update(key, aabb);
            flat.update(key, aabb);
        }
        for key in (0..256_u64).step_by(17) {
            grid.remove(key);
            flat.remove(key);
        }

        for _ in 0..64 {
            let x0 = rng.in_range(-250, 250);
            let y0 = rng.in_range(-250, 250);
            let rect = Aabb2D::new(x0, y0, x0 + rng.in_range(0, 150), y0 + rng.in_range(0, 150));

            let mut from_grid: Vec<u64> = grid.query_contained(rect);
            let mut from_flat: Vec<u64> = flat.query_contained(rect);
            from_grid.sort_unstable();
            from_flat.sort_unstable();
            assert_eq!(from_grid, from_flat, "divergence on probe {rect:?}");
        }
    }
}
