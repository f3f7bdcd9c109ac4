// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend: linear scans over a slot vector.

use alloc::vec::Vec;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend.
///
/// Slots live in a dense vector and every query walks the whole vector.
/// Smallest possible strategy; good for very small sets or when mutations
/// vastly outnumber queries.
#[derive(Clone, Debug, Default)]
pub struct FlatVec {
    slots: Vec<Option<Aabb2D>>,
}

impl FlatVec {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_slot(&mut self, slot: usize) {
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, aabb: Aabb2D) {
        self.ensure_slot(slot);
        self.slots[slot] = Some(aabb);
    }

    fn update(&mut self, slot: usize, aabb: Aabb2D) {
        self.insert(slot, aabb);
    }

    fn remove(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    fn visit_overlaps<F: FnMut(usize)>(&self, rect: Aabb2D, mut f: F) {
        for (slot, aabb) in self.slots.iter().enumerate() {
            if let Some(aabb) = aabb
                && aabb.overlaps(&rect)
            {
                f(slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn insert_update_remove_roundtrip() {
        let mut fv = FlatVec::new();
        fv.insert(0, Aabb2D::new(0, 0, 9, 9));

        let mut hits = Vec::new();
        fv.visit_overlaps(Aabb2D::new(5, 5, 20, 20), |s| hits.push(s));
        assert_eq!(hits, vec![0]);

        fv.update(0, Aabb2D::new(30, 30, 39, 39));
        hits.clear();
        fv.visit_overlaps(Aabb2D::new(5, 5, 20, 20), |s| hits.push(s));
        assert!(hits.is_empty());

        fv.remove(0);
        hits.clear();
        fv.visit_overlaps(Aabb2D::new(0, 0, 100, 100), |s| hits.push(s));
        assert!(hits.is_empty());
    }

    #[test]
    fn remove_unknown_slot_is_noop() {
        let mut fv = FlatVec::new();
        fv.remove(17);
        fv.insert(2, Aabb2D::new(0, 0, 1, 1));
        fv.remove(17);

        let mut hits = Vec::new();
        fv.visit_overlaps(Aabb2D::new(0, 0, 5, 5), |s| hits.push(s));
        assert_eq!(hits, vec![2]);
    }
}
