// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for integer 2D AABBs.
//!
//! This backend buckets AABBs into fixed-size grid cells and answers queries
//! by touching only the cells overlapping the probe rectangle. It is
//! intended for workloads with:
//! - moderately uniform spatial density (e.g., boards, viewports),
//! - dynamic updates, and
//! - query rectangles that are small compared to the full world extent.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Map a coordinate to a grid coordinate along one axis.
///
/// The mapping is based on an origin and uniform cell size, and is monotonic
/// in `value` for fixed `origin` and `cell_size`. Values whose cell falls
/// outside the `i32` range are saturated.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
)]
#[inline]
fn cell_coord(value: i64, origin: i64, cell_size: i64) -> i32 {
    debug_assert!(cell_size > 0, "grid cell_size must be strictly positive");
    let rel = value.saturating_sub(origin);
    // Euclidean division rounds toward -∞, which matches floor for all
    // integer values.
    let coord = rel.div_euclid(cell_size);

    if coord >= i64::from(i32::MAX) {
        i32::MAX
    } else if coord <= i64::from(i32::MIN) {
        i32::MIN
    } else {
        coord as i32
    }
}

/// Uniform grid backend with fixed cell size.
pub struct Grid {
    cell_size: i64,
    origin_x: i64,
    origin_y: i64,
    cells: HashMap<(i32, i32), Cell>,
    slots: Vec<Option<SlotEntry>>,
}

#[derive(Clone, Debug)]
struct SlotEntry {
    aabb: Aabb2D,
    // Cells currently containing this AABB.
    cells: SmallVec<[(i32, i32); 4]>,
}

#[derive(Default)]
struct Cell {
    slots: SmallVec<[usize; 8]>,
}

impl core::fmt::Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total_slots = self.slots.len();
        let live_slots = self.slots.iter().filter(|s| s.is_some()).count();
        let num_cells = self.cells.len();
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("total_slots", &total_slots)
            .field("live_slots", &live_slots)
            .field("cells", &num_cells)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Create a new grid backend with the given cell size and origin at (0, 0).
    #[must_use]
    pub fn new(cell_size: i64) -> Self {
        debug_assert!(cell_size > 0, "cell_size must be strictly positive");
        Self {
            cell_size,
            origin_x: 0,
            origin_y: 0,
            cells: HashMap::new(),
            slots: Vec::new(),
        }
    }

    /// Create a new grid backend with the given cell size and origin.
    #[must_use]
    pub fn with_origin(cell_size: i64, origin_x: i64, origin_y: i64) -> Self {
        debug_assert!(cell_size > 0, "cell_size must be strictly positive");
        Self {
            cell_size,
            origin_x,
            origin_y,
            cells: HashMap::new(),
            slots: Vec::new(),
        }
    }

    fn ensure_slot(&mut self, slot: usize) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
    }

    fn slot_entry(&self, slot: usize) -> &SlotEntry {
        self.slots
            .get(slot)
            .expect("grid invariant violated: cell references out-of-bounds slot")
            .as_ref()
            .expect("grid invariant violated: cell references vacant slot")
    }

    fn remove_from_cells(&mut self, slot: usize, cells: &[(i32, i32)]) {
        for &(ix, iy) in cells {
            let cell = self
                .cells
                .get_mut(&(ix, iy))
                .expect("grid invariant violated: missing cell while removing slot");

            let pos = cell
                .slots
                .iter()
                .position(|&s| s == slot)
                .expect("grid invariant violated: slot not found in expected cell");
            cell.slots.swap_remove(pos);

            if cell.slots.is_empty() {
                // Dropping empty cells keeps the map compact for sparse grids.
                self.cells.remove(&(ix, iy));
            }
        }
    }

    fn cell_range(&self, min: i64, max: i64, origin: i64) -> (i32, i32) {
        let c0 = cell_coord(min, origin, self.cell_size);
        let c1 = cell_coord(max, origin, self.cell_size);
        if c0 <= c1 { (c0, c1) } else { (c1, c0) }
    }

    fn covered_cells(&self, aabb: &Aabb2D) -> SmallVec<[(i32, i32); 4]> {
        let (ix0, ix1) = self.cell_range(aabb.min_x, aabb.max_x, self.origin_x);
        let (iy0, iy1) = self.cell_range(aabb.min_y, aabb.max_y, self.origin_y);
        let mut out: SmallVec<[(i32, i32); 4]> = SmallVec::new();
        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                out.push((ix, iy));
            }
        }
        out
    }
}

impl Backend for Grid {
    fn insert(&mut self, slot: usize, aabb: Aabb2D) {
        self.ensure_slot(slot);

        // If this slot was previously used, clean up its old cell memberships.
        if let Some(old) = self.slots[slot].take() {
            self.remove_from_cells(slot, &old.cells);
        }

        let cells = self.covered_cells(&aabb);
        for &(ix, iy) in &cells {
            self.cells.entry((ix, iy)).or_default().slots.push(slot);
        }
        self.slots[slot] = Some(SlotEntry { aabb, cells });
    }

    fn update(&mut self, slot: usize, aabb: Aabb2D) {
        // Take the current entry out to avoid aliasing `self` while mutating
        // grid cells.
        let current = if let Some(slot_ref) = self.slots.get_mut(slot) {
            slot_ref.take()
        } else {
            None
        };

        let Some(mut entry) = current else {
            // If the slot does not exist, treat this as an insert.
            self.insert(slot, aabb);
            return;
        };

        // If the AABB is unchanged, restore the entry and skip work.
        if entry.aabb == aabb {
            self.slots[slot] = Some(entry);
            return;
        }

        // Remove from old cells.
        self.remove_from_cells(slot, &entry.cells);

        // Insert into new cells.
        let cells = self.covered_cells(&aabb);
        for &(ix, iy) in &cells {
            self.cells.entry((ix, iy)).or_default().slots.push(slot);
        }
        entry.aabb = aabb;
        entry.cells = cells;
        self.slots[slot] = Some(entry);
    }

    fn remove(&mut self, slot: usize) {
        if slot >= self.slots.len() {
            return;
        }
        if let Some(entry) = self.slots[slot].take() {
            self.remove_from_cells(slot, &entry.cells);
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.slots.clear();
    }

    fn visit_overlaps<F: FnMut(usize)>(&self, rect: Aabb2D, mut f: F) {
        let (ix0, ix1) = self.cell_range(rect.min_x, rect.max_x, self.origin_x);
        let (iy0, iy1) = self.cell_range(rect.min_y, rect.max_y, self.origin_y);

        let mut seen: HashSet<usize> = HashSet::new();

        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                if let Some(cell) = self.cells.get(&(ix, iy)) {
                    for &slot in &cell.slots {
                        if !seen.insert(slot) {
                            continue;
                        }
                        let entry = self.slot_entry(slot);
                        if entry.aabb.overlaps(&rect) {
                            f(slot);
                        }
                    }
                }
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
        let mut grid = Grid::new(10);

        let a = Aabb2D::new(0, 0, 9, 9);
        grid.insert(0, a);

        // A probe over the AABB should hit slot 0.
        let mut hits = Vec::new();
        grid.visit_overlaps(Aabb2D::new(5, 5, 6, 6), |s| hits.push(s));
        assert_eq!(hits, vec![0]);

        // Move the AABB; the probe should follow.
        let b = Aabb2D::new(20, 20, 29, 29);
        grid.update(0, b);

        hits.clear();
        grid.visit_overlaps(Aabb2D::new(5, 5, 6, 6), |s| hits.push(s));
        assert!(hits.is_empty());

        hits.clear();
        grid.visit_overlaps(Aabb2D::new(25, 25, 26, 26), |s| hits.push(s));
        assert_eq!(hits, vec![0]);

        // Remove and ensure no hits.
        grid.remove(0);
        hits.clear();
        grid.visit_overlaps(Aabb2D::new(25, 25, 26, 26), |s| hits.push(s));
        assert!(hits.is_empty());
    }

    #[test]
    fn rect_query_deduplicates_slots() {
        let mut grid = Grid::new(5);

        // This AABB spans multiple cells.
        let a = Aabb2D::new(0, 0, 19, 19);
        grid.insert(1, a);

        let rect = Aabb2D::new(2, 2, 18, 18);
        let mut hits = Vec::new();
        grid.visit_overlaps(rect, |s| hits.push(s));

        // Slot 1 should be reported exactly once.
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn update_missing_slot_inserts() {
        let mut grid = Grid::new(10);

        // Updating an unused slot should behave like insert.
        let a = Aabb2D::new(0, 0, 9, 9);
        grid.update(5, a);

        let mut hits = Vec::new();
        grid.visit_overlaps(Aabb2D::new(5, 5, 5, 5), |s| hits.push(s));
        assert_eq!(hits, vec![5]);
    }

    #[test]
    fn negative_coordinates() {
        let mut grid = Grid::new(10);
        let a = Aabb2D::new(-30, -30, -11, -11);
        grid.insert(3, a);

        let mut hits = Vec::new();
        grid.visit_overlaps(Aabb2D::new(-20, -20, -20, -20), |s| hits.push(s));
        assert_eq!(hits, vec![3]);

        hits.clear();
        grid.visit_overlaps(Aabb2D::new(-10, -10, -1, -1), |s| hits.push(s));
        assert!(hits.is_empty());
    }

    #[test]
    fn cell_coord_rounds_toward_negative_infinity() {
        assert_eq!(cell_coord(0, 0, 10), 0);
        assert_eq!(cell_coord(9, 0, 10), 0);
        assert_eq!(cell_coord(10, 0, 10), 1);
        assert_eq!(cell_coord(-1, 0, 10), -1);
        assert_eq!(cell_coord(-10, 0, 10), -1);
        assert_eq!(cell_coord(-11, 0, 10), -2);
    }

    #[test]
    fn cell_coord_saturates() {
        assert_eq!(cell_coord(i64::MAX, 0, 1), i32::MAX);
        assert_eq!(cell_coord(i64::MIN, 0, 1), i32::MIN);
        // Saturation also protects the origin-relative subtraction.
        assert_eq!(cell_coord(i64::MAX, i64::MIN, 1), i32::MAX);
    }
}
