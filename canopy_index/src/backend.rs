// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use crate::types::Aabb2D;

/// Spatial backend abstraction used by [`BoxIndex`][crate::BoxIndex].
///
/// A backend stores slot-addressed boxes and partitions space so that
/// overlap candidates can be found without scanning every slot. The one
/// guarantee every backend makes is structural: [`visit_overlaps`]
/// [Backend::visit_overlaps] reports every live slot whose box overlaps the
/// probe rectangle, each at most once. Exact geometric filtering beyond
/// overlap (for example containment) is the caller's job.
pub trait Backend {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Aabb2D);

    /// Update an existing slot's AABB.
    fn update(&mut self, slot: usize, aabb: Aabb2D);

    /// Remove a slot from the spatial structure. Removing an absent slot is
    /// a no-op.
    fn remove(&mut self, slot: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Visit slots whose AABB overlaps the rectangle.
    fn visit_overlaps<F: FnMut(usize)>(&self, rect: Aabb2D, f: F);
}
