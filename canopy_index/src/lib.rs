// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Index: a mutable 2D AABB index over integer coordinates.
//!
//! Canopy Index is a reusable building block for windowed spatial queries.
//!
//! - Insert, update, and remove axis-aligned bounding boxes (AABBs) keyed by
//!   caller-owned ids.
//! - Query for the boxes fully contained in a probe rectangle.
//! - Coordinates are `i64` and boxes are corner-inclusive: a rectangle at
//!   `(x, y)` with extent `w × h` covers `[x, x + w - 1] × [y, y + h - 1]`.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial
//! strategy without API churn. A backend's only structural obligation is
//! overlap detection; [`BoxIndex`] applies the exact containment filter on
//! top. The default backend is a flat vector (linear scan); a uniform grid
//! backend (feature `backend_grid`) partitions space so that overlap
//! candidates are found without a full scan.
//!
//! ## Features
//!
//! - `backend_grid` *(default)*: enables the uniform grid backend backed by
//!   `smallvec` cell lists. Disable this feature to drop the grid types.
//!
//! # Example
//!
//! ```rust
//! use canopy_index::{Aabb2D, BoxIndex, backends::FlatVec};
//!
//! // Create an index and add two boxes.
//! let mut idx: BoxIndex<u64, FlatVec> = BoxIndex::new();
//! idx.insert(1, Aabb2D::from_origin_size(0, 0, 10, 10));
//! idx.insert(2, Aabb2D::from_origin_size(4, 4, 20, 20));
//!
//! // Both boxes overlap the window; only the first is fully inside it.
//! let hits = idx.query_contained(Aabb2D::new(0, 0, 15, 15));
//! assert_eq!(hits, vec![1]);
//!
//! // Moving a box takes effect immediately.
//! idx.update(2, Aabb2D::from_origin_size(1, 1, 5, 5));
//! let mut hits = idx.query_contained(Aabb2D::new(0, 0, 15, 15));
//! hits.sort_unstable();
//! assert_eq!(hits, vec![1, 2]);
//! ```
//!
//! With the `backend_grid` feature enabled (default), you can opt into the
//! grid backend when query windows are small compared to the world:
//!
//! ```rust
//! # #[cfg(feature = "backend_grid")]
//! # {
//! use canopy_index::{Aabb2D, BoxIndex, backends::Grid};
//!
//! // A grid with 64-unit cells.
//! let mut idx: BoxIndex<u64, Grid> = BoxIndex::with_backend(Grid::new(64));
//! idx.insert(9, Aabb2D::from_origin_size(100, 100, 30, 30));
//!
//! assert_eq!(idx.query_contained(Aabb2D::new(90, 90, 140, 140)), vec![9]);
//! # }
//! ```
//!
//! ## Choosing a backend
//!
//! - [`FlatVec`][backends::FlatVec]: simplest and smallest, linear scans.
//!   Good for very small sets or when mutations vastly outnumber queries.
//! - [`Grid`][backends::Grid] *(feature `backend_grid`)*: uniform grid with
//!   configurable cell size. A good fit for boards and viewports where
//!   boxes are roughly uniformly distributed and query rectangles are small
//!   compared to the world extent.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod index;
mod types;

pub use backend::Backend;
pub use index::BoxIndex;
pub use types::Aabb2D;
