// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple).
//! - `grid` (feature `backend_grid`): uniform grid with configurable cell size.
//!
//! The flat vector visits every live slot per query, which is fine for very
//! small sets and makes it a convenient oracle when checking other backends.
//! The grid buckets boxes into fixed-size cells and touches only the cells
//! overlapping the probe rectangle, so query cost tracks the probe's size
//! rather than the population.

pub(crate) mod flatvec;
#[cfg(feature = "backend_grid")]
pub(crate) mod grid;

pub use flatvec::FlatVec;
#[cfg(feature = "backend_grid")]
pub use grid::Grid;
