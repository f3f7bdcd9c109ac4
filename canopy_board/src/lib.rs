// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Board: widgets on an integer plane with a unique stacking order.
//!
//! A board stores rectangular widgets, each carrying a stacking index
//! (z-index) that is globally unique across the board, and answers windowed
//! spatial queries for the widgets fully contained in a rectangle. The
//! interesting parts are:
//!
//! - **Stacking maintenance** ([`stacking`]): writing a widget onto an
//!   occupied index shifts the contiguous run of indexes above it up by
//!   one — and only that run; a gap stops the shift. Uniqueness holds after
//!   every operation, and between the individual writes of one operation.
//! - **Spatial queries** ([`canopy_index`]): widget bounding boxes live in a
//!   mutable AABB index, kept in step with the record store by the board,
//!   so a query never sees a stale or missing box.
//!
//! Storage is behind the [`WidgetStore`] trait ([`MemoryStore`] is
//! provided), and the spatial strategy behind
//! [`Backend`][canopy_index::Backend], so both can be swapped without
//! touching the board logic. Errors are the two typed cases an adapter
//! layer needs to map: [`Error::NotFound`] and [`Error::InvalidGeometry`].
//! Mutations emit `tracing` events; the embedding application decides
//! whether and where to subscribe.
//!
//! # Example
//!
//! ```rust
//! use canopy_board::{Board, NewWidget, Paging, WidgetPatch};
//!
//! let board = Board::new();
//!
//! // Two widgets both asking for the bottom of the stack: the first is
//! // shifted up to make room for the second.
//! let w1 = board.create(NewWidget { x: 10, y: 20, z_index: Some(1), width: 25, height: 35 })?;
//! let w2 = board.create(NewWidget { x: 10, y: 20, z_index: Some(1), width: 25, height: 35 })?;
//!
//! let stack = board.list(Paging::default());
//! assert_eq!(stack[0].id, w2.id); // holds index 1
//! assert_eq!(stack[1].id, w1.id); // shifted to index 2
//!
//! // Moving w1 back down shifts w2 out of the way again.
//! board.update(w1.id, WidgetPatch { z_index: Some(1), ..WidgetPatch::default() })?;
//! let stack = board.list(Paging::default());
//! assert_eq!(stack[0].id, w1.id);
//! assert_eq!(stack[1].id, w2.id);
//!
//! // Deleting leaves a permanent gap; indexes are not compacted.
//! board.delete(w1.id)?;
//! assert_eq!(board.list(Paging::default())[0].z_index, 2);
//! # Ok::<(), canopy_board::Error>(())
//! ```

mod board;
mod error;
pub mod stacking;
mod store;
mod widget;

pub use board::{Board, Paging};
pub use error::{Error, Result};
pub use store::{MemoryStore, WidgetStore};
pub use widget::{NewWidget, Widget, WidgetId, WidgetPatch};
