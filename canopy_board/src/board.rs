// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The board: the single entry point that keeps records, stacking order,
//! and the spatial index in step.

use std::fmt;
use std::time::SystemTime;

use canopy_index::backends::Grid;
use canopy_index::{Aabb2D, Backend, BoxIndex};
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::stacking;
use crate::store::{MemoryStore, WidgetStore};
use crate::widget::{NewWidget, Widget, WidgetId, WidgetPatch};

/// Offset/limit paging over the z-ascending widget enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Paging {
    /// Zero-based page number.
    pub page: usize,
    /// Widgets per page.
    pub size: usize,
}

impl Paging {
    /// Page `page` of `size` widgets each.
    #[must_use]
    pub const fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    const fn offset(self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for Paging {
    /// The first page of ten widgets.
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

/// Grid cell size used by [`Board::new`].
///
/// Sized for board-like populations: widgets tens of cells across, query
/// windows a few hundred.
const DEFAULT_CELL_SIZE: i64 = 64;

struct Inner<S, B> {
    store: S,
    index: BoxIndex<WidgetId, B>,
}

/// A widget board.
///
/// The board owns a [`WidgetStore`] and a spatial index and sequences every
/// operation across the two, so a caller never observes them disagreeing:
/// a widget's record and its indexed bounding box always belong to the same
/// version. Stacking indexes stay globally unique — writing a widget onto
/// an occupied index shifts the contiguous run above it out of the way (see
/// [`stacking`]).
///
/// All mutating operations serialize through one write lock held for the
/// whole operation; reads share a read lock. `Board` is `Send + Sync` when
/// its parts are, so one instance can back a threaded adapter layer.
/// Construct it in your composition root and hand out references.
///
/// The type parameters select the storage and spatial strategies and
/// default to the in-memory store with a grid-backed index.
///
/// # Example
///
/// ```rust
/// use canopy_board::{Board, NewWidget};
///
/// let board = Board::new();
/// let widget = board.create(NewWidget {
///     x: 10,
///     y: 20,
///     z_index: None,
///     width: 30,
///     height: 30,
/// })?;
///
/// // The new widget is fully inside the probe window.
/// let hits = board.query_area(0, 0, 50, 50);
/// assert_eq!(hits, vec![widget]);
/// # Ok::<(), canopy_board::Error>(())
/// ```
pub struct Board<S = MemoryStore, B = Grid> {
    inner: RwLock<Inner<S, B>>,
}

impl Board<MemoryStore, Grid> {
    /// Create a board with an in-memory store and a grid-backed spatial
    /// index using the default cell size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cell_size(DEFAULT_CELL_SIZE)
    }

    /// Create a board with an in-memory store and an explicit grid cell
    /// size.
    #[must_use]
    pub fn with_cell_size(cell_size: i64) -> Self {
        Self::with_parts(MemoryStore::new(), Grid::new(cell_size))
    }
}

impl Default for Board<MemoryStore, Grid> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Board<S, B>
where
    S: WidgetStore,
    B: Backend,
{
    /// Assemble a board from an explicit store and spatial backend.
    pub fn with_parts(store: S, backend: B) -> Self {
        Self {
            inner: RwLock::new(Inner {
                store,
                index: BoxIndex::with_backend(backend),
            }),
        }
    }

    /// Create a widget.
    ///
    /// With an explicit `z_index`, any widgets occupying the contiguous run
    /// of indexes starting there are shifted up by one to make room. With
    /// `z_index` unset, the widget lands on top of the current stack.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeometry`] if `width` or `height` is not strictly
    /// positive.
    pub fn create(&self, new: NewWidget) -> Result<Widget> {
        validate_extent(new.width, new.height)?;

        let mut inner = self.inner.write();
        let id = inner.store.next_id();
        let widget = Widget {
            id,
            x: new.x,
            y: new.y,
            z_index: 0,
            width: new.width,
            height: new.height,
            last_modified: SystemTime::now(),
        };

        let saved = match new.z_index {
            Some(z_index) => inner.save(Widget { z_index, ..widget }),
            None => {
                // A fresh top-of-stack index cannot collide, so there is
                // nothing to plan.
                let z_index = inner.store.max_z().unwrap_or(0) + 1;
                inner.put_indexed(Widget { z_index, ..widget })
            }
        };

        tracing::debug!(id = %saved.id, z = saved.z_index, "widget created");
        Ok(saved)
    }

    /// Look up a widget by id.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no widget is stored under `id`.
    pub fn get(&self, id: WidgetId) -> Result<Widget> {
        self.inner.read().store.get(id).ok_or(Error::NotFound(id))
    }

    /// Apply a partial overwrite to an existing widget.
    ///
    /// Provided fields replace stored values; absent fields are preserved.
    /// Changing the stacking index onto an occupied value shifts the run
    /// above it, exactly as on create.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no widget is stored under `id`;
    /// [`Error::InvalidGeometry`] if a provided extent is not strictly
    /// positive.
    pub fn update(&self, id: WidgetId, patch: WidgetPatch) -> Result<Widget> {
        let mut inner = self.inner.write();
        let current = inner.store.get(id).ok_or(Error::NotFound(id))?;

        let merged = patch.apply(current);
        validate_extent(merged.width, merged.height)?;

        let saved = inner.save(merged);
        tracing::debug!(id = %saved.id, z = saved.z_index, "widget updated");
        Ok(saved)
    }

    /// Delete a widget.
    ///
    /// Its stacking index is not compacted away: the gap persists until a
    /// later create or update claims the value. Its id is never reissued.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no widget is stored under `id`.
    pub fn delete(&self, id: WidgetId) -> Result<()> {
        let mut inner = self.inner.write();
        let removed = inner.store.remove(id).ok_or(Error::NotFound(id))?;
        inner.index.remove(removed.id);

        tracing::debug!(id = %removed.id, "widget deleted");
        Ok(())
    }

    /// A page of all widgets, ascending by stacking index.
    #[must_use]
    pub fn list(&self, paging: Paging) -> Vec<Widget> {
        self.inner.read().store.page_by_z(paging.offset(), paging.size)
    }

    /// Widgets whose bounding box lies fully inside the query window.
    ///
    /// All four window coordinates are inclusive, matching widget bounds: a
    /// widget at `(0, 0)` with extent `10 × 10` is contained in the window
    /// `(0, 0, 9, 9)`.
    #[must_use]
    pub fn query_area(&self, left: i64, bottom: i64, right: i64, top: i64) -> Vec<Widget> {
        let window = Aabb2D::new(left, bottom, right, top);
        let inner = self.inner.read();
        let mut out = Vec::new();
        inner.index.visit_contained(window, |id| {
            // The lock spans both structures, so every indexed id resolves.
            if let Some(widget) = inner.store.get(id) {
                out.push(widget);
            }
        });
        out
    }
}

impl<S, B> fmt::Debug for Board<S, B>
where
    S: WidgetStore,
    B: Backend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // try_read so that formatting never blocks on an in-flight mutation.
        let mut dbg = f.debug_struct("Board");
        if let Some(inner) = self.inner.try_read() {
            dbg.field("widgets", &inner.store.len());
            dbg.field("indexed", &inner.index.len());
        }
        dbg.finish_non_exhaustive()
    }
}

impl<S, B> Inner<S, B>
where
    S: WidgetStore,
    B: Backend,
{
    /// Write `widget` at its requested stacking index, shifting the
    /// contiguous run of occupied indexes above it out of the way first.
    fn save(&mut self, widget: Widget) -> Widget {
        let plan = stacking::displacements(&self.store, Some(widget.id), widget.z_index);
        for (id, z_index) in plan {
            if let Some(mut shifted) = self.store.get(id) {
                tracing::trace!(id = %id, z = z_index, "widget displaced");
                shifted.z_index = z_index;
                self.store.put(shifted);
            }
        }
        self.put_indexed(widget)
    }

    /// Stamp, store, and index `widget` as one step.
    fn put_indexed(&mut self, mut widget: Widget) -> Widget {
        widget.last_modified = SystemTime::now();
        self.store.put(widget);
        self.index.update(widget.id, widget.bounds());
        widget
    }
}

fn validate_extent(width: i64, height: i64) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidGeometry { width, height });
    }
    Ok(())
}
