// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget records and the intents that create and patch them.

use std::fmt;
use std::time::SystemTime;

use canopy_index::Aabb2D;

/// Identifier for a stored widget.
///
/// Ids are assigned by the store, increase monotonically, and are never
/// reused — deleting a widget retires its id for good.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, for logging and adapter layers.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored widget: a rectangle on the integer plane plus its stacking order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Widget {
    /// Identity, unique across the lifetime of the board.
    pub id: WidgetId,
    /// Minimum-corner x coordinate.
    pub x: i64,
    /// Minimum-corner y coordinate.
    pub y: i64,
    /// Stacking order. Higher draws above lower; unique across the board.
    pub z_index: i64,
    /// Horizontal extent in cells. Always strictly positive once stored.
    pub width: i64,
    /// Vertical extent in cells. Always strictly positive once stored.
    pub height: i64,
    /// When this record was last written through the board.
    pub last_modified: SystemTime,
}

impl Widget {
    /// Inclusive bounding box: `[x, x + width - 1] × [y, y + height - 1]`.
    #[must_use]
    pub fn bounds(&self) -> Aabb2D {
        Aabb2D::from_origin_size(self.x, self.y, self.width, self.height)
    }
}

/// Intent to create a widget.
#[derive(Copy, Clone, Debug)]
pub struct NewWidget {
    /// Minimum-corner x coordinate.
    pub x: i64,
    /// Minimum-corner y coordinate.
    pub y: i64,
    /// Requested stacking order; `None` places the widget on top of the
    /// current stack.
    pub z_index: Option<i64>,
    /// Horizontal extent in cells; must be strictly positive.
    pub width: i64,
    /// Vertical extent in cells; must be strictly positive.
    pub height: i64,
}

/// Partial overwrite of an existing widget.
///
/// `None` fields keep their stored value; the id itself cannot be patched.
/// Build one with struct-update syntax:
///
/// ```
/// use canopy_board::WidgetPatch;
///
/// let patch = WidgetPatch {
///     x: Some(12),
///     ..WidgetPatch::default()
/// };
/// assert!(patch.z_index.is_none());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetPatch {
    /// New minimum-corner x coordinate.
    pub x: Option<i64>,
    /// New minimum-corner y coordinate.
    pub y: Option<i64>,
    /// New stacking order.
    pub z_index: Option<i64>,
    /// New horizontal extent; must be strictly positive when provided.
    pub width: Option<i64>,
    /// New vertical extent; must be strictly positive when provided.
    pub height: Option<i64>,
}

impl WidgetPatch {
    /// Overlay this patch on `widget`, field by field.
    pub(crate) fn apply(self, mut widget: Widget) -> Widget {
        if let Some(x) = self.x {
            widget.x = x;
        }
        if let Some(y) = self.y {
            widget.y = y;
        }
        if let Some(z_index) = self.z_index {
            widget.z_index = z_index;
        }
        if let Some(width) = self.width {
            widget.width = width;
        }
        if let Some(height) = self.height {
            widget.height = height;
        }
        widget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: u64) -> Widget {
        Widget {
            id: WidgetId::new(id),
            x: 1,
            y: 2,
            z_index: 3,
            width: 4,
            height: 5,
            last_modified: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let w = Widget {
            x: 10,
            y: 20,
            width: 25,
            height: 35,
            ..widget(1)
        };
        assert_eq!(w.bounds(), Aabb2D::new(10, 20, 34, 54));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let w = widget(1);
        assert_eq!(WidgetPatch::default().apply(w), w);
    }

    #[test]
    fn patch_overlays_only_provided_fields() {
        let w = widget(1);
        let patched = WidgetPatch {
            x: Some(100),
            height: Some(50),
            ..WidgetPatch::default()
        }
        .apply(w);

        assert_eq!(patched.x, 100);
        assert_eq!(patched.height, 50);
        assert_eq!(patched.y, w.y);
        assert_eq!(patched.z_index, w.z_index);
        assert_eq!(patched.width, w.width);
        assert_eq!(patched.id, w.id);
    }
}
