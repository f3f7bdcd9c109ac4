// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking-order maintenance: planning the shifts that keep indexes unique.

use crate::store::WidgetStore;
use crate::widget::WidgetId;

/// Plan the reassignments needed to free stacking index `z`.
///
/// `saving` is the widget about to be written at `z`, if it already exists;
/// it cannot collide with itself and is skipped.
///
/// The plan walks the widgets stacked at or above `z` in ascending order
/// with a cursor starting at `z`. A widget sitting on the cursor is shifted
/// up by one and the cursor follows it, so a contiguous run of occupied
/// indexes shifts as a block. The first gap ends the walk: widgets above a
/// gap cannot collide and stay untouched.
///
/// The returned pairs `(id, new_z)` are ordered descending by `new_z`.
/// Applied front to back — topmost shift first — and followed by the write
/// at `z`, no two records ever hold the same index between writes, provided
/// each individual write is atomic.
pub fn displacements<S>(store: &S, saving: Option<WidgetId>, z: i64) -> Vec<(WidgetId, i64)>
where
    S: WidgetStore + ?Sized,
{
    let mut plan = Vec::new();
    let mut cursor = z;

    for widget in store.stacked_at_or_above(z) {
        if Some(widget.id) == saving {
            continue;
        }

        if widget.z_index == cursor {
            cursor += 1;
            plan.push((widget.id, cursor));
        } else if widget.z_index > cursor {
            // Gap: everything above is already clear of the shifted run.
            break;
        }
    }

    // The walk collects in ascending order; application order is descending.
    plan.reverse();
    plan
}
