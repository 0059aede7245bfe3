#![forbid(unsafe_code)]

//! Outbound collaborator seams.
//!
//! The engine computes coordinates and order; it never paints. A rendering
//! collaborator implements [`RenderSink`] to apply position commands, and a
//! [`ReorderObserver`] receives the final order once per completed drag.

use std::collections::BTreeMap;

use sortgrid_core::event::ItemId;
use sortgrid_core::geometry::Point;

/// Final slot for every item, reported once per completed drag.
///
/// A `BTreeMap` so iteration order is deterministic for logging and replay.
pub type ReorderResults = BTreeMap<ItemId, usize>;

/// Rendering collaborator: consumes position-mutation commands.
pub trait RenderSink {
    /// Position `item`'s top-left corner at `position` (a 2-D translation).
    fn set_item_transform(&mut self, item: ItemId, position: Point);

    /// Reserve vertical space for the whole grid.
    fn set_container_height(&mut self, height: f32);
}

/// Observer notified when a drag completes.
///
/// Invoked exactly once per completed drag, synchronously, before the
/// engine returns to idle. A cancelled drag reports nothing.
pub trait ReorderObserver {
    fn on_reorder_complete(&mut self, results: &ReorderResults);
}
