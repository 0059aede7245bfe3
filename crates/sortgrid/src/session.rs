#![forbid(unsafe_code)]

//! Transient per-drag state.

use serde::{Deserialize, Serialize};

use sortgrid_core::event::{ItemId, PointerSample};
use sortgrid_core::geometry::Point;

/// State alive between drag-start and drag-end for one item.
///
/// The origin slot, grab offset, and scroll baseline are captured once at
/// drag-start and never altered afterwards; a mid-drag grid recompute must
/// not disturb them. The slot snapshot lets a cancelled drag restore the
/// pre-drag order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    item: ItemId,
    origin_slot: usize,
    grab_offset: Point,
    start_cursor: Point,
    scroll_baseline: f32,
    snapshot: Vec<(ItemId, usize)>,
}

impl DragSession {
    pub(crate) fn new(
        item: ItemId,
        origin_slot: usize,
        origin_point: Point,
        sample: PointerSample,
        snapshot: Vec<(ItemId, usize)>,
    ) -> Self {
        Self {
            item,
            origin_slot,
            grab_offset: sample.cursor.delta(origin_point),
            start_cursor: sample.cursor,
            scroll_baseline: sample.scroll_top,
            snapshot,
        }
    }

    /// The dragged item.
    #[must_use]
    pub const fn item(&self) -> ItemId {
        self.item
    }

    /// The item's slot when the drag started.
    #[must_use]
    pub const fn origin_slot(&self) -> usize {
        self.origin_slot
    }

    /// Cursor position relative to the item's top-left at drag-start.
    #[must_use]
    pub const fn grab_offset(&self) -> Point {
        self.grab_offset
    }

    /// Visual top-left for a new pointer sample.
    ///
    /// `origin_point` is the origin slot's position under the *current*
    /// metrics, so a mid-drag resize is picked up automatically. The scroll
    /// delta compensates for autoscroll of the scroll container during the
    /// drag.
    pub(crate) fn visual_position(&self, origin_point: Point, sample: PointerSample) -> Point {
        let cursor_delta = sample.cursor.delta(self.start_cursor);
        let scroll_delta = sample.scroll_top - self.scroll_baseline;
        Point::new(
            origin_point.x + cursor_delta.x,
            origin_point.y + cursor_delta.y + scroll_delta,
        )
    }

    /// The grid-space point used to resolve the target slot: the visual
    /// position plus the grab offset, i.e. where the cursor sits inside
    /// the item.
    pub(crate) fn probe_point(&self, visual: Point) -> Point {
        visual.translate(self.grab_offset)
    }

    /// Slots recorded at drag-start, for cancel restore.
    pub(crate) fn snapshot(&self) -> &[(ItemId, usize)] {
        &self.snapshot
    }
}
