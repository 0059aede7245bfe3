#![forbid(unsafe_code)]

//! Drag-to-reorder lifecycle orchestration.
//!
//! [`SortableGrid`] owns the grid metrics, the authoritative slot table,
//! and at most one [`DragSession`]. An input collaborator feeds it
//! drag-lifecycle events; a rendering collaborator receives position
//! commands through [`RenderSink`]; a completed drag is reported once
//! through [`ReorderObserver`].
//!
//! # State machine
//!
//! ```text
//! Idle -> Dragging -> Idle
//! ```
//!
//! Every lifecycle method returns a [`DragOutcome`] so adapters and tests
//! observe deterministic transition diagnostics. Stale events (a move or
//! release with no active session, or for a different item id) are no-ops
//! with explicit reasons: event ordering from an external input library is
//! not fully controllable, so the engine must never panic or corrupt slot
//! state on unexpected input.
//!
//! # Invariants
//!
//! 1. Outside a reorder transaction, recorded slots are a bijection onto
//!    `{0 .. item_count-1}`.
//! 2. At most one drag session is active; a second drag-start is rejected.
//! 3. A mid-drag grid recompute never alters the active session's origin
//!    slot or grab offset.
//! 4. The observer fires exactly once per completed drag, synchronously.

use serde::{Deserialize, Serialize};

use sortgrid_core::event::{CancelReason, DragEvent, ItemId, PointerSample};
use sortgrid_core::geometry::Size;
use sortgrid_core::{debug, trace};

use crate::error::GridError;
use crate::grid::GridMetrics;
use crate::host::{RenderSink, ReorderObserver};
use crate::session::DragSession;
use crate::slots::SlotTable;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortableGridConfig {
    /// Force a single column regardless of container width.
    pub column_mode: bool,
}

impl SortableGridConfig {
    /// Default configuration: columns derived from the container width.
    #[must_use]
    pub const fn new() -> Self {
        Self { column_mode: false }
    }

    /// Force single-column layout.
    #[must_use]
    pub const fn with_column_mode(mut self) -> Self {
        self.column_mode = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Effect of one lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    /// A session was captured; the collaborator may lift the item visually.
    Started { origin_slot: usize },
    /// The dragged item followed the cursor. `slot` is its recorded slot
    /// after the move; `reordered` is true when a transaction ran.
    Moved { slot: usize, reordered: bool },
    /// The session completed and results were reported.
    Completed { final_slot: usize },
    /// The session was cancelled and the pre-drag order restored.
    Cancelled { reason: CancelReason },
    /// The grid was recomputed for a new container width.
    Resized,
    /// The event was safely ignored.
    Noop { reason: NoopReason },
}

/// Explicit reasons for events that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    /// Move, end, or cancel arrived with no active session.
    NoActiveDrag,
    /// The event's item id does not match the active session.
    ItemMismatch,
    /// Drag-start while a session is already active.
    DragAlreadyActive,
    /// The event names an id the grid does not contain.
    UnknownItem,
    /// The resolved target escaped the valid slot range; the transaction
    /// was aborted for this move and will re-resolve on the next one.
    TargetOutOfRange,
}

impl DragOutcome {
    const fn noop(reason: NoopReason) -> Self {
        Self::Noop { reason }
    }
}

// ---------------------------------------------------------------------------
// SortableGrid
// ---------------------------------------------------------------------------

/// Drag-to-reorder engine for one grid of uniformly-sized items.
///
/// Instantiate one engine per grid. The engine owns the layout parameters
/// and the authoritative order; collaborators own input capture and
/// rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortableGrid {
    metrics: GridMetrics,
    slots: SlotTable,
    session: Option<DragSession>,
    config: SortableGridConfig,
}

impl SortableGrid {
    /// Build an engine for `ids` in the given initial order.
    pub fn new(
        ids: impl IntoIterator<Item = ItemId>,
        item_size: Size,
        container_width: f32,
        config: SortableGridConfig,
    ) -> Result<Self, GridError> {
        let slots = SlotTable::from_ids(ids)?;
        let metrics =
            GridMetrics::compute(container_width, item_size, slots.len(), config.column_mode)?;
        Ok(Self {
            metrics,
            slots,
            session: None,
            config,
        })
    }

    /// Current layout parameters.
    #[must_use]
    pub const fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> SortableGridConfig {
        self.config
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true when the grid holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true while a drag session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The recorded slot of `item`, if present.
    #[must_use]
    pub fn slot_of(&self, item: ItemId) -> Option<usize> {
        self.slots.slot_of(item)
    }

    /// Item ids in slot order.
    #[must_use]
    pub fn order(&self) -> Vec<ItemId> {
        self.slots.order()
    }

    // -- full layout pass ---------------------------------------------------

    /// Emit a transform for every item plus the container height.
    ///
    /// Call after construction, after an item-set mutation, or whenever the
    /// rendering surface needs a full re-sync.
    pub fn layout<S: RenderSink>(&self, sink: &mut S) {
        sink.set_container_height(self.metrics.container_height());
        for (item, slot) in self.slots.iter() {
            sink.set_item_transform(item, self.metrics.slot_to_point(slot));
        }
    }

    // -- drag lifecycle -----------------------------------------------------

    /// Begin a drag on `item`.
    ///
    /// Captures the session (origin slot, grab offset, scroll baseline) and
    /// changes no slot; the collaborator lifts the item visually. Rejected
    /// while another session is active.
    pub fn drag_start(&mut self, item: ItemId, sample: PointerSample) -> DragOutcome {
        if self.session.is_some() {
            return DragOutcome::noop(NoopReason::DragAlreadyActive);
        }
        let Some(origin_slot) = self.slots.slot_of(item) else {
            return DragOutcome::noop(NoopReason::UnknownItem);
        };

        let origin_point = self.metrics.slot_to_point(origin_slot);
        self.session = Some(DragSession::new(
            item,
            origin_slot,
            origin_point,
            sample,
            self.slots.snapshot(),
        ));
        trace!(item = item.get(), origin_slot, "drag session started");
        DragOutcome::Started { origin_slot }
    }

    /// Process one drag move.
    ///
    /// The dragged item's transform follows the cursor on every move; when
    /// the resolved target slot differs from the recorded one, the reorder
    /// transaction runs and every shifted item's transform is re-emitted so
    /// the order is visible live, before release.
    pub fn drag_move<S: RenderSink>(
        &mut self,
        item: ItemId,
        sample: PointerSample,
        sink: &mut S,
    ) -> DragOutcome {
        let Some(session) = self.session.as_ref() else {
            return DragOutcome::noop(NoopReason::NoActiveDrag);
        };
        if session.item() != item {
            return DragOutcome::noop(NoopReason::ItemMismatch);
        }

        // Origin point re-derives from the origin slot under the current
        // metrics, so a mid-drag resize is already accounted for.
        let origin_point = self.metrics.slot_to_point(session.origin_slot());
        let visual = session.visual_position(origin_point, sample);
        let probe = session.probe_point(visual);
        sink.set_item_transform(item, visual);

        let target = self.metrics.resolve_slot(probe);
        let Some(recorded) = self.slots.slot_of(item) else {
            return DragOutcome::noop(NoopReason::UnknownItem);
        };
        if target == recorded {
            return DragOutcome::Moved {
                slot: recorded,
                reordered: false,
            };
        }

        match self.slots.reorder(item, target) {
            Ok(shifted) => {
                for (id, slot) in shifted {
                    sink.set_item_transform(id, self.metrics.slot_to_point(slot));
                }
                trace!(
                    item = item.get(),
                    from = recorded,
                    to = target,
                    "reorder transaction applied"
                );
                DragOutcome::Moved {
                    slot: target,
                    reordered: true,
                }
            }
            Err(_) => DragOutcome::noop(NoopReason::TargetOutOfRange),
        }
    }

    /// Finish the active drag.
    ///
    /// Snaps the dragged item to its recorded slot, destroys the session,
    /// then reports identity -> slot for every item: exactly once,
    /// synchronously, before returning to idle.
    pub fn drag_end<H: RenderSink + ReorderObserver>(
        &mut self,
        item: ItemId,
        host: &mut H,
    ) -> DragOutcome {
        match self.session.as_ref() {
            None => return DragOutcome::noop(NoopReason::NoActiveDrag),
            Some(session) if session.item() != item => {
                return DragOutcome::noop(NoopReason::ItemMismatch);
            }
            Some(_) => {}
        }
        let Some(final_slot) = self.slots.slot_of(item) else {
            return DragOutcome::noop(NoopReason::UnknownItem);
        };

        host.set_item_transform(item, self.metrics.slot_to_point(final_slot));
        self.session = None;
        let results = self.slots.results();
        host.on_reorder_complete(&results);
        debug!(item = item.get(), final_slot, "drag completed");
        DragOutcome::Completed { final_slot }
    }

    /// Cancel the active drag and restore the pre-drag order.
    ///
    /// Every item's transform is re-emitted from the restored slots. No
    /// results are reported.
    pub fn drag_cancel<S: RenderSink>(&mut self, reason: CancelReason, sink: &mut S) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::noop(NoopReason::NoActiveDrag);
        };

        self.slots.restore(session.snapshot());
        for (item, slot) in self.slots.iter() {
            sink.set_item_transform(item, self.metrics.slot_to_point(slot));
        }
        debug!(item = session.item().get(), "drag cancelled");
        DragOutcome::Cancelled { reason }
    }

    // -- resize and item set ------------------------------------------------

    /// Recompute the grid for a new container width.
    ///
    /// Every non-dragged item's transform re-emits from its unchanged slot
    /// under the new column count; a resize never reorders. May arrive
    /// mid-drag: the active session's origin slot and grab offset are
    /// untouched, and the dragged item keeps following the cursor. On error
    /// the previous valid metrics stay in place.
    pub fn container_resized<S: RenderSink>(
        &mut self,
        container_width: f32,
        sink: &mut S,
    ) -> Result<(), GridError> {
        self.metrics = GridMetrics::compute(
            container_width,
            self.metrics.item_size(),
            self.slots.len(),
            self.config.column_mode,
        )?;
        trace!(columns = self.metrics.columns(), "grid recomputed");

        sink.set_container_height(self.metrics.container_height());
        let dragged = self.session.as_ref().map(DragSession::item);
        for (item, slot) in self.slots.iter() {
            if dragged != Some(item) {
                sink.set_item_transform(item, self.metrics.slot_to_point(slot));
            }
        }
        Ok(())
    }

    /// Replace the item set; slots are assigned in iteration order.
    ///
    /// Refused mid-drag: a count change cannot keep both the session and
    /// the slot bijection coherent. Call [`layout`](Self::layout) afterwards
    /// to re-sync the surface.
    pub fn set_items(&mut self, ids: impl IntoIterator<Item = ItemId>) -> Result<(), GridError> {
        if self.session.is_some() {
            return Err(GridError::DragInProgress);
        }
        let slots = SlotTable::from_ids(ids)?;
        let metrics = self.metrics.with_item_count(slots.len())?;
        self.slots = slots;
        self.metrics = metrics;
        Ok(())
    }

    /// Append an item at the last slot. Refused mid-drag.
    pub fn push_item(&mut self, item: ItemId) -> Result<(), GridError> {
        if self.session.is_some() {
            return Err(GridError::DragInProgress);
        }
        let metrics = self.metrics.with_item_count(self.slots.len() + 1)?;
        self.slots.push(item)?;
        self.metrics = metrics;
        Ok(())
    }

    /// Remove an item and compact the slots above it. Refused mid-drag,
    /// and refused when it would leave the grid empty.
    pub fn remove_item(&mut self, item: ItemId) -> Result<(), GridError> {
        if self.session.is_some() {
            return Err(GridError::DragInProgress);
        }
        if !self.slots.contains(item) {
            return Err(GridError::UnknownItem { item });
        }
        let metrics = self.metrics.with_item_count(self.slots.len() - 1)?;
        self.slots.remove(item)?;
        self.metrics = metrics;
        Ok(())
    }

    // -- event stream dispatch ----------------------------------------------

    /// Dispatch one [`DragEvent`] to the matching lifecycle method.
    ///
    /// For adapters that forward an event stream instead of calling the
    /// named methods. Only resize can fail; drag events always produce an
    /// outcome.
    pub fn apply<H: RenderSink + ReorderObserver>(
        &mut self,
        event: DragEvent,
        host: &mut H,
    ) -> Result<DragOutcome, GridError> {
        match event {
            DragEvent::Start { item, sample } => Ok(self.drag_start(item, sample)),
            DragEvent::Move { item, sample } => Ok(self.drag_move(item, sample, host)),
            DragEvent::End { item } => Ok(self.drag_end(item, host)),
            DragEvent::Cancel { reason } => Ok(self.drag_cancel(reason, host)),
            DragEvent::Resize { container_width } => {
                self.container_resized(container_width, host)?;
                Ok(DragOutcome::Resized)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
