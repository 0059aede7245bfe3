#![forbid(unsafe_code)]

//! Canonical drag-lifecycle event types.
//!
//! The engine exposes named methods for each lifecycle hook; adapters that
//! forward an event stream instead use [`DragEvent`] with the engine's
//! dispatcher. All coordinates are pixels in the engine's layout space;
//! the input collaborator is responsible for any normalization (touch vs
//! mouse, document vs viewport).

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Stable identifier for a draggable item.
///
/// Opaque to the engine: it is used only to address transform commands and
/// to report the final order. Collaborators choose the numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One pointer observation: the cursor position plus the scroll container's
/// vertical offset captured at the same instant.
///
/// Carrying the scroll offset with every sample lets the engine compensate
/// for autoscroll during a drag without holding a reference to any scroll
/// container. Pass `0.0` when the drag container itself scrolls the
/// viewport (no compensation needed).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    /// Cursor position in layout space.
    pub cursor: Point,
    /// Vertical scroll offset of the scroll container.
    pub scroll_top: f32,
}

impl PointerSample {
    /// Create a sample with an explicit scroll offset.
    #[must_use]
    pub const fn new(cursor: Point, scroll_top: f32) -> Self {
        Self { cursor, scroll_top }
    }

    /// Create a sample at `(x, y)` with no scroll offset.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            cursor: Point::new(x, y),
            scroll_top: 0.0,
        }
    }
}

/// Why an active drag was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The user pressed Escape.
    EscapeKey,
    /// The platform cancelled the pointer (e.g. touch interrupted).
    PointerCancel,
    /// The window or container lost focus mid-drag.
    FocusLost,
    /// The host cancelled the drag explicitly.
    Programmatic,
}

/// Canonical drag-lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    /// A drag began on `item`.
    Start { item: ItemId, sample: PointerSample },
    /// The cursor moved while dragging `item`.
    Move { item: ItemId, sample: PointerSample },
    /// The drag on `item` was released.
    End { item: ItemId },
    /// The active drag was cancelled.
    Cancel { reason: CancelReason },
    /// The grid container was resized.
    Resize { container_width: f32 },
}

impl DragEvent {
    /// Returns true for move events, the only coalescable kind.
    #[must_use]
    pub const fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}
