#![forbid(unsafe_code)]

//! Event coalescing for high-frequency drag moves.
//!
//! Pointer libraries can deliver a flood of move events during a fast drag.
//! Reorder correctness depends only on the final position before release,
//! so intermediate moves may be dropped without changing the outcome.
//!
//! This module provides [`DragEventCoalescer`] which:
//! - Coalesces rapid move events into a single event
//! - Passes through all other events immediately
//!
//! # Design
//!
//! The coalescer uses a "latest wins" strategy: a new move event replaces
//! any pending one. Non-coalescable events (start, end, cancel, resize)
//! pass through immediately; the caller is responsible for flushing the
//! pending move first so events stay in order.

use crate::event::DragEvent;

/// Coalesces high-frequency drag move events.
///
/// # Thread Safety
///
/// `DragEventCoalescer` is not thread-safe. It should be used from the
/// single event-processing thread.
///
/// # Performance
///
/// All operations are O(1). The coalescer holds at most one pending event.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragEventCoalescer {
    /// Pending move event (latest position wins).
    pending_move: Option<DragEvent>,
}

impl DragEventCoalescer {
    /// Create a new coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the coalescer.
    ///
    /// Returns `Some(event)` if the event should be processed immediately,
    /// or `None` if it was coalesced and is pending.
    ///
    /// # Note on Flush
    ///
    /// This method does NOT automatically flush the pending move when a
    /// non-coalescable event arrives. Call [`flush`](Self::flush) before
    /// processing a passed-through event so the final move is delivered
    /// ahead of it.
    pub fn push(&mut self, event: DragEvent) -> Option<DragEvent> {
        if event.is_move() {
            self.pending_move = Some(event);
            None
        } else {
            Some(event)
        }
    }

    /// Take the pending move event, if any.
    pub fn flush(&mut self) -> Option<DragEvent> {
        self.pending_move.take()
    }

    /// Returns true if a move event is pending.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending_move.is_some()
    }
}
