#![forbid(unsafe_code)]

//! Drag-to-reorder engine for grids of uniformly-sized items.
//!
//! As a user drags one item, the others re-flow live to show the resulting
//! order; on release the new order is reported. The engine owns the layout
//! math and the authoritative order; input capture and rendering stay with
//! outside collaborators, which feed lifecycle events in and receive
//! position commands out.
//!
//! - [`GridMetrics`] - slot index to pixel coordinates and back, point to
//!   nearest slot
//! - [`SlotTable`] - the authoritative item/slot bijection and the
//!   displacement transaction that keeps it dense
//! - [`SortableGrid`] - drag lifecycle orchestration
//! - [`RenderSink`] / [`ReorderObserver`] - the outbound seams
//!
//! # Example
//!
//! ```
//! use sortgrid::{
//!     DragOutcome, RenderSink, ReorderObserver, ReorderResults, SortableGrid,
//!     SortableGridConfig,
//! };
//! use sortgrid_core::event::{ItemId, PointerSample};
//! use sortgrid_core::geometry::{Point, Size};
//!
//! struct Host {
//!     last_results: Option<ReorderResults>,
//! }
//!
//! impl RenderSink for Host {
//!     fn set_item_transform(&mut self, _item: ItemId, _position: Point) {}
//!     fn set_container_height(&mut self, _height: f32) {}
//! }
//!
//! impl ReorderObserver for Host {
//!     fn on_reorder_complete(&mut self, results: &ReorderResults) {
//!         self.last_results = Some(results.clone());
//!     }
//! }
//!
//! // 5 items at 100x80px in a 320px-wide container: 3 columns.
//! let mut grid = SortableGrid::new(
//!     (0..5).map(ItemId::new),
//!     Size::new(100.0, 80.0),
//!     320.0,
//!     SortableGridConfig::new(),
//! )
//! .unwrap();
//!
//! let mut host = Host { last_results: None };
//! grid.layout(&mut host);
//!
//! // Drag the first item into the second row.
//! grid.drag_start(ItemId::new(0), PointerSample::at(10.0, 10.0));
//! grid.drag_move(ItemId::new(0), PointerSample::at(20.0, 95.0), &mut host);
//! let outcome = grid.drag_end(ItemId::new(0), &mut host);
//!
//! assert_eq!(outcome, DragOutcome::Completed { final_slot: 3 });
//! let results = host.last_results.unwrap();
//! assert_eq!(results[&ItemId::new(0)], 3);
//! assert_eq!(results[&ItemId::new(1)], 0);
//! ```

pub mod engine;
pub mod error;
pub mod grid;
pub mod host;
pub mod session;
pub mod slots;

pub use engine::{DragOutcome, NoopReason, SortableGrid, SortableGridConfig};
pub use error::GridError;
pub use grid::GridMetrics;
pub use host::{RenderSink, ReorderObserver, ReorderResults};
pub use session::DragSession;
pub use slots::{BijectionViolation, SlotTable};

pub use sortgrid_core as core;
