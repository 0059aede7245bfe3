#![forbid(unsafe_code)]

//! Grid layout model and position resolver.
//!
//! [`GridMetrics`] is the pure layout half of the engine: it converts
//! between row-major slot indices and pixel coordinates, and guesses the
//! slot under an arbitrary pixel point. It holds no item state; the slot
//! table owns the order.

use serde::{Deserialize, Serialize};

use sortgrid_core::geometry::{Point, Size};

use crate::error::GridError;

/// Upper bound on derived columns. Keeps slot arithmetic comfortably inside
/// integer range for any container/item width ratio.
const MAX_COLUMNS: usize = 1 << 16;

/// Immutable-per-layout-pass grid parameters.
///
/// Recomputed whenever the container resizes or the item count changes.
/// Invariant: `columns >= 1`.
///
/// # Examples
///
/// ```
/// use sortgrid::GridMetrics;
/// use sortgrid_core::geometry::{Point, Size};
///
/// // 5 items at 100x80px in a 320px container: 3 columns, 2 rows.
/// let m = GridMetrics::compute(320.0, Size::new(100.0, 80.0), 5, false).unwrap();
/// assert_eq!(m.columns(), 3);
/// assert_eq!(m.slot_to_point(4), Point::new(100.0, 80.0));
/// assert_eq!(m.container_height(), 160.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    item_size: Size,
    columns: usize,
    item_count: usize,
}

impl GridMetrics {
    /// Compute metrics for a container.
    ///
    /// `column_mode` forces a single column regardless of width; otherwise
    /// as many whole items as fit side by side, minimum one. Errors leave
    /// no partial state, so callers keep their previous metrics on failure.
    pub fn compute(
        container_width: f32,
        item_size: Size,
        item_count: usize,
        column_mode: bool,
    ) -> Result<Self, GridError> {
        if item_count == 0 {
            return Err(GridError::EmptyGrid);
        }
        if !(item_size.width > 0.0 && item_size.width.is_finite())
            || !(item_size.height > 0.0 && item_size.height.is_finite())
        {
            return Err(GridError::InvalidItemSize {
                width: item_size.width,
                height: item_size.height,
            });
        }
        if !(container_width > 0.0 && container_width.is_finite()) {
            return Err(GridError::InvalidContainerWidth {
                width: container_width,
            });
        }

        let columns = if column_mode {
            1
        } else {
            // The ratio of two positive finite floats can still overflow to
            // infinity; the clamp absorbs that along with the sub-one case.
            (container_width / item_size.width)
                .floor()
                .clamp(1.0, MAX_COLUMNS as f32) as usize
        };

        Ok(Self {
            item_size,
            columns,
            item_count,
        })
    }

    /// Same metrics with a different item count.
    pub(crate) fn with_item_count(self, item_count: usize) -> Result<Self, GridError> {
        if item_count == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self { item_count, ..self })
    }

    /// Item dimensions in pixels.
    #[must_use]
    pub const fn item_size(&self) -> Size {
        self.item_size
    }

    /// Number of columns, always at least one.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of items laid out.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Top-left pixel position of a slot.
    #[must_use]
    pub fn slot_to_point(&self, slot: usize) -> Point {
        let col = slot % self.columns;
        let row = slot / self.columns;
        Point::new(
            self.item_size.width * col as f32,
            self.item_size.height * row as f32,
        )
    }

    /// Total container height needed to hold every slot.
    #[must_use]
    pub fn container_height(&self) -> f32 {
        let rows = self.item_count.div_ceil(self.columns);
        self.item_size.height * rows as f32
    }

    /// Guess the slot under a pixel point, clamped to the grid.
    ///
    /// The column clamps to `[0, columns)` and the row to `>= 0`; the
    /// combined slot then clamps to the last valid index, so a drag past
    /// the end of a ragged final row (or far below the grid) still resolves
    /// to the last item. Pure and memoryless; callers decide when to act
    /// on a changed result.
    #[must_use]
    pub fn resolve_slot(&self, point: Point) -> usize {
        let last = self.item_count as i64 - 1;
        let col = ((point.x / self.item_size.width).floor() as i64).clamp(0, self.columns as i64 - 1);
        // The row is bounded before the multiply so the slot arithmetic
        // cannot overflow; any row past the grid clamps to the last slot
        // anyway. Casts from f32 saturate, so non-finite input stays in
        // range too.
        let row = ((point.y / self.item_size.height).floor() as i64).clamp(0, self.item_count as i64);
        (col + row * self.columns as i64).clamp(0, last) as usize
    }
}
