#![forbid(unsafe_code)]

//! Authoritative item order.
//!
//! [`SlotTable`] owns the mapping from item identity to slot, the single
//! source of truth for the grid's order. Rendering layers never hold order
//! state; they only receive transform commands derived from this table.
//!
//! # Invariants
//!
//! Outside an in-progress [`reorder`](SlotTable::reorder) call, the recorded
//! slots form a bijection onto `{0 .. len-1}`: no duplicates, no gaps. Every
//! mutation either preserves this or fails without touching the table.

use serde::{Deserialize, Serialize};
use std::fmt;

use sortgrid_core::event::ItemId;

use crate::error::GridError;
use crate::host::ReorderResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    item: ItemId,
    slot: usize,
}

/// The item → slot bijection, with the displacement transaction that keeps
/// it dense across reorders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotTable {
    entries: Vec<Entry>,
}

impl SlotTable {
    /// Build a table from ids; slots are assigned in iteration order.
    ///
    /// Fails on duplicate ids without constructing a partial table.
    pub fn from_ids(ids: impl IntoIterator<Item = ItemId>) -> Result<Self, GridError> {
        let mut table = Self::default();
        for id in ids {
            table.push(id)?;
        }
        Ok(table)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `item` is in the table.
    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.entries.iter().any(|e| e.item == item)
    }

    /// The recorded slot of `item`, if present.
    #[must_use]
    pub fn slot_of(&self, item: ItemId) -> Option<usize> {
        self.entries.iter().find(|e| e.item == item).map(|e| e.slot)
    }

    /// The item recorded at `slot`, if any.
    #[must_use]
    pub fn id_at(&self, slot: usize) -> Option<ItemId> {
        self.entries.iter().find(|e| e.slot == slot).map(|e| e.item)
    }

    /// Iterate over `(item, slot)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, usize)> + '_ {
        self.entries.iter().map(|e| (e.item, e.slot))
    }

    /// Item ids in slot order.
    #[must_use]
    pub fn order(&self) -> Vec<ItemId> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.slot);
        sorted.into_iter().map(|e| e.item).collect()
    }

    /// Snapshot of identity → slot for reporting.
    #[must_use]
    pub fn results(&self) -> ReorderResults {
        self.entries.iter().map(|e| (e.item, e.slot)).collect()
    }

    /// Append `item` at the next slot.
    pub fn push(&mut self, item: ItemId) -> Result<(), GridError> {
        if self.contains(item) {
            return Err(GridError::DuplicateItem { item });
        }
        let slot = self.entries.len();
        self.entries.push(Entry { item, slot });
        Ok(())
    }

    /// Remove `item` and compact the slots above it.
    ///
    /// Returns the removed item's slot.
    pub fn remove(&mut self, item: ItemId) -> Result<usize, GridError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.item == item)
            .ok_or(GridError::UnknownItem { item })?;
        let removed_slot = self.entries[index].slot;
        self.entries.swap_remove(index);
        for entry in &mut self.entries {
            if entry.slot > removed_slot {
                entry.slot -= 1;
            }
        }
        debug_assert!(self.check_bijection().is_ok());
        Ok(removed_slot)
    }

    /// Move `dragged` to `new_slot`, shifting every item in between by one.
    ///
    /// With `from` = the dragged item's currently-recorded slot:
    /// - dragging forward (`new_slot > from`): items in `(from, new_slot]`
    ///   shift down one place to fill the vacated gap;
    /// - dragging backward (`new_slot < from`): items in `[new_slot, from)`
    ///   shift up one place to make room.
    ///
    /// The asymmetry is deliberate: the vacated origin slot is excluded from
    /// the shift-away set but included in the shift-toward boundary. Getting
    /// either bound wrong duplicates or drops a slot.
    ///
    /// Returns the `(item, slot)` pairs that shifted, for transform
    /// re-emission. `new_slot == from` is accepted and shifts nothing.
    pub fn reorder(
        &mut self,
        dragged: ItemId,
        new_slot: usize,
    ) -> Result<Vec<(ItemId, usize)>, GridError> {
        let from = self
            .slot_of(dragged)
            .ok_or(GridError::UnknownItem { item: dragged })?;
        if new_slot >= self.entries.len() {
            return Err(GridError::SlotOutOfRange {
                slot: new_slot,
                item_count: self.entries.len(),
            });
        }

        let mut shifted = Vec::new();
        for entry in &mut self.entries {
            if entry.item == dragged {
                continue;
            }
            let p = entry.slot;
            if new_slot > from && p > from && p <= new_slot {
                entry.slot = p - 1;
                shifted.push((entry.item, entry.slot));
            } else if new_slot < from && p >= new_slot && p < from {
                entry.slot = p + 1;
                shifted.push((entry.item, entry.slot));
            }
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item == dragged) {
            entry.slot = new_slot;
        }
        debug_assert!(self.check_bijection().is_ok());
        Ok(shifted)
    }

    /// Restore slots from a snapshot taken by [`snapshot`](Self::snapshot).
    ///
    /// Ids missing from the snapshot keep their current slot; the snapshot
    /// is only ever taken and restored between mutations of the same table,
    /// so in practice it covers every entry.
    pub(crate) fn restore(&mut self, snapshot: &[(ItemId, usize)]) {
        for &(item, slot) in snapshot {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.item == item) {
                entry.slot = slot;
            }
        }
        debug_assert!(self.check_bijection().is_ok());
    }

    /// Capture `(item, slot)` pairs for a later [`restore`](Self::restore).
    #[must_use]
    pub(crate) fn snapshot(&self) -> Vec<(ItemId, usize)> {
        self.entries.iter().map(|e| (e.item, e.slot)).collect()
    }

    /// Verify the recorded slots are exactly `{0 .. len-1}`.
    ///
    /// With every slot in range and no duplicates, the pigeonhole principle
    /// guarantees no slot is missing either.
    pub fn check_bijection(&self) -> Result<(), BijectionViolation> {
        let len = self.entries.len();
        let mut seen = vec![false; len];
        for entry in &self.entries {
            if entry.slot >= len {
                return Err(BijectionViolation::SlotOutOfRange {
                    slot: entry.slot,
                    item_count: len,
                });
            }
            if seen[entry.slot] {
                return Err(BijectionViolation::DuplicateSlot { slot: entry.slot });
            }
            seen[entry.slot] = true;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_raw_entries(pairs: &[(u64, usize)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|&(id, slot)| Entry {
                    item: ItemId::new(id),
                    slot,
                })
                .collect(),
        }
    }
}

/// A violated slot-bijection invariant, reported by
/// [`SlotTable::check_bijection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BijectionViolation {
    /// Two items record the same slot.
    DuplicateSlot { slot: usize },
    /// An item records a slot past the end of the grid.
    SlotOutOfRange { slot: usize, item_count: usize },
}

impl fmt::Display for BijectionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSlot { slot } => write!(f, "slot {slot} is recorded twice"),
            Self::SlotOutOfRange { slot, item_count } => {
                write!(f, "slot {slot} is out of range for {item_count} items")
            }
        }
    }
}

impl std::error::Error for BijectionViolation {}

#[cfg(test)]
mod tests {
    use super::{BijectionViolation, SlotTable};
    use crate::error::GridError;
    use sortgrid_core::event::ItemId;

    fn ids(n: u64) -> Vec<ItemId> {
        (0..n).map(ItemId::new).collect()
    }

    fn slots_by_id(table: &SlotTable, n: u64) -> Vec<usize> {
        (0..n)
            .map(|i| table.slot_of(ItemId::new(i)).unwrap())
            .collect()
    }

    // --- construction and item set ---

    #[test]
    fn from_ids_assigns_slots_in_order() {
        let table = SlotTable::from_ids(ids(4)).unwrap();
        assert_eq!(slots_by_id(&table, 4), vec![0, 1, 2, 3]);
        assert!(table.check_bijection().is_ok());
    }

    #[test]
    fn from_ids_rejects_duplicates() {
        let result = SlotTable::from_ids([ItemId::new(1), ItemId::new(1)]);
        assert_eq!(
            result,
            Err(GridError::DuplicateItem {
                item: ItemId::new(1)
            })
        );
    }

    #[test]
    fn push_rejects_duplicates_without_mutating() {
        let mut table = SlotTable::from_ids(ids(3)).unwrap();
        assert_eq!(
            table.push(ItemId::new(1)),
            Err(GridError::DuplicateItem {
                item: ItemId::new(1)
            })
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn remove_compacts_slots_above() {
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        let removed = table.remove(ItemId::new(2)).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(table.len(), 4);
        assert_eq!(table.slot_of(ItemId::new(3)), Some(2));
        assert_eq!(table.slot_of(ItemId::new(4)), Some(3));
        assert_eq!(table.slot_of(ItemId::new(1)), Some(1));
        assert!(table.check_bijection().is_ok());
    }

    #[test]
    fn remove_unknown_is_an_error() {
        let mut table = SlotTable::from_ids(ids(3)).unwrap();
        assert_eq!(
            table.remove(ItemId::new(99)),
            Err(GridError::UnknownItem {
                item: ItemId::new(99)
            })
        );
    }

    // --- reorder transaction ---

    #[test]
    fn forward_reorder_shifts_range_down() {
        // slots: row0=[0,1,2], row1=[3,4]; drag slot 0 to slot 3.
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        let shifted = table.reorder(ItemId::new(0), 3).unwrap();

        assert_eq!(slots_by_id(&table, 5), vec![3, 0, 1, 2, 4]);
        assert_eq!(shifted.len(), 3);
        assert!(table.check_bijection().is_ok());
    }

    #[test]
    fn backward_reorder_shifts_range_up() {
        // Drag slot 4 to slot 1: items at 1,2,3 shift up to 2,3,4.
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        let shifted = table.reorder(ItemId::new(4), 1).unwrap();

        assert_eq!(slots_by_id(&table, 5), vec![0, 2, 3, 4, 1]);
        assert_eq!(shifted.len(), 3);
        assert!(table.check_bijection().is_ok());
    }

    #[test]
    fn adjacent_swap_shifts_exactly_one_item() {
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        let shifted = table.reorder(ItemId::new(1), 2).unwrap();
        assert_eq!(shifted, vec![(ItemId::new(2), 1)]);
        assert_eq!(table.slot_of(ItemId::new(1)), Some(2));
    }

    #[test]
    fn reorder_to_same_slot_shifts_nothing() {
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        let shifted = table.reorder(ItemId::new(2), 2).unwrap();
        assert!(shifted.is_empty());
        assert_eq!(slots_by_id(&table, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn items_outside_the_range_are_untouched() {
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        table.reorder(ItemId::new(1), 3).unwrap();
        assert_eq!(table.slot_of(ItemId::new(0)), Some(0));
        assert_eq!(table.slot_of(ItemId::new(4)), Some(4));
    }

    #[test]
    fn reorder_out_of_range_fails_without_mutating() {
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        assert_eq!(
            table.reorder(ItemId::new(0), 5),
            Err(GridError::SlotOutOfRange {
                slot: 5,
                item_count: 5
            })
        );
        assert_eq!(slots_by_id(&table, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn reorder_chain_keeps_bijection() {
        let mut table = SlotTable::from_ids(ids(6)).unwrap();
        for &(item, to) in &[(0u64, 5usize), (3, 0), (5, 2), (1, 4), (2, 2)] {
            table.reorder(ItemId::new(item), to).unwrap();
            assert!(table.check_bijection().is_ok());
        }
    }

    // --- snapshot / restore ---

    #[test]
    fn restore_undoes_reorders() {
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        let snapshot = table.snapshot();
        table.reorder(ItemId::new(0), 4).unwrap();
        table.reorder(ItemId::new(3), 0).unwrap();
        table.restore(&snapshot);
        assert_eq!(slots_by_id(&table, 5), vec![0, 1, 2, 3, 4]);
    }

    // --- order / results ---

    #[test]
    fn order_lists_ids_by_slot() {
        let mut table = SlotTable::from_ids(ids(5)).unwrap();
        table.reorder(ItemId::new(0), 3).unwrap();
        assert_eq!(
            table.order(),
            vec![
                ItemId::new(1),
                ItemId::new(2),
                ItemId::new(3),
                ItemId::new(0),
                ItemId::new(4),
            ]
        );
    }

    #[test]
    fn results_snapshot_matches_recorded_slots() {
        let mut table = SlotTable::from_ids(ids(3)).unwrap();
        table.reorder(ItemId::new(2), 0).unwrap();
        let results = table.results();
        assert_eq!(results[&ItemId::new(2)], 0);
        assert_eq!(results[&ItemId::new(0)], 1);
        assert_eq!(results[&ItemId::new(1)], 2);
    }

    // --- bijection diagnostics ---

    #[test]
    fn check_bijection_reports_duplicates() {
        let table = SlotTable::from_raw_entries(&[(0, 1), (1, 1), (2, 0)]);
        assert_eq!(
            table.check_bijection(),
            Err(BijectionViolation::DuplicateSlot { slot: 1 })
        );
    }

    #[test]
    fn check_bijection_reports_out_of_range() {
        let table = SlotTable::from_raw_entries(&[(0, 0), (1, 7)]);
        assert_eq!(
            table.check_bijection(),
            Err(BijectionViolation::SlotOutOfRange {
                slot: 7,
                item_count: 2
            })
        );
    }

    #[test]
    fn check_bijection_accepts_empty_table() {
        assert!(SlotTable::default().check_bijection().is_ok());
    }
}
