//! Column pivot: an unbounded, ordered footprint list per component folded
//! into a fixed number of slots
//!
//! Ranking is by ascending footprint id within each component, dense and
//! independent of input order. Ranks beyond the capacity are dropped and
//! reported as overflow rather than failing the projection.

use std::collections::BTreeMap;

use crate::core::footprints::FootprintEntry;

/// Default number of footprint slots exposed per view row
pub const FOOTPRINT_SLOTS: usize = 4;

/// Separator of the display field built from the slots
pub const FOOTPRINT_DELIMITER: char = ';';

/// The slots of one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub component_id: i64,
    /// `slots[rank - 1]`, `None` where the component has fewer footprints
    pub slots: Vec<Option<String>>,
    /// Footprints the component has for this CAD tool before truncation
    pub total: usize,
}

impl SlotRow {
    /// A row for a component without footprints
    pub fn empty(component_id: i64, capacity: usize) -> Self {
        Self {
            component_id,
            slots: vec![None; capacity],
            total: 0,
        }
    }

    /// Label at a 1-based rank
    pub fn slot(&self, rank: usize) -> Option<&str> {
        rank.checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .and_then(|s| s.as_deref())
    }

    /// The joined display field (`"a;b"`, `""` when empty)
    pub fn display(&self) -> String {
        join_slots(&self.slots)
    }

    /// Footprints that did not fit
    pub fn discarded(&self) -> usize {
        self.total.saturating_sub(self.slots.len())
    }
}

/// A component whose footprints exceeded the slot capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub component_id: i64,
    pub total: usize,
    pub discarded: usize,
}

/// Pivot result keyed by component id
#[derive(Debug, Clone)]
pub struct PivotTable {
    capacity: usize,
    rows: BTreeMap<i64, SlotRow>,
}

impl PivotTable {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Row of a component that has at least one footprint
    pub fn get(&self, component_id: i64) -> Option<&SlotRow> {
        self.rows.get(&component_id)
    }

    /// Row of any component; components absent from the input get all-null slots
    pub fn row(&self, component_id: i64) -> SlotRow {
        self.rows
            .get(&component_id)
            .cloned()
            .unwrap_or_else(|| SlotRow::empty(component_id, self.capacity))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Components that lost footprints to the capacity cap
    pub fn overflows(&self) -> Vec<Overflow> {
        self.rows
            .values()
            .filter(|r| r.discarded() > 0)
            .map(|r| Overflow {
                component_id: r.component_id,
                total: r.total,
                discarded: r.discarded(),
            })
            .collect()
    }
}

/// Rank-then-project pivot with a fixed slot capacity
#[derive(Debug, Clone, Copy)]
pub struct FootprintPivot {
    capacity: usize,
}

impl Default for FootprintPivot {
    fn default() -> Self {
        Self::new(FOOTPRINT_SLOTS)
    }
}

impl FootprintPivot {
    /// Pivot with `capacity` slots (at least one)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fold footprint entries of one CAD tool into slot rows
    pub fn pivot<I>(&self, entries: I) -> PivotTable
    where
        I: IntoIterator<Item = FootprintEntry>,
    {
        // component -> footprint id -> label; the inner map gives the rank order
        // and collapses repeated pairs
        let mut ranked: BTreeMap<i64, BTreeMap<i64, String>> = BTreeMap::new();
        for entry in entries {
            ranked
                .entry(entry.component_id)
                .or_default()
                .entry(entry.footprint_id)
                .or_insert(entry.label);
        }

        let rows = ranked
            .into_iter()
            .map(|(component_id, labels)| {
                let total = labels.len();
                let mut slots: Vec<Option<String>> =
                    labels.into_values().take(self.capacity).map(Some).collect();
                slots.resize(self.capacity, None);
                (
                    component_id,
                    SlotRow {
                        component_id,
                        slots,
                        total,
                    },
                )
            })
            .collect();

        PivotTable {
            capacity: self.capacity,
            rows,
        }
    }
}

/// Join the non-null slots with the delimiter
pub fn join_slots(slots: &[Option<String>]) -> String {
    slots
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&FOOTPRINT_DELIMITER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(component_id: i64, footprint_id: i64, label: &str) -> FootprintEntry {
        FootprintEntry {
            component_id,
            footprint_id,
            label: label.to_string(),
        }
    }

    fn entries(component_id: i64, count: i64) -> Vec<FootprintEntry> {
        (1..=count)
            .map(|i| entry(component_id, i, &format!("fp{}", i)))
            .collect()
    }

    #[test]
    fn test_two_footprints_join_without_gaps() {
        let table = FootprintPivot::default().pivot(vec![entry(1, 10, "a:b"), entry(1, 11, "c:d")]);
        let row = table.row(1);
        assert_eq!(row.slot(1), Some("a:b"));
        assert_eq!(row.slot(2), Some("c:d"));
        assert_eq!(row.slot(3), None);
        assert_eq!(row.slots.len(), 4);
        assert_eq!(row.display(), "a:b;c:d");
    }

    #[test]
    fn test_component_without_footprints_gets_null_row() {
        let table = FootprintPivot::default().pivot(entries(1, 2));
        assert!(table.get(7).is_none());
        let row = table.row(7);
        assert_eq!(row.slots, vec![None, None, None, None]);
        assert_eq!(row.display(), "");
        assert_eq!(row.total, 0);
    }

    #[test]
    fn test_exactly_four_footprints_fill_all_slots() {
        let table = FootprintPivot::default().pivot(entries(1, 4));
        let row = table.row(1);
        assert_eq!(row.display(), "fp1;fp2;fp3;fp4");
        assert_eq!(row.discarded(), 0);
        assert!(table.overflows().is_empty());
    }

    #[test]
    fn test_fifth_footprint_is_discarded_and_reported() {
        let table = FootprintPivot::default().pivot(entries(1, 5));
        let row = table.row(1);
        assert_eq!(row.display(), "fp1;fp2;fp3;fp4");
        assert_eq!(
            table.overflows(),
            vec![Overflow {
                component_id: 1,
                total: 5,
                discarded: 1
            }]
        );
    }

    #[test]
    fn test_rank_ignores_input_order() {
        let mut shuffled = entries(1, 5);
        shuffled.reverse();
        shuffled.swap(0, 3);
        let table = FootprintPivot::default().pivot(shuffled);
        assert_eq!(table.row(1).display(), "fp1;fp2;fp3;fp4");
    }

    #[test]
    fn test_repeated_pairs_collapse() {
        let table = FootprintPivot::default().pivot(vec![
            entry(1, 3, "x"),
            entry(1, 3, "x"),
            entry(1, 4, "y"),
        ]);
        let row = table.row(1);
        assert_eq!(row.total, 2);
        assert_eq!(row.display(), "x;y");
    }

    #[test]
    fn test_ranks_are_per_component() {
        let table = FootprintPivot::default().pivot(vec![
            entry(1, 1, "shared"),
            entry(2, 1, "shared"),
            entry(2, 2, "own"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(1).display(), "shared");
        assert_eq!(table.row(2).slot(1), Some("shared"));
        assert_eq!(table.row(2).slot(2), Some("own"));
    }

    #[test]
    fn test_custom_capacity() {
        let table = FootprintPivot::new(2).pivot(entries(1, 3));
        assert_eq!(table.row(1).slots.len(), 2);
        assert_eq!(table.row(1).display(), "fp1;fp2");
        assert_eq!(table.row(9).slots.len(), 2);
        assert_eq!(FootprintPivot::new(0).capacity(), 1);
    }

    #[test]
    fn test_join_skips_interior_nulls() {
        let slots = vec![Some("a".to_string()), None, Some("b".to_string()), None];
        assert_eq!(join_slots(&slots), "a;b");
        assert_eq!(join_slots(&[None, None]), "");
    }
}
