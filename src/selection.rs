use crate::CellAddress;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Rectangular block of cells: an inclusive row span over a set of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub first_row: usize,
    pub last_row: usize,
    columns: HashSet<String>,
}

impl CellRange {
    /// Span the rectangle between two corner cells.
    ///
    /// The column span follows `column_order`. If either corner's column is
    /// not in the order, only the two corner columns are covered.
    pub fn between(anchor: &CellAddress, head: &CellAddress, column_order: &[String]) -> Self {
        let first_row = anchor.row_index.min(head.row_index);
        let last_row = anchor.row_index.max(head.row_index);

        let anchor_col = column_order.iter().position(|c| *c == anchor.column_id);
        let head_col = column_order.iter().position(|c| *c == head.column_id);

        let columns = match (anchor_col, head_col) {
            (Some(a), Some(h)) => column_order[a.min(h)..=a.max(h)].iter().cloned().collect(),
            _ => [anchor.column_id.clone(), head.column_id.clone()]
                .into_iter()
                .collect(),
        };

        Self {
            first_row,
            last_row,
            columns,
        }
    }

    pub fn contains(&self, row_index: usize, column_id: &str) -> bool {
        row_index >= self.first_row && row_index <= self.last_row && self.columns.contains(column_id)
    }

    pub fn row_count(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.row_count() * self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Set of selected cells.
///
/// Membership queries are O(1) for every shape; they are made once per
/// rendered cell per pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Empty,
    Range(CellRange),
    /// Discontiguous cells keyed by row
    Cells(BTreeMap<usize, HashSet<String>>),
}

/// Selection update command accepted by the interaction store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionUpdate {
    Clear,
    Single(CellAddress),
    Range {
        anchor: CellAddress,
        head: CellAddress,
    },
    Cells(Vec<CellAddress>),
    /// Add the cell if absent, remove it if present
    Toggle(CellAddress),
    /// Every cell in `row_count` rows over the current column order
    SelectAll { row_count: usize },
}

impl Selection {
    pub fn contains(&self, row_index: usize, column_id: &str) -> bool {
        match self {
            Selection::Empty => false,
            Selection::Range(range) => range.contains(row_index, column_id),
            Selection::Cells(rows) => rows
                .get(&row_index)
                .is_some_and(|columns| columns.contains(column_id)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Empty => 0,
            Selection::Range(range) => range.len(),
            Selection::Cells(rows) => rows.values().map(HashSet::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply an update, returning the new selection
    pub fn apply(self, update: SelectionUpdate, column_order: &[String]) -> Selection {
        match update {
            SelectionUpdate::Clear => Selection::Empty,
            SelectionUpdate::Single(address) => Selection::from_cells([address]),
            SelectionUpdate::Range { anchor, head } => {
                Selection::Range(CellRange::between(&anchor, &head, column_order))
            }
            SelectionUpdate::Cells(addresses) => Selection::from_cells(addresses),
            SelectionUpdate::Toggle(address) => {
                let mut rows = self.into_cell_map();
                let columns = rows.entry(address.row_index).or_default();
                if !columns.remove(&address.column_id) {
                    columns.insert(address.column_id);
                }
                Selection::from_cell_map(rows)
            }
            SelectionUpdate::SelectAll { row_count } => {
                if row_count == 0 || column_order.is_empty() {
                    return Selection::Empty;
                }
                Selection::Range(CellRange {
                    first_row: 0,
                    last_row: row_count - 1,
                    columns: column_order.iter().cloned().collect(),
                })
            }
        }
    }

    /// Drop cells on the given rows
    pub fn without_rows(self, removed: &HashSet<usize>) -> Selection {
        if let Selection::Range(range) = &self {
            let touched = removed
                .iter()
                .any(|row| *row >= range.first_row && *row <= range.last_row);
            if !touched {
                return self;
            }
        }
        let mut rows = self.into_cell_map();
        rows.retain(|row, _| !removed.contains(row));
        Selection::from_cell_map(rows)
    }

    /// Drop cells at or beyond `row_count`
    pub fn truncated(self, row_count: usize) -> Selection {
        let removed: HashSet<usize> = match &self {
            Selection::Empty => HashSet::new(),
            Selection::Range(range) => (row_count..=range.last_row).collect(),
            Selection::Cells(rows) => rows.range(row_count..).map(|(row, _)| *row).collect(),
        };
        if removed.is_empty() {
            self
        } else {
            self.without_rows(&removed)
        }
    }

    /// Drop cells in a column
    pub fn without_column(self, column_id: &str) -> Selection {
        match self {
            Selection::Empty => Selection::Empty,
            Selection::Range(mut range) => {
                range.columns.remove(column_id);
                if range.columns.is_empty() {
                    Selection::Empty
                } else {
                    Selection::Range(range)
                }
            }
            Selection::Cells(mut rows) => {
                for columns in rows.values_mut() {
                    columns.remove(column_id);
                }
                Selection::from_cell_map(rows)
            }
        }
    }

    /// Enumerate selected addresses in row order, columns in `column_order`.
    /// Columns missing from the order come last, sorted by id.
    pub fn addresses(&self, column_order: &[String]) -> Vec<CellAddress> {
        let ordered = |columns: &HashSet<String>| -> Vec<String> {
            let mut known: Vec<String> = column_order
                .iter()
                .filter(|c| columns.contains(*c))
                .cloned()
                .collect();
            let mut unknown: Vec<String> = columns
                .iter()
                .filter(|c| !column_order.contains(*c))
                .cloned()
                .collect();
            unknown.sort();
            known.extend(unknown);
            known
        };

        match self {
            Selection::Empty => Vec::new(),
            Selection::Range(range) => {
                let columns = ordered(&range.columns);
                let columns = &columns;
                (range.first_row..=range.last_row)
                    .flat_map(move |row| columns.iter().map(move |c| CellAddress::new(row, c.clone())))
                    .collect()
            }
            Selection::Cells(rows) => rows
                .iter()
                .flat_map(|(row, columns)| {
                    ordered(columns)
                        .into_iter()
                        .map(move |c| CellAddress::new(*row, c))
                })
                .collect(),
        }
    }

    fn from_cells(addresses: impl IntoIterator<Item = CellAddress>) -> Selection {
        let mut rows: BTreeMap<usize, HashSet<String>> = BTreeMap::new();
        for address in addresses {
            rows.entry(address.row_index)
                .or_default()
                .insert(address.column_id);
        }
        Selection::from_cell_map(rows)
    }

    fn from_cell_map(mut rows: BTreeMap<usize, HashSet<String>>) -> Selection {
        rows.retain(|_, columns| !columns.is_empty());
        if rows.is_empty() {
            Selection::Empty
        } else {
            Selection::Cells(rows)
        }
    }

    fn into_cell_map(self) -> BTreeMap<usize, HashSet<String>> {
        match self {
            Selection::Empty => BTreeMap::new(),
            Selection::Cells(rows) => rows,
            Selection::Range(range) => (range.first_row..=range.last_row)
                .map(|row| (row, range.columns.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn columns() -> Vec<String> {
        ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_range_membership() {
        let order = columns();
        let selection = Selection::Empty.apply(
            SelectionUpdate::Range {
                anchor: CellAddress::new(5, "c"),
                head: CellAddress::new(2, "b"),
            },
            &order,
        );

        // Corners and interior
        assert!(selection.contains(2, "b"));
        assert!(selection.contains(5, "c"));
        assert!(selection.contains(3, "c"));
        // Outside
        assert!(!selection.contains(1, "b"));
        assert!(!selection.contains(6, "c"));
        assert!(!selection.contains(3, "a"));
        assert!(!selection.contains(3, "d"));
        assert!(!selection.contains(3, "zzz"));
        assert_eq!(selection.len(), 8);
    }

    #[test]
    fn test_range_with_unknown_column() {
        let selection = Selection::Empty.apply(
            SelectionUpdate::Range {
                anchor: CellAddress::new(0, "a"),
                head: CellAddress::new(1, "ghost"),
            },
            &columns(),
        );
        assert!(selection.contains(1, "a"));
        assert!(selection.contains(0, "ghost"));
        assert!(!selection.contains(0, "b"));
    }

    #[test]
    fn test_discontiguous_cells() {
        let selection = Selection::Empty.apply(
            SelectionUpdate::Cells(vec![CellAddress::new(0, "a"), CellAddress::new(7, "d")]),
            &columns(),
        );
        assert!(selection.contains(0, "a"));
        assert!(selection.contains(7, "d"));
        assert!(!selection.contains(0, "d"));
        assert!(!selection.contains(3, "a"));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_toggle_from_range() {
        let order = columns();
        let selection = Selection::Empty
            .apply(
                SelectionUpdate::Range {
                    anchor: CellAddress::new(0, "a"),
                    head: CellAddress::new(1, "b"),
                },
                &order,
            )
            .apply(SelectionUpdate::Toggle(CellAddress::new(1, "b")), &order)
            .apply(SelectionUpdate::Toggle(CellAddress::new(4, "d")), &order);

        assert!(selection.contains(0, "a"));
        assert!(!selection.contains(1, "b"));
        assert!(selection.contains(4, "d"));
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn test_toggle_last_cell_empties() {
        let order = columns();
        let selection = Selection::Empty
            .apply(SelectionUpdate::Toggle(CellAddress::new(2, "a")), &order)
            .apply(SelectionUpdate::Toggle(CellAddress::new(2, "a")), &order);
        assert_eq!(selection, Selection::Empty);
    }

    #[test]
    fn test_select_all() {
        let order = columns();
        let selection = Selection::Empty.apply(SelectionUpdate::SelectAll { row_count: 3 }, &order);
        assert_eq!(selection.len(), 12);
        assert!(selection.contains(2, "d"));
        assert!(!selection.contains(3, "a"));

        let none = Selection::Empty.apply(SelectionUpdate::SelectAll { row_count: 0 }, &order);
        assert!(none.is_empty());
    }

    #[test]
    fn test_prune_rows_splits_range() {
        let order = columns();
        let selection = Selection::Empty
            .apply(
                SelectionUpdate::Range {
                    anchor: CellAddress::new(0, "a"),
                    head: CellAddress::new(3, "a"),
                },
                &order,
            )
            .without_rows(&HashSet::from([1, 2]));

        assert!(selection.contains(0, "a"));
        assert!(!selection.contains(1, "a"));
        assert!(!selection.contains(2, "a"));
        assert!(selection.contains(3, "a"));
    }

    #[test]
    fn test_truncate_and_column_prune() {
        let order = columns();
        let selection = Selection::Empty
            .apply(SelectionUpdate::SelectAll { row_count: 5 }, &order)
            .truncated(2)
            .without_column("b");

        assert_eq!(selection.len(), 6);
        assert!(!selection.contains(2, "a"));
        assert!(!selection.contains(0, "b"));
        assert!(selection.contains(1, "d"));
    }

    #[test]
    fn test_addresses_ordered() {
        let order = columns();
        let selection = Selection::Empty.apply(
            SelectionUpdate::Cells(vec![
                CellAddress::new(2, "d"),
                CellAddress::new(0, "zz"),
                CellAddress::new(2, "a"),
                CellAddress::new(0, "b"),
            ]),
            &order,
        );
        assert_eq!(
            selection.addresses(&order),
            vec![
                CellAddress::new(0, "b"),
                CellAddress::new(0, "zz"),
                CellAddress::new(2, "a"),
                CellAddress::new(2, "d"),
            ]
        );
    }
}
