use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ulid::Ulid;

/// Stable identity of a row in the underlying data source.
///
/// Rows are matched by key, never by position, so a row keeps its identity
/// while the view is sorted or filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowKey(Ulid);

impl RowKey {
    /// Create a fresh key (sortable, timestamp-based)
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Wrap an existing ULID (useful for testing and for loaded data)
    pub fn from_ulid(id: Ulid) -> Self {
        Self(id)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for RowKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell position as seen by the user: display row index plus column id.
///
/// Equality is structural. Two addresses built independently for the same
/// row/column compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    /// Position of the row within the current (sorted/filtered) view
    pub row_index: usize,

    /// Column identifier from the column configuration
    pub column_id: String,
}

impl CellAddress {
    pub fn new(row_index: usize, column_id: impl Into<String>) -> Self {
        Self {
            row_index,
            column_id: column_id.into(),
        }
    }

    /// Check whether this address points at (row, column) without allocating
    pub fn is(&self, row_index: usize, column_id: &str) -> bool {
        self.row_index == row_index && self.column_id == column_id
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.column_id, self.row_index)
    }
}

/// Resolve the display row index of a row by scanning the ordered view.
///
/// Returns the position of the first row in `view` whose key equals
/// `row_key`, or `storage_index` when the row is not part of the view.
pub fn resolve_display_index(row_key: RowKey, storage_index: usize, view: &[RowKey]) -> usize {
    match view.iter().position(|key| *key == row_key) {
        Some(position) => position,
        None => {
            tracing::debug!(%row_key, storage_index, "row not in view, using storage index");
            storage_index
        }
    }
}

/// Key → display position lookup, rebuilt once per render pass.
#[derive(Debug, Clone, Default)]
pub struct ViewIndex {
    positions: HashMap<RowKey, usize>,
    order: Vec<RowKey>,
}

impl ViewIndex {
    /// Build the index from the display-ordered row keys
    pub fn from_view(view: &[RowKey]) -> Self {
        let mut positions = HashMap::with_capacity(view.len());
        for (position, key) in view.iter().enumerate() {
            // Duplicates are a caller error; keep the first occurrence.
            positions.entry(*key).or_insert(position);
        }
        Self {
            positions,
            order: view.to_vec(),
        }
    }

    /// Display position of a row, if it is in the view
    pub fn position(&self, row_key: RowKey) -> Option<usize> {
        self.positions.get(&row_key).copied()
    }

    /// Same contract as [`resolve_display_index`], in O(1)
    pub fn resolve(&self, row_key: RowKey, storage_index: usize) -> usize {
        match self.position(row_key) {
            Some(position) => position,
            None => {
                tracing::debug!(%row_key, storage_index, "row not in view, using storage index");
                storage_index
            }
        }
    }

    /// Row key displayed at a position
    pub fn key_at(&self, row_index: usize) -> Option<RowKey> {
        self.order.get(row_index).copied()
    }

    pub fn keys(&self) -> &[RowKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
