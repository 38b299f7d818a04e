// In-memory rows backing the demo host and the tests.

use crate::grid::{CommitReceipt, CommitRequest, CommitSink, DataSource};
use crate::RowKey;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One stored row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: RowKey,
    pub values: HashMap<String, Value>,
}

/// How the table answers commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitMode {
    /// Write at once and answer `Accepted`
    #[default]
    Immediate,
    /// Queue the write and answer `Pending` until [`MemoryTable::flush`]
    Deferred,
}

type RowFilter = Box<dyn Fn(&TableRow) -> bool>;

/// Rows in insertion (storage) order with an optional sort and filter that
/// together define the display order
#[derive(Default)]
pub struct MemoryTable {
    rows: Vec<TableRow>,
    sort: Option<(String, bool)>,
    filter: Option<RowFilter>,
    read_only: HashSet<String>,
    mode: CommitMode,
    queued: Vec<CommitRequest>,
}

impl fmt::Debug for MemoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTable")
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("filtered", &self.filter.is_some())
            .field("mode", &self.mode)
            .field("queued", &self.queued.len())
            .finish()
    }
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, returning its new key
    pub fn push_row<K, I>(&mut self, values: I) -> RowKey
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let key = RowKey::new();
        self.rows.push(TableRow {
            key,
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        });
        key
    }

    /// Rows from a JSON array of objects
    pub fn from_json(json: &Value) -> anyhow::Result<Self> {
        let items = json
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Table data must be an array of objects"))?;

        let mut table = Self::new();
        for (index, item) in items.iter().enumerate() {
            let object = item
                .as_object()
                .ok_or_else(|| anyhow::anyhow!("Row {} is not an object", index))?;
            table.push_row(object.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, key: RowKey) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn get(&self, key: RowKey, column_id: &str) -> Option<&Value> {
        self.row(key)?.values.get(column_id)
    }

    /// Overwrite one value. Returns false if the row doesn't exist.
    pub fn set(&mut self, key: RowKey, column_id: &str, value: Value) -> bool {
        match self.rows.iter_mut().find(|row| row.key == key) {
            Some(row) => {
                row.values.insert(column_id.to_string(), value);
                true
            }
            None => false,
        }
    }

    /// Delete rows by key, returning how many were removed
    pub fn remove_rows(&mut self, keys: &[RowKey]) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !keys.contains(&row.key));
        before - self.rows.len()
    }

    // ========== View ==========

    /// Sort the view by a column. The sort is stable.
    pub fn sort_by(&mut self, column_id: impl Into<String>, ascending: bool) {
        self.sort = Some((column_id.into(), ascending));
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn sorted_by(&self) -> Option<(&str, bool)> {
        self.sort.as_ref().map(|(column, ascending)| (column.as_str(), *ascending))
    }

    /// Only rows matching the predicate are shown
    pub fn set_filter(&mut self, filter: impl Fn(&TableRow) -> bool + 'static) {
        self.filter = Some(Box::new(filter));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    // ========== Commits ==========

    pub fn set_commit_mode(&mut self, mode: CommitMode) {
        self.mode = mode;
    }

    /// Commits to this column are rejected
    pub fn set_read_only(&mut self, column_id: impl Into<String>) {
        self.read_only.insert(column_id.into());
    }

    /// Apply queued commits, returning each result for the grid to settle
    pub fn flush(&mut self) -> Vec<(RowKey, String, Result<(), String>)> {
        let queued = std::mem::take(&mut self.queued);
        queued
            .into_iter()
            .map(|request| {
                let result = self.write(&request);
                (request.row_key, request.column_id().to_string(), result)
            })
            .collect()
    }

    pub fn queued(&self) -> &[CommitRequest] {
        &self.queued
    }

    fn write(&mut self, request: &CommitRequest) -> Result<(), String> {
        if self.set(request.row_key, request.column_id(), request.value.to_json()) {
            Ok(())
        } else {
            Err("row no longer exists".to_string())
        }
    }
}

/// Total order over JSON values: nulls last, then booleans, numbers and
/// strings (case-insensitive); anything else compares by its JSON text
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            Some(Value::Bool(_)) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Array(_)) | Some(Value::Object(_)) => 3,
            None | Some(Value::Null) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => {
            a.to_lowercase().cmp(&b.to_lowercase())
        }
        _ => match rank(a).cmp(&rank(b)) {
            Ordering::Equal => {
                let a = a.map(Value::to_string).unwrap_or_default();
                let b = b.map(Value::to_string).unwrap_or_default();
                a.cmp(&b)
            }
            other => other,
        },
    }
}

impl DataSource for MemoryTable {
    fn view(&self) -> Vec<RowKey> {
        let mut rows: Vec<&TableRow> = self
            .rows
            .iter()
            .filter(|row| self.filter.as_ref().map_or(true, |filter| filter(row)))
            .collect();

        if let Some((column, ascending)) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.values.get(column), b.values.get(column));
                if *ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        rows.into_iter().map(|row| row.key).collect()
    }

    fn storage_index(&self, row_key: RowKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == row_key)
    }

    fn value(&self, row_key: RowKey, column_id: &str) -> Value {
        self.get(row_key, column_id).cloned().unwrap_or(Value::Null)
    }
}

impl CommitSink for MemoryTable {
    fn commit(&mut self, request: CommitRequest) -> CommitReceipt {
        if self.read_only.contains(request.column_id()) {
            return CommitReceipt::Rejected(format!("column '{}' is read-only", request.column_id()));
        }

        match self.mode {
            CommitMode::Immediate => match self.write(&request) {
                Ok(()) => CommitReceipt::Accepted,
                Err(message) => CommitReceipt::Rejected(message),
            },
            CommitMode::Deferred => {
                self.queued.push(request);
                CommitReceipt::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellAddress, CellValue};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table() -> (MemoryTable, Vec<RowKey>) {
        let mut table = MemoryTable::new();
        let keys = vec![
            table.push_row([("name", json!("pear")), ("qty", json!(3))]),
            table.push_row([("name", json!("Apple")), ("qty", json!(10))]),
            table.push_row([("name", json!("fig"))]),
        ];
        (table, keys)
    }

    #[test]
    fn test_view_defaults_to_storage_order() {
        let (table, keys) = table();
        assert_eq!(table.view(), keys);
        assert_eq!(table.storage_index(keys[2]), Some(2));
    }

    #[test]
    fn test_sort_and_filter() {
        let (mut table, keys) = table();

        table.sort_by("name", true);
        assert_eq!(table.view(), vec![keys[1], keys[2], keys[0]]);

        // Missing values sort last
        table.sort_by("qty", true);
        assert_eq!(table.view(), vec![keys[0], keys[1], keys[2]]);
        table.sort_by("qty", false);
        assert_eq!(table.view(), vec![keys[2], keys[1], keys[0]]);

        table.set_filter(|row| row.values.contains_key("qty"));
        assert_eq!(table.view(), vec![keys[1], keys[0]]);
        table.clear_filter();
        table.clear_sort();
        assert_eq!(table.view(), keys);
    }

    #[test]
    fn test_immediate_commit() {
        let (mut table, keys) = table();
        let receipt = table.commit(CommitRequest {
            row_key: keys[0],
            address: CellAddress::new(0, "qty"),
            value: CellValue::Number(7.0),
        });

        assert_eq!(receipt, CommitReceipt::Accepted);
        assert_eq!(table.value(keys[0], "qty"), json!(7.0));
    }

    #[test]
    fn test_deferred_commit_and_flush() {
        let (mut table, keys) = table();
        table.set_commit_mode(CommitMode::Deferred);

        let receipt = table.commit(CommitRequest {
            row_key: keys[1],
            address: CellAddress::new(1, "name"),
            value: CellValue::text("Banana"),
        });
        assert_eq!(receipt, CommitReceipt::Pending);
        assert_eq!(table.value(keys[1], "name"), json!("Apple"));

        let settled = table.flush();
        assert_eq!(settled, vec![(keys[1], "name".to_string(), Ok(()))]);
        assert_eq!(table.value(keys[1], "name"), json!("Banana"));
        assert!(table.queued().is_empty());
    }

    #[test]
    fn test_rejections() {
        let (mut table, keys) = table();
        table.set_read_only("name");

        let receipt = table.commit(CommitRequest {
            row_key: keys[0],
            address: CellAddress::new(0, "name"),
            value: CellValue::text("plum"),
        });
        assert!(matches!(receipt, CommitReceipt::Rejected(_)));

        table.remove_rows(&[keys[0]]);
        let receipt = table.commit(CommitRequest {
            row_key: keys[0],
            address: CellAddress::new(0, "qty"),
            value: CellValue::Number(1.0),
        });
        assert_eq!(receipt, CommitReceipt::Rejected("row no longer exists".into()));
    }

    #[test]
    fn test_from_json() {
        let table = MemoryTable::from_json(&json!([{ "a": 1 }, { "a": 2 }])).unwrap();
        assert_eq!(table.len(), 2);
        assert!(MemoryTable::from_json(&json!({ "a": 1 })).is_err());
        assert!(MemoryTable::from_json(&json!([1])).is_err());
    }
}
