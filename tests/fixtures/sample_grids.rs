// Helper functions to build grids and tables for integration tests
#![allow(dead_code)]

use grid_cell_editor::editors::{
    CheckboxEditor, DateEditor, MultiSelectEditor, NumberEditor, SelectEditor, TextEditor,
};
use grid_cell_editor::{
    ColumnConfig, CommitReceipt, CommitRequest, Grid, GridConfig, MemoryTable, RowKey,
    VariantConfig,
};
use serde_json::json;

/// Columns covering the common variants
///
/// name: short-text, max 5 chars, required
/// qty: number in 0..=100
/// tags: multi-select over A, B, C
/// status: select over open, closed
/// done: checkbox
/// due: date
pub fn task_config() -> GridConfig {
    GridConfig::new(vec![
        ColumnConfig::new("name", VariantConfig::ShortText(TextEditor::short(Some(5)))).required(),
        ColumnConfig::new(
            "qty",
            VariantConfig::Number(NumberEditor {
                min: Some(0.0),
                max: Some(100.0),
                decimals: None,
            }),
        ),
        ColumnConfig::new(
            "tags",
            VariantConfig::MultiSelect(MultiSelectEditor::new(vec![
                "A".into(),
                "B".into(),
                "C".into(),
            ])),
        ),
        ColumnConfig::new(
            "status",
            VariantConfig::Select(SelectEditor::new(vec!["open".into(), "closed".into()])),
        ),
        ColumnConfig::new("done", VariantConfig::Checkbox(CheckboxEditor::default())),
        ColumnConfig::new("due", VariantConfig::Date(DateEditor::new(None))),
    ])
}

/// Three rows in storage order: pear, Apple, fig
pub fn task_table() -> (MemoryTable, Vec<RowKey>) {
    let mut table = MemoryTable::new();
    let keys = vec![
        table.push_row([
            ("name", json!("pear")),
            ("qty", json!(3)),
            ("tags", json!(["A"])),
            ("status", json!("open")),
            ("done", json!(false)),
            ("due", json!("2024-03-01")),
        ]),
        table.push_row([
            ("name", json!("Apple")),
            ("qty", json!(10)),
            ("status", json!("closed")),
            ("done", json!(true)),
        ]),
        table.push_row([("name", json!("fig")), ("tags", json!("B, C"))]),
    ];
    (table, keys)
}

/// Grid already synced with the task table
pub fn mounted_grid() -> (Grid, MemoryTable, Vec<RowKey>) {
    let (table, keys) = task_table();
    let mut grid = Grid::new(task_config());
    grid.sync_view(&table);
    (grid, table, keys)
}

/// Sink that records every request and accepts it
pub fn recording_sink(log: &mut Vec<CommitRequest>) -> impl FnMut(CommitRequest) -> CommitReceipt + '_ {
    move |request| {
        log.push(request);
        CommitReceipt::Accepted
    }
}
