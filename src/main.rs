use anyhow::Context;
use grid_cell_editor::ui::{demo_config, demo_table};
use grid_cell_editor::{
    logging, CellAddress, CommitMode, CommitOutcome, DataSource, EditInput, Grid, SelectionUpdate,
};

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("Grid Cell Editor - Console Walkthrough");
    println!("======================================\n");

    let mut table = demo_table();
    let mut grid = Grid::new(demo_config());
    grid.sync_view(&table);

    println!("✓ Loaded {} columns and {} rows", grid.columns().len(), grid.row_count());

    println!("\n📊 Rendered cells:");
    for row in grid.render(&table) {
        let line: Vec<String> = row.iter().map(|cell| cell.text()).collect();
        println!("  │ {}", line.join(" │ "));
    }

    // Focus and edit a number cell
    let estimate = CellAddress::new(2, "estimate");
    grid.focus(Some(estimate.clone()));
    grid.begin_edit(&table, &estimate)?;
    println!("\n✓ Editing {}", estimate);

    grid.input(EditInput::Text("lots".into()));
    match grid.confirm(&mut table) {
        CommitOutcome::Rejected(e) => println!("  Rejected 'lots': {}", e),
        other => println!("  Unexpected outcome: {:?}", other),
    }

    grid.input(EditInput::Text("6.5".into()));
    if let CommitOutcome::Committed { value, receipt } = grid.confirm(&mut table) {
        println!("  Committed {:?} ({:?})", value, receipt);
    }

    // A multi-select over its limit
    let labels = CellAddress::new(1, "labels");
    grid.activate(&table, labels.clone())?;
    grid.input(EditInput::SetChoices(vec![
        "bug".into(),
        "feature".into(),
        "docs".into(),
        "infra".into(),
    ]));
    if let CommitOutcome::Rejected(e) = grid.confirm(&mut table) {
        println!("\n✓ Labels limit enforced: {}", e);
    }
    grid.cancel();

    // Deferred commits settle later
    table.set_commit_mode(CommitMode::Deferred);
    let due = CellAddress::new(0, "due");
    grid.activate(&table, due.clone())?;
    grid.input(EditInput::Text("2024-07-01".into()));
    grid.confirm(&mut table);
    let row_key = grid.view().key_at(0).context("row 0 should exist")?;
    println!("\n⏳ Commit state for {}: {:?}", due, grid.commit_state(row_key, "due"));
    for (row_key, column_id, result) in table.flush() {
        grid.settle_commit(row_key, &column_id, result);
    }
    println!("  After flush: {:?}, stored {}", grid.commit_state(row_key, "due"), table.value(row_key, "due"));
    table.set_commit_mode(CommitMode::Immediate);

    // Sorting keeps focus on the same index, not the same row
    grid.select(SelectionUpdate::Range {
        anchor: CellAddress::new(0, "task"),
        head: CellAddress::new(1, "status"),
    });
    table.sort_by("estimate", false);
    grid.sync_view(&table);
    println!("\n✓ Sorted by estimate (descending)");
    for row in grid.render(&table) {
        println!("  │ {} │ {}", row[0].text(), row[2].text());
    }

    // Removing a row prunes state that pointed at it
    grid.rows_removed(&[0]);
    let removed = grid.view().key_at(0).context("row 0 should exist")?;
    table.remove_rows(&[removed]);
    grid.sync_view(&table);
    println!("\n✓ Removed first row, {} left", grid.row_count());
    println!("  Selected cells: {}", grid.state().selection().len());

    println!("\n📋 Events logged: {}", grid.events().len());
    for event in grid.events().iter().rev().take(5) {
        println!("  └─ {:?}", event.event);
    }

    println!("\n✅ Walkthrough complete!\n");
    Ok(())
}
