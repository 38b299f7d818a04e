// A mounted grid: interaction state, the active edit session and the
// optimistic commit overlay, driven by discrete user events.

use crate::dispatch::{dispatch, CellContext, RenderedCell};
use crate::editors::{Draft, EditInput};
use crate::event::{EditEndReason, EventType, GridEvent};
use crate::selection::SelectionUpdate;
use crate::state::{InteractionFlags, InteractionState};
use crate::validation::ValidationError;
use crate::{
    CellAddress, CellValue, ColumnConfig, GridConfig, GridError, RowKey, VariantConfig, ViewIndex,
};
use serde::Serialize;
use std::collections::HashMap;

// ========== External Collaborators ==========

/// Read side of the data the grid displays
pub trait DataSource {
    /// Row keys in display order (after sorting and filtering)
    fn view(&self) -> Vec<RowKey>;

    /// Position of a row in the underlying storage
    fn storage_index(&self, row_key: RowKey) -> Option<usize>;

    /// Raw value of one cell; `Null` when absent
    fn value(&self, row_key: RowKey, column_id: &str) -> serde_json::Value;
}

/// A validated value on its way to the data source
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    pub row_key: RowKey,
    pub address: CellAddress,
    pub value: CellValue,
}

impl CommitRequest {
    pub fn column_id(&self) -> &str {
        &self.address.column_id
    }
}

/// Immediate answer of a commit sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitReceipt {
    /// Stored; the data source already returns the new value
    Accepted,
    /// Will settle later through [`Grid::settle_commit`]
    Pending,
    Rejected(String),
}

/// Write side of the data the grid displays. Commits are fire-and-forget:
/// the grid never waits on them.
pub trait CommitSink {
    fn commit(&mut self, request: CommitRequest) -> CommitReceipt;
}

impl<F> CommitSink for F
where
    F: FnMut(CommitRequest) -> CommitReceipt,
{
    fn commit(&mut self, request: CommitRequest) -> CommitReceipt {
        self(request)
    }
}

// ========== Edit Sessions ==========

/// Progress of a commit that has not been confirmed by the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CommitState {
    Pending,
    Failed(String),
}

/// Uncommitted edit of the single editing cell
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub address: CellAddress,
    pub row_key: RowKey,
    /// Value when edit mode was entered
    pub original: CellValue,
    pub draft: Draft,
    /// Reason the last confirm was refused
    pub issue: Option<ValidationError>,
}

/// Result of confirming an edit
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Committed {
        value: CellValue,
        receipt: CommitReceipt,
    },
    /// Value equals the original; edit mode exited without a commit
    Unchanged,
    /// Draft failed validation; the cell stays in edit mode
    Rejected(GridError),
    NotEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Commit overlay entry for one cell
#[derive(Debug, Clone)]
enum Tracked {
    Pending(CellValue),
    Failed(String),
}

// ========== Grid ==========

/// One mounted grid instance
#[derive(Debug)]
pub struct Grid {
    config: GridConfig,
    state: InteractionState,
    session: Option<EditSession>,
    /// Unsettled and failed commits by row, then column
    commits: HashMap<RowKey, HashMap<String, Tracked>>,
    view: ViewIndex,
}

impl Grid {
    pub fn new(mut config: GridConfig) -> Self {
        // Date columns without their own format use the grid's
        if let Some(format) = &config.date_format {
            for column in &mut config.columns {
                if let VariantConfig::Date(editor) = &mut column.variant {
                    editor.format.get_or_insert_with(|| format.clone());
                }
            }
        }

        let state = InteractionState::new(config.column_ids());
        Self {
            config,
            state,
            session: None,
            commits: HashMap::new(),
            view: ViewIndex::default(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.config.columns
    }

    pub fn column(&self, id: &str) -> Option<&ColumnConfig> {
        self.config.column(id)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn view(&self) -> &ViewIndex {
        &self.view
    }

    pub fn row_count(&self) -> usize {
        self.view.len()
    }

    pub fn flags(&self, address: &CellAddress) -> InteractionFlags {
        self.state.flags(address)
    }

    // ========== Rendering ==========

    /// Rebuild the display order from the source.
    ///
    /// Addresses past the end of the new view are pruned, and an edit whose
    /// row moved to another position is cancelled.
    pub fn sync_view(&mut self, source: &dyn DataSource) {
        self.view = ViewIndex::from_view(&source.view());
        self.state.truncate_rows(self.view.len());

        let moved = self
            .session
            .as_ref()
            .is_some_and(|s| self.view.position(s.row_key) != Some(s.address.row_index));
        if moved {
            tracing::debug!("editing row moved, cancelling edit");
            self.state.exit_edit();
        }
        self.drop_stale_session();
    }

    /// Render every visible cell, row by row in display order
    pub fn render(&self, source: &dyn DataSource) -> Vec<Vec<RenderedCell>> {
        self.view
            .keys()
            .iter()
            .enumerate()
            .map(|(position, &row_key)| {
                let storage_index = source.storage_index(row_key).unwrap_or(position);
                let row_index = self.view.resolve(row_key, storage_index);
                self.config
                    .columns
                    .iter()
                    .map(|column| {
                        self.render_at(
                            source,
                            CellAddress::new(row_index, column.id.clone()),
                            row_key,
                            column,
                        )
                    })
                    .collect()
            })
            .collect()
    }

    /// Render a single cell, if the address is inside the view
    pub fn render_cell(&self, source: &dyn DataSource, address: &CellAddress) -> Option<RenderedCell> {
        let row_key = self.view.key_at(address.row_index)?;
        let column = self.config.column(&address.column_id)?;
        Some(self.render_at(source, address.clone(), row_key, column))
    }

    fn render_at(
        &self,
        source: &dyn DataSource,
        address: CellAddress,
        row_key: RowKey,
        column: &ColumnConfig,
    ) -> RenderedCell {
        dispatch(CellContext {
            flags: self.state.flags(&address),
            value: self.current_value(source, row_key, column),
            commit_state: self.commit_state(row_key, &column.id),
            session: self.session.as_ref(),
            address,
            row_key,
            column,
        })
    }

    /// Pending value if one is in flight, else the source value
    fn current_value(&self, source: &dyn DataSource, row_key: RowKey, column: &ColumnConfig) -> CellValue {
        match self.tracked(row_key, &column.id) {
            Some(Tracked::Pending(value)) => value.clone(),
            _ => column.editor().coerce(&source.value(row_key, &column.id)),
        }
    }

    // ========== Focus and Editing ==========

    /// Move focus; leaving the editing cell discards its draft
    pub fn focus(&mut self, address: Option<CellAddress>) {
        self.state.set_focus(address);
        self.drop_stale_session();
    }

    /// Enter edit mode on the focused cell
    pub fn begin_edit(&mut self, source: &dyn DataSource, address: &CellAddress) -> crate::Result<()> {
        if self.session.as_ref().is_some_and(|s| s.address == *address) {
            return Ok(());
        }

        let row_key = self.view.key_at(address.row_index).ok_or_else(|| {
            GridError::invalid_transition(address.clone(), "row is not in the view")
        })?;
        let column = self.config.column(&address.column_id).ok_or_else(|| {
            GridError::invalid_transition(address.clone(), "column is not configured")
        })?;
        let original = self.current_value(source, row_key, column);
        let draft = column.editor().draft(&original);

        self.state.enter_edit(address)?;
        self.session = Some(EditSession {
            address: address.clone(),
            row_key,
            original,
            draft,
            issue: None,
        });
        Ok(())
    }

    /// Activation gesture: focus the cell, then enter edit mode
    pub fn activate(&mut self, source: &dyn DataSource, address: CellAddress) -> crate::Result<()> {
        self.focus(Some(address.clone()));
        self.begin_edit(source, &address)
    }

    /// Feed one input event to the active draft
    pub fn input(&mut self, input: EditInput) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(column) = self.config.column(&session.address.column_id) else {
            return false;
        };

        let applied = column.editor().apply(&mut session.draft, input);
        if applied {
            session.issue = None;
        }
        applied
    }

    /// Validate the draft and hand it to the sink, then leave edit mode
    pub fn confirm(&mut self, sink: &mut dyn CommitSink) -> CommitOutcome {
        let Some(session) = self.session.as_mut() else {
            return CommitOutcome::NotEditing;
        };
        let Some(column) = self.config.column(&session.address.column_id) else {
            self.cancel();
            return CommitOutcome::NotEditing;
        };

        let validated = column.editor().validate(&session.draft);
        let value = match validated {
            Ok(value) if value == session.original => {
                self.session = None;
                self.state.end_edit(EditEndReason::Unchanged);
                return CommitOutcome::Unchanged;
            }
            Ok(value) if column.required && value.is_empty() => Err(ValidationError::Required),
            other => other,
        };

        let value = match value {
            Ok(value) => value,
            Err(err) => {
                let address = session.address.clone();
                tracing::debug!(%address, %err, "commit refused");
                session.issue = Some(err.clone());
                self.state.log_event(EventType::ValidationFailed {
                    address: address.clone(),
                    message: err.to_string(),
                });
                return CommitOutcome::Rejected(GridError::validation(address, err));
            }
        };

        let Some(session) = self.session.take() else {
            return CommitOutcome::NotEditing;
        };
        let column_id = session.address.column_id.clone();
        let receipt = sink.commit(CommitRequest {
            row_key: session.row_key,
            address: session.address.clone(),
            value: value.clone(),
        });

        tracing::info!(address = %session.address, row_key = %session.row_key, ?receipt, "value committed");
        self.state.log_event(EventType::ValueCommitted {
            address: session.address,
            row_key: session.row_key,
            value: value.clone(),
        });
        self.state.end_edit(EditEndReason::Committed);

        match &receipt {
            CommitReceipt::Accepted => self.untrack(session.row_key, &column_id),
            CommitReceipt::Pending => {
                self.track(session.row_key, column_id, Tracked::Pending(value.clone()))
            }
            CommitReceipt::Rejected(message) => {
                tracing::warn!(row_key = %session.row_key, column = %column_id, %message, "commit rejected by sink");
                self.state.log_event(EventType::CommitSettled {
                    row_key: session.row_key,
                    column_id: column_id.clone(),
                    error: Some(message.clone()),
                });
                self.track(session.row_key, column_id, Tracked::Failed(message.clone()));
            }
        }

        CommitOutcome::Committed { value, receipt }
    }

    /// Leave edit mode without committing. Always succeeds.
    pub fn cancel(&mut self) -> Option<CellAddress> {
        self.session = None;
        self.state.exit_edit()
    }

    pub fn select(&mut self, update: SelectionUpdate) {
        self.state.set_selection(update);
    }

    /// Move focus one step, clamped to the view. Focuses the first cell when
    /// nothing is focused.
    pub fn move_focus(&mut self, direction: Direction) -> Option<CellAddress> {
        let rows = self.view.len();
        let columns = &self.config.columns;
        if rows == 0 || columns.is_empty() {
            return None;
        }
        let last_row = rows - 1;
        let last_column = columns.len() - 1;

        let target = match self.state.get_focus() {
            None => CellAddress::new(0, columns[0].id.clone()),
            Some(current) => {
                let column = columns
                    .iter()
                    .position(|c| c.id == current.column_id)
                    .unwrap_or(0);
                let row = current.row_index.min(last_row);
                let (row, column) = match direction {
                    Direction::Up => (row.saturating_sub(1), column),
                    Direction::Down => ((row + 1).min(last_row), column),
                    Direction::Left => (row, column.saturating_sub(1)),
                    Direction::Right => (row, (column + 1).min(last_column)),
                };
                CellAddress::new(row, columns[column].id.clone())
            }
        };

        self.focus(Some(target.clone()));
        Some(target)
    }

    // ========== Commit Tracking ==========

    /// Report the late result of a commit that returned `Pending`.
    ///
    /// Returns false when nothing was pending for the cell.
    pub fn settle_commit(&mut self, row_key: RowKey, column_id: &str, result: Result<(), String>) -> bool {
        if !matches!(self.tracked(row_key, column_id), Some(Tracked::Pending(_))) {
            tracing::debug!(%row_key, column = column_id, "settle without pending commit");
            return false;
        }

        let error = match result {
            Ok(()) => {
                self.untrack(row_key, column_id);
                None
            }
            Err(message) => {
                tracing::warn!(%row_key, column = column_id, %message, "commit failed");
                self.track(row_key, column_id.to_string(), Tracked::Failed(message.clone()));
                Some(message)
            }
        };

        self.state.log_event(EventType::CommitSettled {
            row_key,
            column_id: column_id.to_string(),
            error,
        });
        true
    }

    pub fn commit_state(&self, row_key: RowKey, column_id: &str) -> Option<CommitState> {
        self.tracked(row_key, column_id).map(|tracked| match tracked {
            Tracked::Pending(_) => CommitState::Pending,
            Tracked::Failed(message) => CommitState::Failed(message.clone()),
        })
    }

    /// Forget a failed commit once the user has seen it
    pub fn dismiss_failure(&mut self, row_key: RowKey, column_id: &str) {
        if matches!(self.tracked(row_key, column_id), Some(Tracked::Failed(_))) {
            self.untrack(row_key, column_id);
        }
    }

    fn tracked(&self, row_key: RowKey, column_id: &str) -> Option<&Tracked> {
        self.commits.get(&row_key)?.get(column_id)
    }

    fn track(&mut self, row_key: RowKey, column_id: String, tracked: Tracked) {
        self.commits.entry(row_key).or_default().insert(column_id, tracked);
    }

    fn untrack(&mut self, row_key: RowKey, column_id: &str) {
        if let Some(row) = self.commits.get_mut(&row_key) {
            row.remove(column_id);
            if row.is_empty() {
                self.commits.remove(&row_key);
            }
        }
    }

    // ========== Pruning ==========

    /// Rows at these display positions were removed from the source.
    /// References to them are pruned; other addresses are not shifted.
    pub fn rows_removed(&mut self, rows: &[usize]) {
        for row_key in rows.iter().filter_map(|&row| self.view.key_at(row)) {
            self.commits.remove(&row_key);
        }
        self.state.prune_rows(rows);
        self.drop_stale_session();
    }

    /// Drop a column from the grid together with every reference to it
    pub fn column_removed(&mut self, column_id: &str) {
        self.config.columns.retain(|c| c.id != column_id);
        for row in self.commits.values_mut() {
            row.remove(column_id);
        }
        self.commits.retain(|_, row| !row.is_empty());
        self.state.set_column_order(self.config.column_ids());
        self.drop_stale_session();
    }

    /// Clear focus, edit mode and selection
    pub fn reset_view(&mut self) {
        self.session = None;
        self.state.reset();
    }

    fn drop_stale_session(&mut self) {
        let stale = self
            .session
            .as_ref()
            .is_some_and(|s| self.state.get_editing() != Some(&s.address));
        if stale {
            self.session = None;
        }
    }

    // ========== Event Log ==========

    pub fn events(&self) -> &[GridEvent] {
        self.state.events()
    }

    pub fn clear_events(&mut self) {
        self.state.clear_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::{NumberEditor, TextEditor};
    use crate::table::MemoryTable;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn setup() -> (Grid, MemoryTable) {
        let config = GridConfig::new(vec![
            ColumnConfig::new("name", VariantConfig::ShortText(TextEditor::short(Some(5)))),
            ColumnConfig::new("qty", VariantConfig::Number(NumberEditor::default())),
        ]);
        let mut table = MemoryTable::new();
        table.push_row([("name", json!("bolt")), ("qty", json!(4))]);
        table.push_row([("name", json!("nut")), ("qty", json!(10))]);

        let mut grid = Grid::new(config);
        grid.sync_view(&table);
        (grid, table)
    }

    #[test]
    fn test_edit_requires_focus() {
        let (mut grid, table) = setup();
        let address = CellAddress::new(0, "name");

        assert_matches!(
            grid.begin_edit(&table, &address),
            Err(GridError::InvalidTransition { .. })
        );
        assert!(grid.session().is_none());

        grid.focus(Some(address.clone()));
        grid.begin_edit(&table, &address).unwrap();
        assert_eq!(grid.state().get_editing(), Some(&address));
    }

    #[test]
    fn test_commit_flow() {
        let (mut grid, mut table) = setup();
        let address = CellAddress::new(1, "qty");

        grid.activate(&table, address.clone()).unwrap();
        assert!(grid.input(EditInput::Text("12.5".into())));
        let outcome = grid.confirm(&mut table);

        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                value: CellValue::Number(12.5),
                receipt: CommitReceipt::Accepted
            }
        );
        assert_eq!(grid.state().get_editing(), None);
        assert_eq!(grid.state().get_focus(), Some(&address));

        let cell = grid.render_cell(&table, &address).unwrap();
        assert_eq!(cell.value, CellValue::Number(12.5));
    }

    #[test]
    fn test_rejected_confirm_stays_in_edit() {
        let (mut grid, mut table) = setup();
        let address = CellAddress::new(0, "qty");

        grid.activate(&table, address.clone()).unwrap();
        grid.input(EditInput::Text("abc".into()));
        assert_matches!(
            grid.confirm(&mut table),
            CommitOutcome::Rejected(GridError::Validation {
                source: ValidationError::NotANumber(_),
                ..
            })
        );
        assert_eq!(grid.state().get_editing(), Some(&address));
        assert!(grid.session().unwrap().issue.is_some());

        // Next input clears the indicator
        grid.input(EditInput::Text("3".into()));
        assert!(grid.session().unwrap().issue.is_none());
    }

    #[test]
    fn test_unchanged_confirm_skips_sink() {
        let (mut grid, table) = setup();
        grid.activate(&table, CellAddress::new(0, "name")).unwrap();

        let mut calls = 0;
        let mut sink = |_: CommitRequest| {
            calls += 1;
            CommitReceipt::Accepted
        };
        assert_eq!(grid.confirm(&mut sink), CommitOutcome::Unchanged);
        assert_eq!(calls, 0);
        assert!(grid.state().get_editing().is_none());
    }

    #[test]
    fn test_pending_commit_is_optimistic() {
        let (mut grid, table) = setup();
        let address = CellAddress::new(0, "name");
        let row_key = grid.view().key_at(0).unwrap();

        grid.activate(&table, address.clone()).unwrap();
        grid.input(EditInput::Text("screw".into()));
        let mut sink = |_: CommitRequest| CommitReceipt::Pending;
        grid.confirm(&mut sink);

        let cell = grid.render_cell(&table, &address).unwrap();
        assert_eq!(cell.value, CellValue::text("screw"));
        assert_eq!(cell.commit_state, Some(CommitState::Pending));

        assert!(grid.settle_commit(row_key, "name", Err("offline".into())));
        let cell = grid.render_cell(&table, &address).unwrap();
        assert_eq!(cell.value, CellValue::text("bolt"));
        assert_eq!(cell.commit_state, Some(CommitState::Failed("offline".into())));

        grid.dismiss_failure(row_key, "name");
        assert_eq!(grid.commit_state(row_key, "name"), None);
        assert!(!grid.settle_commit(row_key, "name", Ok(())));
    }

    #[test]
    fn test_move_focus_clamps() {
        let (mut grid, _table) = setup();

        assert_eq!(grid.move_focus(Direction::Up), Some(CellAddress::new(0, "name")));
        assert_eq!(grid.move_focus(Direction::Left), Some(CellAddress::new(0, "name")));
        assert_eq!(grid.move_focus(Direction::Right), Some(CellAddress::new(0, "qty")));
        assert_eq!(grid.move_focus(Direction::Right), Some(CellAddress::new(0, "qty")));
        assert_eq!(grid.move_focus(Direction::Down), Some(CellAddress::new(1, "qty")));
        assert_eq!(grid.move_focus(Direction::Down), Some(CellAddress::new(1, "qty")));
    }

    #[test]
    fn test_date_columns_inherit_grid_format() {
        let config = GridConfig::new(vec![ColumnConfig::new(
            "due",
            VariantConfig::Date(crate::editors::DateEditor::new(None)),
        )])
        .with_date_format("%Y/%m/%d");
        let grid = Grid::new(config);

        assert_matches!(
            &grid.columns()[0].variant,
            VariantConfig::Date(editor) if editor.format.as_deref() == Some("%Y/%m/%d")
        );
    }
}
