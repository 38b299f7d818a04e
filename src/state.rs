use crate::event::{EditEndReason, EventType, GridEvent};
use crate::selection::{Selection, SelectionUpdate};
use crate::{CellAddress, GridError};
use std::collections::HashSet;

/// Most recent events kept in the log
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// Interaction flags for one cell, computed from the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    pub is_focused: bool,
    pub is_editing: bool,
    pub is_selected: bool,
}

/// Focus, edit and selection state of one grid instance.
///
/// Invariants held after every command:
/// - at most one cell is focused and at most one is editing
/// - the editing cell, if any, equals the focused cell
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// The single focused cell
    focused: Option<CellAddress>,

    /// The single cell in edit mode (always equal to `focused` when set)
    editing: Option<CellAddress>,

    /// Selected cells
    selection: Selection,

    /// Column ids in display order, used to span range selections
    column_order: Vec<String>,

    /// Event log for history tracking, oldest first. Holds at least the last
    /// `EVENT_LOG_CAPACITY` events.
    events: Vec<GridEvent>,
}

impl InteractionState {
    pub fn new(column_order: Vec<String>) -> Self {
        Self {
            column_order,
            ..Default::default()
        }
    }

    // ========== Focus ==========

    pub fn get_focus(&self) -> Option<&CellAddress> {
        self.focused.as_ref()
    }

    /// Move focus. Moving focus away from the editing cell exits edit mode.
    ///
    /// Returns the address whose edit mode was exited, if any.
    pub fn set_focus(&mut self, address: Option<CellAddress>) -> Option<CellAddress> {
        if self.focused == address {
            return None;
        }

        let leaving_edit = self.editing.is_some() && self.editing != address;
        let exited = if leaving_edit {
            self.end_edit(EditEndReason::FocusMoved)
        } else {
            None
        };

        tracing::debug!(from = ?self.focused, to = ?address, "focus changed");
        let from = std::mem::replace(&mut self.focused, address.clone());
        self.log_event(EventType::FocusChanged { from, to: address });

        exited
    }

    // ========== Edit mode ==========

    pub fn get_editing(&self) -> Option<&CellAddress> {
        self.editing.as_ref()
    }

    /// Put the focused cell into edit mode.
    ///
    /// Rejected unless `address` is the focused cell. Entering edit on the
    /// cell already being edited is a no-op.
    pub fn enter_edit(&mut self, address: &CellAddress) -> Result<(), GridError> {
        if self.focused.as_ref() != Some(address) {
            tracing::debug!(%address, focused = ?self.focused, "edit rejected: cell not focused");
            return Err(GridError::invalid_transition(
                address.clone(),
                "cell must be focused before editing",
            ));
        }
        if self.editing.as_ref() == Some(address) {
            return Ok(());
        }

        tracing::debug!(%address, "edit started");
        self.editing = Some(address.clone());
        self.log_event(EventType::EditStarted {
            address: address.clone(),
        });
        Ok(())
    }

    /// Leave edit mode. Always succeeds; a no-op when nothing is editing.
    pub fn exit_edit(&mut self) -> Option<CellAddress> {
        self.end_edit(EditEndReason::Cancelled)
    }

    /// Leave edit mode recording why
    pub(crate) fn end_edit(&mut self, reason: EditEndReason) -> Option<CellAddress> {
        let address = self.editing.take()?;
        tracing::debug!(%address, ?reason, "edit ended");
        self.log_event(EventType::EditEnded {
            address: address.clone(),
            reason,
        });
        Some(address)
    }

    // ========== Selection ==========

    pub fn is_selected(&self, row_index: usize, column_id: &str) -> bool {
        self.selection.contains(row_index, column_id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, update: SelectionUpdate) {
        let current = std::mem::take(&mut self.selection);
        self.selection = current.apply(update, &self.column_order);
        let cell_count = self.selection.len();
        tracing::debug!(cell_count, "selection changed");
        self.log_event(EventType::SelectionChanged { cell_count });
    }

    /// Selected addresses in row/column order
    pub fn selected_addresses(&self) -> Vec<CellAddress> {
        self.selection.addresses(&self.column_order)
    }

    // ========== Queries ==========

    pub fn flags(&self, address: &CellAddress) -> InteractionFlags {
        InteractionFlags {
            is_focused: self.focused.as_ref() == Some(address),
            is_editing: self.editing.as_ref() == Some(address),
            is_selected: self.is_selected(address.row_index, &address.column_id),
        }
    }

    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    // ========== Pruning ==========

    /// Replace the column order, pruning state in columns that disappeared
    pub fn set_column_order(&mut self, column_order: Vec<String>) {
        let removed: Vec<String> = self
            .column_order
            .iter()
            .filter(|c| !column_order.contains(*c))
            .cloned()
            .collect();
        self.column_order = column_order;
        for column_id in removed {
            self.prune_column(&column_id);
        }
    }

    /// Remove every reference to the given display rows
    pub fn prune_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }
        let removed: HashSet<usize> = rows.iter().copied().collect();
        self.prune_where(|address| removed.contains(&address.row_index));
        let current = std::mem::take(&mut self.selection);
        self.selection = current.without_rows(&removed);

        let mut rows = rows.to_vec();
        rows.sort_unstable();
        rows.dedup();
        self.log_event(EventType::RowsPruned { rows });
    }

    /// Remove every reference to rows at or beyond `row_count`
    pub fn truncate_rows(&mut self, row_count: usize) {
        self.prune_where(|address| address.row_index >= row_count);
        let current = std::mem::take(&mut self.selection);
        self.selection = current.truncated(row_count);
    }

    /// Remove every reference to a column
    pub fn prune_column(&mut self, column_id: &str) {
        self.prune_where(|address| address.column_id == column_id);
        let current = std::mem::take(&mut self.selection);
        self.selection = current.without_column(column_id);
        self.log_event(EventType::ColumnPruned {
            column_id: column_id.to_string(),
        });
    }

    /// Clear focus, edit mode and selection
    pub fn reset(&mut self) {
        self.end_edit(EditEndReason::Pruned);
        self.focused = None;
        self.selection = Selection::Empty;
        self.log_event(EventType::ViewReset);
    }

    fn prune_where(&mut self, removed: impl Fn(&CellAddress) -> bool) {
        if self.editing.as_ref().is_some_and(&removed) {
            self.end_edit(EditEndReason::Pruned);
        }
        if self.focused.as_ref().is_some_and(&removed) {
            let from = self.focused.take();
            self.log_event(EventType::FocusChanged { from, to: None });
        }
    }

    // ========== Event Logging ==========

    pub(crate) fn log_event(&mut self, event: EventType) {
        self.events.push(GridEvent::new(event));
        // Trim in batches so a push stays amortized O(1)
        if self.events.len() > EVENT_LOG_CAPACITY + EVENT_LOG_CAPACITY / 4 {
            let excess = self.events.len() - EVENT_LOG_CAPACITY;
            self.events.drain(..excess);
        }
    }

    /// Get retained events, oldest first
    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    /// Clear event log
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}
