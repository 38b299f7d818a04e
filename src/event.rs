use crate::{CellAddress, CellValue, RowKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A grid interaction event with timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridEvent {
    pub timestamp: DateTime<Utc>,
    pub event: EventType,
}

impl GridEvent {
    /// Create a new event with the current timestamp
    pub fn new(event: EventType) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }

    /// Create a new event with a specific timestamp
    pub fn with_timestamp(timestamp: DateTime<Utc>, event: EventType) -> Self {
        Self { timestamp, event }
    }
}

/// Types of events that can occur while interacting with the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    FocusChanged {
        from: Option<CellAddress>,
        to: Option<CellAddress>,
    },

    EditStarted {
        address: CellAddress,
    },

    EditEnded {
        address: CellAddress,
        reason: EditEndReason,
    },

    ValueCommitted {
        address: CellAddress,
        row_key: RowKey,
        value: CellValue,
    },

    ValidationFailed {
        address: CellAddress,
        message: String,
    },

    CommitSettled {
        row_key: RowKey,
        column_id: String,
        error: Option<String>,
    },

    SelectionChanged {
        cell_count: usize,
    },

    RowsPruned {
        rows: Vec<usize>,
    },

    ColumnPruned {
        column_id: String,
    },

    ViewReset,
}

/// Why a cell left edit mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EditEndReason {
    Committed,
    Unchanged,
    Cancelled,
    FocusMoved,
    Pruned,
}
