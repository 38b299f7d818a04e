// Grid Cell Editor - Core Library

pub mod address;
pub mod config;
pub mod dispatch;
pub mod editors;
pub mod error;
pub mod event;
pub mod grid;
pub mod logging;
pub mod selection;
pub mod state;
pub mod table;
pub mod ui;
pub mod validation;
pub mod value;
pub mod variant;

// Re-export main types for convenience
pub use address::{resolve_display_index, CellAddress, RowKey, ViewIndex};
pub use config::GridConfig;
pub use dispatch::{dispatch, dispatch_raw, CellBody, CellContext, EditorView, RenderedCell};
pub use editors::{CellDisplay, CellEditor, Draft, EditInput, InputAffordance};
pub use error::{GridError, Result};
pub use event::{EditEndReason, EventType, GridEvent};
pub use grid::{
    CommitOutcome, CommitReceipt, CommitRequest, CommitSink, CommitState, DataSource, Direction,
    EditSession, Grid,
};
pub use selection::{CellRange, Selection, SelectionUpdate};
pub use state::{InteractionFlags, InteractionState};
pub use table::{CommitMode, MemoryTable, TableRow};
pub use ui::DataGridApp;
pub use validation::{
    ValidatedConfig, ValidationError, ValidationIssue, ValidationResult, ValidationSeverity,
};
pub use value::{CellValue, CheckState, FileRef};
pub use variant::{CellVariant, ColumnConfig, RawColumnConfig, VariantConfig};
