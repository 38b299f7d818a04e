// Variant editors.
//
// Every cell type implements [`CellEditor`]: it coerces raw source values,
// formats them for display, seeds an editing [`Draft`] and validates the
// draft into a committable [`CellValue`].

mod checkbox;
mod choice;
mod date;
mod file;
mod number;
mod text;
mod url;

pub use checkbox::CheckboxEditor;
pub use choice::{MultiSelectEditor, SelectEditor};
pub use date::DateEditor;
pub use file::FileEditor;
pub(crate) use file::name_from_url;
pub use number::NumberEditor;
pub use text::TextEditor;
pub use url::UrlEditor;

use crate::validation::ValidationError;
use crate::{CellValue, CellVariant, CheckState, FileRef};
use chrono::NaiveDate;
use serde::Serialize;

/// Capability contract shared by all variant editors
pub trait CellEditor {
    fn variant(&self) -> CellVariant;

    /// Input affordance shown in edit mode
    fn affordance(&self) -> InputAffordance;

    /// Convert a raw source value into this variant's value.
    /// Values that don't fit are kept as plain text.
    fn coerce(&self, raw: &serde_json::Value) -> CellValue;

    /// Read-only rendering
    fn display(&self, value: &CellValue) -> CellDisplay;

    /// Initial draft when entering edit mode
    fn draft(&self, value: &CellValue) -> Draft;

    /// Turn a draft into a committable value
    fn validate(&self, draft: &Draft) -> Result<CellValue, ValidationError>;

    /// Apply one input event to the draft. Returns false when the input does
    /// not fit this editor's draft.
    fn apply(&self, draft: &mut Draft, input: EditInput) -> bool {
        draft.apply(input)
    }

    /// Characters left before the length limit (negative when over)
    fn remaining(&self, _draft: &Draft) -> Option<i64> {
        None
    }
}

/// Uncommitted editor state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Draft {
    Text(String),
    Check(CheckState),
    Choice(Option<String>),
    Choices(Vec<String>),
    File(Option<FileRef>),
}

impl Draft {
    /// Generic input handling; editors override where they need options
    pub fn apply(&mut self, input: EditInput) -> bool {
        match (self, input) {
            (Draft::Text(text), EditInput::Text(new)) => *text = new,
            (Draft::Text(text), EditInput::PickDate(date)) => {
                *text = date.format("%Y-%m-%d").to_string()
            }
            (Draft::Text(text), EditInput::Clear) => text.clear(),
            (Draft::Check(state), EditInput::SetCheck(new)) => *state = new,
            (Draft::Check(state), EditInput::Toggle) => *state = state.toggled(false),
            (Draft::Choice(choice), EditInput::Choose(new)) => *choice = new,
            (Draft::Choice(choice), EditInput::Clear) => *choice = None,
            (Draft::Choices(choices), EditInput::ToggleChoice(option)) => {
                match choices.iter().position(|c| *c == option) {
                    Some(index) => {
                        choices.remove(index);
                    }
                    None => choices.push(option),
                }
            }
            (Draft::Choices(choices), EditInput::SetChoices(new)) => *choices = new,
            (Draft::Choices(choices), EditInput::Clear) => choices.clear(),
            (Draft::File(file), EditInput::AttachFile(new)) => *file = new,
            (Draft::File(file), EditInput::Clear) => *file = None,
            (draft, input) => {
                tracing::debug!(?draft, ?input, "input does not apply to draft");
                return false;
            }
        }
        true
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Draft::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One user input event while editing
#[derive(Debug, Clone, PartialEq)]
pub enum EditInput {
    /// Replace the text content
    Text(String),
    Toggle,
    SetCheck(CheckState),
    Choose(Option<String>),
    ToggleChoice(String),
    SetChoices(Vec<String>),
    PickDate(NaiveDate),
    AttachFile(Option<FileRef>),
    Clear,
}

/// Input affordance for edit mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InputAffordance {
    Text {
        multiline: bool,
        max_length: Option<usize>,
    },
    Number,
    Url,
    Toggle {
        tri_state: bool,
    },
    Choice {
        options: Vec<String>,
    },
    MultiChoice {
        options: Vec<String>,
        max_selected: Option<usize>,
    },
    DatePicker {
        format: String,
    },
    FilePicker {
        accept: Vec<String>,
    },
}

/// Read-only rendering of a value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellDisplay {
    Empty,
    Text(String),
    /// Formatted number (hosts align it right)
    Number(String),
    Link {
        label: String,
        href: String,
    },
    Check(CheckState),
    Tags(Vec<String>),
    Date(String),
    File {
        name: String,
        href: Option<String>,
    },
}

impl CellDisplay {
    /// Plain text form
    pub fn to_text(&self) -> String {
        match self {
            CellDisplay::Empty => String::new(),
            CellDisplay::Text(text) | CellDisplay::Number(text) | CellDisplay::Date(text) => {
                text.clone()
            }
            CellDisplay::Link { label, .. } => label.clone(),
            CellDisplay::Check(state) => state.glyph().to_string(),
            CellDisplay::Tags(tags) => tags.join(", "),
            CellDisplay::File { name, .. } => name.clone(),
        }
    }
}

/// Display for values that didn't coerce into the editor's own type
pub(crate) fn fallback_display(value: &CellValue) -> CellDisplay {
    match value {
        CellValue::Empty => CellDisplay::Empty,
        other if other.is_empty() => CellDisplay::Empty,
        other => CellDisplay::Text(other.to_plain_string()),
    }
}

/// Plain-text form of a raw JSON value
pub(crate) fn raw_to_text(raw: &serde_json::Value) -> CellValue {
    match raw {
        serde_json::Value::Null => CellValue::Empty,
        serde_json::Value::String(s) if s.is_empty() => CellValue::Empty,
        serde_json::Value::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}
