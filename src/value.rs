use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed cell value as produced by an editor on commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Url(String),
    Check(CheckState),
    Choice(String),
    Choices(Vec<String>),
    Date(NaiveDate),
    File(FileRef),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) | CellValue::Url(s) | CellValue::Choice(s) => s.is_empty(),
            CellValue::Choices(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Plain string form, used as the editing draft for text-like editors
    pub fn to_plain_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Url(s) | CellValue::Choice(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Check(state) => state.to_string(),
            CellValue::Choices(items) => items.join(", "),
            CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            CellValue::File(file) => file.name.clone(),
        }
    }

    /// JSON form handed to data sources on commit
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            CellValue::Empty => Value::Null,
            CellValue::Text(s) | CellValue::Url(s) | CellValue::Choice(s) => Value::String(s.clone()),
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Check(CheckState::Checked) => Value::Bool(true),
            CellValue::Check(CheckState::Unchecked) => Value::Bool(false),
            CellValue::Check(CheckState::Indeterminate) => Value::Null,
            CellValue::Choices(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            CellValue::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            CellValue::File(file) => serde_json::to_value(file).unwrap_or(Value::Null),
        }
    }
}

/// Checkbox state. `Indeterminate` is only committable on tri-state columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckState {
    /// Next state in the toggle cycle
    pub fn toggled(self, allow_indeterminate: bool) -> Self {
        match (self, allow_indeterminate) {
            (CheckState::Unchecked, _) => CheckState::Checked,
            (CheckState::Checked, true) => CheckState::Indeterminate,
            (CheckState::Checked, false) => CheckState::Unchecked,
            (CheckState::Indeterminate, _) => CheckState::Unchecked,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CheckState::Unchecked => "☐",
            CheckState::Checked => "☑",
            CheckState::Indeterminate => "▣",
        }
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CheckState::Unchecked => "unchecked",
            CheckState::Checked => "checked",
            CheckState::Indeterminate => "indeterminate",
        };
        f.write_str(text)
    }
}

/// Reference to an uploaded or linked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Size in bytes, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            size: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Lowercased extension of the file name, without the dot
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}
