use super::{fallback_display, raw_to_text, CellDisplay, CellEditor, Draft, InputAffordance};
use crate::validation::ValidationError;
use crate::{CellValue, CellVariant};

/// Free-text editor shared by the short-text and long-text variants
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextEditor {
    /// Maximum length in characters
    pub max_length: Option<usize>,
    pub multiline: bool,
}

impl TextEditor {
    pub fn short(max_length: Option<usize>) -> Self {
        Self {
            max_length,
            multiline: false,
        }
    }

    pub fn long(max_length: Option<usize>) -> Self {
        Self {
            max_length,
            multiline: true,
        }
    }
}

impl CellEditor for TextEditor {
    fn variant(&self) -> CellVariant {
        if self.multiline {
            CellVariant::LongText
        } else {
            CellVariant::ShortText
        }
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::Text {
            multiline: self.multiline,
            max_length: self.max_length,
        }
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        raw_to_text(raw)
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        match value {
            CellValue::Text(text) if !text.is_empty() => CellDisplay::Text(text.clone()),
            other => fallback_display(other),
        }
    }

    fn draft(&self, value: &CellValue) -> Draft {
        Draft::Text(value.to_plain_string())
    }

    fn validate(&self, draft: &Draft) -> Result<CellValue, ValidationError> {
        let text = draft.as_text().ok_or(ValidationError::IncompatibleInput)?;

        // Single-line cells never hold line breaks
        let text = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\r', '\n'], " ")
        };

        if let Some(max) = self.max_length {
            let actual = text.chars().count();
            if actual > max {
                return Err(ValidationError::TooLong { max, actual });
            }
        }

        if text.is_empty() {
            Ok(CellValue::Empty)
        } else {
            Ok(CellValue::Text(text))
        }
    }

    fn remaining(&self, draft: &Draft) -> Option<i64> {
        let max = self.max_length?;
        let used = draft.as_text()?.chars().count();
        Some(max as i64 - used as i64)
    }
}
