use super::{fallback_display, raw_to_text, CellDisplay, CellEditor, Draft, InputAffordance};
use crate::validation::ValidationError;
use crate::{CellValue, CellVariant};
use chrono::{DateTime, NaiveDate};
use std::fmt::Write;

/// Display format used when neither the column nor the grid sets one
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Calendar date editor. Values are stored as `NaiveDate`; `format` is the
/// strftime pattern for display and is also accepted as input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateEditor {
    pub format: Option<String>,
}

impl DateEditor {
    pub fn new(format: Option<String>) -> Self {
        Self { format }
    }

    pub fn display_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    /// Parse ISO dates, the display format, `MM/DD/YYYY` and RFC 3339 timestamps
    pub fn parse(&self, input: &str) -> Option<NaiveDate> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut formats = vec!["%Y-%m-%d"];
        if let Some(format) = &self.format {
            formats.push(format.as_str());
        }
        formats.extend([DEFAULT_DATE_FORMAT, "%m/%d/%Y"]);

        formats
            .into_iter()
            .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(input)
                    .ok()
                    .map(|timestamp| timestamp.date_naive())
            })
    }

    /// Format for display. A malformed pattern falls back to ISO.
    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(self.display_format())).is_err() {
            tracing::debug!(format = self.display_format(), "invalid date format, using ISO");
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}

impl CellEditor for DateEditor {
    fn variant(&self) -> CellVariant {
        CellVariant::Date
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::DatePicker {
            format: self.display_format().to_string(),
        }
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        match raw {
            serde_json::Value::String(s) => match self.parse(s) {
                Some(date) => CellValue::Date(date),
                None => raw_to_text(raw),
            },
            other => raw_to_text(other),
        }
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        match value {
            CellValue::Date(date) => CellDisplay::Date(self.format(*date)),
            other => fallback_display(other),
        }
    }

    fn draft(&self, value: &CellValue) -> Draft {
        Draft::Text(value.to_plain_string())
    }

    fn validate(&self, draft: &Draft) -> Result<CellValue, ValidationError> {
        let input = draft.as_text().ok_or(ValidationError::IncompatibleInput)?;
        if input.trim().is_empty() {
            return Ok(CellValue::Empty);
        }
        self.parse(input)
            .map(CellValue::Date)
            .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))
    }
}
