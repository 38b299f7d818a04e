use super::{fallback_display, raw_to_text, CellDisplay, CellEditor, Draft, InputAffordance};
use crate::validation::ValidationError;
use crate::{CellValue, CellVariant};
use once_cell::sync::Lazy;
use regex::Regex;

static SCHEME_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+\S*$").expect("valid url pattern")
});

static MAILTO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^mailto:[^\s@]+@[^\s@]+$").expect("valid mailto pattern"));

/// Host without a scheme, e.g. `example.com/path`
static BARE_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+(:\d+)?([/?#]\S*)?$")
        .expect("valid host pattern")
});

/// Link editor. Scheme-less hosts are stored with `https://`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlEditor;

impl UrlEditor {
    /// Normalize user input into a link, or `None` if it isn't well formed
    pub fn normalize(input: &str) -> Option<String> {
        let input = input.trim();
        if SCHEME_URL.is_match(input) || MAILTO.is_match(input) {
            Some(input.to_string())
        } else if BARE_HOST.is_match(input) {
            Some(format!("https://{input}"))
        } else {
            None
        }
    }

    /// Link text without scheme and trailing slash
    pub fn label(url: &str) -> &str {
        let rest = ["https://", "http://", "mailto:"]
            .iter()
            .find_map(|scheme| url.strip_prefix(scheme))
            .unwrap_or(url);
        rest.strip_suffix('/').unwrap_or(rest)
    }
}

impl CellEditor for UrlEditor {
    fn variant(&self) -> CellVariant {
        CellVariant::Url
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::Url
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        match raw {
            serde_json::Value::String(s) => match Self::normalize(s) {
                Some(url) => CellValue::Url(url),
                None => raw_to_text(raw),
            },
            other => raw_to_text(other),
        }
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        match value {
            CellValue::Url(url) if !url.is_empty() => CellDisplay::Link {
                label: Self::label(url).to_string(),
                href: url.clone(),
            },
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
        Self::normalize(input)
            .map(CellValue::Url)
            .ok_or_else(|| ValidationError::InvalidUrl(input.to_string()))
    }
}
