use crate::editors::{
    CellEditor, CheckboxEditor, DateEditor, FileEditor, MultiSelectEditor, NumberEditor,
    SelectEditor, TextEditor, UrlEditor,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared cell type of a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellVariant {
    #[default]
    ShortText,
    LongText,
    Number,
    Url,
    Checkbox,
    Select,
    MultiSelect,
    Date,
    File,
}

impl CellVariant {
    pub const ALL: [CellVariant; 9] = [
        CellVariant::ShortText,
        CellVariant::LongText,
        CellVariant::Number,
        CellVariant::Url,
        CellVariant::Checkbox,
        CellVariant::Select,
        CellVariant::MultiSelect,
        CellVariant::Date,
        CellVariant::File,
    ];

    /// Match a declared tag against the known variants.
    ///
    /// Case, `-`, `_` and spaces are ignored.
    pub fn parse(tag: &str) -> Option<CellVariant> {
        let normalized: String = tag
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let variant = match normalized.as_str() {
            "shorttext" | "text" | "string" => CellVariant::ShortText,
            "longtext" | "textarea" | "paragraph" => CellVariant::LongText,
            "number" | "numeric" => CellVariant::Number,
            "url" | "link" => CellVariant::Url,
            "checkbox" | "bool" | "boolean" => CellVariant::Checkbox,
            "select" | "singleselect" => CellVariant::Select,
            "multiselect" | "tags" => CellVariant::MultiSelect,
            "date" => CellVariant::Date,
            "file" | "attachment" => CellVariant::File,
            _ => return None,
        };
        Some(variant)
    }

    /// Total resolution: unknown or missing tags become short-text
    pub fn resolve(tag: Option<&str>) -> CellVariant {
        match tag {
            Some(tag) => CellVariant::parse(tag).unwrap_or_else(|| {
                tracing::debug!(tag, "unknown cell variant, using short-text");
                CellVariant::ShortText
            }),
            None => CellVariant::ShortText,
        }
    }

    /// Canonical tag
    pub fn tag(self) -> &'static str {
        match self {
            CellVariant::ShortText => "short-text",
            CellVariant::LongText => "long-text",
            CellVariant::Number => "number",
            CellVariant::Url => "url",
            CellVariant::Checkbox => "checkbox",
            CellVariant::Select => "select",
            CellVariant::MultiSelect => "multi-select",
            CellVariant::Date => "date",
            CellVariant::File => "file",
        }
    }
}

impl fmt::Display for CellVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A column's variant together with its variant-specific options.
///
/// Each arm carries the editor that implements that variant, so resolving
/// the editor for a column is a single exhaustive match.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantConfig {
    ShortText(TextEditor),
    LongText(TextEditor),
    Number(NumberEditor),
    Url(UrlEditor),
    Checkbox(CheckboxEditor),
    Select(SelectEditor),
    MultiSelect(MultiSelectEditor),
    Date(DateEditor),
    File(FileEditor),
}

impl VariantConfig {
    pub fn editor(&self) -> &dyn CellEditor {
        match self {
            VariantConfig::ShortText(editor) | VariantConfig::LongText(editor) => editor,
            VariantConfig::Number(editor) => editor,
            VariantConfig::Url(editor) => editor,
            VariantConfig::Checkbox(editor) => editor,
            VariantConfig::Select(editor) => editor,
            VariantConfig::MultiSelect(editor) => editor,
            VariantConfig::Date(editor) => editor,
            VariantConfig::File(editor) => editor,
        }
    }

    pub fn variant(&self) -> CellVariant {
        match self {
            VariantConfig::ShortText(_) => CellVariant::ShortText,
            VariantConfig::LongText(_) => CellVariant::LongText,
            VariantConfig::Number(_) => CellVariant::Number,
            VariantConfig::Url(_) => CellVariant::Url,
            VariantConfig::Checkbox(_) => CellVariant::Checkbox,
            VariantConfig::Select(_) => CellVariant::Select,
            VariantConfig::MultiSelect(_) => CellVariant::MultiSelect,
            VariantConfig::Date(_) => CellVariant::Date,
            VariantConfig::File(_) => CellVariant::File,
        }
    }

    /// Build the config for `variant` from raw column options.
    /// Options that don't apply to the variant are ignored.
    pub fn from_options(variant: CellVariant, raw: &RawColumnConfig) -> Self {
        match variant {
            CellVariant::ShortText => VariantConfig::ShortText(TextEditor::short(raw.max_length)),
            CellVariant::LongText => VariantConfig::LongText(TextEditor::long(raw.max_length)),
            CellVariant::Number => VariantConfig::Number(NumberEditor {
                min: raw.min,
                max: raw.max,
                decimals: raw.decimals,
            }),
            CellVariant::Url => VariantConfig::Url(UrlEditor),
            CellVariant::Checkbox => VariantConfig::Checkbox(CheckboxEditor {
                allow_indeterminate: raw.allow_indeterminate,
            }),
            CellVariant::Select => VariantConfig::Select(SelectEditor::new(raw.options.clone())),
            CellVariant::MultiSelect => VariantConfig::MultiSelect(MultiSelectEditor {
                options: raw.options.clone(),
                max_selected: raw.max_selected,
            }),
            CellVariant::Date => VariantConfig::Date(DateEditor::new(raw.format.clone())),
            CellVariant::File => VariantConfig::File(FileEditor::new(raw.accept.clone())),
        }
    }

    /// Options of select and multi-select columns
    pub fn options(&self) -> Option<&[String]> {
        match self {
            VariantConfig::Select(editor) => Some(&editor.options),
            VariantConfig::MultiSelect(editor) => Some(&editor.options),
            _ => None,
        }
    }

    fn write_options(&self, raw: &mut RawColumnConfig) {
        match self {
            VariantConfig::ShortText(editor) | VariantConfig::LongText(editor) => {
                raw.max_length = editor.max_length;
            }
            VariantConfig::Number(editor) => {
                raw.min = editor.min;
                raw.max = editor.max;
                raw.decimals = editor.decimals;
            }
            VariantConfig::Url(_) => {}
            VariantConfig::Checkbox(editor) => {
                raw.allow_indeterminate = editor.allow_indeterminate;
            }
            VariantConfig::Select(editor) => raw.options = editor.options.clone(),
            VariantConfig::MultiSelect(editor) => {
                raw.options = editor.options.clone();
                raw.max_selected = editor.max_selected;
            }
            VariantConfig::Date(editor) => raw.format = editor.format.clone(),
            VariantConfig::File(editor) => raw.accept = editor.accept.clone(),
        }
    }
}

impl Default for VariantConfig {
    fn default() -> Self {
        VariantConfig::ShortText(TextEditor::short(None))
    }
}

/// Per-column cell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColumnConfig", into = "RawColumnConfig")]
pub struct ColumnConfig {
    /// Column identifier used in cell addresses
    pub id: String,

    /// Header label
    pub title: String,

    /// Empty values are rejected on commit
    pub required: bool,

    pub variant: VariantConfig,

    /// Tag as declared in the source config, when it was not recognized
    unrecognized_tag: Option<String>,
}

impl ColumnConfig {
    pub fn new(id: impl Into<String>, variant: VariantConfig) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            required: false,
            variant,
            unrecognized_tag: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn editor(&self) -> &dyn CellEditor {
        self.variant.editor()
    }

    pub fn cell_variant(&self) -> CellVariant {
        self.variant.variant()
    }

    /// Declared tag that fell back to short-text, if any
    pub fn unrecognized_tag(&self) -> Option<&str> {
        self.unrecognized_tag.as_deref()
    }
}

/// Flat, lenient on-disk form of a column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawColumnConfig {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Any JSON value is accepted; non-strings fall back like unknown tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_indeterminate: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accept: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<RawColumnConfig> for ColumnConfig {
    fn from(raw: RawColumnConfig) -> Self {
        let (variant, unrecognized_tag) = match &raw.variant {
            None | Some(serde_json::Value::Null) => (CellVariant::ShortText, None),
            Some(serde_json::Value::String(tag)) => match CellVariant::parse(tag) {
                Some(variant) => (variant, None),
                None => (CellVariant::resolve(Some(tag)), Some(tag.clone())),
            },
            Some(other) => {
                tracing::debug!(column = %raw.id, tag = %other, "non-string cell variant, using short-text");
                (CellVariant::ShortText, Some(other.to_string()))
            }
        };

        Self {
            title: raw.title.clone().unwrap_or_else(|| raw.id.clone()),
            required: raw.required,
            variant: VariantConfig::from_options(variant, &raw),
            unrecognized_tag,
            id: raw.id,
        }
    }
}

impl From<ColumnConfig> for RawColumnConfig {
    fn from(column: ColumnConfig) -> Self {
        let mut raw = RawColumnConfig {
            title: (column.title != column.id).then(|| column.title.clone()),
            variant: Some(serde_json::Value::String(
                column.cell_variant().tag().to_string(),
            )),
            required: column.required,
            id: column.id,
            ..Default::default()
        };
        column.variant.write_options(&mut raw);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_tags() {
        for variant in CellVariant::ALL {
            assert_eq!(CellVariant::parse(variant.tag()), Some(variant));
        }
        assert_eq!(CellVariant::parse("Multi_Select"), Some(CellVariant::MultiSelect));
        assert_eq!(CellVariant::parse("LONG TEXT"), Some(CellVariant::LongText));
        assert_eq!(CellVariant::parse("boolean"), Some(CellVariant::Checkbox));
    }

    #[test]
    fn test_resolve_is_total() {
        assert_eq!(CellVariant::resolve(None), CellVariant::ShortText);
        assert_eq!(CellVariant::resolve(Some("")), CellVariant::ShortText);
        assert_eq!(CellVariant::resolve(Some("rating")), CellVariant::ShortText);
        assert_eq!(CellVariant::resolve(Some("\u{0}💥")), CellVariant::ShortText);
        assert_eq!(CellVariant::resolve(Some("date")), CellVariant::Date);
    }

    #[test]
    fn test_column_from_json() {
        let column: ColumnConfig = serde_json::from_value(json!({
            "id": "status",
            "title": "Status",
            "variant": "select",
            "options": ["Open", "Closed"],
            "required": true
        }))
        .unwrap();

        assert_eq!(column.cell_variant(), CellVariant::Select);
        assert_eq!(column.title, "Status");
        assert!(column.required);
        assert_eq!(
            column.variant.options(),
            Some(&["Open".to_string(), "Closed".to_string()][..])
        );
        assert_eq!(column.unrecognized_tag(), None);
    }

    #[test]
    fn test_column_unknown_variant_falls_back() {
        let column: ColumnConfig = serde_json::from_value(json!({
            "id": "score",
            "variant": "star-rating",
            "max_length": 3
        }))
        .unwrap();

        assert_eq!(column.cell_variant(), CellVariant::ShortText);
        assert_eq!(column.unrecognized_tag(), Some("star-rating"));
        assert_eq!(column.variant, VariantConfig::ShortText(TextEditor::short(Some(3))));
        assert_eq!(column.title, "score");
    }

    #[test]
    fn test_column_garbage_variant_falls_back() {
        for garbage in [json!(42), json!({"nested": true}), json!(["select"]), json!(null)] {
            let column: ColumnConfig =
                serde_json::from_value(json!({ "id": "x", "variant": garbage })).unwrap();
            assert_eq!(column.cell_variant(), CellVariant::ShortText);
        }
    }

    #[test]
    fn test_column_serialization_roundtrip() {
        let column = ColumnConfig::new(
            "tags",
            VariantConfig::MultiSelect(MultiSelectEditor {
                options: vec!["A".into(), "B".into()],
                max_selected: Some(2),
            }),
        )
        .with_title("Tags")
        .required();

        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["variant"], json!("multi-select"));
        let back: ColumnConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, column);
    }
}
