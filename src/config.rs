use crate::ColumnConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Column layout and grid-wide display settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: Vec<ColumnConfig>,

    /// strftime pattern for date columns that don't set their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl GridConfig {
    pub fn new(columns: Vec<ColumnConfig>) -> Self {
        Self {
            columns,
            date_format: None,
        }
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Column ids in display order
    pub fn column_ids(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    pub fn column(&self, id: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Parse a config from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse grid config")
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .with_context(|| format!("Failed to write config to: {}", path.display()))?;
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config from: {}", path.display()))?;
        tracing::debug!(path = %path.display(), columns = config.columns.len(), "grid config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::{CheckboxEditor, DateEditor, TextEditor};
    use crate::{CellVariant, VariantConfig};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> GridConfig {
        GridConfig::new(vec![
            ColumnConfig::new("name", VariantConfig::ShortText(TextEditor::short(Some(20))))
                .with_title("Name")
                .required(),
            ColumnConfig::new(
                "done",
                VariantConfig::Checkbox(CheckboxEditor {
                    allow_indeterminate: true,
                }),
            ),
            ColumnConfig::new("due", VariantConfig::Date(DateEditor::new(None))),
        ])
        .with_date_format("%d/%m/%Y")
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("grid.json");

        let config = sample();
        config.save(&path).unwrap();
        let loaded = GridConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = GridConfig::load(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }

    #[test]
    fn test_from_json_lenient_variants() {
        let config = GridConfig::from_json(
            r#"{
                "columns": [
                    { "id": "title", "variant": "Text" },
                    { "id": "notes", "variant": "textarea", "max_length": 500 },
                    { "id": "rating", "variant": "stars" },
                    { "id": "plain" }
                ]
            }"#,
        )
        .unwrap();

        let variants: Vec<CellVariant> =
            config.columns.iter().map(|c| c.cell_variant()).collect();
        assert_eq!(
            variants,
            vec![
                CellVariant::ShortText,
                CellVariant::LongText,
                CellVariant::ShortText,
                CellVariant::ShortText
            ]
        );
        assert_eq!(config.column_ids(), vec!["title", "notes", "rating", "plain"]);
        assert!(config.date_format.is_none());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(GridConfig::from_json("{ not json").is_err());
    }
}
