use super::{fallback_display, CellDisplay, CellEditor, Draft, InputAffordance};
use crate::validation::ValidationError;
use crate::{CellValue, CellVariant};

/// Single choice from a fixed option list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectEditor {
    pub options: Vec<String>,
}

impl SelectEditor {
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }
}

impl CellEditor for SelectEditor {
    fn variant(&self) -> CellVariant {
        CellVariant::Select
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::Choice {
            options: self.options.clone(),
        }
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        match raw {
            serde_json::Value::Null => CellValue::Empty,
            serde_json::Value::String(s) if s.is_empty() => CellValue::Empty,
            serde_json::Value::String(s) => CellValue::Choice(s.clone()),
            other => CellValue::Choice(other.to_string()),
        }
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        match value {
            CellValue::Choice(choice) if !choice.is_empty() => {
                CellDisplay::Tags(vec![choice.clone()])
            }
            other => fallback_display(other),
        }
    }

    fn draft(&self, value: &CellValue) -> Draft {
        match value {
            CellValue::Choice(choice) | CellValue::Text(choice) if !choice.is_empty() => {
                Draft::Choice(Some(choice.clone()))
            }
            _ => Draft::Choice(None),
        }
    }

    fn validate(&self, draft: &Draft) -> Result<CellValue, ValidationError> {
        match draft {
            Draft::Choice(None) => Ok(CellValue::Empty),
            Draft::Choice(Some(choice)) => {
                if self.options.contains(choice) {
                    Ok(CellValue::Choice(choice.clone()))
                } else {
                    Err(ValidationError::UnknownOption(choice.clone()))
                }
            }
            _ => Err(ValidationError::IncompatibleInput),
        }
    }
}

/// Any subset of a fixed option list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiSelectEditor {
    pub options: Vec<String>,
    pub max_selected: Option<usize>,
}

impl MultiSelectEditor {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            max_selected: None,
        }
    }

    /// Known options in option-list order, then unknown values in the order
    /// given, without duplicates
    fn canonical(&self, items: Vec<String>) -> Vec<String> {
        let mut ordered: Vec<String> = self
            .options
            .iter()
            .filter(|option| items.contains(*option))
            .cloned()
            .collect();
        for item in items {
            if !ordered.contains(&item) {
                ordered.push(item);
            }
        }
        ordered
    }
}

impl CellEditor for MultiSelectEditor {
    fn variant(&self) -> CellVariant {
        CellVariant::MultiSelect
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::MultiChoice {
            options: self.options.clone(),
            max_selected: self.max_selected,
        }
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        use serde_json::Value;
        let items: Vec<String> = match raw {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Value::String(s) => s.split(',').map(|part| part.trim().to_string()).collect(),
            other => vec![other.to_string()],
        };
        let items = self.canonical(items.into_iter().filter(|s| !s.is_empty()).collect());
        if items.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Choices(items)
        }
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        match value {
            CellValue::Choices(items) if !items.is_empty() => CellDisplay::Tags(items.clone()),
            CellValue::Choice(choice) if !choice.is_empty() => {
                CellDisplay::Tags(vec![choice.clone()])
            }
            other => fallback_display(other),
        }
    }

    fn draft(&self, value: &CellValue) -> Draft {
        match value {
            CellValue::Choices(items) => Draft::Choices(items.clone()),
            CellValue::Choice(choice) if !choice.is_empty() => Draft::Choices(vec![choice.clone()]),
            _ => Draft::Choices(Vec::new()),
        }
    }

    /// Commits the chosen options in option-list order, without duplicates
    fn validate(&self, draft: &Draft) -> Result<CellValue, ValidationError> {
        let Draft::Choices(chosen) = draft else {
            return Err(ValidationError::IncompatibleInput);
        };

        if let Some(unknown) = chosen.iter().find(|c| !self.options.contains(*c)) {
            return Err(ValidationError::UnknownOption(unknown.clone()));
        }

        let ordered: Vec<String> = self
            .options
            .iter()
            .filter(|option| chosen.contains(*option))
            .cloned()
            .collect();

        if let Some(max) = self.max_selected {
            if ordered.len() > max {
                return Err(ValidationError::TooManyChoices {
                    max,
                    actual: ordered.len(),
                });
            }
        }

        if ordered.is_empty() {
            Ok(CellValue::Empty)
        } else {
            Ok(CellValue::Choices(ordered))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn test_select_restricts_to_options() {
        let editor = SelectEditor::new(abc());
        assert_eq!(
            editor.validate(&Draft::Choice(Some("B".into()))),
            Ok(CellValue::Choice("B".into()))
        );
        assert_matches!(
            editor.validate(&Draft::Choice(Some("D".into()))),
            Err(ValidationError::UnknownOption(ref option)) if option == "D"
        );
        assert_eq!(editor.validate(&Draft::Choice(None)), Ok(CellValue::Empty));
    }

    #[test]
    fn test_multi_select_constraint() {
        let editor = MultiSelectEditor::new(abc());

        assert_matches!(
            editor.validate(&Draft::Choices(vec!["A".into(), "D".into()])),
            Err(ValidationError::UnknownOption(ref option)) if option == "D"
        );
        assert_eq!(
            editor.validate(&Draft::Choices(vec!["A".into(), "C".into()])),
            Ok(CellValue::Choices(vec!["A".into(), "C".into()]))
        );
    }

    #[test]
    fn test_multi_select_coerce_uses_option_order() {
        let editor = MultiSelectEditor::new(abc());

        let value = editor.coerce(&json!(["C", "A", "C"]));
        assert_eq!(value, CellValue::Choices(vec!["A".into(), "C".into()]));
        assert_eq!(editor.validate(&editor.draft(&value)), Ok(value));

        // Unknown values are kept after the known ones
        assert_eq!(
            editor.coerce(&json!("Z, B")),
            CellValue::Choices(vec!["B".into(), "Z".into()])
        );
    }

    #[test]
    fn test_multi_select_normalizes_order() {
        let editor = MultiSelectEditor::new(abc());
        assert_eq!(
            editor.validate(&Draft::Choices(vec!["C".into(), "A".into(), "C".into()])),
            Ok(CellValue::Choices(vec!["A".into(), "C".into()]))
        );
    }

    #[test]
    fn test_multi_select_limit() {
        let editor = MultiSelectEditor {
            options: abc(),
            max_selected: Some(1),
        };
        assert_matches!(
            editor.validate(&Draft::Choices(vec!["A".into(), "B".into()])),
            Err(ValidationError::TooManyChoices { max: 1, actual: 2 })
        );
    }

    #[test]
    fn test_multi_select_coerce() {
        let editor = MultiSelectEditor::new(abc());
        assert_eq!(
            editor.coerce(&json!(["A", "B"])),
            CellValue::Choices(vec!["A".into(), "B".into()])
        );
        assert_eq!(
            editor.coerce(&json!("A, C")),
            CellValue::Choices(vec!["A".into(), "C".into()])
        );
        assert_eq!(editor.coerce(&json!([])), CellValue::Empty);
    }

    #[test]
    fn test_display_tags() {
        let editor = MultiSelectEditor::new(abc());
        assert_eq!(
            editor.display(&CellValue::Choices(vec!["A".into(), "B".into()])),
            CellDisplay::Tags(vec!["A".into(), "B".into()])
        );
        let select = SelectEditor::new(abc());
        assert_eq!(
            select.display(&CellValue::Choice("A".into())),
            CellDisplay::Tags(vec!["A".into()])
        );
    }
}
