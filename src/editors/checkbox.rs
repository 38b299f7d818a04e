use super::{CellDisplay, CellEditor, Draft, EditInput, InputAffordance};
use crate::validation::ValidationError;
use crate::{CellValue, CellVariant, CheckState};

/// Two-state checkbox, or three-state when `allow_indeterminate` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckboxEditor {
    pub allow_indeterminate: bool,
}

impl CheckboxEditor {
    fn state_of(&self, value: &CellValue) -> CheckState {
        match value {
            CellValue::Check(CheckState::Indeterminate) if !self.allow_indeterminate => {
                CheckState::Unchecked
            }
            CellValue::Check(state) => *state,
            CellValue::Empty if self.allow_indeterminate => CheckState::Indeterminate,
            _ => CheckState::Unchecked,
        }
    }
}

impl CellEditor for CheckboxEditor {
    fn variant(&self) -> CellVariant {
        CellVariant::Checkbox
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::Toggle {
            tri_state: self.allow_indeterminate,
        }
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        use serde_json::Value;
        let state = match raw {
            Value::Bool(true) => CheckState::Checked,
            Value::Bool(false) => CheckState::Unchecked,
            Value::Null if self.allow_indeterminate => CheckState::Indeterminate,
            Value::Null => CheckState::Unchecked,
            Value::Number(n) => {
                if n.as_f64().is_some_and(|v| v != 0.0) {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                }
            }
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "checked" | "x" => CheckState::Checked,
                "indeterminate" | "mixed" if self.allow_indeterminate => CheckState::Indeterminate,
                _ => CheckState::Unchecked,
            },
            _ => CheckState::Unchecked,
        };
        CellValue::Check(state)
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        CellDisplay::Check(self.state_of(value))
    }

    fn draft(&self, value: &CellValue) -> Draft {
        Draft::Check(self.state_of(value))
    }

    fn apply(&self, draft: &mut Draft, input: EditInput) -> bool {
        match (draft, input) {
            (Draft::Check(state), EditInput::Toggle) => {
                *state = state.toggled(self.allow_indeterminate);
                true
            }
            (draft, input) => draft.apply(input),
        }
    }

    fn validate(&self, draft: &Draft) -> Result<CellValue, ValidationError> {
        match draft {
            Draft::Check(CheckState::Indeterminate) if !self.allow_indeterminate => {
                Err(ValidationError::IndeterminateNotAllowed)
            }
            Draft::Check(state) => Ok(CellValue::Check(*state)),
            _ => Err(ValidationError::IncompatibleInput),
        }
    }
}
