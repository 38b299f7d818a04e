use crate::config::GridConfig;
use crate::CellVariant;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

// ========== Cell Value Validation ==========

/// Why an editor refused to commit a draft
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("text is {actual} characters, limit is {max}")]
    TooLong { max: usize, actual: usize },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is outside the allowed range{}", describe_range(.min, .max))]
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("'{0}' is not a valid link")]
    InvalidUrl(String),

    #[error("a value is required")]
    Required,

    #[error("'{0}' is not one of the allowed options")]
    UnknownOption(String),

    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    #[error("this checkbox cannot be left indeterminate")]
    IndeterminateNotAllowed,

    #[error("'{name}' is not an accepted file type ({})", .accepted.join(", "))]
    FileTypeNotAccepted { name: String, accepted: Vec<String> },

    #[error("{actual} options chosen, at most {max} allowed")]
    TooManyChoices { max: usize, actual: usize },

    #[error("input does not match this cell type")]
    IncompatibleInput,
}

fn describe_range(min: &Option<f64>, max: &Option<f64>) -> String {
    match (*min, *max) {
        (Some(min), Some(max)) => format!(" {min}..={max}"),
        (Some(min), None) => format!(" (min {min})"),
        (None, Some(max)) => format!(" (max {max})"),
        (None, None) => String::new(),
    }
}

// ========== Configuration Validation ==========

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Info,    // Informational
    Warning, // Column works, but probably not as intended
    Error,   // Config is unusable
}

/// Validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
    pub affected_columns: Vec<String>,
    pub issue_type: ValidationIssueType,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    DuplicateColumnId,
    EmptyColumnId,
    MissingOptions,
    DuplicateOption,
    ZeroMaxLength,
    InvalidRange,
    UnknownVariant,
}

/// Complete validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Warning)
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.by_severity(ValidationSeverity::Error)
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.by_severity(ValidationSeverity::Warning)
    }

    pub fn info(&self) -> Vec<&ValidationIssue> {
        self.by_severity(ValidationSeverity::Info)
    }

    fn by_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// Validator for grid configurations
pub struct Validator;

impl Validator {
    /// Run all checks on a grid configuration
    pub fn validate(config: &GridConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::check_column_ids(config, &mut result);

        for column in &config.columns {
            if let Some(tag) = column.unrecognized_tag() {
                result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Info,
                    message: format!(
                        "Column '{}' declares unknown variant {tag}; it is edited as short text.",
                        column.id
                    ),
                    affected_columns: vec![column.id.clone()],
                    issue_type: ValidationIssueType::UnknownVariant,
                });
            }

            if let Some(options) = column.variant.options() {
                Self::check_options(&column.id, column.cell_variant(), options, &mut result);
            }

            match &column.variant {
                crate::VariantConfig::ShortText(editor) | crate::VariantConfig::LongText(editor)
                    if editor.max_length == Some(0) =>
                {
                    result.add_issue(ValidationIssue {
                        severity: ValidationSeverity::Warning,
                        message: format!(
                            "Column '{}' has max_length 0; only empty values can be committed.",
                            column.id
                        ),
                        affected_columns: vec![column.id.clone()],
                        issue_type: ValidationIssueType::ZeroMaxLength,
                    });
                }
                crate::VariantConfig::Number(editor) => {
                    if let (Some(min), Some(max)) = (editor.min, editor.max) {
                        if min > max {
                            result.add_issue(ValidationIssue {
                                severity: ValidationSeverity::Error,
                                message: format!(
                                    "Column '{}' has min {min} greater than max {max}.",
                                    column.id
                                ),
                                affected_columns: vec![column.id.clone()],
                                issue_type: ValidationIssueType::InvalidRange,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        result
    }

    fn check_column_ids(config: &GridConfig, result: &mut ValidationResult) {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        for column in &config.columns {
            if column.id.trim().is_empty() {
                result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Error,
                    message: format!(
                        "Column titled '{}' has an empty id and cannot be addressed.",
                        column.title
                    ),
                    affected_columns: vec![column.id.clone()],
                    issue_type: ValidationIssueType::EmptyColumnId,
                });
                continue;
            }

            if !seen.insert(column.id.as_str()) && reported.insert(column.id.as_str()) {
                result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Error,
                    message: format!("Column id '{}' is used more than once.", column.id),
                    affected_columns: vec![column.id.clone()],
                    issue_type: ValidationIssueType::DuplicateColumnId,
                });
            }
        }
    }

    fn check_options(
        column_id: &str,
        variant: CellVariant,
        options: &[String],
        result: &mut ValidationResult,
    ) {
        if options.is_empty() {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Warning,
                message: format!(
                    "{variant} column '{column_id}' has no options; nothing can be chosen."
                ),
                affected_columns: vec![column_id.to_string()],
                issue_type: ValidationIssueType::MissingOptions,
            });
            return;
        }

        let mut seen = HashSet::new();
        let mut duplicates: Vec<&str> = options
            .iter()
            .filter(|option| !seen.insert(option.as_str()))
            .map(String::as_str)
            .collect();
        duplicates.sort_unstable();
        duplicates.dedup();

        if !duplicates.is_empty() {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Warning,
                message: format!(
                    "Column '{column_id}' lists duplicate options: {}",
                    duplicates.join(", ")
                ),
                affected_columns: vec![column_id.to_string()],
                issue_type: ValidationIssueType::DuplicateOption,
            });
        }
    }
}

/// Extension trait for GridConfig to add validation
pub trait ValidatedConfig {
    fn validate(&self) -> ValidationResult;

    /// Highest severity reported per column id
    fn columns_with_issues(&self, result: &ValidationResult)
        -> HashMap<String, ValidationSeverity>;
}

impl ValidatedConfig for GridConfig {
    fn validate(&self) -> ValidationResult {
        Validator::validate(self)
    }

    fn columns_with_issues(
        &self,
        result: &ValidationResult,
    ) -> HashMap<String, ValidationSeverity> {
        let mut columns = HashMap::new();

        for issue in &result.issues {
            for column_id in &issue.affected_columns {
                columns
                    .entry(column_id.clone())
                    .and_modify(|severity| {
                        // Keep the highest severity
                        if issue.severity > *severity {
                            *severity = issue.severity;
                        }
                    })
                    .or_insert(issue.severity);
            }
        }

        columns
    }
}
