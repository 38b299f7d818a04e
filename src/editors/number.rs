use super::{fallback_display, raw_to_text, CellDisplay, CellEditor, Draft, InputAffordance};
use crate::validation::ValidationError;
use crate::{CellValue, CellVariant};

/// Numeric editor with optional bounds and fixed decimals
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberEditor {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Fixed number of decimals for display
    pub decimals: Option<u8>,
}

impl NumberEditor {
    /// Parse user input, accepting surrounding spaces and `,` thousands
    /// separators. Any other `,` makes the input invalid.
    pub fn parse(input: &str) -> Option<f64> {
        let trimmed = input.trim();
        let cleaned = if trimmed.contains(',') {
            ungroup(trimmed)?
        } else {
            trimmed.to_string()
        };
        if cleaned.is_empty() {
            return None;
        }
        // Rust parses "inf" and "NaN"; neither is a cell value
        cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    pub fn format(&self, value: f64) -> String {
        let plain = match self.decimals {
            Some(decimals) => format!("{:.*}", decimals as usize, value),
            None => value.to_string(),
        };
        group_thousands(&plain)
    }
}

/// Remove `,` separators from the integer part. The first group holds one
/// to three digits and every later group exactly three.
fn ungroup(input: &str) -> Option<String> {
    let (sign, unsigned) = match input.chars().next() {
        Some(c @ ('-' | '+')) => (c.to_string(), &input[1..]),
        _ => (String::new(), input),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let is_digits = |group: &str| group.bytes().all(|b| b.is_ascii_digit());
    let mut groups = integer.split(',');
    let first = groups.next()?;
    if !(1..=3).contains(&first.len()) || !is_digits(first) {
        return None;
    }
    if !groups.all(|group| group.len() == 3 && is_digits(group)) {
        return None;
    }

    let mut cleaned = sign;
    cleaned.push_str(&integer.replace(',', ""));
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}

/// Insert `,` every three digits of the integer part
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

impl CellEditor for NumberEditor {
    fn variant(&self) -> CellVariant {
        CellVariant::Number
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::Number
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        match raw {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(value) => CellValue::Number(value),
                None => raw_to_text(raw),
            },
            serde_json::Value::String(s) => match Self::parse(s) {
                Some(value) => CellValue::Number(value),
                None => raw_to_text(raw),
            },
            other => raw_to_text(other),
        }
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        match value {
            CellValue::Number(n) => CellDisplay::Number(self.format(*n)),
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

        let value =
            Self::parse(input).ok_or_else(|| ValidationError::NotANumber(input.to_string()))?;

        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        if below || above {
            return Err(ValidationError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }

        Ok(CellValue::Number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_numeric_coercion() {
        let editor = NumberEditor::default();
        assert_eq!(
            editor.validate(&Draft::Text("12.5".into())),
            Ok(CellValue::Number(12.5))
        );
        assert_matches!(
            editor.validate(&Draft::Text("abc".into())),
            Err(ValidationError::NotANumber(_))
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let editor = NumberEditor::default();
        for input in ["inf", "-infinity", "NaN"] {
            assert!(editor.validate(&Draft::Text(input.into())).is_err(), "{input}");
        }
    }

    #[test]
    fn test_accepts_grouped_input() {
        assert_eq!(NumberEditor::parse(" 1,234.5 "), Some(1234.5));
        assert_eq!(NumberEditor::parse("-12,345,678"), Some(-12345678.0));
        assert_eq!(NumberEditor::parse("-3"), Some(-3.0));
        assert_eq!(NumberEditor::parse(""), None);

        // `,` is only a thousands separator
        for input in ["12,5", "1,,,2", ",5", "1,2,3", "1,234,5", "1.234,5", "1,234,"] {
            assert_eq!(NumberEditor::parse(input), None, "{input}");
            assert_matches!(
                NumberEditor::default().validate(&Draft::Text(input.into())),
                Err(ValidationError::NotANumber(rejected)) if rejected == input
            );
        }
    }

    #[test]
    fn test_bounds() {
        let editor = NumberEditor {
            min: Some(0.0),
            max: Some(10.0),
            decimals: None,
        };
        assert!(editor.validate(&Draft::Text("10".into())).is_ok());
        assert_matches!(
            editor.validate(&Draft::Text("10.01".into())),
            Err(ValidationError::OutOfRange { .. })
        );
        assert_matches!(
            editor.validate(&Draft::Text("-1".into())),
            Err(ValidationError::OutOfRange { .. })
        );
    }

    #[test]
    fn test_empty_clears() {
        let editor = NumberEditor::default();
        assert_eq!(editor.validate(&Draft::Text("  ".into())), Ok(CellValue::Empty));
    }

    #[test]
    fn test_formatting() {
        let editor = NumberEditor::default();
        assert_eq!(editor.format(1234567.5), "1,234,567.5");
        assert_eq!(editor.format(-1000.0), "-1,000");
        assert_eq!(editor.format(999.0), "999");

        let fixed = NumberEditor {
            decimals: Some(2),
            ..Default::default()
        };
        assert_eq!(fixed.format(1234.5), "1,234.50");
        assert_eq!(
            fixed.display(&CellValue::Number(0.126)),
            CellDisplay::Number("0.13".into())
        );
    }

    #[test]
    fn test_coerce_lenient() {
        let editor = NumberEditor::default();
        assert_eq!(editor.coerce(&json!(3)), CellValue::Number(3.0));
        assert_eq!(editor.coerce(&json!("4.5")), CellValue::Number(4.5));
        assert_eq!(editor.coerce(&json!("n/a")), CellValue::text("n/a"));
        assert_eq!(
            editor.display(&editor.coerce(&json!("n/a"))),
            CellDisplay::Text("n/a".into())
        );
    }
}
