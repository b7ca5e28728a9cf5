//! Declarative forms binding submitted fields to order records

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

pub mod order;


/// Input kind of a form field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Checkbox that must be ticked
    Confirm,

    /// Free text
    Text,

    /// Order or line reference
    Reference,

    /// Calendar date (`YYYY-MM-DD`)
    Date,

    /// Decimal number, rounded to `decimal_places` on submission
    Decimal { max_digits: u32, decimal_places: u32 },

    /// Whole number with a lower bound
    Integer { min: i64 },

    /// Selection from a set of records
    Choice { source: String },

    /// External URL
    Link,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Confirm => write!(f, "confirm"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Reference => write!(f, "reference"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::Decimal {
                max_digits,
                decimal_places,
            } => write!(f, "decimal({max_digits},{decimal_places})"),
            FieldKind::Integer { min } => write!(f, "integer(>={min})"),
            FieldKind::Choice { source } => write!(f, "choice({source})"),
            FieldKind::Link => write!(f, "link"),
        }
    }
}

/// A single form field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: Option<String>,
    pub help_text: Option<String>,
    pub kind: FieldKind,
    pub required: bool,

    /// Text or icon shown before the input
    pub prefix: Option<String>,
    pub placeholder: Option<String>,
}

impl FormField {
    /// Optional field of the given kind
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            help_text: None,
            kind,
            required: false,
            prefix: None,
            placeholder: None,
        }
    }

    /// Required confirmation checkbox
    pub fn confirm(help_text: impl Into<String>) -> Self {
        Self::new("confirm", FieldKind::Confirm)
            .label("Confirm")
            .help(help_text)
            .required()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Check a submitted value against the field kind
    fn check(&self, value: &Value) -> Result<(), String> {
        match &self.kind {
            FieldKind::Confirm => match value {
                Value::Bool(true) => Ok(()),
                _ => Err("Confirmation is required".to_string()),
            },
            FieldKind::Text | FieldKind::Reference => match value {
                Value::String(_) => Ok(()),
                _ => Err("Expected text".to_string()),
            },
            FieldKind::Date => {
                let text = value.as_str().ok_or("Expected a date")?;
                NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                    .map(|_| ())
                    .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", text))
            }
            FieldKind::Decimal {
                max_digits,
                decimal_places,
            } => {
                let text = scalar_text(value).ok_or("Expected a number")?;
                check_decimal(&text, *max_digits, *decimal_places)
            }
            FieldKind::Integer { min } => {
                let number = match value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .ok_or("Enter a whole number")?;

                if number < *min {
                    return Err(format!(
                        "Ensure this value is greater than or equal to {}",
                        min
                    ));
                }
                Ok(())
            }
            FieldKind::Choice { .. } => match value {
                Value::String(_) | Value::Number(_) => Ok(()),
                _ => Err("Select a valid choice".to_string()),
            },
            FieldKind::Link => {
                let text = value.as_str().ok_or("Expected a URL")?;
                if text.starts_with("http://") || text.starts_with("https://") {
                    Ok(())
                } else {
                    Err("Enter a valid URL".to_string())
                }
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fractional digits beyond `decimal_places` are rounded away; only whole digits are bounded
fn check_decimal(text: &str, max_digits: u32, decimal_places: u32) -> Result<(), String> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !digits_only(whole) || !digits_only(fraction)
    {
        return Err(format!("'{}' is not a number", text));
    }

    let whole_digits = whole.trim_start_matches('0').len() as u32;
    let allowed = max_digits.saturating_sub(decimal_places);
    if whole_digits > allowed {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point",
            allowed
        ));
    }
    Ok(())
}

/// A validation failure for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A form bound to a record type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSpec {
    pub name: String,

    /// Record type the form edits
    pub model: String,
    pub fields: Vec<FormField>,
}

impl FormSpec {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a submission, reporting every failing field in declaration order
    pub fn validate(&self, submission: &Map<String, Value>) -> Vec<FormError> {
        let mut errors = Vec::new();

        for field in &self.fields {
            let value = submission.get(&field.name).filter(|v| !is_blank(v));

            let result = match value {
                Some(value) => field.check(value),
                None if field.required => Err("This field is required".to_string()),
                None => Ok(()),
            };

            if let Err(message) = result {
                errors.push(FormError {
                    field: field.name.clone(),
                    message,
                });
            }
        }

        errors
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
