use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::Regex;
use validator::{validate_length, validate_range, validate_url, ValidationError};

/// Declarative rules for a single form field.
#[derive(Clone, Debug, Default)]
pub struct FieldConstraints {
    pub required: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Regex>,
    pub url: bool,
}

impl FieldConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, len: u64) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: u64) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }

    pub fn pattern(mut self, regex: Regex) -> Self {
        self.pattern = Some(regex);
        self
    }

    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    fn is_numeric(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

pub type ConstraintTable = BTreeMap<&'static str, FieldConstraints>;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct FormValidation {
    pub errors: BTreeMap<String, String>,
    pub is_valid: bool,
}

impl FormValidation {
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Human-readable text for a validation error.
pub fn error_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

/// Checks one value against its constraints. Empty optional fields pass.
pub fn validate_field(name: &str, value: &str, constraints: &FieldConstraints) -> Result<(), ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        if constraints.required {
            return Err(field_error("required", format!("{} is required", name)));
        }
        return Ok(());
    }

    if !validate_length(value, constraints.min_length, None, None) {
        return Err(field_error(
            "min_length",
            format!("{} must be at least {} characters", name, constraints.min_length.unwrap_or_default()),
        ));
    }

    if !validate_length(value, None, constraints.max_length, None) {
        return Err(field_error(
            "max_length",
            format!("{} must be at most {} characters", name, constraints.max_length.unwrap_or_default()),
        ));
    }

    if constraints.is_numeric() {
        let number = match value.parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => return Err(field_error("not_a_number", format!("{} must be a number", name))),
        };
        if !validate_range(number, constraints.min, None) {
            return Err(field_error(
                "min",
                format!("{} must be at least {}", name, constraints.min.unwrap_or_default()),
            ));
        }
        if !validate_range(number, None, constraints.max) {
            return Err(field_error(
                "max",
                format!("{} must be at most {}", name, constraints.max.unwrap_or_default()),
            ));
        }
    }

    if let Some(pattern) = &constraints.pattern {
        if !pattern.is_match(value) {
            return Err(field_error("pattern", format!("{} has an invalid format", name)));
        }
    }

    // Parse-based check for every URL field
    if constraints.url && !validate_url(value) {
        return Err(field_error("url", format!("{} must be a valid URL", name)));
    }

    Ok(())
}

/// Validates every field named in `table`. Missing values count as empty.
pub fn validate_form(values: &BTreeMap<String, String>, table: &ConstraintTable) -> FormValidation {
    let errors: BTreeMap<String, String> = table
        .iter()
        .filter_map(|(field, constraints)| {
            let value = values.get(*field).map(String::as_str).unwrap_or("");
            validate_field(field, value, constraints)
                .err()
                .map(|e| (field.to_string(), error_message(&e)))
        })
        .collect();

    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
