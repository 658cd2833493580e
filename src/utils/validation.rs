//! Input validation utilities

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::{constants, error::FieldViolation};

/// Validate a player's sex
pub fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    if constants::sexes::ALL.contains(&sex) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_sex");
        err.message = Some("sex must be one of the following values: M, F".into());
        Err(err)
    }
}

/// Validate recent match outcomes: every entry is 0 or 1
pub fn validate_recent_results(results: &[i64]) -> Result<(), ValidationError> {
    if results.iter().all(|&outcome| outcome == 0 || outcome == 1) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_result");
        err.message = Some("each value in last must be one of the following values: 0, 1".into());
        Err(err)
    }
}

/// Flatten nested validation errors into field violations.
///
/// Nested fields are joined with dots and list indices become path
/// segments (`data.last`, `players.2.country.code`). The result is sorted
/// by field path.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    collect(errors, "", &mut violations);
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

fn collect(errors: &ValidationErrors, parent: &str, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = join_path(parent, field);

        match kind {
            ValidationErrorsKind::Field(field_errors) => out.push(FieldViolation {
                messages: field_errors.iter().map(|e| describe(&path, e)).collect(),
                field: path,
            }),
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}.{index}"), out);
                }
            }
        }
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

fn describe(path: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match &*error.code {
        "required" => format!("{path} is required"),
        "length" => format!("{path} should not be empty"),
        "range" => format!("{path} is out of range"),
        "url" => format!("{path} must be a URL address"),
        code => format!("{path} failed {code} validation"),
    }
}

/// Prefix every violation path, e.g. with the index of a seeded record
pub fn prefix_violations(prefix: &str, violations: Vec<FieldViolation>) -> Vec<FieldViolation> {
    violations
        .into_iter()
        .map(|violation| FieldViolation {
            field: join_path(prefix, &violation.field),
            messages: violation.messages,
        })
        .collect()
}
