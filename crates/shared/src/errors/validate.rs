use std::fmt::Write;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut result = String::new();
    collect_errors(&mut result, "", errors);

    if result.is_empty() {
        "Validation failed".to_string()
    } else {
        result.trim().to_string()
    }
}

/// Walks nested structs and lists so `items[0].qty` is reported by path.
fn collect_errors(out: &mut String, prefix: &str, errors: &ValidationErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let _ = writeln!(out, "{path}: {}", message_of(err));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(out, &path, inner),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect_errors(out, &format!("{path}[{index}]"), inner);
                }
            }
        }
    }
}

fn message_of(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match err.code.as_ref() {
            "email" => "invalid email format".to_string(),
            "length" => "invalid length".to_string(),
            "range" => "value out of range".to_string(),
            "required" => "required".to_string(),
            _ => "invalid value".to_string(),
        })
}

pub(crate) fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    format_validation_errors(errors)
        .lines()
        .map(str::to_string)
        .collect()
}
