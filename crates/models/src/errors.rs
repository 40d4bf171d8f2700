use serde::Serialize;
use thiserror::Error;

/// A single rejected field with a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", summarize(.0))]
    Validation(Vec<FieldError>),
}

impl ModelError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ModelError::Validation(fields) => fields,
        }
    }
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
