//! Error types for the Land Ledger Core.

use std::fmt;

use thiserror::Error;

/// Core errors that can occur while encoding or parsing ledger data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("canonical encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("invalid digest: {0:?}")]
    InvalidDigest(String),

    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown land type: {0}")]
    UnknownLandType(String),

    #[error("malformed verification token: {0}")]
    MalformedToken(String),
}

/// A single rejected registration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The form field name (camelCase, as persisted).
    pub field: &'static str,
    /// User-facing message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input validation errors, raised before a record reaches the chain builder.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("registration rejected: {}", join_fields(.0))]
    Fields(Vec<FieldError>),
}

impl ValidationError {
    /// All rejected fields.
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ValidationError::Fields(fields) => fields,
        }
    }

    /// Message for one field, if it was rejected.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
