//! Error types for `roster-core`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
  /// The offending property, in its wire (camelCase) spelling.
  pub field:   String,
  pub message: String,
}

impl FieldViolation {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self { field: field.into(), message: message.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {}", summarize(.0))]
  Validation(Vec<FieldViolation>),

  #[error("email {email:?} is already in use")]
  Conflict { email: String },

  #[error("employee not found: {0}")]
  NotFound(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Shorthand for a validation error with exactly one violation.
  pub fn invalid(field: &str, message: impl Into<String>) -> Self {
    Self::Validation(vec![FieldViolation::new(field, message)])
  }
}

fn summarize(violations: &[FieldViolation]) -> String {
  violations
    .iter()
    .map(|v| format!("{} {}", v.field, v.message))
    .collect::<Vec<_>>()
    .join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
