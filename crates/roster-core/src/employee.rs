//! Employee types, the single entity managed by Roster.
//!
//! [`EmployeeInput`] is what callers send; [`EmployeeFields`] is the validated
//! mutable subset that reaches a store; [`Employee`] is a persisted record.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, FieldViolation, Result};

// ─── Employee ────────────────────────────────────────────────────────────────

/// A persisted employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  /// Store-assigned; never changes after creation.
  pub id:            i64,
  pub first_name:    String,
  pub last_name:     String,
  /// Unique across the whole store.
  pub email:         String,
  pub department_id: i64,
  pub position:      Option<String>,
  #[serde(default, with = "salary")]
  pub salary:        Option<BigDecimal>,
  pub hire_date:     Option<NaiveDate>,
  /// Set once by the service at creation.
  pub created_at:    DateTime<Utc>,
  /// Refreshed by the service on every successful update.
  pub updated_at:    DateTime<Utc>,
}

// ─── EmployeeFields ──────────────────────────────────────────────────────────

/// The mutable part of an employee, already validated.
///
/// Only [`EmployeeInput::validate`] produces this type, so a store never sees
/// a blank name or a malformed email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub department_id: i64,
  pub position:      Option<String>,
  pub salary:        Option<BigDecimal>,
  pub hire_date:     Option<NaiveDate>,
}

// ─── EmployeeInput ───────────────────────────────────────────────────────────

/// Request body accepted for both creation and full replacement.
///
/// Required fields are `Option` here so that an absent field is reported as
/// a violation instead of a deserialisation failure. Server-owned fields
/// (`id`, `createdAt`, `updatedAt`) are not part of the input and are ignored
/// if a client sends them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub email:         Option<String>,
  pub department_id: Option<i64>,
  pub position:      Option<String>,
  #[serde(default, with = "salary")]
  pub salary:        Option<BigDecimal>,
  pub hire_date:     Option<NaiveDate>,
}

const NOT_BLANK: &str = "must not be blank";
const NOT_NULL: &str = "must not be null";
const EMAIL_FORMAT: &str = "must be a well-formed email address";

impl EmployeeInput {
  /// Check every field constraint, reporting all violations at once.
  pub fn validate(self) -> Result<EmployeeFields> {
    let mut violations = Vec::new();

    let first_name = not_blank("firstName", self.first_name, &mut violations);
    let last_name = not_blank("lastName", self.last_name, &mut violations);
    let email = not_blank("email", self.email, &mut violations).filter(|e| {
      let well_formed = validator::validate_email(e.as_str());
      if !well_formed {
        violations.push(FieldViolation::new("email", EMAIL_FORMAT));
      }
      well_formed
    });
    if self.department_id.is_none() {
      violations.push(FieldViolation::new("departmentId", NOT_NULL));
    }

    match (first_name, last_name, email, self.department_id) {
      (Some(first_name), Some(last_name), Some(email), Some(department_id))
        if violations.is_empty() =>
      {
        Ok(EmployeeFields {
          first_name,
          last_name,
          email,
          department_id,
          position: self.position,
          salary: self.salary,
          hire_date: self.hire_date,
        })
      }
      _ => Err(Error::Validation(violations)),
    }
  }
}

#[cfg(test)]
impl From<Employee> for EmployeeInput {
  fn from(e: Employee) -> Self {
    EmployeeInput {
      first_name:    Some(e.first_name),
      last_name:     Some(e.last_name),
      email:         Some(e.email),
      department_id: Some(e.department_id),
      position:      e.position,
      salary:        e.salary,
      hire_date:     e.hire_date,
    }
  }
}

fn not_blank(
  field: &str,
  value: Option<String>,
  violations: &mut Vec<FieldViolation>,
) -> Option<String> {
  match value {
    Some(v) if !v.trim().is_empty() => Some(v),
    _ => {
      violations.push(FieldViolation::new(field, NOT_BLANK));
      None
    }
  }
}

// ─── Salary wire format ──────────────────────────────────────────────────────

/// Salaries travel as decimal strings so they never round through `f64` on
/// the way out. Incoming JSON numbers are accepted too: `serde_json` is built
/// with `arbitrary_precision`, so a number arrives here as its literal text.
mod salary {
  use std::str::FromStr;

  use bigdecimal::BigDecimal;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
  use serde_json::Value;

  pub fn serialize<S: Serializer>(
    value: &Option<BigDecimal>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match value {
      Some(d) => serializer.serialize_str(&d.to_plain_string()),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<BigDecimal>, D::Error> {
    let text = match Option::<Value>::deserialize(deserializer)? {
      None | Some(Value::Null) => return Ok(None),
      Some(Value::String(s)) => s,
      Some(Value::Number(n)) => n.to_string(),
      Some(other) => {
        return Err(D::Error::custom(format!(
          "invalid salary {other}: expected a decimal string or number"
        )));
      }
    };
    BigDecimal::from_str(text.trim())
      .map(Some)
      .map_err(|e| D::Error::custom(format!("invalid salary {text:?}: {e}")))
  }
}
