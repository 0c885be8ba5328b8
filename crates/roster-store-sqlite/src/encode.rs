//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with a fixed nanosecond fraction, so text
//! order is time order. Salaries are plain decimal strings. Dates are
//! `YYYY-MM-DD`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use roster_core::{
  employee::{Employee, EmployeeFields},
  page::{Direction, Sort, SortField},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

// ─── BigDecimal ──────────────────────────────────────────────────────────────

pub fn encode_decimal(d: &BigDecimal) -> String { d.to_plain_string() }

pub fn decode_decimal(s: &str) -> Result<BigDecimal> { Ok(BigDecimal::from_str(s)?) }

// ─── Ordering ────────────────────────────────────────────────────────────────

fn sort_column(field: SortField) -> &'static str {
  match field {
    SortField::Id => "id",
    SortField::FirstName => "first_name",
    SortField::LastName => "last_name",
    SortField::Email => "email",
    SortField::DepartmentId => "department_id",
    SortField::Position => "position",
    // Text order would put "9" after "10000".
    SortField::Salary => "CAST(salary AS REAL)",
    SortField::HireDate => "hire_date",
    SortField::CreatedAt => "created_at",
    SortField::UpdatedAt => "updated_at",
  }
}

/// The `ORDER BY` clause for a listing. `id` is always the final key so
/// that paging is stable across equal sort values.
pub fn order_by(sort: Option<Sort>) -> String {
  match sort {
    None => "ORDER BY id ASC".to_owned(),
    Some(Sort { field: SortField::Id, direction }) => {
      format!("ORDER BY id {}", sql_direction(direction))
    }
    Some(Sort { field, direction }) => format!(
      "ORDER BY {} {}, id ASC",
      sort_column(field),
      sql_direction(direction)
    ),
  }
}

fn sql_direction(direction: Direction) -> &'static str {
  match direction {
    Direction::Asc => "ASC",
    Direction::Desc => "DESC",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Encoded column values for the mutable fields, owned so they can move onto
/// the connection thread.
pub struct FieldParams {
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub department_id: i64,
  pub position:      Option<String>,
  pub salary:        Option<String>,
  pub hire_date:     Option<String>,
}

impl FieldParams {
  pub fn new(fields: &EmployeeFields) -> Self {
    FieldParams {
      first_name:    fields.first_name.clone(),
      last_name:     fields.last_name.clone(),
      email:         fields.email.clone(),
      department_id: fields.department_id,
      position:      fields.position.clone(),
      salary:        fields.salary.as_ref().map(encode_decimal),
      hire_date:     fields.hire_date.map(encode_date),
    }
  }
}

/// Column list matching the field order of [`RawEmployee::from_row`].
pub const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email, department_id, \
   position, salary, hire_date, created_at, updated_at";

/// Raw values read directly from an `employees` row.
pub struct RawEmployee {
  pub id:            i64,
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub department_id: i64,
  pub position:      Option<String>,
  pub salary:        Option<String>,
  pub hire_date:     Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawEmployee {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawEmployee {
      id:            row.get(0)?,
      first_name:    row.get(1)?,
      last_name:     row.get(2)?,
      email:         row.get(3)?,
      department_id: row.get(4)?,
      position:      row.get(5)?,
      salary:        row.get(6)?,
      hire_date:     row.get(7)?,
      created_at:    row.get(8)?,
      updated_at:    row.get(9)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      id:            self.id,
      first_name:    self.first_name,
      last_name:     self.last_name,
      email:         self.email,
      department_id: self.department_id,
      position:      self.position,
      salary:        self.salary.as_deref().map(decode_decimal).transpose()?,
      hire_date:     self.hire_date.as_deref().map(decode_date).transpose()?,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}
