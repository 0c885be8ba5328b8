//! The `EmployeeStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The service
//! layer depends on this abstraction, never on a concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  employee::{Employee, EmployeeFields},
  page::{Page, PageRequest},
};

/// Abstraction over a persistent, keyed collection of employees.
///
/// Each method is a single atomic step against the backend. Backends must
/// enforce email uniqueness themselves (a UNIQUE constraint or equivalent),
/// and report a violation as an error that converts into
/// [`crate::Error::Conflict`], so that two concurrent inserts with the same
/// email cannot both succeed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EmployeeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Persist a new record, assigning its `id`. Both `created_at` and
  /// `updated_at` are set to `created_at`.
  fn insert(
    &self,
    fields: EmployeeFields,
    created_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// One page over every record.
  fn find_all<'a>(
    &'a self,
    request: &'a PageRequest,
  ) -> impl Future<Output = Result<Page<Employee>, Self::Error>> + Send + 'a;

  /// One page over the records of a single department.
  fn find_by_department<'a>(
    &'a self,
    department_id: i64,
    request: &'a PageRequest,
  ) -> impl Future<Output = Result<Page<Employee>, Self::Error>> + Send + 'a;

  /// Replace the mutable fields of `id` and stamp `updated_at`, leaving `id`
  /// and `created_at` untouched. Returns `None` if no such record exists.
  fn update(
    &self,
    id: i64,
    fields: EmployeeFields,
    updated_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Hard-delete a record. Returns `false` if no such record existed.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Whether any record other than `excluding_id` holds `email`.
  fn exists_by_email<'a>(
    &'a self,
    email: &'a str,
    excluding_id: Option<i64>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
