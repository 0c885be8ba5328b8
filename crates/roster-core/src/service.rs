//! [`EmployeeService`]: every business rule for the employee resource.
//!
//! Validation, email uniqueness, existence checks and timestamp assignment
//! all happen here. The store only persists; the API layer only translates.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  employee::{Employee, EmployeeInput},
  page::{Page, PageRequest},
  store::EmployeeStore,
};

/// Business operations over an [`EmployeeStore`].
///
/// Cloning is cheap; the store is reference-counted.
pub struct EmployeeService<S> {
  store: Arc<S>,
}

impl<S> Clone for EmployeeService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: EmployeeStore> EmployeeService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate `input`, reject a taken email, then persist a new record with
  /// `created_at == updated_at == now`.
  pub async fn create_employee(&self, input: EmployeeInput) -> Result<Employee> {
    let fields = input
      .validate()
      .inspect_err(|e| warn!(error = %e, "rejected employee creation"))?;

    if from_store(self.store.exists_by_email(&fields.email, None).await)? {
      warn!(department_id = fields.department_id, "rejected employee creation: email taken");
      return Err(Error::Conflict { email: fields.email });
    }

    let employee = from_store(self.store.insert(fields, Utc::now()).await)?;
    info!(id = employee.id, department_id = employee.department_id, "employee created");
    Ok(employee)
  }

  pub async fn get_employee(&self, id: i64) -> Result<Employee> {
    debug!(id, "fetching employee");
    from_store(self.store.find_by_id(id).await)?.ok_or(Error::NotFound(id))
  }

  /// One page over all employees, ordered by `id` unless `request` says
  /// otherwise. An empty store yields an empty page.
  pub async fn get_all_employees(
    &self,
    request: &PageRequest,
  ) -> Result<Page<Employee>> {
    debug!(page = request.page, size = request.size, "listing employees");
    from_store(self.store.find_all(request).await)
  }

  /// Replace every mutable field of `id`.
  ///
  /// Existence is checked before validation, so an unknown id is reported as
  /// not found even when the body is also invalid.
  pub async fn update_employee(
    &self,
    id: i64,
    input: EmployeeInput,
  ) -> Result<Employee> {
    let existing = from_store(self.store.find_by_id(id).await)?
      .ok_or(Error::NotFound(id))?;

    let fields = input
      .validate()
      .inspect_err(|e| warn!(id, error = %e, "rejected employee update"))?;

    if fields.email != existing.email
      && from_store(self.store.exists_by_email(&fields.email, Some(id)).await)?
    {
      warn!(id, "rejected employee update: email taken");
      return Err(Error::Conflict { email: fields.email });
    }

    let updated_at = next_update_stamp(existing.updated_at);
    // `None` here means the record was deleted after the lookup above.
    let employee = from_store(self.store.update(id, fields, updated_at).await)?
      .ok_or(Error::NotFound(id))?;
    info!(id, "employee updated");
    Ok(employee)
  }

  pub async fn delete_employee(&self, id: i64) -> Result<()> {
    if !from_store(self.store.delete(id).await)? {
      return Err(Error::NotFound(id));
    }
    info!(id, "employee deleted");
    Ok(())
  }

  /// Same paging as [`Self::get_all_employees`], restricted to one
  /// department. Unknown departments yield an empty page.
  pub async fn get_employees_by_department(
    &self,
    department_id: i64,
    request: &PageRequest,
  ) -> Result<Page<Employee>> {
    debug!(department_id, page = request.page, size = request.size, "listing department");
    from_store(self.store.find_by_department(department_id, request).await)
  }
}

fn from_store<T, E: Into<Error>>(result: std::result::Result<T, E>) -> Result<T> {
  result.map_err(Into::into)
}

/// `updated_at` must move strictly forward, even if the clock has not.
fn next_update_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
  let now = Utc::now();
  if now > previous { now } else { previous + Duration::nanoseconds(1) }
}
