//! [`SqliteStore`], the SQLite implementation of [`EmployeeStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use roster_core::{
  employee::{Employee, EmployeeFields},
  page::{Page, PageRequest},
  store::EmployeeStore,
};

use crate::{
  Error, Result,
  encode::{EMPLOYEE_COLUMNS, FieldParams, RawEmployee, encode_dt, order_by},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster employee store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Count and fetch one window, optionally restricted to a department.
  async fn page(
    &self,
    department_id: Option<i64>,
    request: &PageRequest,
  ) -> Result<Page<Employee>> {
    let order  = order_by(request.sort);
    let limit  = i64::from(request.size);
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

    let (total, raws): (i64, Vec<RawEmployee>) = self
      .conn
      .call(move |conn| {
        let total = conn.query_row(
          "SELECT COUNT(*) FROM employees WHERE (?1 IS NULL OR department_id = ?1)",
          rusqlite::params![department_id],
          |row| row.get(0),
        )?;

        let sql = format!(
          "SELECT {EMPLOYEE_COLUMNS}
           FROM employees
           WHERE (?1 IS NULL OR department_id = ?1)
           {order}
           LIMIT ?2 OFFSET ?3"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![department_id, limit, offset],
            RawEmployee::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let content = raws
      .into_iter()
      .map(RawEmployee::into_employee)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page::new(content, total.max(0) as u64, request))
  }
}

/// Whether a write was rejected by a UNIQUE constraint. `email` is the only
/// unique column besides the rowid.
fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(failure, _))
      if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── EmployeeStore impl ──────────────────────────────────────────────────────

impl EmployeeStore for SqliteStore {
  type Error = Error;

  async fn insert(
    &self,
    fields: EmployeeFields,
    created_at: DateTime<Utc>,
  ) -> Result<Employee> {
    let params = FieldParams::new(&fields);
    let at_str = encode_dt(created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employees (
             first_name, last_name, email, department_id,
             position, salary, hire_date, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            params.first_name,
            params.last_name,
            params.email,
            params.department_id,
            params.position,
            params.salary,
            params.hire_date,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await;

    let id = match inserted {
      Ok(id) => id,
      Err(e) if is_unique_violation(&e) => {
        return Err(Error::DuplicateEmail(fields.email));
      }
      Err(e) => return Err(e.into()),
    };

    Ok(Employee {
      id,
      first_name: fields.first_name,
      last_name: fields.last_name,
      email: fields.email,
      department_id: fields.department_id,
      position: fields.position,
      salary: fields.salary,
      hire_date: fields.hire_date,
      created_at,
      updated_at: created_at,
    })
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
            rusqlite::params![id],
            RawEmployee::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn find_all(&self, request: &PageRequest) -> Result<Page<Employee>> {
    self.page(None, request).await
  }

  async fn find_by_department(
    &self,
    department_id: i64,
    request: &PageRequest,
  ) -> Result<Page<Employee>> {
    self.page(Some(department_id), request).await
  }

  async fn update(
    &self,
    id: i64,
    fields: EmployeeFields,
    updated_at: DateTime<Utc>,
  ) -> Result<Option<Employee>> {
    let params = FieldParams::new(&fields);
    let at_str = encode_dt(updated_at);

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE employees
           SET first_name = ?1, last_name = ?2, email = ?3, department_id = ?4,
               position = ?5, salary = ?6, hire_date = ?7, updated_at = ?8
           WHERE id = ?9",
          rusqlite::params![
            params.first_name,
            params.last_name,
            params.email,
            params.department_id,
            params.position,
            params.salary,
            params.hire_date,
            at_str,
            id,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }

        let raw = tx.query_row(
          &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
          rusqlite::params![id],
          RawEmployee::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await;

    match updated {
      Ok(raw) => raw.map(RawEmployee::into_employee).transpose(),
      Err(e) if is_unique_violation(&e) => Err(Error::DuplicateEmail(fields.email)),
      Err(e) => Err(e.into()),
    }
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM employees WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn exists_by_email(
    &self,
    email: &str,
    excluding_id: Option<i64>,
  ) -> Result<bool> {
    let email = email.to_owned();
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT EXISTS(
             SELECT 1 FROM employees
             WHERE email = ?1 AND (?2 IS NULL OR id != ?2)
           )",
          rusqlite::params![email, excluding_id],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(exists)
  }
}
