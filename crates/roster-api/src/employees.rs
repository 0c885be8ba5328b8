//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/employees` | Body: [`EmployeeInput`]; returns 200 + stored employee |
//! | `GET`    | `/employees` | `?page`, `?size`, `?sort=field[,asc\|desc]` |
//! | `GET`    | `/employees/{id}` | 404 if not found |
//! | `PUT`    | `/employees/{id}` | Full replacement; 404 / 409 |
//! | `DELETE` | `/employees/{id}` | 204; 404 if not found |
//! | `GET`    | `/employees/department/{department_id}` | Paged like `GET /employees` |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
};
use roster_core::{
  employee::{Employee, EmployeeInput},
  page::{Page, PageRequest},
  service::EmployeeService,
  store::EmployeeStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Query / body decoding ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
  /// Zero-based page index. Default `0`.
  pub page: Option<i64>,
  /// Records per page. Default `20`, clamped to `2000`.
  pub size: Option<i64>,
  /// `property` or `property,direction`, e.g. `lastName,desc`.
  pub sort: Option<String>,
}

type JsonBody = Result<Json<EmployeeInput>, JsonRejection>;
type IdPath = Result<Path<i64>, PathRejection>;
type PageQuery = Result<Query<PageParams>, QueryRejection>;

fn page_request(query: PageQuery) -> Result<PageRequest, ApiError> {
  let Query(params) = query?;
  Ok(PageRequest::from_query(
    params.page,
    params.size,
    params.sort.as_deref(),
  )?)
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /employees`
pub async fn create<S>(
  State(service): State<EmployeeService<S>>,
  payload: JsonBody,
) -> Result<Json<Employee>, ApiError>
where
  S: EmployeeStore + 'static,
{
  let Json(input) = payload?;
  let employee = service.create_employee(input).await?;
  Ok(Json(employee))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /employees/{id}`
pub async fn get_one<S>(
  State(service): State<EmployeeService<S>>,
  path: IdPath,
) -> Result<Json<Employee>, ApiError>
where
  S: EmployeeStore + 'static,
{
  let Path(id) = path?;
  Ok(Json(service.get_employee(id).await?))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /employees[?page=<n>][&size=<n>][&sort=<property,dir>]`
pub async fn list<S>(
  State(service): State<EmployeeService<S>>,
  query: PageQuery,
) -> Result<Json<Page<Employee>>, ApiError>
where
  S: EmployeeStore + 'static,
{
  let request = page_request(query)?;
  Ok(Json(service.get_all_employees(&request).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /employees/{id}`: replaces every mutable field.
pub async fn update<S>(
  State(service): State<EmployeeService<S>>,
  path: IdPath,
  payload: JsonBody,
) -> Result<Json<Employee>, ApiError>
where
  S: EmployeeStore + 'static,
{
  let Path(id) = path?;
  let Json(input) = payload?;
  let employee = service.update_employee(id, input).await?;
  Ok(Json(employee))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /employees/{id}`, 204 on success.
pub async fn delete<S>(
  State(service): State<EmployeeService<S>>,
  path: IdPath,
) -> Result<StatusCode, ApiError>
where
  S: EmployeeStore + 'static,
{
  let Path(id) = path?;
  service.delete_employee(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── By department ────────────────────────────────────────────────────────────

/// `GET /employees/department/{department_id}[?page=..][&size=..][&sort=..]`
pub async fn by_department<S>(
  State(service): State<EmployeeService<S>>,
  path: IdPath,
  query: PageQuery,
) -> Result<Json<Page<Employee>>, ApiError>
where
  S: EmployeeStore + 'static,
{
  let Path(department_id) = path?;
  let request = page_request(query)?;
  Ok(Json(
    service
      .get_employees_by_department(department_id, &request)
      .await?,
  ))
}
