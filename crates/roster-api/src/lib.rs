//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::EmployeeStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone()))
//! ```

pub mod employees;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::{service::EmployeeService, store::EmployeeStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EmployeeStore + 'static,
{
  Router::new()
    .route(
      "/employees",
      get(employees::list::<S>).post(employees::create::<S>),
    )
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .put(employees::update::<S>)
        .delete(employees::delete::<S>),
    )
    .route(
      "/employees/department/{department_id}",
      get(employees::by_department::<S>),
    )
    .with_state(EmployeeService::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use roster_core::{employee::Employee, page::Page};
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn employee_json(email: &str, department_id: i64) -> Value {
    json!({
      "firstName": "Katherine",
      "lastName": "Johnson",
      "email": email,
      "departmentId": department_id,
      "position": "Mathematician",
      "salary": "81234.56",
      "hireDate": "1953-06-01"
    })
  }

  async fn create(app: &Router, email: &str, department_id: i64) -> Employee {
    let (status, body) =
      send(app, "POST", "/employees", Some(employee_json(email, department_id))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    serde_json::from_value(body).unwrap()
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_creates_and_echoes_generated_fields() {
    let app = app().await;
    let (status, body) =
      send(&app, "POST", "/employees", Some(employee_json("kj@example.com", 3))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["createdAt"], body["updatedAt"]);
    assert_eq!(body["salary"], "81234.56");
    assert_eq!(body["hireDate"], "1953-06-01");
  }

  #[tokio::test]
  async fn post_with_missing_fields_is_400_with_violations() {
    let app = app().await;
    let (status, body) =
      send(&app, "POST", "/employees", Some(json!({ "email": "bad" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("validation failed"));
    assert!(
      body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .all(|v| v["message"].is_string())
    );
    let fields: Vec<&str> = body["violations"]
      .as_array()
      .unwrap()
      .iter()
      .map(|v| v["field"].as_str().unwrap())
      .collect();
    assert_eq!(fields, ["firstName", "lastName", "email", "departmentId"]);
  }

  #[tokio::test]
  async fn post_with_malformed_json_is_400() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/employees")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn post_salary_as_number_keeps_every_digit() {
    let app = app().await;
    let mut payload = employee_json("exact@example.com", 1);
    payload["salary"] = serde_json::from_str("12345678901234567.89").unwrap();

    let (status, body) = send(&app, "POST", "/employees", Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["salary"], "12345678901234567.89");

    let uri = format!("/employees/{}", body["id"]);
    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched["salary"], "12345678901234567.89");
  }

  #[tokio::test]
  async fn post_duplicate_email_is_409() {
    let app = app().await;
    create(&app, "twice@example.com", 1).await;
    let (status, body) =
      send(&app, "POST", "/employees", Some(employee_json("twice@example.com", 2))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("twice@example.com"));
    assert!(body.get("violations").is_none());
  }

  // ── Get ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_round_trips_created_employee() {
    let app = app().await;
    let created = create(&app, "get@example.com", 1).await;

    let (status, body) = send(&app, "GET", &format!("/employees/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Employee = serde_json::from_value(body).unwrap();
    assert_eq!(fetched, created);
  }

  #[tokio::test]
  async fn get_unknown_is_404() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/employees/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "employee not found: 999" }));
  }

  #[tokio::test]
  async fn non_numeric_id_is_400() {
    let app = app().await;
    for (method, uri) in [
      ("GET", "/employees/abc"),
      ("DELETE", "/employees/1.5"),
      ("GET", "/employees/department/sales"),
    ] {
      let (status, body) = send(&app, method, uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
      assert!(body["error"].is_string(), "{method} {uri}: {body}");
    }
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_replaces_fields() {
    let app = app().await;
    let created = create(&app, "put@example.com", 1).await;

    let mut change = employee_json("put@example.com", 1);
    change["position"] = json!("Senior Mathematician");
    let (status, body) =
      send(&app, "PUT", &format!("/employees/{}", created.id), Some(change)).await;

    assert_eq!(status, StatusCode::OK);
    let updated: Employee = serde_json::from_value(body).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.position.as_deref(), Some("Senior Mathematician"));
    assert!(updated.updated_at > created.updated_at);
  }

  #[tokio::test]
  async fn put_unknown_is_404_and_taken_email_is_409() {
    let app = app().await;
    let (status, _) =
      send(&app, "PUT", "/employees/5", Some(employee_json("p@example.com", 1))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    create(&app, "owner@example.com", 1).await;
    let other = create(&app, "other@example.com", 1).await;
    let (status, _) = send(
      &app,
      "PUT",
      &format!("/employees/{}", other.id),
      Some(employee_json("owner@example.com", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_is_204_then_404() {
    let app = app().await;
    let created = create(&app, "del@example.com", 1).await;
    let uri = format!("/employees/{}", created.id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Listing ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_pages_with_metadata() {
    let app = app().await;
    for i in 0..25 {
      create(&app, &format!("l{i}@example.com"), 1).await;
    }

    let (status, body) = send(&app, "GET", "/employees?page=0&size=10", None).await;
    assert_eq!(status, StatusCode::OK);
    let page: Page<Employee> = serde_json::from_value(body).unwrap();
    assert_eq!(page.content.len(), 10);
    assert_eq!(page.total_elements, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page_number, 0);
    assert_eq!(page.page_size, 10);
  }

  #[tokio::test]
  async fn list_defaults_and_sorting() {
    let app = app().await;
    let a = create(&app, "a@example.com", 1).await;
    let b = create(&app, "b@example.com", 1).await;

    let (_, body) = send(&app, "GET", "/employees", None).await;
    assert_eq!(body["pageSize"], 20);
    assert_eq!(body["content"][0]["id"], a.id);

    let (_, body) = send(&app, "GET", "/employees?sort=email,desc", None).await;
    assert_eq!(body["content"][0]["id"], b.id);
  }

  #[tokio::test]
  async fn list_rejects_bad_paging() {
    let app = app().await;
    for uri in [
      "/employees?page=-1",
      "/employees?size=0",
      "/employees?sort=shoeSize",
      "/employees?page=first",
    ] {
      let (status, body) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
      assert!(body["error"].is_string(), "{uri}: {body}");
    }
  }

  #[tokio::test]
  async fn department_listing_filters_and_empty_is_ok() {
    let app = app().await;
    create(&app, "x1@example.com", 1).await;
    create(&app, "x2@example.com", 2).await;
    create(&app, "x3@example.com", 2).await;

    let (status, body) = send(&app, "GET", "/employees/department/2?size=10", None).await;
    assert_eq!(status, StatusCode::OK);
    let page: Page<Employee> = serde_json::from_value(body).unwrap();
    assert_eq!(page.total_elements, 2);
    assert!(page.content.iter().all(|e| e.department_id == 2));

    let (status, body) = send(&app, "GET", "/employees/department/77", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 0);
    assert_eq!(body["content"], json!([]));
  }
}
