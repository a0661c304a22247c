use crate::{
    error::{AppError, AppResult},
    model::employee::{Employee, NewEmployee},
    service::employee_service::EmployeeService,
};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for both create and update.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct EmployeeInput {
    #[schema(example = "John")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[schema(example = "john@example.com", format = "email")]
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[schema(example = "Dev")]
    #[validate(length(min = 1, message = "position must not be empty"))]
    pub position: String,

    #[schema(example = 60000.0)]
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: f64,

    /// RFC 3339; defaults to the creation time when omitted.
    #[schema(nullable = true)]
    pub join_date: Option<DateTime<Utc>>,
}

impl EmployeeInput {
    fn into_validated(self) -> AppResult<NewEmployee> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(NewEmployee {
            name: self.name,
            email: self.email,
            position: self.position,
            salary: self.salary,
            join_date: self.join_date,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Employee deleted successfully")]
    pub message: String,
}

/// Path ids are unsigned integers that must also fit the storage key.
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| AppError::Validation(format!("invalid employee id `{raw}`")))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/v1/employees/",
    responses(
        (status = 200, description = "All active employees", body = [Employee]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip_all)]
pub async fn list_employees(service: web::Data<dyn EmployeeService>) -> AppResult<HttpResponse> {
    let employees = service.get_all_employees().await?;
    debug!(count = employees.len(), "Listing employees");

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, description = "Invalid employee id", body = crate::error::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse, example = json!({
            "error": "employee not found"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(name = "get_employee", skip(service))]
pub async fn get_employee(
    service: web::Data<dyn EmployeeService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let employee_id = parse_id(&path)?;
    let employee = service.get_employee_by_id(employee_id).await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees/",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Malformed or invalid body", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip(service))]
pub async fn create_employee(
    service: web::Data<dyn EmployeeService>,
    payload: web::Json<EmployeeInput>,
) -> AppResult<HttpResponse> {
    let new_employee = payload.into_inner().into_validated()?;
    let created = service.create_employee(new_employee).await?;

    Ok(HttpResponse::Created().json(created))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = EmployeeInput,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid id or body", body = crate::error::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(name = "update_employee", skip(service))]
pub async fn update_employee(
    service: web::Data<dyn EmployeeService>,
    path: web::Path<String>,
    payload: web::Json<EmployeeInput>,
) -> AppResult<HttpResponse> {
    let employee_id = parse_id(&path)?;
    let changes = payload.into_inner().into_validated()?;
    let updated = service.update_employee(employee_id, changes).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 400, description = "Invalid employee id", body = crate::error::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(name = "delete_employee", skip(service))]
pub async fn delete_employee(
    service: web::Data<dyn EmployeeService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let employee_id = parse_id(&path)?;
    service.delete_employee(employee_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Employee deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::DeleteMode,
        db::{seed_demo_data, test_pool},
        repository::employee_repo::SqliteEmployeeRepository,
        routes,
        service::employee_service::EmployeeServiceImpl,
    };
    use actix_web::{App, http::StatusCode, middleware::NormalizePath, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn employee_service(seed: bool) -> Arc<dyn EmployeeService> {
        let pool = test_pool().await;
        if seed {
            seed_demo_data(&pool).await.unwrap();
        }
        let repo = Arc::new(SqliteEmployeeRepository::new(pool, DeleteMode::Soft));
        Arc::new(EmployeeServiceImpl::new(repo))
    }

    macro_rules! app {
        ($seed:expr) => {
            test::init_service(
                App::new()
                    .wrap(NormalizePath::trim())
                    .app_data(web::Data::from(employee_service($seed).await))
                    .configure(|cfg| routes::configure(cfg, "/api/v1")),
            )
            .await
        };
    }

    fn john() -> Value {
        json!({"name": "John", "email": "john@example.com", "position": "Dev", "salary": 60000})
    }

    #[actix_web::test]
    async fn create_returns_201_with_assigned_id() {
        let app = app!(false);

        let req = test::TestRequest::post()
            .uri("/api/v1/employees/")
            .set_json(john())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "John");
        assert_eq!(body["email"], "john@example.com");
        assert_eq!(body["position"], "Dev");
        assert_eq!(body["salary"], 60000.0);
        assert!(body["join_date"].is_string());
        assert!(body["deleted_at"].is_null());
    }

    #[actix_web::test]
    async fn get_missing_returns_404_with_error_body() {
        let app = app!(false);

        let req = test::TestRequest::get().uri("/api/v1/employees/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "employee not found"}));
    }

    #[actix_web::test]
    async fn list_returns_seeded_rows() {
        let app = app!(true);

        let req = test::TestRequest::get().uri("/api/v1/employees/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Vec<Employee> = test::read_body_json(resp).await;
        assert_eq!(body.len(), 5);
    }

    #[actix_web::test]
    async fn list_on_empty_store_is_empty_array() {
        let app = app!(false);

        let req = test::TestRequest::get().uri("/api/v1/employees").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn create_then_get_round_trips() {
        let app = app!(false);

        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .set_json(json!({
                "name": "Grace",
                "email": "grace@example.com",
                "position": "Architect",
                "salary": 120000.5,
                "join_date": "2022-05-01T08:30:00Z"
            }))
            .to_request();
        let created: Employee = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/employees/{}", created.id))
            .to_request();
        let fetched: Employee = test::call_and_read_body_json(&app, req).await;

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Grace");
        assert_eq!(fetched.salary, 120000.5);
        assert_eq!(fetched.join_date.to_rfc3339(), "2022-05-01T08:30:00+00:00");
    }

    #[actix_web::test]
    async fn invalid_ids_are_400() {
        let app = app!(true);

        for uri in ["/api/v1/employees/abc", "/api/v1/employees/-1"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }

        let req = test::TestRequest::put()
            .uri("/api/v1/employees/x1")
            .set_json(john())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete().uri("/api/v1/employees/1.5").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn invalid_bodies_are_400_json() {
        let app = app!(false);

        let bodies = [
            json!({"email": "john@example.com", "position": "Dev", "salary": 1}),
            json!({"name": "John", "email": "not-an-email", "position": "Dev", "salary": 1}),
            json!({"name": "", "email": "john@example.com", "position": "Dev", "salary": 1}),
            json!({"name": "John", "email": "john@example.com", "position": "Dev", "salary": -5}),
            json!({"name": "John", "email": "john@example.com", "position": "Dev", "salary": "lots"}),
        ];

        for body in bodies {
            let req = test::TestRequest::post()
                .uri("/api/v1/employees/")
                .set_json(&body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");

            let err: Value = test::read_body_json(resp).await;
            assert!(err["error"].is_string(), "{body}");
        }

        let req = test::TestRequest::post()
            .uri("/api/v1/employees/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_changes_fields_and_keeps_identity() {
        let app = app!(true);

        let req = test::TestRequest::get().uri("/api/v1/employees/2").to_request();
        let before: Employee = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/v1/employees/2")
            .set_json(json!({
                "name": "Bob J.",
                "email": "bobj@example.com",
                "position": "Lead Designer",
                "salary": 70000
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let after: Employee = test::read_body_json(resp).await;
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.join_date, before.join_date);
        assert_eq!(after.name, "Bob J.");
        assert_eq!(after.position, "Lead Designer");
        assert_eq!(after.salary, 70000.0);
    }

    #[actix_web::test]
    async fn update_with_join_date_overwrites_it() {
        let app = app!(true);

        let req = test::TestRequest::get().uri("/api/v1/employees/1").to_request();
        let before: Employee = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/v1/employees/1")
            .set_json(json!({
                "name": "Alice Smith",
                "email": "alice@example.com",
                "position": "Developer",
                "salary": 70000,
                "join_date": "2020-01-02T03:04:05Z"
            }))
            .to_request();
        let updated: Employee = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.join_date.to_rfc3339(), "2020-01-02T03:04:05+00:00");

        let req = test::TestRequest::get().uri("/api/v1/employees/1").to_request();
        let fetched: Employee = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.join_date, updated.join_date);
        assert_eq!(fetched.id, before.id);
        assert_eq!(fetched.created_at, before.created_at);
    }

    #[actix_web::test]
    async fn storage_failure_is_500_without_details() {
        let pool = test_pool().await;
        let repo = Arc::new(SqliteEmployeeRepository::new(pool.clone(), DeleteMode::Soft));
        let service: Arc<dyn EmployeeService> = Arc::new(EmployeeServiceImpl::new(repo));
        let app = test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(web::Data::from(service))
                .configure(|cfg| routes::configure(cfg, "/api/v1")),
        )
        .await;

        pool.close().await;

        let req = test::TestRequest::get().uri("/api/v1/employees").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"error": "Something went wrong, contact the system admin"})
        );
    }

    #[actix_web::test]
    async fn update_and_delete_missing_are_404() {
        let app = app!(false);

        let req = test::TestRequest::put()
            .uri("/api/v1/employees/999")
            .set_json(john())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/api/v1/employees/999").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_then_get_is_404() {
        let app = app!(true);

        let req = test::TestRequest::delete().uri("/api/v1/employees/3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": "Employee deleted successfully"}));

        let req = test::TestRequest::get().uri("/api/v1/employees/3").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/v1/employees/").to_request();
        let remaining: Vec<Employee> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(remaining.len(), 4);
        assert!(remaining.iter().all(|e| e.id != 3));
    }
}
