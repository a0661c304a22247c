use crate::api::employee::{EmployeeInput, MessageResponse};
use crate::error::ErrorResponse;
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management API",
        version = "1.0.0",
        description = r#"
## Employee Management API

Create, read, update and delete employee records.

### Response Format
- JSON bodies in and out
- Errors are returned as `{"error": "<message>"}` with a 400, 404 or 500 status

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee
    ),
    components(
        schemas(
            Employee,
            EmployeeInput,
            MessageResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;

const DOCUMENTED_PREFIX: &str = "/api/v1";

/// The OpenAPI document with its paths moved under the configured `API_PREFIX`.
pub fn openapi_with_prefix(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let prefix = api_prefix.trim_end_matches('/');

    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| {
            let moved = path
                .strip_prefix(DOCUMENTED_PREFIX)
                .map(|rest| format!("{prefix}{rest}"));
            (moved.unwrap_or(path), item)
        })
        .collect();

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_all_employee_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/api/v1/employees/"));
        assert!(paths.contains(&"/api/v1/employees/{id}"));
    }

    #[test]
    fn follows_a_custom_prefix() {
        let doc = openapi_with_prefix("/hr/");
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&"/hr/employees/"));
        assert!(paths.contains(&"/hr/employees/{id}"));
    }
}
