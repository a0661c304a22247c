use crate::{api::employee, error::AppError};
use actix_web::{HttpRequest, error::JsonPayloadError, web};
use tracing::debug;

/// Turns body extraction failures into the same `{"error": ...}` 400 the handlers produce.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "Rejected request body");
    AppError::Validation(format!("invalid request body: {err}")).into()
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.service(
        web::scope(api_prefix)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            ),
    );
}
