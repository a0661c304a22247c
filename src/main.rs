use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use std::sync::Arc;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod service;

use config::Config;
use db::init_db;
use repository::employee_repo::SqliteEmployeeRepository;
use service::employee_service::{EmployeeService, EmployeeServiceImpl};

use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Hello World!"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections)
        .await
        .context("failed to open the employee database")?;

    if config.seed_demo_data {
        db::seed_demo_data(&pool)
            .await
            .context("failed to seed demo employees")?;
    }

    let repo = Arc::new(SqliteEmployeeRepository::new(
        pool.clone(),
        config.delete_mode,
    ));
    let employee_service: Arc<dyn EmployeeService> = Arc::new(EmployeeServiceImpl::new(repo));
    let service_data = Data::from(employee_service);
    let api_prefix = config.api_prefix.clone();
    let openapi = docs::openapi_with_prefix(&api_prefix);

    HttpServer::new(move || {
        let api_prefix = api_prefix.clone();
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(service_data.clone())
            .service(index)
            .configure(move |cfg| routes::configure(cfg, &api_prefix))
    })
    .bind(&config.server_addr)
    .with_context(|| format!("failed to bind {}", config.server_addr))?
    .run()
    .await?;

    info!("Server stopped, closing database pool");
    pool.close().await;

    Ok(())
}
