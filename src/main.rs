use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod service;
mod utils;

use config::Config;
use service::{AttendanceService, CompanyService};

use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = db::open_store(&config);

    // Connect early so a bad DATABASE_URL shows up in the log at boot.
    // Requests connect on demand, so the server still starts.
    if let Err(e) = store.connect().await {
        warn!(error = %e, backend = store.backend_tag(), "Initial store connection failed");
    }

    let company_service = CompanyService::new(store.clone());
    let attendance_service = AttendanceService::new(store.clone(), config.require_known_company);

    let submit_limiter = routes::build_submit_limiter(config.rate_submit_per_min);
    let openapi = docs::openapi(&config.api_prefix);

    let server_addr = config.server_addr.clone();
    info!(addr = %server_addr, prefix = %config.api_prefix, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(Data::new(store.clone()))
            .app_data(Data::new(company_service.clone()))
            .app_data(Data::new(attendance_service.clone()))
            .configure(|cfg| routes::configure(cfg, &config, submit_limiter.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
