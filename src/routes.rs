use crate::{
    api::{attendance, company, health},
    config::Config,
    error::ApiError,
    utils::client_ip::ClientIpKeyExtractor,
};
use actix_governor::{Governor, GovernorConfigBuilder, governor::middleware::NoOpMiddleware};
use actix_web::{error::JsonPayloadError, guard, web};
use std::sync::Arc;

pub type SubmitLimiter = Arc<Governor<ClientIpKeyExtractor, NoOpMiddleware>>;

/// Per-client limiter for submissions; at least one request per minute is
/// always allowed. Build it once and hand clones to every worker so they
/// share one budget.
pub fn build_submit_limiter(requests_per_min: u32) -> SubmitLimiter {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(ClientIpKeyExtractor)
        .finish()
        .expect("limiter period and burst are non-zero");
    Arc::new(Governor::new(&cfg))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, submit_limiter: SubmitLimiter) {
    let json_config = web::JsonConfig::default()
        .limit(config.max_payload_bytes)
        .error_handler(|err, _req| {
            let err = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    ApiError::PayloadTooLarge
                }
                JsonPayloadError::ContentType => ApiError::validation("Expected application/json"),
                other => ApiError::validation(format!("Invalid JSON body: {other}")),
            };
            err.into()
        });

    cfg.service(health::health);

    cfg.service(
        web::scope(&config.api_prefix)
            .app_data(json_config)
            .service(
                web::scope("/companies")
                    // /companies
                    .service(
                        web::resource("")
                            .route(web::get().to(company::list_companies))
                            .route(web::post().to(company::create_company)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/export
                    .service(
                        web::resource("/export")
                            .route(web::get().to(attendance::export_attendance)),
                    )
                    // /attendance, split by method so only submissions are rate limited
                    .service(
                        web::resource("")
                            .guard(guard::Get())
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    .service(
                        web::resource("")
                            .guard(guard::Post())
                            .wrap(submit_limiter)
                            .route(web::post().to(attendance::create_attendance)),
                    ),
            ),
    );
}
