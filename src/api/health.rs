use crate::db::DocumentStore;
use actix_web::{HttpResponse, get, web};
use serde_json::json;
use std::sync::Arc;

/// Liveness plus store reachability. Connects the store if nothing has yet.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = Object, example = json!({
            "status": "ok", "store": "mysql"
        })),
        (status = 503, description = "Store unreachable", body = Object, example = json!({
            "status": "unavailable", "store": "mysql"
        }))
    ),
    tag = "Health"
)]
#[get("/health")]
pub async fn health(store: web::Data<Arc<dyn DocumentStore>>) -> HttpResponse {
    match store.connect().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "store": store.backend_tag()
        })),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unavailable",
                "store": store.backend_tag()
            }))
        }
    }
}
