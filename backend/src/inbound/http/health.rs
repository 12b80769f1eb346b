//! Health endpoint.
//!
//! ```text
//! GET /health
//! ```

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, web};

use crate::domain::{HealthReport, assess_health};
use crate::inbound::http::state::HttpState;

/// Report store connectivity for this instance.
///
/// Returns 200 only when the store answered its probe; every other state,
/// including degraded mode, is 503 with the same body shape. Responses are
/// never cached.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = HealthReport),
        (status = 503, description = "Store unreachable or not initialised", body = HealthReport)
    ),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let report = assess_health(state.store.as_ref(), state.clock.as_ref(), &state.health).await;
    let status = if report.status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    HttpResponse::build(status)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(report)
}
