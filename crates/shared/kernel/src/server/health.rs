use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::{Json, response::IntoResponse};
use quire_database::Database;
use quire_derive::{api_handler, api_model};
use quire_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;

#[api_model]
/// Health check response
pub(super) struct HealthResponse {
    /// `up` or `degraded`
    status: String,
    /// `up` or `down`
    database: String,
    /// Version
    version: String,
    /// Uptime in seconds
    uptime: u64,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service and database are up", body = HealthResponse),
        (status = SERVICE_UNAVAILABLE, description = "Database unreachable", body = HealthResponse),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(db): State<Database>) -> impl IntoResponse {
    let db_up = db.health().await.is_ok();
    let (code, status) =
        if db_up { (StatusCode::OK, "up") } else { (StatusCode::SERVICE_UNAVAILABLE, "degraded") };

    let body = HealthResponse {
        status: status.to_owned(),
        database: if db_up { "up" } else { "down" }.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: START_TIME.elapsed().as_secs(),
    };

    (
        code,
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
