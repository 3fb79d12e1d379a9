use crate::services::get_metrics;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const WELCOME_MESSAGE: &str = "GWAS catalog proxy server";

pub async fn index() -> Json<&'static str> {
    Json(WELCOME_MESSAGE)
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "trait-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Nothing to warm up; ready as soon as the listener is bound.
pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
