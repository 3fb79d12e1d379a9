mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use std::sync::Arc;
use tower::util::ServiceExt;
use trait_service::config::{CatalogConfig, ObservabilityConfig, TraitServiceConfig};
use trait_service::services::{GwasCatalogClient, TraitPipeline};
use trait_service::{build_router, AppState};

#[tokio::test]
async fn index_returns_liveness_string() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: String = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, "GWAS catalog proxy server");
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "trait-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/ready").await;

    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let app = TestApp::spawn().await;

    let response = app.get("/metrics").await;

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

/// Router-level check that needs no network: CORS mirrors the caller's origin.
#[tokio::test]
async fn cors_allows_any_origin_with_credentials() {
    let config = TraitServiceConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        catalog: CatalogConfig::default(),
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        },
    };
    let pipeline = TraitPipeline::new(Arc::new(GwasCatalogClient::new(config.catalog.clone())));
    let app = build_router(AppState {
        config,
        pipeline: Arc::new(pipeline),
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
