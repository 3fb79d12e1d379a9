//! Application startup and lifecycle management.

use crate::config::TraitServiceConfig;
use crate::handlers;
use crate::services::{GwasCatalogClient, TraitPipeline};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use service_core::observability::extract_traceparent;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: TraitServiceConfig,
    pub pipeline: Arc<TraitPipeline>,
}

/// Build the HTTP router around an existing state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/traits/:gene_id", get(handlers::unique_traits))
        .route(
            "/api/traits/parents/:gene_id",
            get(handlers::traits_grouped_by_parent),
        )
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");
                let traceparent = extract_traceparent(request.headers());

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    traceparent = traceparent.as_deref().unwrap_or("-"),
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        // Browser clients call from arbitrary origins, with credentials.
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Binds the listener immediately, so `port()` is usable before the
    /// server runs (port 0 picks a free port for tests).
    pub async fn build(config: TraitServiceConfig) -> Result<Self, AppError> {
        let catalog = GwasCatalogClient::new(config.catalog.clone());
        let pipeline = Arc::new(TraitPipeline::new(Arc::new(catalog)));

        tracing::info!(
            traits_base_url = %config.catalog.traits_base_url,
            parent_mapping_base_url = %config.catalog.parent_mapping_base_url,
            parent_mapping_timeout_secs = config.catalog.parent_mapping_timeout.as_secs(),
            "GWAS catalog client configured"
        );

        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Trait service listening on port {}", port);

        let state = AppState { config, pipeline };

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
