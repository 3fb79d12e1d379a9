use service_core::error::AppError;
use thiserror::Error;

/// Message returned to callers for every upstream failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Upstream returned {status} for {resource}")]
    UpstreamStatus { status: u16, resource: String },

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// One fetch of the parent fan-out failed, so the whole batch did.
    #[error("Parent mapping for {trait_id} failed: {source}")]
    ParentResolution {
        trait_id: String,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CatalogError {
    /// The upstream HTTP status behind this failure, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CatalogError::UpstreamStatus { status, .. } => Some(*status),
            CatalogError::ParentResolution { source, .. } => source.status_code(),
            CatalogError::MalformedResponse(_) | CatalogError::Transport(_) => None,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let status = err.status_code().unwrap_or(500);
        tracing::warn!(error = %err, status, "Catalog request failed");
        AppError::upstream(status, FETCH_FAILED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn join_failure_reports_the_inner_status() {
        let err = CatalogError::ParentResolution {
            trait_id: "EFO_0000001".to_string(),
            source: Box::new(CatalogError::UpstreamStatus {
                status: 503,
                resource: "trait EFO_0000001".to_string(),
            }),
        };
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn malformed_response_becomes_internal_error() {
        let app_error: AppError = CatalogError::MalformedResponse("short page".to_string()).into();
        match app_error {
            AppError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, FETCH_FAILED_MESSAGE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let app_error: AppError = CatalogError::UpstreamStatus {
            status: 404,
            resource: "gene ENSG00000000000".to_string(),
        }
        .into();
        assert!(matches!(
            app_error,
            AppError::Upstream { status, .. } if status == StatusCode::NOT_FOUND
        ));
    }
}
