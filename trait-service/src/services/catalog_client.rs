//! GWAS catalog HTTP client.
//!
//! Two read-only endpoints are used: the gene trait listing and the per-trait
//! parent mapping. Failures are never retried and error bodies are not read.

use crate::config::CatalogConfig;
use crate::models::{PagedTraitResponse, ParentMappingResponse};
use crate::services::error::CatalogError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Page size requested from the trait listing so one call returns every trait.
pub const TRAIT_PAGE_SIZE: usize = 5000;

/// Source of trait listings and parent mappings.
#[async_trait]
pub trait TraitCatalog: Send + Sync {
    async fn fetch_traits(&self, gene_id: &str) -> Result<PagedTraitResponse, CatalogError>;

    async fn fetch_parent_mapping(
        &self,
        trait_id: &str,
    ) -> Result<ParentMappingResponse, CatalogError>;
}

/// [`TraitCatalog`] backed by the public GWAS catalog REST APIs.
#[derive(Clone)]
pub struct GwasCatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl GwasCatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn traits_url(&self, gene_id: &str) -> Url {
        let mut url = endpoint_url(&self.config.traits_base_url, &["genes", gene_id, "traits"]);
        url.query_pairs_mut()
            .append_pair("size", &TRAIT_PAGE_SIZE.to_string());
        url
    }

    pub fn parent_mapping_url(&self, trait_id: &str) -> Url {
        endpoint_url(
            &self.config.parent_mapping_base_url,
            &["parentMapping", trait_id],
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
        resource: String,
        timeout: Option<Duration>,
    ) -> Result<T, CatalogError> {
        let mut request = self.client.traced_get(url.clone());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "Failed to reach GWAS catalog");
            record_upstream_call(endpoint, "error");
            CatalogError::Transport(e)
        })?;

        let status = response.status();
        record_upstream_call(endpoint, status.as_str());

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "GWAS catalog returned an error status");
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                resource,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| CatalogError::MalformedResponse(format!("{}: {}", resource, e)))
    }
}

#[async_trait]
impl TraitCatalog for GwasCatalogClient {
    /// No timeout is applied here; a stalled upstream holds the request open.
    #[tracing::instrument(skip(self))]
    async fn fetch_traits(&self, gene_id: &str) -> Result<PagedTraitResponse, CatalogError> {
        let url = self.traits_url(gene_id);
        self.get_json("traits", url, format!("gene {}", gene_id), None)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_parent_mapping(
        &self,
        trait_id: &str,
    ) -> Result<ParentMappingResponse, CatalogError> {
        let url = self.parent_mapping_url(trait_id);
        self.get_json(
            "parent_mapping",
            url,
            format!("trait {}", trait_id),
            Some(self.config.parent_mapping_timeout),
        )
        .await
    }
}

/// Append percent-encoded `segments` to `base`.
fn endpoint_url(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Config only admits URLs that can be a base, so this always applies.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn record_upstream_call(endpoint: &'static str, status: &str) {
    metrics::counter!(
        "catalog_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}
