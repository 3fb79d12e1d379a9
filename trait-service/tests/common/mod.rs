#![allow(dead_code)]

use reqwest::Url;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::time::Duration;
use trait_service::config::{CatalogConfig, ObservabilityConfig, TraitServiceConfig};
use trait_service::Application;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix the fake catalog serves trait listings under.
pub const TRAITS_PREFIX: &str = "/gwas/api/v2";
/// Path prefix the fake catalog serves parent mappings under.
pub const PARENTS_PREFIX: &str = "/gwas/rest/api";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub catalog: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_parent_timeout(Duration::from_secs(30)).await
    }

    pub async fn spawn_with_parent_timeout(parent_mapping_timeout: Duration) -> Self {
        let catalog = MockServer::start().await;

        let config = TraitServiceConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port for testing
            },
            catalog: CatalogConfig {
                traits_base_url: Url::parse(&format!("{}{}", catalog.uri(), TRAITS_PREFIX))
                    .unwrap(),
                parent_mapping_base_url: Url::parse(&format!(
                    "{}{}",
                    catalog.uri(),
                    PARENTS_PREFIX
                ))
                .unwrap(),
                parent_mapping_timeout,
            },
            observability: ObservabilityConfig {
                log_level: "debug".to_string(),
                otlp_endpoint: None,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            catalog,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Serve `body` as the trait listing for `gene_id`.
    pub async fn mount_traits(&self, gene_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{}/genes/{}/traits", TRAITS_PREFIX, gene_id)))
            .and(query_param("size", "5000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.catalog)
            .await;
    }

    pub async fn mount_traits_status(&self, gene_id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("{}/genes/{}/traits", TRAITS_PREFIX, gene_id)))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream detail"))
            .mount(&self.catalog)
            .await;
    }

    /// Serve a parent mapping for `trait_id` pointing at `parent_uri`.
    pub async fn mount_parent(&self, trait_id: &str, parent_uri: &str) {
        self.mount_parent_response(
            trait_id,
            ResponseTemplate::new(200).set_body_json(parent_mapping(trait_id, parent_uri)),
        )
        .await;
    }

    pub async fn mount_parent_response(&self, trait_id: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("{}/parentMapping/{}", PARENTS_PREFIX, trait_id)))
            .respond_with(response)
            .mount(&self.catalog)
            .await;
    }

    /// Requests the fake catalog received for parent mappings.
    pub async fn parent_requests(&self) -> usize {
        self.catalog
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path().contains("/parentMapping/"))
            .count()
    }
}

/// Trait listing body with one embedded entry per group.
pub fn trait_listing(groups: &[&[&str]]) -> Value {
    let efos: Vec<Value> = groups
        .iter()
        .map(|keys| {
            let traits: Vec<Value> = keys
                .iter()
                .map(|key| {
                    json!({
                        "key": key,
                        "label": format!("{} label", key),
                        "uri": format!("http://www.ebi.ac.uk/efo/{}", key)
                    })
                })
                .collect();
            json!({ "efoTraits": traits })
        })
        .collect();

    json!({
        "page": {
            "size": 5000,
            "totalElements": groups.len(),
            "totalPages": 1,
            "number": 0
        },
        "_embedded": { "efos": efos }
    })
}

pub fn parent_mapping(trait_id: &str, parent_uri: &str) -> Value {
    json!({
        "trait": format!("{} label", trait_id),
        "parent": "Parent category",
        "parentUri": parent_uri,
        "colourLabel": "#B33232"
    })
}
