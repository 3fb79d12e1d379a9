//! Trait listing payloads from `GET /genes/{gene_id}/traits`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single ontology trait term associated with a gene.
///
/// Identity is `key`; every other upstream field rides along in `extra` and
/// is serialized back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRecord {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TraitRecord {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            extra: Map::new(),
        }
    }
}

/// Paged envelope returned by the trait listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedTraitResponse {
    pub page: PageInfo,
    /// Absent when the gene has no associated traits.
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedEfos>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_elements: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedEfos {
    pub efos: Vec<EfoEntry>,
}

/// One embedded listing entry; its traits are not yet flattened.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfoEntry {
    pub efo_traits: Vec<TraitRecord>,
}
