//! Parent category mappings from `GET /parentMapping/{trait_id}`.

use serde::{Deserialize, Serialize};

/// Ontology prefixes a parent category id must start with.
pub const CATEGORY_PREFIXES: [&str; 2] = ["EFO_", "GO_"];

/// Parent categories the GWAS catalog currently groups traits under.
pub const KNOWN_PARENT_CATEGORIES: [&str; 17] = [
    "EFO_0000405",
    "EFO_0004324",
    "EFO_0004529",
    "EFO_0004503",
    "EFO_0000540",
    "EFO_0000589",
    "EFO_0000001",
    "EFO_0000408",
    "GO_0008150",
    "EFO_0004298",
    "EFO_0000319",
    "EFO_0000618",
    "EFO_0001444",
    "EFO_0000616",
    "EFO_0004872",
    "EFO_0004582",
    "EFO_0004732",
];

/// Raw upstream body. Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentMappingResponse {
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
    pub parent: Option<String>,
    pub parent_uri: Option<String>,
    pub colour_label: Option<String>,
}

/// A trait resolved to its parent category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentMapping {
    pub trait_id: String,
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
    pub parent: Option<String>,
    /// `None` means the trait is ungrouped.
    pub parent_id: Option<String>,
    pub colour_label: Option<String>,
}

impl ParentMapping {
    /// Build a mapping, replacing the upstream parent URI with its category id.
    pub fn from_response(trait_id: impl Into<String>, response: ParentMappingResponse) -> Self {
        Self {
            trait_id: trait_id.into(),
            trait_name: response.trait_name,
            parent: response.parent,
            parent_id: response.parent_uri.as_deref().and_then(parent_id_from_uri),
            colour_label: response.colour_label,
        }
    }
}

/// Take the final path segment of `uri` as a category id, provided it carries
/// one of [`CATEGORY_PREFIXES`] followed by something.
pub fn parent_id_from_uri(uri: &str) -> Option<String> {
    let segment = uri.trim_end_matches('/').rsplit('/').next()?;

    CATEGORY_PREFIXES
        .iter()
        .any(|prefix| segment.len() > prefix.len() && segment.starts_with(prefix))
        .then(|| segment.to_string())
}

pub fn is_known_category(parent_id: &str) -> bool {
    KNOWN_PARENT_CATEGORIES.contains(&parent_id)
}
