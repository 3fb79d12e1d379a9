//! Trait aggregation pipeline.
//!
//! `unique_traits`: fetch listing → extract → flatten → dedupe.
//! `traits_grouped_by_parent`: unique traits → concurrent parent fan-out →
//! group by parent category.
//!
//! Ordering rules:
//! - `dedupe` keeps keys in first-seen order and the last-seen record for each key.
//! - `resolve_parents` returns mappings in input order, whatever order the
//!   fetches finish in, so category buckets follow unique-trait order.

use crate::models::{
    is_known_category, CategoryGroups, ParentMapping, PagedTraitResponse, TraitRecord,
};
use crate::services::catalog_client::TraitCatalog;
use crate::services::error::CatalogError;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;

/// Take the first `count` listing entries as unflattened trait lists.
///
/// Fails rather than truncating when the page holds fewer than `count` entries.
pub fn extract_traits(
    response: PagedTraitResponse,
    count: usize,
) -> Result<Vec<Vec<TraitRecord>>, CatalogError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let entries = response.embedded.map(|e| e.efos).ok_or_else(|| {
        CatalogError::MalformedResponse(format!(
            "expected {} trait entries but the response has no _embedded block",
            count
        ))
    })?;

    if entries.len() < count {
        return Err(CatalogError::MalformedResponse(format!(
            "expected {} trait entries but the response has {}",
            count,
            entries.len()
        )));
    }

    Ok(entries
        .into_iter()
        .take(count)
        .map(|entry| entry.efo_traits)
        .collect())
}

pub fn flatten(groups: Vec<Vec<TraitRecord>>) -> Vec<TraitRecord> {
    groups.into_iter().flatten().collect()
}

/// One record per key: first-seen position, last-seen contents.
pub fn dedupe(records: Vec<TraitRecord>) -> Vec<TraitRecord> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<TraitRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(&record.key) {
            Some(&index) => unique[index] = record,
            None => {
                positions.insert(record.key.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

/// Fetch the parent mapping of every key concurrently.
///
/// All fetches run at once with no cap. The first failure ends the call and
/// drops the remaining in-flight requests; no partial result is returned.
pub async fn resolve_parents(
    catalog: &dyn TraitCatalog,
    trait_keys: &[String],
) -> Result<Vec<ParentMapping>, CatalogError> {
    metrics::histogram!("parent_fanout_width").record(trait_keys.len() as f64);

    let fetches = trait_keys.iter().map(|trait_id| async move {
        let response = catalog
            .fetch_parent_mapping(trait_id)
            .await
            .map_err(|source| CatalogError::ParentResolution {
                trait_id: trait_id.clone(),
                source: Box::new(source),
            })?;
        Ok::<_, CatalogError>(ParentMapping::from_response(trait_id.as_str(), response))
    });

    try_join_all(fetches).await
}

pub fn group_by_category(mappings: Vec<ParentMapping>) -> CategoryGroups {
    mappings
        .into_iter()
        .inspect(|mapping| {
            if let Some(parent_id) = mapping.parent_id.as_deref() {
                if !is_known_category(parent_id) {
                    tracing::debug!(
                        trait_id = %mapping.trait_id,
                        parent_id,
                        "Trait grouped under an unlisted parent category"
                    );
                }
            }
        })
        .collect()
}

/// Composes the catalog calls and transformations into the two proxy operations.
#[derive(Clone)]
pub struct TraitPipeline {
    catalog: Arc<dyn TraitCatalog>,
}

impl TraitPipeline {
    pub fn new(catalog: Arc<dyn TraitCatalog>) -> Self {
        Self { catalog }
    }

    #[tracing::instrument(skip(self))]
    pub async fn unique_traits(&self, gene_id: &str) -> Result<Vec<TraitRecord>, CatalogError> {
        let response = self.catalog.fetch_traits(gene_id).await?;
        let count = response.page.total_elements;

        let individual_traits = flatten(extract_traits(response, count)?);
        let individual_count = individual_traits.len();
        let unique_traits = dedupe(individual_traits);

        tracing::info!(
            entries = count,
            individual = individual_count,
            unique = unique_traits.len(),
            "Collected unique traits"
        );

        Ok(unique_traits)
    }

    #[tracing::instrument(skip(self))]
    pub async fn traits_grouped_by_parent(
        &self,
        gene_id: &str,
    ) -> Result<CategoryGroups, CatalogError> {
        let trait_keys: Vec<String> = self
            .unique_traits(gene_id)
            .await?
            .into_iter()
            .map(|record| record.key)
            .collect();

        let mappings = resolve_parents(self.catalog.as_ref(), &trait_keys).await?;
        let groups = group_by_category(mappings);

        tracing::info!(
            traits = trait_keys.len(),
            categories = groups.len(),
            "Grouped traits by parent category"
        );

        Ok(groups)
    }
}
