use super::parent_mapping::ParentMapping;
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::collections::BTreeMap;

/// JSON key used for mappings without a recognized parent category.
pub const UNGROUPED_KEY: &str = "ungrouped";

/// Parent mappings bucketed by `parent_id`.
///
/// Buckets keep insertion order. Category keys iterate in sorted order with
/// the ungrouped bucket first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroups {
    buckets: BTreeMap<Option<String>, Vec<ParentMapping>>,
}

impl CategoryGroups {
    pub fn push(&mut self, mapping: ParentMapping) {
        self.buckets
            .entry(mapping.parent_id.clone())
            .or_default()
            .push(mapping);
    }

    /// Bucket for `category`; `None` addresses the ungrouped bucket.
    pub fn get(&self, category: Option<&str>) -> Option<&[ParentMapping]> {
        self.buckets
            .get(&category.map(str::to_string))
            .map(Vec::as_slice)
    }

    /// Number of categories, counting the ungrouped bucket if present.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of mappings across all buckets.
    pub fn total_mappings(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &[ParentMapping])> {
        self.buckets
            .iter()
            .map(|(category, mappings)| (category.as_deref(), mappings.as_slice()))
    }
}

impl FromIterator<ParentMapping> for CategoryGroups {
    fn from_iter<I: IntoIterator<Item = ParentMapping>>(iter: I) -> Self {
        let mut groups = CategoryGroups::default();
        for mapping in iter {
            groups.push(mapping);
        }
        groups
    }
}

impl Serialize for CategoryGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (category, mappings) in &self.buckets {
            map.serialize_entry(category.as_deref().unwrap_or(UNGROUPED_KEY), mappings)?;
        }
        map.end()
    }
}
