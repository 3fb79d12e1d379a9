pub mod category;
pub mod parent_mapping;
pub mod trait_record;

pub use category::{CategoryGroups, UNGROUPED_KEY};
pub use parent_mapping::{
    is_known_category, parent_id_from_uri, ParentMapping, ParentMappingResponse,
    CATEGORY_PREFIXES, KNOWN_PARENT_CATEGORIES,
};
pub use trait_record::{EfoEntry, EmbeddedEfos, PageInfo, PagedTraitResponse, TraitRecord};
