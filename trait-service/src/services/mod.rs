pub mod catalog_client;
pub mod error;
pub mod metrics;
pub mod pipeline;

pub use catalog_client::{GwasCatalogClient, TraitCatalog, TRAIT_PAGE_SIZE};
pub use error::{CatalogError, FETCH_FAILED_MESSAGE};
pub use self::metrics::{get_metrics, init_metrics};
pub use pipeline::{
    dedupe, extract_traits, flatten, group_by_category, resolve_parents, TraitPipeline,
};
