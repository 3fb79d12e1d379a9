pub mod health;
pub mod traits;

pub use health::{health_check, index, metrics_endpoint, readiness_check};
pub use traits::{traits_grouped_by_parent, unique_traits};
