//! Proxy over the GWAS catalog: unique traits per gene, and the same traits
//! grouped by parent category.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
