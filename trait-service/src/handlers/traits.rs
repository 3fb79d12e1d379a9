use crate::models::{CategoryGroups, TraitRecord};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

/// `GET /api/traits/:gene_id`
pub async fn unique_traits(
    State(state): State<AppState>,
    Path(gene_id): Path<String>,
) -> Result<Json<Vec<TraitRecord>>, AppError> {
    let traits = state.pipeline.unique_traits(&gene_id).await?;
    Ok(Json(traits))
}

/// `GET /api/traits/parents/:gene_id`
///
/// The grouping is wrapped in a one-element array.
pub async fn traits_grouped_by_parent(
    State(state): State<AppState>,
    Path(gene_id): Path<String>,
) -> Result<Json<Vec<CategoryGroups>>, AppError> {
    let groups = state.pipeline.traits_grouped_by_parent(&gene_id).await?;
    Ok(Json(vec![groups]))
}
