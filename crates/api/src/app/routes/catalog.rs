use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::app::dto;
use crate::app::services::AppServices;

/// Sections and items with the form keys to submit counts under.
pub async fn get_catalog(Extension(services): Extension<Arc<AppServices>>) -> Json<dto::CatalogResponse> {
    Json(dto::catalog_to_response(services.catalog()))
}
