//! Manifest import endpoint used by the configuration page

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use playlistio_core::addon::{self, ImportedManifest};

use crate::http::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    pub url: String,
}

/// `GET /api/import?url=<manifest url>`
pub async fn import_manifest(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
) -> AppResult<Json<ImportedManifest>> {
    let imported = addon::import_manifest(state.source.as_ref(), query.url.trim())
        .await
        .inspect_err(|err| tracing::warn!(url = %query.url, error = %err, "Manifest import failed"))?;

    Ok(Json(imported))
}
