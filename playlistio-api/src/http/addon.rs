//! Stremio addon resources
//!
//! Every failure is logged and answered with the resource's empty shape and
//! status 200, so a bad configuration never surfaces as an error in Stremio.
//! Path rejections (segments that percent-decode to invalid UTF-8) take the
//! same route.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use playlistio_core::addon::{identifier, resolve_catalog, resolve_meta, token};
use playlistio_core::Error;

use crate::http::AppState;

const JSON_SUFFIX: &str = ".json";

fn strip_json(segment: &str) -> &str {
    segment.strip_suffix(JSON_SUFFIX).unwrap_or(segment)
}

/// Unwrap extracted path parameters, turning a rejection into a core error
pub(crate) fn path_params<T>(path: Result<Path<T>, PathRejection>) -> Result<T, Error> {
    path.map(|Path(params)| params)
        .map_err(|rejection| Error::InvalidInput(rejection.body_text()))
}

/// Foreign ids reach us whenever another addon shares a type; only log those
/// at debug.
fn log_failure(resource: &'static str, id: &str, err: &Error) {
    if matches!(err, Error::InvalidIdentifier(_)) && !identifier::has_prefix(id) {
        tracing::debug!(resource, id, error = %err, "Ignoring foreign identifier");
    } else {
        tracing::warn!(resource, id, error = %err, "Failed to resolve addon resource");
    }
}

/// `GET /{config}/manifest.json`
pub async fn manifest(
    State(state): State<AppState>,
    config: Result<Path<String>, PathRejection>,
) -> Response {
    let result = path_params(config)
        .and_then(|config| token::decode_segment(&config))
        .and_then(|config| state.manifest.build(&config));

    match result {
        Ok(manifest) => Json(manifest).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to build manifest");
            Json(Value::Object(Map::new())).into_response()
        }
    }
}

/// `GET /{config}/catalog/{type}/{id}.json`
pub async fn catalog(params: Result<Path<(String, String, String)>, PathRejection>) -> Response {
    match path_params(params) {
        Ok((config, _content_type, id)) => catalog_response(&config, strip_json(&id)),
        Err(err) => empty_catalog("", &err),
    }
}

/// `GET /{config}/catalog/{type}/{id}/{extra}.json`; extra arguments are ignored
pub async fn catalog_with_extra(
    params: Result<Path<(String, String, String, String)>, PathRejection>,
) -> Response {
    match path_params(params) {
        Ok((config, _content_type, id, _extra)) => catalog_response(&config, &id),
        Err(err) => empty_catalog("", &err),
    }
}

fn catalog_response(config: &str, id: &str) -> Response {
    match token::decode_segment(config).and_then(|config| resolve_catalog(id, &config)) {
        Ok(catalog) => Json(catalog).into_response(),
        Err(err) => empty_catalog(id, &err),
    }
}

fn empty_catalog(id: &str, err: &Error) -> Response {
    log_failure("catalog", id, err);
    Json(json!({ "metas": [] })).into_response()
}

/// `GET /{config}/meta/{type}/{id}.json`
pub async fn meta(
    State(state): State<AppState>,
    params: Result<Path<(String, String, String)>, PathRejection>,
) -> Response {
    let (config, meta_type, id) = match path_params(params) {
        Ok(params) => params,
        Err(err) => return empty_meta("", &err),
    };
    let id = strip_json(&id);

    let result = match token::decode_segment(&config) {
        Ok(config) => resolve_meta(state.source.as_ref(), &meta_type, id, &config).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(meta) => Json(meta).into_response(),
        Err(err) => empty_meta(id, &err),
    }
}

fn empty_meta(id: &str, err: &Error) -> Response {
    log_failure("meta", id, err);
    Json(json!({ "meta": {} })).into_response()
}
