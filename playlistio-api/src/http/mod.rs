// Module: http
// Stremio addon routes plus the configuration page

pub mod addon;
pub mod configure;
pub mod error;
pub mod health;
pub mod import;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use playlistio_core::addon::ManifestBuilder;
use playlistio_core::provider::CatalogSource;
use playlistio_core::Config;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use configure::ConfigurePage;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub manifest: Arc<ManifestBuilder>,
    pub source: Arc<dyn CatalogSource>,
    pub configure: Arc<ConfigurePage>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn CatalogSource>) -> AppResult<Self> {
        let manifest = Arc::new(ManifestBuilder::new(&config.addon));
        Ok(Self {
            config: Arc::new(config),
            manifest,
            source,
            configure: Arc::new(ConfigurePage::new()?),
        })
    }
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health check endpoint (for monitoring probes)
        .merge(health::create_health_router())
        // Configuration page
        .route("/", get(configure::configure_page))
        .route("/configure", get(configure::configure_page))
        .route("/{config}/configure", get(configure::configure_page_with_config))
        .route("/api/import", get(import::import_manifest))
        // Stremio addon resources
        .route("/{config}/manifest.json", get(addon::manifest))
        .route("/{config}/catalog/{type}/{id}", get(addon::catalog))
        .route("/{config}/catalog/{type}/{id}/{extra}", get(addon::catalog_with_extra))
        .route("/{config}/meta/{type}/{id}", get(addon::meta));

    // Apply layers before state
    let router = router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http());

    // Apply state to all routes (must be last)
    router.with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(%message, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": "Internal server error",
            "message": message,
        })),
    )
        .into_response()
}
