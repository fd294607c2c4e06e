use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use floorplan_vision::FloorplanAnalyzer;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use zone_geometry::FurnitureCatalog;

pub mod config;
mod handlers;

pub use config::ServerConfig;

// Request limits to prevent DoS
pub const MAX_ZONES: usize = 500;
pub const MAX_COORDINATE_VALUE: f64 = 1_000_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        }),
    )
}

pub(crate) struct AppState {
    pub analyzer: Option<FloorplanAnalyzer>,
    pub catalog: FurnitureCatalog,
}

/// Create the Axum app with all routes and middleware
pub fn create_app(config: &ServerConfig) -> anyhow::Result<Router> {
    let analyzer = match &config.openai_api_key {
        Some(key) => {
            let analyzer = FloorplanAnalyzer::with_options(
                key.clone(),
                config.vision_model.clone(),
                config.vision_api_base.clone(),
                config.vision_timeout,
            )?;
            info!("Vision import enabled (model: {})", analyzer.model());
            Some(analyzer)
        }
        None => {
            warn!("OPENAI_API_KEY not set, /zones/analyze will return 503");
            None
        }
    };

    let state = Arc::new(AppState {
        analyzer,
        catalog: FurnitureCatalog::default(),
    });

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        // Fallback to Any only if no valid origins configured (not recommended for production)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    };

    Ok(Router::new()
        .route("/health", get(handlers::health_check))
        .route("/zones/normalize", post(handlers::normalize_handler))
        .route("/zones/import", post(handlers::import_handler))
        .route("/zones/analyze", post(handlers::analyze_handler))
        .route("/zones/template", post(handlers::template_handler))
        .route("/furniture/drop", post(handlers::drop_handler))
        .route("/furniture/auto-place", post(handlers::auto_place_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
