use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use base64::Engine;
use floorplan_vision::{import_analysis, parse_analysis, FloorplanAnalysis, ImportedLayout};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use zone_geometry::{
    auto_place_furniture, drop_item, normalize_zones_with_report, px_to_cm, snap_rotation, Canvas,
    FurnitureItem, LayoutTemplate, NormalizeReport, NormalizerConfig, Zone,
};

use crate::{api_error, ApiError, AppState, MAX_COORDINATE_VALUE, MAX_ZONES};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    vision_enabled: bool,
}

pub(crate) async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        vision_enabled: state.analyzer.is_some(),
    })
}

fn is_valid_coordinate(value: f64) -> bool {
    value.is_finite() && value.abs() <= MAX_COORDINATE_VALUE
}

fn validate_canvas(canvas: &Canvas) -> Result<(), ApiError> {
    let valid = |v: f64| is_valid_coordinate(v) && v > 0.0;
    if !valid(canvas.width) || !valid(canvas.height) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "INVALID_CANVAS",
            format!(
                "Canvas width and height must be positive finite numbers, got {} x {}",
                canvas.width, canvas.height
            ),
        ));
    }
    Ok(())
}

fn validate_config(config: &NormalizerConfig) -> Result<(), ApiError> {
    let ratio_ok = |r: f64| r.is_finite() && (0.0..=1.0).contains(&r);
    if !is_valid_coordinate(config.min_zone_dimension)
        || config.min_zone_dimension <= 0.0
        || !ratio_ok(config.max_overlap)
        || !ratio_ok(config.reposition_max_overlap)
    {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "INVALID_CONFIG",
            "min_zone_dimension must be positive and overlap thresholds within [0, 1]",
        ));
    }
    Ok(())
}

fn validate_zone_count(count: usize) -> Result<(), ApiError> {
    if count > MAX_ZONES {
        warn!("Request rejected: too many zones ({} > {})", count, MAX_ZONES);
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "INPUT_TOO_LARGE",
            format!("Too many zones. Maximum allowed: {}. Received: {}", MAX_ZONES, count),
        ));
    }
    Ok(())
}

fn validate_zones(zones: &[Zone]) -> Result<(), ApiError> {
    validate_zone_count(zones.len())?;

    let mut seen = HashSet::new();
    for (idx, zone) in zones.iter().enumerate() {
        let rect = zone.rect();
        let in_range = [rect.x, rect.y, rect.w, rect.h]
            .into_iter()
            .all(|v| v.abs() <= MAX_COORDINATE_VALUE);
        if !rect.is_finite() || !in_range {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_ZONE",
                format!(
                    "Invalid geometry in zone {}: coordinates must be finite and within [-{}, {}]",
                    idx, MAX_COORDINATE_VALUE, MAX_COORDINATE_VALUE
                ),
            ));
        }
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_ZONE",
                format!(
                    "Zone {} ({}) must have positive size, got {} x {}",
                    idx, zone.zone_id, rect.w, rect.h
                ),
            ));
        }
        if !seen.insert(zone.zone_id.as_str()) {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "DUPLICATE_ZONE_ID",
                format!("Duplicate zoneId '{}' in zone {}", zone.zone_id, idx),
            ));
        }
    }
    Ok(())
}

fn log_report(report: &NormalizeReport) {
    if !report.repositioned.is_empty() {
        info!("Repositioned zones: {:?}", report.repositioned);
    }
    if !report.dropped.is_empty() {
        warn!("Dropped unplaceable zones: {:?}", report.dropped);
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NormalizeRequest {
    canvas: Canvas,
    zones: Vec<Zone>,
    #[serde(default)]
    config: NormalizerConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct NormalizeResponse {
    zones: Vec<Zone>,
    report: NormalizeReport,
}

pub(crate) async fn normalize_handler(
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, ApiError> {
    info!("Received normalize request with {} zones", request.zones.len());

    validate_canvas(&request.canvas)?;
    validate_config(&request.config)?;
    validate_zones(&request.zones)?;

    let layout = normalize_zones_with_report(&request.zones, &request.canvas, &request.config);
    log_report(&layout.report);

    Ok(Json(NormalizeResponse {
        zones: layout.zones,
        report: layout.report,
    }))
}

fn import_validated(
    state: &AppState,
    analysis: &FloorplanAnalysis,
    config: &NormalizerConfig,
) -> Result<ImportedLayout, ApiError> {
    validate_config(config)?;
    validate_zone_count(analysis.zones.len())?;
    Ok(import_analysis(analysis, config, &state.catalog))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    /// Raw vision-model reply, possibly fenced or surrounded by prose
    response: String,
    #[serde(default)]
    config: NormalizerConfig,
}

pub(crate) async fn import_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportedLayout>, ApiError> {
    info!("Received import request ({} chars)", request.response.len());

    let analysis = parse_analysis(&request.response).map_err(|e| {
        warn!("Rejected model response: {:#}", e);
        api_error(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ANALYSIS", format!("{:#}", e))
    })?;

    Ok(Json(import_validated(&state, &analysis, &request.config)?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    /// Base64-encoded floor plan image, optionally as a data URI
    image: String,
    #[serde(default)]
    config: NormalizerConfig,
}

pub(crate) async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ImportedLayout>, ApiError> {
    info!("Received analyze request");

    let Some(analyzer) = state.analyzer.as_ref() else {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "VISION_UNAVAILABLE",
            "Vision import is not configured (OPENAI_API_KEY not set)",
        ));
    };

    // Accept both raw base64 and "data:image/png;base64,..." payloads
    let encoded = match request.image.split_once(";base64,") {
        Some((_, data)) if request.image.starts_with("data:") => data,
        _ => request.image.as_str(),
    };
    let image_bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| {
            warn!("Failed to decode base64 image: {}", e);
            api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_IMAGE",
                format!("Failed to decode base64 image: {}", e),
            )
        })?;

    info!("Image decoded, size: {} bytes", image_bytes.len());

    let analysis = analyzer.analyze_image(&image_bytes).await.map_err(|e| {
        warn!("Vision analysis failed: {:#}", e);
        api_error(StatusCode::BAD_GATEWAY, "VISION_FAILED", format!("{:#}", e))
    })?;

    Ok(Json(import_validated(&state, &analysis, &request.config)?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplateRequest {
    template: LayoutTemplate,
    /// Canvas width in cm
    width: f64,
    /// Canvas height in cm
    height: f64,
    #[serde(default)]
    config: NormalizerConfig,
}

pub(crate) async fn template_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TemplateRequest>,
) -> Result<Json<ImportedLayout>, ApiError> {
    info!(
        "Received template request: {} on {} x {} cm",
        request.template.as_str(),
        request.width,
        request.height
    );

    let canvas = Canvas::new(request.width, request.height);
    validate_canvas(&canvas)?;
    validate_config(&request.config)?;

    let zones = request.template.zones(&canvas);
    let layout = normalize_zones_with_report(&zones, &canvas, &request.config);
    log_report(&layout.report);
    let furniture = auto_place_furniture(&layout.zones, &state.catalog);

    Ok(Json(ImportedLayout {
        canvas,
        zones: layout.zones,
        report: layout.report,
        furniture,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DropRequest {
    item: FurnitureItem,
    /// Drop point; centimeters, or screen pixels when `scale` is set
    x: f64,
    y: f64,
    zones: Vec<Zone>,
    /// Pixels per centimeter of the screen the drop happened on
    #[serde(default)]
    scale: Option<f64>,
    /// Snap the item's rotation to this many degrees
    #[serde(default)]
    rotation_step: Option<f64>,
}

pub(crate) async fn drop_handler(
    Json(request): Json<DropRequest>,
) -> Result<Json<FurnitureItem>, ApiError> {
    if !is_valid_coordinate(request.x) || !is_valid_coordinate(request.y) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "INVALID_POINT",
            "Drop point must be finite and within range",
        ));
    }
    validate_zones(&request.zones)?;

    let (x_cm, y_cm) = match request.scale {
        Some(scale) => (px_to_cm(request.x, scale), px_to_cm(request.y, scale)),
        None => (request.x, request.y),
    };

    let mut item = drop_item(&request.item, x_cm, y_cm, &request.zones);
    if let Some(step) = request.rotation_step {
        item.r = snap_rotation(item.r, step);
    }

    info!(
        "Dropped {} at ({}, {}) into {}",
        item.id,
        item.x,
        item.y,
        item.zone_id.as_deref().unwrap_or("no zone")
    );
    Ok(Json(item))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AutoPlaceRequest {
    zones: Vec<Zone>,
}

pub(crate) async fn auto_place_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AutoPlaceRequest>,
) -> Result<Json<Vec<FurnitureItem>>, ApiError> {
    validate_zones(&request.zones)?;

    let items = auto_place_furniture(&request.zones, &state.catalog);
    info!("Placed {} furniture items in {} zones", items.len(), request.zones.len());
    Ok(Json(items))
}
