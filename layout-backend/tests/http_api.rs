use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use layout_backend::{create_app, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_app(&ServerConfig::default()).unwrap()
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn zone(id: &str, x: f64, y: f64, w: f64, h: f64) -> Value {
    json!({"zoneId": id, "name": id, "type": "room", "x": x, "y": y, "w": w, "h": h})
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["vision_enabled"], false);
}

#[tokio::test]
async fn test_normalize_reports_dropped_zone() {
    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({
            "canvas": {"width": 300, "height": 300},
            "zones": [zone("a", 0.0, 0.0, 100.0, 100.0), zone("b", 10.0, 0.0, 100.0, 100.0)]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zones"].as_array().unwrap().len(), 1);
    assert_eq!(body["zones"][0]["zoneId"], "a");
    assert_eq!(body["report"]["dropped"], json!(["b"]));
}

#[tokio::test]
async fn test_normalize_applies_request_config() {
    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({
            "canvas": {"width": 300, "height": 300},
            "zones": [zone("tiny", 0.0, 0.0, 10.0, 10.0)],
            "config": {"min_zone_dimension": 80}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zones"][0]["w"], 80.0);
    assert_eq!(body["zones"][0]["h"], 80.0);
}

#[tokio::test]
async fn test_normalize_rejects_bad_input() {
    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({"canvas": {"width": 0, "height": 300}, "zones": []}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_CANVAS");

    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({
            "canvas": {"width": 300, "height": 300},
            "zones": [zone("a", 0.0, 0.0, 100.0, 100.0), zone("a", 150.0, 0.0, 100.0, 100.0)]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE_ZONE_ID");

    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({
            "canvas": {"width": 300, "height": 300},
            "zones": [],
            "config": {"max_overlap": 1.5}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_CONFIG");
}

#[tokio::test]
async fn test_normalize_rejects_non_positive_sizes() {
    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({
            "canvas": {"width": 300, "height": 300},
            "zones": [zone("neg", 100.0, 100.0, -40.0, 0.0)],
            "config": {"min_zone_dimension": 0}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_CONFIG");

    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({
            "canvas": {"width": 300, "height": 300},
            "zones": [zone("neg", 100.0, 100.0, -40.0, 0.0)]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ZONE");

    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({
            "canvas": {"width": 300, "height": 300},
            "zones": [zone("a", 0.0, 0.0, 100.0, 100.0)],
            "config": {"min_zone_dimension": 0}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_CONFIG");
}

#[tokio::test]
async fn test_auto_place_rejects_zero_area_zone() {
    let (status, body) = post_json(
        app(),
        "/furniture/auto-place",
        json!({"zones": [zone("flat", 0.0, 0.0, 200.0, 0.0)]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ZONE");
}

#[tokio::test]
async fn test_normalize_rejects_too_many_zones() {
    let zones: Vec<Value> = (0..501)
        .map(|i| zone(&format!("z{}", i), 0.0, 0.0, 60.0, 60.0))
        .collect();
    let (status, body) = post_json(
        app(),
        "/zones/normalize",
        json!({"canvas": {"width": 300, "height": 300}, "zones": zones}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INPUT_TOO_LARGE");
}

#[tokio::test]
async fn test_import_chatty_model_reply() {
    let reply = "Here is the analysis:\n```json\n{\"totalArea\": 50, \
                 \"dimensions\": {\"width\": 10, \"height\": 5}, \"zones\": [\
                 {\"name\": \"Living\", \"zoneId\": \"living\", \"x\": 0, \"y\": 0, \"w\": 60, \
                 \"h\": 100, \"type\": \"living\", \"suggestedFurniture\": [\"sofa\"]}, \
                 {\"name\": \"Kitchen\", \"zoneId\": \"kitchen\", \"x\": 60, \"y\": 0, \"w\": 40, \
                 \"h\": 100, \"type\": \"kitchen\"}], \"scale\": 1}\n```\nAnything else?";

    let (status, body) = post_json(app(), "/zones/import", json!({"response": reply})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["canvas"]["width"], 1000.0);
    assert_eq!(body["canvas"]["height"], 500.0);
    assert_eq!(body["zones"][1]["x"], 600.0);
    assert_eq!(body["zones"][1]["w"], 400.0);
    assert_eq!(body["furniture"][0]["zoneId"], "living");
    assert_eq!(body["report"]["dropped"], json!([]));
}

#[tokio::test]
async fn test_import_rejects_unparseable_reply() {
    let (status, body) = post_json(
        app(),
        "/zones/import",
        json!({"response": "Sorry, I cannot see a floor plan in this image."}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_ANALYSIS");
}

#[tokio::test]
async fn test_analyze_without_api_key_is_unavailable() {
    let (status, body) = post_json(app(), "/zones/analyze", json!({"image": "AAAA"})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "VISION_UNAVAILABLE");
}

#[tokio::test]
async fn test_template_layout() {
    let (status, body) = post_json(
        app(),
        "/zones/template",
        json!({"template": "studio", "width": 1000, "height": 800}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zones"].as_array().unwrap().len(), 4);
    assert_eq!(body["zones"][0]["zoneId"], "living");
    assert_eq!(body["zones"][0]["w"], 600.0);
    assert!(!body["furniture"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_drop_in_screen_space() {
    let (status, body) = post_json(
        app(),
        "/furniture/drop",
        json!({
            "item": {
                "id": "chair-1", "type": "chair", "x": 0, "y": 0, "w": 40, "h": 40, "r": 95
            },
            "x": 250,
            "y": 50,
            "scale": 0.5,
            "rotation_step": 90,
            "zones": [
                zone("living", 0.0, 0.0, 400.0, 300.0),
                zone("kitchen", 400.0, 0.0, 200.0, 300.0)
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["x"], 480.0);
    assert_eq!(body["y"], 80.0);
    assert_eq!(body["zoneId"], "kitchen");
    assert_eq!(body["r"], 90.0);
}

#[tokio::test]
async fn test_drop_outside_zones_clears_assignment() {
    let (status, body) = post_json(
        app(),
        "/furniture/drop",
        json!({
            "item": {
                "id": "lamp", "type": "lamp", "x": 0, "y": 0, "w": 30, "h": 30, "zoneId": "living"
            },
            "x": 900,
            "y": 900,
            "zones": [zone("living", 0.0, 0.0, 400.0, 300.0)]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("zoneId").is_none());
}

#[tokio::test]
async fn test_auto_place() {
    let mut living = zone("living", 0.0, 0.0, 500.0, 400.0);
    living["suggestedFurniture"] = json!(["sofa", "coffee_table"]);
    let (status, body) =
        post_json(app(), "/furniture/auto-place", json!({"zones": [living]})).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "living-sofa-1");
}
