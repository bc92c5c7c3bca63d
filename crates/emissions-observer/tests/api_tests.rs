//! Integration tests for the dashboard API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use emissions_core::dataset::DEFAULT_METRIC_COLUMN;
use emissions_core::{DatasetOptions, EmissionsDataset, load_from_readers};
use emissions_observer::router::build_router;
use emissions_observer::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

const ALL_CSV: &str = "\
,Entity,Code,Year,Annual CO₂ emissions
0,France,FRA,1950,60000000
1,United Kingdom,GBR,1950,500000000
2,Germany,DEU,1950,510000000
3,Europe,,1950,2000000000
4,France,FRA,2020,280000000
5,United Kingdom,GBR,2020,330000000
6,Germany,DEU,2020,640000000
7,Europe,,2020,4900000000
8,France,FRA,2021,300000000
9,United Kingdom,GBR,2021,340000000
10,Germany,DEU,2021,670000000
11,Europe,,2021,5300000000
";

// 2020 is missing on purpose.
const WORLD_CSV: &str = "\
Unnamed: 0,Entity,Year,Annual CO₂ emissions
0,World,1950,6000000000.2
1,World,2021,37123850000.9
";

fn make_test_state() -> Arc<AppState> {
    let (all, world) =
        load_from_readers(ALL_CSV.as_bytes(), WORLD_CSV.as_bytes(), DEFAULT_METRIC_COLUMN)
            .unwrap();
    let dataset = EmissionsDataset::build(all, world, DatasetOptions::default()).unwrap();
    Arc::new(AppState::new(dataset, "Data derived from Our World in Data"))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_json_content_type(response: &axum::response::Response) {
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("application/json"), "got {content_type}");
}

fn post_raw(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("World CO2 Emissions from 1950 to 2021"));
    assert!(html.contains("Our World in Data"));
}

#[tokio::test]
async fn test_health() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_meta() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(Request::get("/api/meta").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["years"]["min"], 1950);
    assert_eq!(json["years"]["max"], 2021);
    assert_eq!(json["default_state"]["selected_year"], 2021);
    assert_eq!(
        json["default_state"]["selected_entities"],
        serde_json::json!(["France", "United Kingdom"])
    );
    assert_eq!(json["metric"], "Annual CO₂ emissions");
    assert_eq!(json["unit_label"], "tonnes");
}

#[tokio::test]
async fn test_list_entities_in_first_appearance_order() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(Request::get("/api/entities").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 4);
    assert_eq!(
        json["entities"],
        serde_json::json!(["France", "United Kingdom", "Germany", "Europe"])
    );
}

#[tokio::test]
async fn test_world_total_readout() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(Request::get("/api/world/2021").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["year"], 2021);
    assert_eq!(json["readout"], "37123850000 tonnes");
}

#[tokio::test]
async fn test_world_total_missing_year_is_404() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(Request::get("/api/world/2020").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_world_total_bad_year_is_json_400() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(Request::get("/api/world/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_default_view() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(Request::get("/api/view").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["year"], 2021);
    assert_eq!(json["filtered_rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["bar_chart"]["bars"].as_array().unwrap().len(), 2);
    assert_eq!(json["choropleth"]["regions"].as_array().unwrap().len(), 3);
    assert_eq!(json["choropleth"]["projection"], "equirectangular");
    assert_eq!(json["choropleth"]["color_scale"]["name"], "Reds");
}

#[tokio::test]
async fn test_post_view_empty_selection() {
    let router = build_router(make_test_state());
    let body = serde_json::json!({ "selected_year": 1950, "selected_entities": [] });
    let response = router
        .oneshot(post_json("/api/view", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["filtered_rows"], serde_json::json!([]));
    assert_eq!(json["bar_chart"]["bars"], serde_json::json!([]));
    assert_eq!(json["choropleth"]["regions"].as_array().unwrap().len(), 3);
    assert_eq!(json["world_total_readout"], "6000000000 tonnes");
}

#[tokio::test]
async fn test_post_view_missing_world_year_uses_placeholder() {
    let router = build_router(make_test_state());
    let body = serde_json::json!({ "selected_year": 2020, "selected_entities": ["Germany"] });
    let response = router
        .oneshot(post_json("/api/view", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["world_total_for_year"], Value::Null);
    assert_eq!(json["world_total_readout"], "n/a");
    assert_eq!(json["filtered_rows"][0]["entity"], "Germany");
}

#[tokio::test]
async fn test_post_view_out_of_range_year_is_400() {
    let router = build_router(make_test_state());
    let body = serde_json::json!({ "selected_year": 1900, "selected_entities": [] });
    let response = router
        .oneshot(post_json("/api/view", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recompute_set_year() {
    let router = build_router(make_test_state());
    let body = serde_json::json!({
        "state": { "selected_year": 2021, "selected_entities": ["France", "United Kingdom"] },
        "event": { "type": "set_year", "year": 1950 },
    });
    let response = router
        .oneshot(post_json("/api/recompute", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["state"]["selected_year"], 1950);
    assert_eq!(json["view"]["year"], 1950);
    let rows = json["view"]["filtered_rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["year"] == 1950));
}

#[tokio::test]
async fn test_recompute_add_entity_keeps_source_order() {
    let router = build_router(make_test_state());
    let body = serde_json::json!({
        "state": { "selected_year": 2021, "selected_entities": ["United Kingdom"] },
        "event": { "type": "add_entity", "entity": "France" },
    });
    let response = router
        .oneshot(post_json("/api/recompute", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["view"]["bar_chart"]["bars"][0]["entity"], "France");
    assert_eq!(json["view"]["bar_chart"]["bars"][1]["entity"], "United Kingdom");
}

#[tokio::test]
async fn test_recompute_unknown_entity_is_400() {
    let router = build_router(make_test_state());
    let body = serde_json::json!({
        "state": { "selected_year": 2021, "selected_entities": [] },
        "event": { "type": "add_entity", "entity": "Atlantis" },
    });
    let response = router
        .oneshot(post_json("/api/recompute", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "unknown entity: Atlantis");
}

#[tokio::test]
async fn test_post_view_malformed_json_is_json_400() {
    let router = build_router(make_test_state());
    let response = router
        .oneshot(post_raw("/api/view", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_recompute_unknown_event_type_is_json_400() {
    let router = build_router(make_test_state());
    let body = serde_json::json!({
        "state": { "selected_year": 2021, "selected_entities": [] },
        "event": { "type": "bogus" },
    });
    let response = router
        .oneshot(post_json("/api/recompute", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("bogus"));
}

#[tokio::test]
async fn test_recompute_without_content_type_is_json_400() {
    let router = build_router(make_test_state());
    let request = Request::post("/api/recompute")
        .body(Body::from("{}"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
}
