use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pension_market_data::FixedPriceProvider;
use pension_server::{api::app_router, build_state_with_provider, config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn build_test_router() -> Router {
    let provider = FixedPriceProvider::from_prices(
        "KRW",
        [
            ("KRX:379800", 50_000.0),
            ("KRX:360200", 20_000.0),
            ("KRX:294400", 20_000.0),
            ("KRX:0072R0", 10_000.0),
            ("KRX:411060", 19_000.0),
            ("KRX:449170", 100_000.0),
        ],
    );
    let config = Config::default();
    let state = build_state_with_provider(&config, Arc::new(provider))
        .await
        .unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn row<'a>(report: &'a Value, id: &str) -> &'a Value {
    report["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == id)
        .unwrap()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = build_test_router().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn catalog_lists_instruments_and_sleeves() {
    let app = build_test_router().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instruments"].as_array().unwrap().len(), 12);

    let developed = body["sleeves"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "선진국")
        .unwrap();
    assert_eq!(developed["kind"], "combined");
    assert_eq!(developed["members"], json!(["KRX:379800", "KRX:360200"]));
}

#[tokio::test]
async fn rebalance_uses_session_state_without_storing_defaults() {
    let app = build_test_router().await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/state/balance",
        Some(json!({ "totalBalance": 10_000_000.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/state/holdings",
        Some(json!({ "holdings": { "KRX:379800": 100, "KRX:294400": 45 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/api/v1/rebalance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stored"], true);
    assert!(body["prices"]["KRX:453850"].is_null());

    let report = &body["report"];
    assert_eq!(row(report, "KRX:360200")["targetValue"], 0.0);
    assert_eq!(row(report, "KRX:294400")["purchaseQuantity"], 40);
    assert_eq!(row(report, "KRX:294400")["action"], "-5 (sell)");
    assert!(row(report, "KRX:453850")["price"].is_null());
    assert_eq!(report["groupSummaries"].as_array().unwrap().len(), 2);

    let (_, state) = send(&app, Method::GET, "/api/v1/state", None).await;
    assert_eq!(state["purchaseQuantities"], json!({}));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/state/purchases",
        Some(json!({ "purchases": { "KRX:294400": 42 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, Method::POST, "/api/v1/rebalance", None).await;
    assert_eq!(row(&body["report"], "KRX:294400")["purchaseQuantity"], 42);

    let (status, state) = send(&app, Method::DELETE, "/api/v1/state/purchases", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["purchaseQuantities"], json!({}));
}

#[tokio::test]
async fn weights_on_non_first_members_are_ignored() {
    let app = build_test_router().await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/state/weights",
        Some(json!({ "weights": { "KRX:379800": 0.30, "KRX:360200": 0.30 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updates"]["KRX:379800"], "applied");
    assert_eq!(body["updates"]["KRX:360200"], "ignored");
    assert_eq!(body["state"]["weightOverrides"]["KRX:379800"], 0.30);
    assert_eq!(body["state"]["weightOverrides"]["KRX:360200"], 0.0);
}

#[tokio::test]
async fn invalid_input_is_rejected_without_partial_updates() {
    let app = build_test_router().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/state/balance",
        Some(json!({ "totalBalance": -1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/state/holdings",
        Some(json!({ "holdings": { "KRX:379800": 5, "KRX:000000": 1 } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/state/weights",
        Some(json!({ "weights": { "KRX:449170": 1.5 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, state) = send(&app, Method::GET, "/api/v1/state", None).await;
    assert_eq!(state["totalBalance"], 0.0);
    assert_eq!(state["holdings"], json!({}));
    assert_eq!(state["weightOverrides"]["KRX:449170"], 0.05);
}

#[tokio::test]
async fn preview_uses_supplied_prices_without_storing() {
    let app = build_test_router().await;
    let (status, report) = send(
        &app,
        Method::POST,
        "/api/v1/rebalance/preview",
        Some(json!({
            "prices": { "KRX:294400": 20000.0, "KRX:360200": null },
            "state": { "totalBalance": 10_000_000.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let kosef = row(&report, "KRX:294400");
    assert_eq!(kosef["targetValue"], 800_000.0);
    assert_eq!(kosef["calculatedQuantity"], 40.0);
    assert!(row(&report, "KRX:360200")["price"].is_null());

    let (_, state) = send(&app, Method::GET, "/api/v1/state", None).await;
    assert_eq!(state["totalBalance"], 0.0);
    assert_eq!(state["purchaseQuantities"], json!({}));
}

#[tokio::test]
async fn preview_rejects_out_of_range_state() {
    let app = build_test_router().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/rebalance/preview",
        Some(json!({
            "prices": { "KRX:294400": 20000.0 },
            "state": { "totalBalance": -10_000_000.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/rebalance/preview",
        Some(json!({
            "prices": {},
            "state": { "totalBalance": 1_000.0, "weightOverrides": { "KRX:449170": 1.5 } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/rebalance/preview",
        Some(json!({
            "prices": {},
            "state": { "totalBalance": 1_000.0, "principal": -1.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
