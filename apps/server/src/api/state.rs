use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use pension_core::{PortfolioState, WeightUpdate};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceRequest {
    total_balance: f64,
    #[serde(default)]
    principal: Option<f64>,
}

#[derive(Deserialize)]
struct HoldingsRequest {
    holdings: BTreeMap<String, u64>,
}

/// Weights are fractions of the total balance.
#[derive(Deserialize)]
struct WeightsRequest {
    weights: BTreeMap<String, f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeightsResponse {
    updates: BTreeMap<String, WeightUpdate>,
    state: PortfolioState,
}

#[derive(Deserialize)]
struct PurchasesRequest {
    purchases: BTreeMap<String, u64>,
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<PortfolioState> {
    Json(state.portfolio.read().await.clone())
}

async fn update_balance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BalanceRequest>,
) -> ApiResult<Json<PortfolioState>> {
    let mut portfolio = state.portfolio.write().await;
    let mut next = portfolio.clone();
    next.set_total_balance(req.total_balance)?;
    next.set_principal(req.principal)?;
    *portfolio = next;
    tracing::debug!("Total balance set to {}", portfolio.total_balance);
    Ok(Json(portfolio.clone()))
}

// Batch updates are applied to a copy so a bad entry leaves the state untouched.

async fn update_holdings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HoldingsRequest>,
) -> ApiResult<Json<PortfolioState>> {
    let mut portfolio = state.portfolio.write().await;
    let mut next = portfolio.clone();
    for (id, quantity) in &req.holdings {
        next.set_holding(&state.catalog, id, *quantity)?;
    }
    *portfolio = next;
    Ok(Json(portfolio.clone()))
}

async fn update_weights(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WeightsRequest>,
) -> ApiResult<Json<WeightsResponse>> {
    let mut portfolio = state.portfolio.write().await;
    let mut next = portfolio.clone();

    let mut updates = BTreeMap::new();
    for (id, weight) in &req.weights {
        let update = next.set_weight_override(&state.catalog, id, *weight)?;
        updates.insert(id.clone(), update);
    }
    *portfolio = next;

    Ok(Json(WeightsResponse {
        updates,
        state: portfolio.clone(),
    }))
}

async fn update_purchases(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PurchasesRequest>,
) -> ApiResult<Json<PortfolioState>> {
    let mut portfolio = state.portfolio.write().await;
    let mut next = portfolio.clone();
    for (id, quantity) in &req.purchases {
        next.set_purchase_quantity(&state.catalog, id, *quantity)?;
    }
    *portfolio = next;
    Ok(Json(portfolio.clone()))
}

async fn reset_purchases(State(state): State<Arc<AppState>>) -> Json<PortfolioState> {
    let mut portfolio = state.portfolio.write().await;
    portfolio.clear_purchase_quantities();
    Json(portfolio.clone())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/state", get(get_state))
        .route("/state/balance", put(update_balance))
        .route("/state/holdings", put(update_holdings))
        .route("/state/weights", put(update_weights))
        .route(
            "/state/purchases",
            put(update_purchases).delete(reset_purchases),
        )
}
