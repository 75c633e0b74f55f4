use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use pension_core::{rebalance, PortfolioState, PriceSnapshot, QuoteServiceTrait, RebalanceReport};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RebalanceResponse {
    prices: PriceSnapshot,
    report: RebalanceReport,
    /// False when the state changed while prices were being fetched
    stored: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRequest {
    prices: PriceSnapshot,
    /// Runs against the session state when omitted
    #[serde(default)]
    state: Option<PortfolioState>,
}

/// Fetch live prices, run a pass and keep the resulting state.
async fn run_rebalance(State(state): State<Arc<AppState>>) -> ApiResult<Json<RebalanceResponse>> {
    let snapshot = state.portfolio.read().await.clone();

    let prices = state
        .quote_service
        .fetch_prices(&state.catalog.ids())
        .await;
    let outcome = rebalance(&state.catalog, &prices, &snapshot)?;

    let mut portfolio = state.portfolio.write().await;
    let stored = *portfolio == snapshot;
    if stored {
        *portfolio = outcome.next_state;
    } else {
        tracing::warn!("Portfolio state changed during price fetch; report not stored");
    }

    Ok(Json(RebalanceResponse {
        prices,
        report: outcome.report,
        stored,
    }))
}

/// Run a pass against caller-supplied prices without storing anything.
async fn preview_rebalance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreviewRequest>,
) -> ApiResult<Json<RebalanceReport>> {
    let portfolio = match req.state {
        Some(portfolio) => {
            portfolio.validate(&state.catalog)?;
            portfolio
        }
        None => state.portfolio.read().await.clone(),
    };
    let outcome = rebalance(&state.catalog, &req.prices, &portfolio)?;
    Ok(Json(outcome.report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rebalance", post(run_rebalance))
        .route("/rebalance/preview", post(preview_rebalance))
}
