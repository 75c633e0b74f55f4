use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use pension_core::{portfolio::sleeve_weight, Instrument, SleeveKind};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SleeveView {
    name: String,
    kind: SleeveKind,
    /// Baseline sleeve weight as a fraction
    weight: f64,
    members: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogView {
    asset_classes: Vec<String>,
    instruments: Vec<Instrument>,
    sleeves: Vec<SleeveView>,
}

async fn get_catalog(State(state): State<Arc<AppState>>) -> ApiResult<Json<CatalogView>> {
    let catalog = &state.catalog;
    let baseline: BTreeMap<String, f64> = BTreeMap::new();
    let sleeves = catalog
        .group_by()
        .iter()
        .map(|sleeve| {
            Ok(SleeveView {
                name: sleeve.name.clone(),
                kind: sleeve.kind(),
                weight: sleeve_weight(catalog, sleeve, &baseline)?,
                members: sleeve.members.clone(),
            })
        })
        .collect::<pension_core::Result<Vec<_>>>()?;

    Ok(Json(CatalogView {
        asset_classes: catalog
            .asset_classes()
            .into_iter()
            .map(String::from)
            .collect(),
        instruments: catalog.instruments().to_vec(),
        sleeves,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/catalog", get(get_catalog))
}
