use std::sync::Arc;

use anyhow::Context;
use pension_core::{
    constants::BASE_CURRENCY, Catalog, PortfolioState, QuoteService, QuoteServiceTrait,
};
use pension_market_data::{MarketDataProvider, YahooProvider};
use tokio::sync::RwLock;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Session inputs; lives only as long as the process
    pub portfolio: RwLock<PortfolioState>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin().context("Built-in catalog is invalid")?,
    };
    tracing::info!(
        "Catalog loaded: {} instruments, {} sleeves",
        catalog.instruments().len(),
        catalog.group_by().len()
    );
    Ok(catalog)
}

/// Build the application state with live Yahoo Finance prices.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = YahooProvider::new()
        .context("Failed to initialize Yahoo Finance provider")?
        .with_default_currency(BASE_CURRENCY);
    build_state_with_provider(config, Arc::new(provider)).await
}

/// Build the application state around any price provider.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let catalog = load_catalog(config)?;
    tracing::info!("Using market data provider: {}", provider.id());

    let mut quote_service = QuoteService::new(provider);
    if let Some(timeout) = config.quote_timeout {
        quote_service = quote_service.with_timeout(timeout);
    }
    let quote_service: Arc<dyn QuoteServiceTrait> = Arc::new(quote_service);
    let portfolio = RwLock::new(PortfolioState::new(&catalog));

    Ok(Arc::new(AppState {
        catalog: Arc::new(catalog),
        portfolio,
        quote_service,
    }))
}
