// In crates/web-server/src/lib.rs

use analytics::StrategySummary;
use api_client::PriceSource;
use app_config::{MarketDataSettings, ServerSettings};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use core_types::{PriceSeries, StrategyParams};
use std::sync::Arc;
use tokio::net::TcpListener;
use types::{SignalsResponse, StrategyRequest};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
///
/// It holds no per-request data; every evaluation builds its own series.
#[derive(Clone)]
pub struct AppState {
    pub prices: Arc<dyn PriceSource>,
    /// Window used when a request does not name one.
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
}

impl AppState {
    pub fn new(prices: Arc<dyn PriceSource>, market: &MarketDataSettings) -> Self {
        Self {
            prices,
            default_start: market.start_date,
            default_end: market.end_date,
        }
    }

    /// Validates the request and fetches its price history.
    async fn prepare(&self, request: &StrategyRequest) -> Result<(String, StrategyParams, PriceSeries)> {
        let symbol = request.symbol()?;
        let params = request.to_params()?;

        let start = request.start_date.unwrap_or(self.default_start);
        let end = request.end_date.unwrap_or(self.default_end);
        if start >= end {
            return Err(core_types::Error::InvalidParameter(format!(
                "start_date ({start}) must be before end_date ({end})"
            ))
            .into());
        }

        let series = self.prices.daily_closes(&symbol, start, end).await?;
        Ok((symbol, params, series))
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // Define a CORS layer so a browser front-end on another origin can call the API.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/health", get(health_check_handler))
        .route("/strategy", post(strategy_handler))
        .route("/strategy/signals", post(signals_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// Handler for `POST /strategy`.
/// Evaluates the strategy and returns the formatted metrics.
async fn strategy_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<StrategyRequest>, JsonRejection>,
) -> Result<Json<StrategySummary>> {
    let Json(request) = payload?;
    let (symbol, params, series) = state.prepare(&request).await?;
    let evaluation = backtester::evaluate(&series, &params)?;
    let summary = evaluation.summary();

    tracing::info!(
        symbol = %symbol,
        strategy = %params.kind,
        gmrr = %summary.gmrr,
        volatility = %summary.volatility,
        sharpe_ratio = %summary.sharpe_ratio,
        "Strategy evaluated."
    );
    Ok(Json(summary))
}

/// Handler for `POST /strategy/signals`.
/// Same evaluation, plus the aligned (date, close, buy, sell) trace for charting.
async fn signals_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<StrategyRequest>, JsonRejection>,
) -> Result<Json<SignalsResponse>> {
    let Json(request) = payload?;
    let (symbol, params, series) = state.prepare(&request).await?;
    let evaluation = backtester::evaluate(&series, &params)?;

    Ok(Json(SignalsResponse {
        symbol,
        strategy: params.kind,
        summary: evaluation.summary(),
        points: evaluation.trace,
    }))
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router
/// until Ctrl-C is received.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::ServeError)?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
