//! News Link — Binary Entrypoint
//! Boots the Axum HTTP server: config, tracing, metrics, routes.

use news_link::{api, init_tracing, metrics::Metrics, AppState, NewsConfig};
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = NewsConfig::load_default()?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        rank_order = ?config.rank_order,
        "news config loaded"
    );

    let metrics = Metrics::init()?;
    let state = AppState::from_config(&config).map_err(anyhow::Error::from)?;
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
