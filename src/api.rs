use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::client::{NprClient, StoryApi};
use crate::config::NewsConfig;
use crate::curation::CurationRenderer;
use crate::error::{AppError, NewsError};
use crate::feeds::FeedAggregator;
use crate::render;

pub const STATIC_DIR: &str = "static";

#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<FeedAggregator>,
    curator: Arc<CurationRenderer>,
}

impl AppState {
    /// Wire both pipelines to the same transport.
    pub fn new(api: Arc<dyn StoryApi>, cfg: &NewsConfig) -> Self {
        Self {
            aggregator: Arc::new(FeedAggregator::new(api.clone(), cfg.sources.clone())),
            curator: Arc::new(CurationRenderer::new(api, cfg.rank_order)),
        }
    }

    /// Production state backed by the reqwest client.
    pub fn from_config(cfg: &NewsConfig) -> Result<Self, NewsError> {
        let client = NprClient::new(cfg)?;
        Ok(Self::new(Arc::new(client), cfg))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(news_feeds))
        .route("/id_list", get(id_list))
        .route("/health", get(|| async { "ok" }))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn news_feeds(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let listing = state.aggregator.aggregate().await?;
    Ok(Html(render::feeds_page(&listing)))
}

/// Repeated `api_id` / `rank` parameters, paired by position.
pub fn parse_selection_query(query: &str) -> (Vec<String>, Vec<String>) {
    let mut ids = Vec::new();
    let mut ranks = Vec::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "api_id" => ids.push(value.into_owned()),
            "rank" => ranks.push(value.into_owned()),
            _ => {}
        }
    }
    (ids, ranks)
}

async fn id_list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let (ids, ranks) = parse_selection_query(query.as_deref().unwrap_or_default());
    let digest = state.curator.render(&ids, &ranks).await?;
    tracing::info!(stories = digest.stories.len(), "IDs successfully posted");

    // Served as text so the browser shows the markup for copy/paste.
    let body = render::newsletter_snippet(&digest);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_query_keeps_positions_and_blanks() {
        let (ids, ranks) =
            parse_selection_query("api_id=11&rank=2&api_id=22&rank=&api_id=33&rank=1&other=x");
        assert_eq!(ids, vec!["11", "22", "33"]);
        assert_eq!(ranks, vec!["2", "", "1"]);
    }

    #[test]
    fn selection_query_decodes() {
        let (ids, ranks) = parse_selection_query("api_id=a%20b&rank=+3");
        assert_eq!(ids, vec!["a b"]);
        assert_eq!(ranks, vec![" 3"]);
    }
}
