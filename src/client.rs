// src/client.rs
//! Remote API transport: query building and the `StoryApi` seam.

use async_trait::async_trait;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::{FeedSource, NewsConfig};
use crate::error::NewsError;

/// Fields requested for listing feeds.
pub const LISTING_FIELDS: &str = "title,storyDate,teaser,byline,image";

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("upstream_requests_total", "Requests sent to the news API.");
        describe_counter!(
            "upstream_errors_total",
            "News API requests that failed (transport or status)."
        );
        describe_histogram!("upstream_fetch_ms", "News API round-trip in milliseconds.");
        describe_counter!(
            "stories_extracted_total",
            "Story nodes normalized into records."
        );
        describe_counter!("curation_requests_total", "Curated snippet renders.");
    });
}

/// Source of raw NPRML bodies. The reqwest client implements it for production;
/// tests plug in canned XML.
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// Listing query for one feed source.
    async fn fetch_feed(&self, source: &FeedSource) -> Result<String, NewsError>;
    /// Single-story lookup by id.
    async fn fetch_story(&self, story_id: &str) -> Result<String, NewsError>;
}

/// Builds query URLs from explicit configuration.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: String,
    api_key: String,
    num_results: u32,
    story_fields: String,
}

impl QueryBuilder {
    pub fn from_config(cfg: &NewsConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            num_results: cfg.num_results,
            story_fields: cfg.story_fields.clone(),
        }
    }

    fn base(&self) -> Result<Url, NewsError> {
        Url::parse(&self.base_url).map_err(|e| NewsError::remote(&self.base_url, e))
    }

    pub fn feed_url(&self, source: &FeedSource) -> Result<Url, NewsError> {
        let mut url = self.base()?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("id", &source.id);
            if let Some(org) = source.org_id.as_deref() {
                q.append_pair("orgid", org);
            }
            q.append_pair("fields", LISTING_FIELDS)
                .append_pair("dateType", "story")
                .append_pair("sort", "assigned")
                .append_pair("output", "NPRML")
                .append_pair("numResults", &self.num_results.to_string())
                .append_pair("apiKey", &self.api_key);
        }
        Ok(url)
    }

    pub fn story_url(&self, story_id: &str) -> Result<Url, NewsError> {
        let mut url = self.base()?;
        url.query_pairs_mut()
            .append_pair("id", story_id)
            .append_pair("fields", &self.story_fields)
            .append_pair("output", "NPRML")
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

/// reqwest-backed `StoryApi` with bounded per-request timeouts.
#[derive(Clone)]
pub struct NprClient {
    client: Client,
    queries: QueryBuilder,
}

impl NprClient {
    pub fn new(cfg: &NewsConfig) -> Result<Self, NewsError> {
        let client = Client::builder()
            .user_agent(concat!("news-link/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| NewsError::remote(&cfg.base_url, e))?;
        Ok(Self {
            client,
            queries: QueryBuilder::from_config(cfg),
        })
    }

    async fn get_text(&self, url: Url) -> Result<String, NewsError> {
        ensure_metrics_described();
        counter!("upstream_requests_total").increment(1);
        let t0 = Instant::now();

        // never log the query string, it carries the api key
        let safe_url = redact(&url);
        let result = async {
            let resp = self.client.get(url).send().await?;
            let resp = resp.error_for_status()?;
            resp.text().await
        }
        .await;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("upstream_fetch_ms").record(ms);

        match result {
            Ok(body) => {
                tracing::debug!(url = %safe_url, bytes = body.len(), ms, "upstream ok");
                Ok(body)
            }
            Err(e) => {
                tracing::warn!(url = %safe_url, error = %e, timeout = e.is_timeout(), "upstream error");
                counter!("upstream_errors_total").increment(1);
                Err(NewsError::remote(safe_url, e.without_url()))
            }
        }
    }
}

#[async_trait]
impl StoryApi for NprClient {
    async fn fetch_feed(&self, source: &FeedSource) -> Result<String, NewsError> {
        let url = self.queries.feed_url(source)?;
        self.get_text(url).await
    }

    async fn fetch_story(&self, story_id: &str) -> Result<String, NewsError> {
        let url = self.queries.story_url(story_id)?;
        self.get_text(url).await
    }
}

/// URL without query string, safe for logs and error messages.
fn redact(url: &Url) -> String {
    let mut u = url.clone();
    u.set_query(None);
    u.to_string()
}
