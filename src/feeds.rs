// src/feeds.rs
//! Listing pipeline: fetch the four feed sources and normalize their stories.

use metrics::counter;
use std::sync::Arc;
use std::time::Instant;

use crate::client::{ensure_metrics_described, StoryApi};
use crate::config::{FeedSource, FeedSources};
use crate::error::NewsError;
use crate::story::nprml::parse_document;
use crate::story::{extract_story, FeedResult};

/// Stories of one source together with the source it came from.
#[derive(Debug, Clone)]
pub struct SourceFeed {
    pub source: FeedSource,
    pub stories: FeedResult,
}

#[derive(Debug, Clone)]
pub struct FeedListing {
    pub primary: SourceFeed,
    pub regional: SourceFeed,
    pub regional_secondary: SourceFeed,
    pub commentary: SourceFeed,
}

impl FeedListing {
    /// Sections in page order.
    pub fn sections(&self) -> [&SourceFeed; 4] {
        [
            &self.primary,
            &self.regional,
            &self.regional_secondary,
            &self.commentary,
        ]
    }
}

/// Parse one listing body into an ordered map keyed by story id.
pub fn build_feed(xml: &str) -> Result<FeedResult, NewsError> {
    let doc = parse_document(xml)?;
    for msg in doc.message_texts() {
        tracing::warn!(message = %msg, "news api returned a message");
    }
    let stories = doc.into_stories();
    let mut feed = FeedResult::with_capacity(stories.len());
    for node in &stories {
        let record = extract_story(node)?;
        feed.insert(record.id.clone(), record);
    }
    counter!("stories_extracted_total").increment(feed.len() as u64);
    Ok(feed)
}

pub struct FeedAggregator {
    api: Arc<dyn StoryApi>,
    sources: FeedSources,
}

impl FeedAggregator {
    pub fn new(api: Arc<dyn StoryApi>, sources: FeedSources) -> Self {
        Self { api, sources }
    }

    async fn load(&self, source: &FeedSource) -> Result<SourceFeed, NewsError> {
        let body = self.api.fetch_feed(source).await?;
        let stories = build_feed(&body).inspect_err(|e| {
            tracing::warn!(source = %source.name, error = %e, "feed rejected");
        })?;
        tracing::debug!(source = %source.name, count = stories.len(), "feed loaded");
        Ok(SourceFeed {
            source: source.clone(),
            stories,
        })
    }

    /// Fetch all four sources concurrently. The first failure aborts the whole listing.
    pub async fn aggregate(&self) -> Result<FeedListing, NewsError> {
        ensure_metrics_described();
        let t0 = Instant::now();
        let s = &self.sources;
        let (primary, regional, regional_secondary, commentary) = tokio::try_join!(
            self.load(&s.primary),
            self.load(&s.regional),
            self.load(&s.regional_secondary),
            self.load(&s.commentary),
        )?;

        let listing = FeedListing {
            primary,
            regional,
            regional_secondary,
            commentary,
        };
        tracing::info!(
            stories = listing.sections().iter().map(|f| f.stories.len()).sum::<usize>(),
            ms = t0.elapsed().as_millis() as u64,
            "feeds aggregated"
        );
        Ok(listing)
    }
}
