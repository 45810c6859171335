// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use news_link::client::StoryApi;
use news_link::config::FeedSource;
use news_link::NewsError;
use std::collections::HashMap;
use std::sync::Mutex;

pub const LISTING_VPR: &str = include_str!("../fixtures/listing_vpr.xml");
pub const STORY_500001: &str = include_str!("../fixtures/story_500001.xml");
pub const STORY_500002: &str = include_str!("../fixtures/story_500002.xml");

/// Canned upstream: feed bodies keyed by source id, story bodies keyed by story id.
/// Unknown keys behave like a transport failure.
#[derive(Default)]
pub struct FixtureApi {
    pub feeds: HashMap<String, String>,
    pub stories: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl FixtureApi {
    pub fn with_feed(mut self, source_id: &str, xml: &str) -> Self {
        self.feeds.insert(source_id.to_string(), xml.to_string());
        self
    }

    pub fn with_story(mut self, story_id: &str, xml: &str) -> Self {
        self.stories.insert(story_id.to_string(), xml.to_string());
        self
    }

    /// The same listing for all four default sources.
    pub fn all_feeds(xml: &str) -> Self {
        ["1001", "161419865", "175255325", "176665462"]
            .into_iter()
            .fold(Self::default(), |api, id| api.with_feed(id, xml))
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryApi for FixtureApi {
    async fn fetch_feed(&self, source: &FeedSource) -> Result<String, NewsError> {
        self.requested.lock().unwrap().push(format!("feed:{}", source.id));
        self.feeds
            .get(&source.id)
            .cloned()
            .ok_or_else(|| NewsError::remote(format!("fixture://feed/{}", source.id), "connection refused"))
    }

    async fn fetch_story(&self, story_id: &str) -> Result<String, NewsError> {
        self.requested.lock().unwrap().push(format!("story:{story_id}"));
        self.stories
            .get(story_id)
            .cloned()
            .ok_or_else(|| NewsError::remote(format!("fixture://story/{story_id}"), "connection refused"))
    }
}

pub fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/// Minimal single-story body.
pub fn story_xml(id: &str, title: &str) -> String {
    format!(
        r#"<nprml><list><story id="{id}"><link type="html">https://n.test/{id}</link><title>{title}</title></story></list></nprml>"#
    )
}
