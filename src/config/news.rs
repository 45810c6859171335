// src/config/news.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const ENV_CONFIG_PATH: &str = "NEWS_CONFIG_PATH";
pub const ENV_API_KEY: &str = "NPR_API_KEY";

pub const DEFAULT_BASE_URL: &str = "http://api.npr.org/query";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_num_results() -> u32 {
    25
}
fn default_story_fields() -> String {
    "title,byline,text".to_string()
}
fn default_api_key() -> String {
    "ENV".to_string()
}

/// How curation ranks are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankOrder {
    /// Ranks parsed as integers; "2" sorts before "10".
    #[default]
    Numeric,
    /// Ranks compared as raw text; "10" sorts before "2" (legacy pages).
    Lexicographic,
}

/// One upstream channel of the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    /// Heading shown on the listing page.
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub org_id: Option<String>,
}

impl FeedSource {
    pub fn new(name: &str, id: &str, org_id: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
            org_id: org_id.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSources {
    pub primary: FeedSource,
    pub regional: FeedSource,
    pub regional_secondary: FeedSource,
    pub commentary: FeedSource,
}

impl Default for FeedSources {
    fn default() -> Self {
        Self {
            primary: FeedSource::new("NPR News", "1001", None),
            regional: FeedSource::new("VPR News", "161419865", Some("692")),
            regional_secondary: FeedSource::new("Vermont Edition", "175255325", Some("692")),
            commentary: FeedSource::new("VPR Commentary", "176665462", Some("692")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// "ENV" means: read from NPR_API_KEY
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total per-request timeout for upstream calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    /// `fields` used for single-story lookups during curation.
    #[serde(default = "default_story_fields")]
    pub story_fields: String,
    #[serde(default)]
    pub rank_order: RankOrder,
    #[serde(default)]
    pub sources: FeedSources,
}

impl NewsConfig {
    /// Config with built-in defaults and an explicit key; handy for tests and local runs.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            num_results: default_num_results(),
            story_fields: default_story_fields(),
            rank_order: RankOrder::default(),
            sources: FeedSources::default(),
        }
    }

    /// Load from an explicit path. TOML or JSON, picked by extension.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading news config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg: NewsConfig = match ext.as_str() {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?,
            _ => toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?,
        };
        cfg.finalize()
    }

    /// Load using env var + fallbacks:
    /// 1) $NEWS_CONFIG_PATH
    /// 2) config/news.toml
    /// 3) config/news.json
    /// 4) built-in defaults (key from $NPR_API_KEY)
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        for candidate in ["config/news.toml", "config/news.json"] {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from_file(&pb);
            }
        }
        Self::with_api_key(default_api_key()).finalize()
    }

    fn finalize(mut self) -> Result<Self> {
        let key = self.api_key.trim();
        if key.is_empty() || key.eq_ignore_ascii_case("env") {
            self.api_key =
                env::var(ENV_API_KEY).map_err(|_| anyhow!("Missing {ENV_API_KEY} env var"))?;
        }

        self.base_url = self.base_url.trim().trim_end_matches('?').to_string();
        if self.base_url.is_empty() {
            bail!("base_url must not be empty");
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        if self.num_results == 0 {
            self.num_results = default_num_results();
        }
        Ok(self)
    }
}
