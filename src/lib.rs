// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod client;
pub mod config;
pub mod curation;
pub mod error;
pub mod feeds;
pub mod metrics;
pub mod render;
pub mod story;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::NewsConfig;
pub use crate::error::NewsError;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the tracing subscriber.
///
/// Filter comes from `RUST_LOG` (default `news_link=info,warn`); `NEWS_LOG_JSON=1`
/// switches to JSON lines. Uses `try_init`, so a subscriber installed by the
/// hosting runtime wins and this becomes a no-op.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("news_link=info,warn"));
    let json = std::env::var("NEWS_LOG_JSON").ok().is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}
