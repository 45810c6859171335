pub mod news;

pub use news::{FeedSource, FeedSources, NewsConfig, RankOrder};
