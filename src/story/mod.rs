// src/story/mod.rs
pub mod extract;
pub mod map;
pub mod nprml;
pub mod teaser;

pub use extract::{
    extract_curated, extract_story, CuratedRecord, StoryRecord, CURATED_NO_AUTHOR,
    NO_AUTHOR_LISTED, PLACEHOLDER_IMAGE_URL,
};
pub use map::StoryMap;
pub use teaser::{extract_teaser, prettify_markup};

/// Stories of one feed, keyed by id, in document order.
pub type FeedResult = StoryMap<StoryRecord>;
