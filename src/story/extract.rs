// src/story/extract.rs
use crate::error::NewsError;
use crate::story::nprml::{StoryNode, TextNode};
use crate::story::teaser::extract_teaser;

pub const NO_AUTHOR_LISTED: &str = "No author listed";
pub const CURATED_NO_AUTHOR: &str = "No Author Listed";
pub const PLACEHOLDER_IMAGE_URL: &str = "http://media.tumblr.com/tumblr_lv5hpkCtcs1qejsea.gif";

/// Normalized listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub byline: String,
    /// Feed-provided date string, passed through untouched.
    pub date: String,
    pub teaser: String,
    pub image: String,
}

/// Entry of a curated newsletter: teaser comes from the body text, no image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratedRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub byline: String,
    /// Pretty-printed markup of the first body paragraph.
    pub teaser: String,
}

fn required<'a>(node: Option<&'a TextNode>, field: &str, id: &str) -> Result<&'a str, NewsError> {
    node.and_then(TextNode::text)
        .ok_or_else(|| NewsError::MalformedStory(format!("story {id}: missing <{field}>")))
}

fn story_id(story: &StoryNode) -> Result<&str, NewsError> {
    story
        .id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NewsError::MalformedStory("story without id attribute".into()))
}

/// Listing extraction. A `byline` without a `name` is treated as malformed.
pub fn extract_story(story: &StoryNode) -> Result<StoryRecord, NewsError> {
    let id = story_id(story)?;
    let url = required(story.link.first(), "link", id)?;
    let title = required(story.title.as_ref(), "title", id)?;
    let date = required(story.story_date.as_ref(), "storyDate", id)?;

    let byline = match story.byline.first() {
        Some(b) => match &b.name {
            Some(name) => name.text().unwrap_or(NO_AUTHOR_LISTED),
            None => {
                return Err(NewsError::MalformedStory(format!(
                    "story {id}: <byline> without <name>"
                )))
            }
        },
        None => NO_AUTHOR_LISTED,
    };

    let teaser = story
        .teaser
        .as_ref()
        .and_then(TextNode::text)
        .unwrap_or_default();

    let image = story
        .image
        .first()
        .and_then(|img| img.src.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_URL);

    Ok(StoryRecord {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        byline: byline.to_string(),
        date: date.to_string(),
        teaser: teaser.to_string(),
        image: image.to_string(),
    })
}

/// Curation extraction. Any missing piece of the byline falls back to the sentinel.
pub fn extract_curated(story: &StoryNode) -> Result<CuratedRecord, NewsError> {
    let id = story_id(story)?;
    let url = required(story.link.first(), "link", id)?;
    let title = required(story.title.as_ref(), "title", id)?;

    let byline = story
        .byline
        .first()
        .and_then(|b| b.name.as_ref())
        .and_then(TextNode::text)
        .unwrap_or(CURATED_NO_AUTHOR);

    Ok(CuratedRecord {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        byline: byline.to_string(),
        teaser: extract_teaser(story),
    })
}
