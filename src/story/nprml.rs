// src/story/nprml.rs
//! Serde model of the NPRML response schema (only the parts we read).
//!
//! Listing and single-story responses share the same shape:
//! `<nprml><list><story id="..">..</story>*</list></nprml>`. Error responses
//! carry `<message>` elements instead of a `<list>`.

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::NewsError;

#[derive(Debug, Default, Deserialize)]
pub struct NprmlDocument {
    pub list: Option<StoryList>,
    #[serde(rename = "message", default)]
    pub messages: Vec<ApiMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoryList {
    #[serde(rename = "story", default)]
    pub stories: Vec<StoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@level")]
    pub level: Option<String>,
    pub text: Option<TextNode>,
}

/// One `<story>` element.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StoryNode {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(default)]
    pub link: Vec<TextNode>,
    pub title: Option<TextNode>,
    #[serde(rename = "storyDate")]
    pub story_date: Option<TextNode>,
    pub teaser: Option<TextNode>,
    #[serde(default)]
    pub byline: Vec<Byline>,
    #[serde(default)]
    pub image: Vec<Image>,
    pub text: Option<StoryText>,
}

/// Piece of an element's mixed content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum TextPiece {
    #[serde(rename = "$text")]
    Text(String),
    /// Inline child element (`<b>`, `<a>`, ..), skipped.
    #[serde(other)]
    Element,
}

/// Element whose only interesting content is its text. Inline children are
/// tolerated; only the text before the first child counts.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct TextNode {
    #[serde(rename = "$value", default)]
    pub pieces: Vec<TextPiece>,
}

impl TextNode {
    pub fn from_text(value: Option<&str>) -> Self {
        Self {
            pieces: value
                .map(|v| vec![TextPiece::Text(v.to_string())])
                .unwrap_or_default(),
        }
    }

    /// Leading text, `None` when the element is empty or starts with a child element.
    pub fn text(&self) -> Option<&str> {
        match self.pieces.first() {
            Some(TextPiece::Text(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Byline {
    pub name: Option<TextNode>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Image {
    #[serde(rename = "@src")]
    pub src: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct StoryText {
    #[serde(rename = "paragraph", default)]
    pub paragraphs: Vec<TextNode>,
}

/// Parse a response body. Anything that is not well-formed NPRML is an `XmlParse` error.
pub fn parse_document(xml: &str) -> Result<NprmlDocument, NewsError> {
    from_str(xml).map_err(|e| NewsError::XmlParse(e.to_string()))
}

impl NprmlDocument {
    /// Stories in document order; empty when the response has no `<list>`.
    pub fn into_stories(self) -> Vec<StoryNode> {
        self.list.map(|l| l.stories).unwrap_or_default()
    }

    /// The story of a single-story lookup (`<list><story>`).
    pub fn into_single_story(self) -> Result<StoryNode, NewsError> {
        self.list
            .and_then(|l| l.stories.into_iter().next())
            .ok_or_else(|| NewsError::XmlParse("response has no <list><story> element".into()))
    }

    /// Human readable API messages (errors/warnings returned instead of stories).
    pub fn message_texts(&self) -> Vec<String> {
        self.messages
            .iter()
            .map(|m| {
                let text = m.text.as_ref().and_then(TextNode::text).unwrap_or_default();
                format!(
                    "[{}:{}] {}",
                    m.level.as_deref().unwrap_or("info"),
                    m.id.as_deref().unwrap_or("-"),
                    text
                )
            })
            .collect()
    }
}
