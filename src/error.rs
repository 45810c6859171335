//! Error types for the feed/curation core and the HTTP boundary.
//!
//! - `NewsError`: fetch, parse and extraction failures (request-scoped, never retried)
//! - `AppError`: wraps `NewsError` for axum handlers and maps it to a status code

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    /// A story node is missing one of `id`, `link`, `title`, `storyDate`
    /// (or carries a `byline` without a `name`).
    #[error("malformed story: {0}")]
    MalformedStory(String),

    /// Transport failure, timeout, or non-success status from the remote API.
    #[error("remote fetch failed for {url}: {reason}")]
    RemoteFetch { url: String, reason: String },

    #[error("xml parse error: {0}")]
    XmlParse(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

impl NewsError {
    pub fn remote(url: impl Into<String>, reason: impl ToString) -> Self {
        NewsError::RemoteFetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Handler-facing error. Upstream problems become 502 so the page shows a
/// short message instead of a raw failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    News(#[from] NewsError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::News(err) = self;
        let (status, message) = match &err {
            NewsError::InvalidSelection(msg) => {
                tracing::warn!(error = %msg, "rejected curation request");
                (StatusCode::BAD_REQUEST, format!("Bad request: {msg}"))
            }
            NewsError::RemoteFetch { url, reason } => {
                tracing::error!(%url, %reason, "upstream fetch failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream news API is unavailable".to_string(),
                )
            }
            NewsError::XmlParse(_) | NewsError::MalformedStory(_) => {
                tracing::error!(error = %err, "upstream returned unusable data");
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream news API returned an unexpected response".to_string(),
                )
            }
        };
        (status, message).into_response()
    }
}
