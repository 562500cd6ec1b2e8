//! Feed client error types.

use super::client::Feed;

/// Errors that can occur when fetching a GBFS feed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The request never produced a response (DNS, connection, timeout).
    ///
    /// The message is shown to users verbatim.
    #[error("{0}")]
    Transport(String),

    /// The feed answered with a non-2xx status code.
    #[error("{status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("Could not read the {feed} feed: {message}")]
    Parse { feed: Feed, message: String },
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Transport(err.to_string())
    }
}
