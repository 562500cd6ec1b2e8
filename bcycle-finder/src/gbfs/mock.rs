//! Mock feed source for testing without network access.
//!
//! Serves canned JSON documents as if they were live feed responses,
//! and records which feeds were requested.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::client::{Feed, FeedSource};
use super::error::FeedError;
use super::program::Program;

/// Mock feed source that serves in-memory documents.
///
/// Useful for development (see `BCYCLE_MOCK_DIR`) and for tests that need
/// to check which feeds a command touched.
#[derive(Clone, Default)]
pub struct MockFeedSource {
    documents: HashMap<Feed, Value>,
    failures: HashMap<Feed, FeedError>,
    requested: Arc<Mutex<Vec<Feed>>>,
}

impl MockFeedSource {
    /// Create a mock with no documents. Every fetch fails with a 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `feed`.
    pub fn with_feed(mut self, feed: Feed, document: Value) -> Self {
        self.documents.insert(feed, document);
        self
    }

    /// Make every fetch of `feed` fail with `error`.
    pub fn failing(mut self, feed: Feed, error: FeedError) -> Self {
        self.failures.insert(feed, error);
        self
    }

    /// Load documents from a directory.
    ///
    /// Expects files named `{feed}.json` (e.g. `station_status.json`).
    /// Other files are ignored.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            FeedError::Transport(format!("Failed to read mock data directory: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                FeedError::Transport(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(feed) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(Feed::from_name)
            else {
                continue;
            };

            let json = std::fs::read_to_string(&path)
                .map_err(|e| FeedError::Transport(format!("Failed to read {:?}: {}", path, e)))?;

            let document: Value = serde_json::from_str(&json).map_err(|e| FeedError::Parse {
                feed,
                message: e.to_string(),
            })?;

            mock.documents.insert(feed, document);
        }

        if mock.documents.is_empty() {
            return Err(FeedError::Transport(format!(
                "No mock feed files found in {:?}",
                data_dir
            )));
        }

        Ok(mock)
    }

    /// Feeds requested so far, in request order.
    pub async fn requested(&self) -> Vec<Feed> {
        self.requested.lock().await.clone()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch_feed(&self, feed: Feed, _program: &Program) -> Result<Value, FeedError> {
        self.requested.lock().await.push(feed);

        if let Some(err) = self.failures.get(&feed) {
            return Err(err.clone());
        }

        self.documents
            .get(&feed)
            .cloned()
            .ok_or_else(|| FeedError::Http {
                status: 404,
                body: format!("No mock data for feed {feed}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn madison() -> Program {
        Program::parse("madison").unwrap()
    }

    #[tokio::test]
    async fn load_mock_data() {
        let mock = MockFeedSource::from_dir("data/mock_feeds").unwrap();

        for feed in Feed::ALL {
            let doc = mock.fetch_feed(feed, &madison()).await.unwrap();
            assert!(doc.get("data").is_some(), "{feed} has no data");
        }
    }

    #[tokio::test]
    async fn ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("free_bike_status.json"), "{}").unwrap();
        std::fs::write(
            dir.path().join("system_information.json"),
            r#"{"data":{"name":"Test"}}"#,
        )
        .unwrap();

        let mock = MockFeedSource::from_dir(dir.path()).unwrap();

        assert!(
            mock.fetch_feed(Feed::SystemInformation, &madison())
                .await
                .is_ok()
        );
        assert!(
            mock.fetch_feed(Feed::StationStatus, &madison())
                .await
                .is_err()
        );
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MockFeedSource::from_dir(dir.path()).is_err());
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("station_status.json"), "{ nope").unwrap();

        let err = MockFeedSource::from_dir(dir.path()).err().unwrap();
        assert!(matches!(
            err,
            FeedError::Parse {
                feed: Feed::StationStatus,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn records_requests_in_order() {
        let mock = MockFeedSource::new()
            .with_feed(Feed::StationInformation, json!({ "data": { "stations": [] } }))
            .failing(Feed::StationStatus, FeedError::Transport("boom".into()));

        let _ = mock.fetch_feed(Feed::StationInformation, &madison()).await;
        let err = mock
            .fetch_feed(Feed::StationStatus, &madison())
            .await
            .unwrap_err();

        assert_eq!(err, FeedError::Transport("boom".into()));
        assert_eq!(
            mock.requested().await,
            vec![Feed::StationInformation, Feed::StationStatus]
        );
    }

    #[tokio::test]
    async fn unknown_feed_returns_404() {
        let mock = MockFeedSource::new();
        let err = mock
            .fetch_feed(Feed::SystemPricingPlans, &madison())
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::Http { status: 404, .. }));
    }
}
