//! Snapshot fetching.
//!
//! The feed is best-effort: a failed fetch or non-success status degrades
//! to an empty body so downstream aggregation renders empty results
//! instead of surfacing an error. Explicit local file paths are the one
//! exception; pointing the CLI at a file that does not exist is an
//! operator mistake and errors normally.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;

/// HTTP client for feed snapshots.
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("bookedge/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { http }
    }

    /// Fetch a snapshot body, degrading to empty on any upstream failure.
    pub async fn fetch_text(&self, url: &str) -> String {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url, error = %err, "feed fetch failed, treating as empty");
                return String::new();
            }
        };

        if !response.status().is_success() {
            warn!(url, status = %response.status(), "feed returned non-success, treating as empty");
            return String::new();
        }

        match response.text().await {
            Ok(body) => {
                debug!(url, bytes = body.len(), "feed snapshot fetched");
                body
            }
            Err(err) => {
                warn!(url, error = %err, "feed body unreadable, treating as empty");
                String::new()
            }
        }
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a local snapshot file. Unlike remote fetches this propagates the
/// error; the operator named the path explicitly.
pub fn read_snapshot(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
