//! Web search used to ground the simulation prompt in real-world snippets.
//!
//! Search is fail-open: a [`SearchClient`] never returns an error. A missing
//! credential yields no results and a failed request yields a single
//! [`SearchResult::not_found`] placeholder.

mod serpapi;

pub use serpapi::{SerpApiClient, SerpApiClientOptions};

use serde::{Deserialize, Serialize};

/// Title of the placeholder returned when a search request fails.
pub const NOT_FOUND_TITLE: &str = "No data found";

/// A single organic search hit.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }

    /// Placeholder substituted for the results of a failed request.
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            ..Default::default()
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.title == NOT_FOUND_TITLE && self.link.is_empty() && self.snippet.is_empty()
    }
}

#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    fn provider(&self) -> &'static str;
    /// Whether the client holds the credentials it needs. An unconfigured
    /// client returns no results without making a request.
    fn is_configured(&self) -> bool {
        true
    }
    /// Run `query` and return the hits in ranking order.
    async fn search(&self, query: &str) -> Vec<SearchResult>;
}
