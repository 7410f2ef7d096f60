use std::{collections::HashMap, sync::Mutex};

use crate::search::{SearchClient, SearchResult};

/// A search client returning canned results per query. Unknown queries yield
/// no results. Every query is recorded, in call order.
#[derive(Default)]
pub struct MockSearchClient {
    results: HashMap<String, Vec<SearchResult>>,
    unconfigured: bool,
    tracked_queries: Mutex<Vec<String>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the results returned for `query`.
    #[must_use]
    pub fn with_results(mut self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.results.insert(query.into(), results);
        self
    }

    /// Report the client as missing its credentials.
    #[must_use]
    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Queries received so far.
    pub fn tracked_queries(&self) -> Vec<String> {
        self.tracked_queries
            .lock()
            .expect("mock state poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl SearchClient for MockSearchClient {
    fn provider(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }

    async fn search(&self, query: &str) -> Vec<SearchResult> {
        self.tracked_queries
            .lock()
            .expect("mock state poisoned")
            .push(query.to_string());
        self.results.get(query).cloned().unwrap_or_default()
    }
}
