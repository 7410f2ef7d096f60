use super::{SearchClient, SearchResult};
use crate::SearchError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

const PROVIDER: &str = "serpapi";

pub struct SerpApiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct SerpApiClientOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    pub client: Option<Client>,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SearchResult>,
}

impl SerpApiClient {
    #[must_use]
    pub fn new(options: SerpApiClientOptions) -> Self {
        let SerpApiClientOptions {
            base_url,
            api_key,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://serpapi.com".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key,
            base_url,
            client: client.unwrap_or_else(Client::new),
        }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[("q", query), ("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::StatusCode(
                status,
                response.text().await.unwrap_or_default(),
            ));
        }

        let body: SerpApiResponse = response.json().await?;
        Ok(body.organic_results)
    }
}

#[async_trait::async_trait]
impl SearchClient for SerpApiClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search(&self, query: &str) -> Vec<SearchResult> {
        if !self.is_configured() {
            warn!(provider = PROVIDER, "No SerpAPI key available, skipping search");
            return Vec::new();
        }

        match self.fetch(query).await {
            Ok(results) => {
                debug!(provider = PROVIDER, query, count = results.len(), "search completed");
                results
            }
            Err(error) => {
                warn!(provider = PROVIDER, query, %error, "search failed");
                vec![SearchResult::not_found()]
            }
        }
    }
}
