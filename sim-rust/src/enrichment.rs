use crate::SimulationParameters;
use serde::Serialize;
use supply_sim_sdk::{SearchClient, SearchResult};
use tracing::{info, warn};

/// Search results gathered for one run, with the text folded into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enrichment {
    /// `None` when no product search was made.
    pub product: Option<Vec<SearchResult>>,
    /// `None` when no competitor was given.
    pub competitor: Option<Vec<SearchResult>>,
    pub combined_text: String,
    /// Set when the search client has no credentials and nothing was searched.
    pub search_disabled: bool,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.product.is_none() && self.competitor.is_none()
    }
}

/// Search for the product and, if present, the competitor, one after the
/// other. Searches never fail; see [`SearchClient`].
pub async fn enrich(search: &dyn SearchClient, params: &SimulationParameters) -> Enrichment {
    let mut enrichment = Enrichment::default();

    if !search.is_configured() {
        warn!(
            provider = search.provider(),
            "web search is not configured, the prompt gets no real-world data"
        );
        enrichment.search_disabled = true;
        return enrichment;
    }

    if !params.product_name.is_empty() {
        let results = search.search(&params.product_name).await;
        info!(query = %params.product_name, count = results.len(), "product search");
        append_text(&mut enrichment.combined_text, &results);
        enrichment.product = Some(results);
    }

    if let Some(competitor) = params.competitor_name.as_deref().filter(|c| !c.is_empty()) {
        let results = search.search(competitor).await;
        info!(query = %competitor, count = results.len(), "competitor search");
        append_text(&mut enrichment.combined_text, &results);
        enrichment.competitor = Some(results);
    }

    enrichment
}

fn append_text(text: &mut String, results: &[SearchResult]) {
    for item in results {
        text.push_str(&item.title);
        text.push_str(". ");
        text.push_str(&item.snippet);
        text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supply_sim_sdk::sdk_test::MockSearchClient;

    #[tokio::test]
    async fn searches_product_then_competitor() {
        let search = MockSearchClient::new()
            .with_results(
                "Widget",
                vec![SearchResult::new("Widget A", "first", "https://a.example")],
            )
            .with_results(
                "Rival",
                vec![
                    SearchResult::new("Rival B", "second", "https://b.example"),
                    SearchResult::new("Rival C", "third", ""),
                ],
            );
        let params = SimulationParameters {
            product_name: "Widget".to_string(),
            competitor_name: Some("Rival".to_string()),
            ..Default::default()
        };

        let enrichment = enrich(&search, &params).await;

        assert_eq!(search.tracked_queries(), vec!["Widget", "Rival"]);
        assert_eq!(enrichment.product.as_ref().map(Vec::len), Some(1));
        assert_eq!(enrichment.competitor.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            enrichment.combined_text,
            "Widget A. first\nRival B. second\nRival C. third\n"
        );
    }

    #[tokio::test]
    async fn skips_missing_competitor() {
        let search = MockSearchClient::new();
        let params = SimulationParameters::default();

        let enrichment = enrich(&search, &params).await;

        assert_eq!(search.tracked_queries(), vec!["Sample Product"]);
        assert_eq!(enrichment.product, Some(vec![]));
        assert_eq!(enrichment.competitor, None);
        assert!(enrichment.combined_text.is_empty());
    }

    #[tokio::test]
    async fn skips_empty_product_name() {
        let search = MockSearchClient::new();
        let params = SimulationParameters {
            product_name: String::new(),
            ..Default::default()
        };

        let enrichment = enrich(&search, &params).await;

        assert!(search.tracked_queries().is_empty());
        assert!(enrichment.is_empty());
        assert!(!enrichment.search_disabled);
    }

    #[tokio::test]
    async fn unconfigured_search_is_flagged_and_skipped() {
        let search = MockSearchClient::new()
            .with_results("Widget", vec![SearchResult::new("Widget A", "first", "")])
            .unconfigured();
        let params = SimulationParameters {
            product_name: "Widget".to_string(),
            competitor_name: Some("Rival".to_string()),
            ..Default::default()
        };

        let enrichment = enrich(&search, &params).await;

        assert!(search.tracked_queries().is_empty());
        assert!(enrichment.search_disabled);
        assert!(enrichment.is_empty());
        assert!(enrichment.combined_text.is_empty());
    }
}
