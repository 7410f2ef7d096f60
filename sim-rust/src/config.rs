use crate::{ConfigError, ProcessMode, Simulation, SimulationConfig};
use std::{env, net::SocketAddr, sync::Arc};
use supply_sim_sdk::{
    openai::{OpenAIChatModel, OpenAIChatModelOptions},
    search::{SerpApiClient, SerpApiClientOptions},
};
use tracing::warn;

pub const DEFAULT_MODEL_ID: &str = "gpt-4o-mini";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Process-wide settings, read once at startup.
///
/// | Variable | Default |
/// |---|---|
/// | `OPENAI_API_KEY` | empty (completions fail upstream) |
/// | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
/// | `SERPAPI_API_KEY` | empty (searches are skipped) |
/// | `SERPAPI_BASE_URL` | `https://serpapi.com` |
/// | `SUPPLY_SIM_MODEL` | `gpt-4o-mini` |
/// | `SUPPLY_SIM_TEMPERATURE` | `0.5` |
/// | `SUPPLY_SIM_MAX_TOKENS` | unset |
/// | `SUPPLY_SIM_PROCESS` | `combined` |
/// | `SUPPLY_SIM_BIND` | `127.0.0.1:8080` |
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub serpapi_api_key: String,
    pub serpapi_base_url: Option<String>,
    pub model_id: String,
    pub simulation: SimulationConfig,
    pub bind_address: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY").unwrap_or_default();
        if openai_api_key.is_empty() {
            warn!("OPENAI_API_KEY is not set, simulation runs will fail");
        }
        let serpapi_api_key = get("SERPAPI_API_KEY").unwrap_or_default();
        if serpapi_api_key.is_empty() {
            warn!("SERPAPI_API_KEY is not set, web search enrichment is disabled");
        }

        let defaults = SimulationConfig::default();
        let temperature = match get("SUPPLY_SIM_TEMPERATURE") {
            Some(value) => Some(parse_number("SUPPLY_SIM_TEMPERATURE", &value)?),
            None => defaults.temperature,
        };
        let max_tokens = get("SUPPLY_SIM_MAX_TOKENS")
            .map(|value| parse_number("SUPPLY_SIM_MAX_TOKENS", &value))
            .transpose()?;
        let process = match get("SUPPLY_SIM_PROCESS") {
            Some(value) => value
                .parse::<ProcessMode>()
                .map_err(|message| ConfigError::Invalid {
                    key: "SUPPLY_SIM_PROCESS",
                    message,
                })?,
            None => defaults.process,
        };

        let bind_address = get("SUPPLY_SIM_BIND")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|error| ConfigError::Invalid {
                key: "SUPPLY_SIM_BIND",
                message: error.to_string(),
            })?;

        Ok(Self {
            openai_api_key,
            openai_base_url: get("OPENAI_BASE_URL"),
            serpapi_api_key,
            serpapi_base_url: get("SERPAPI_BASE_URL"),
            model_id: get("SUPPLY_SIM_MODEL").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            simulation: SimulationConfig {
                temperature,
                max_tokens,
                process,
            },
            bind_address,
        })
    }

    /// Wire the configured clients into a [`Simulation`].
    pub fn build_simulation(&self) -> Simulation {
        let model = OpenAIChatModel::new(
            self.model_id.clone(),
            OpenAIChatModelOptions {
                api_key: self.openai_api_key.clone(),
                base_url: self.openai_base_url.clone(),
                ..Default::default()
            },
        );
        let search = SerpApiClient::new(SerpApiClientOptions {
            api_key: self.serpapi_api_key.clone(),
            base_url: self.serpapi_base_url.clone(),
            ..Default::default()
        });

        Simulation::new(Arc::new(model), Arc::new(search), self.simulation.clone())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
