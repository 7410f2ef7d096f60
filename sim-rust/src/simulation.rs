use crate::{
    enrichment::enrich,
    prompt::{build_prompt, build_role_prompt},
    roles::ROLES,
    DerivedSeries, Enrichment, SimulationError, SimulationParameters,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};
use supply_sim_sdk::{LanguageModel, LanguageModelInput, Message, ModelUsage, SearchClient};
use tracing::{info, info_span, Instrument};

/// How the role analyses are requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessMode {
    /// One prompt listing every role's analysis, one completion.
    #[default]
    Combined,
    /// One completion per role, issued in order and concatenated.
    FanOut,
}

impl FromStr for ProcessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" | "sequential" => Ok(Self::Combined),
            "fan-out" | "fanout" => Ok(Self::FanOut),
            other => Err(format!(
                "unknown process mode {other:?} (expected \"combined\" or \"fan-out\")"
            )),
        }
    }
}

impl fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined => f.write_str("combined"),
            Self::FanOut => f.write_str("fan-out"),
        }
    }
}

/// Sampling settings and process mode for every run.
/// # Default Values
/// - `temperature`: `Some(0.5)`
/// - `max_tokens`: `None`
/// - `process`: `ProcessMode::Combined`
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub process: ProcessMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            temperature: Some(0.5),
            max_tokens: None,
            process: ProcessMode::Combined,
        }
    }
}

/// The model-independent part of a run: validated parameters, search
/// results and the derived series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRun {
    pub params: SimulationParameters,
    pub enrichment: Enrichment,
    pub series: DerivedSeries,
}

/// Everything produced by one run, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub params: SimulationParameters,
    pub enrichment: Enrichment,
    /// Prompts sent to the model, in order.
    pub prompts: Vec<String>,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ModelUsage>,
    pub series: DerivedSeries,
}

/// The linear pipeline: enrichment, prompt, completion, derived series.
pub struct Simulation {
    model: Arc<dyn LanguageModel>,
    search: Arc<dyn SearchClient>,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        search: Arc<dyn SearchClient>,
        config: SimulationConfig,
    ) -> Self {
        Self {
            model,
            search,
            config,
        }
    }

    /// Run the whole pipeline once. Language model failures are returned
    /// as-is; search failures never are.
    pub async fn run(
        &self,
        params: &SimulationParameters,
    ) -> Result<SimulationReport, SimulationError> {
        let span = info_span!(
            "supply_sim.run",
            product = %params.product_name,
            process = %self.config.process,
        );
        async {
            let prepared = self.prepare(params).await?;
            self.analyse(&prepared).await
        }
        .instrument(span)
        .await
    }

    /// Validate the parameters, run the searches and compute the series.
    /// The model is not called, so the result can be shown even when the
    /// completion later fails.
    pub async fn prepare(
        &self,
        params: &SimulationParameters,
    ) -> Result<PreparedRun, SimulationError> {
        params.validate()?;

        let enrichment = enrich(self.search.as_ref(), params).await;
        let series = DerivedSeries::compute(params);

        Ok(PreparedRun {
            params: params.clone(),
            enrichment,
            series,
        })
    }

    /// Request the analysis of a prepared run from the model.
    pub async fn analyse(
        &self,
        prepared: &PreparedRun,
    ) -> Result<SimulationReport, SimulationError> {
        let PreparedRun {
            params,
            enrichment,
            series,
        } = prepared;

        let mut usage: Option<ModelUsage> = None;
        let (prompts, analysis) = match self.config.process {
            ProcessMode::Combined => {
                let prompt = build_prompt(params, &enrichment.combined_text);
                let text = self.complete(None, &prompt, &mut usage).await?;
                (vec![prompt], text)
            }
            ProcessMode::FanOut => {
                let mut prompts = Vec::with_capacity(ROLES.len());
                let mut sections = Vec::with_capacity(ROLES.len());
                for role in &ROLES {
                    let prompt = build_role_prompt(role, params, &enrichment.combined_text);
                    let text = self
                        .complete(Some(role.system_prompt()), &prompt, &mut usage)
                        .await?;
                    sections.push(format!("## {}\n\n{}", role.role, text.trim()));
                    prompts.push(prompt);
                }
                (prompts, sections.join("\n\n"))
            }
        };

        info!(
            completions = prompts.len(),
            total_cost = series.total_cost(),
            "simulation completed"
        );

        Ok(SimulationReport {
            params: params.clone(),
            enrichment: enrichment.clone(),
            prompts,
            analysis,
            usage,
            series: series.clone(),
        })
    }

    async fn complete(
        &self,
        system_prompt: Option<String>,
        prompt: &str,
        usage: &mut Option<ModelUsage>,
    ) -> Result<String, SimulationError> {
        let response = self
            .model
            .generate(LanguageModelInput {
                system_prompt,
                messages: vec![Message::user(prompt)],
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            })
            .await?;

        if let Some(response_usage) = &response.usage {
            usage
                .get_or_insert_with(ModelUsage::default)
                .add(response_usage);
        }
        Ok(response.text)
    }
}
