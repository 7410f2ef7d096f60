use crate::ParamsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("Language model error: {0}")]
    LanguageModel(#[from] supply_sim_sdk::LanguageModelError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("Invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Error)]
#[error("Template error: {0}")]
pub struct RenderError(#[from] askama::Error);

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;
