mod client_utils;
mod errors;
mod language_model;
pub mod openai;
mod opentelemetry;
pub mod sdk_test;
pub mod search;
mod types;

pub use errors::*;
pub use language_model::LanguageModel;
pub use search::{SearchClient, SearchResult};
pub use types::*;
