//! Test doubles for the language model and search clients.

mod model;
mod search;

pub use model::{MockGenerateResult, MockLanguageModel};
pub use search::MockSearchClient;
