mod config;
mod enrichment;
mod errors;
mod params;
mod prompt;
pub mod render;
pub mod roles;
pub mod series;
pub mod server;
mod simulation;

pub use config::AppConfig;
pub use enrichment::{enrich, Enrichment};
pub use errors::*;
pub use params::*;
pub use prompt::{build_prompt, build_role_prompt};
pub use roles::AnalystRole;
pub use series::DerivedSeries;
pub use simulation::{
    PreparedRun, ProcessMode, Simulation, SimulationConfig, SimulationReport,
};
