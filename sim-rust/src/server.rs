//! HTTP surface: the parameters form and its two actions.
//!
//! - `GET /` renders the form with default parameters.
//! - `POST /apply` validates the submitted parameters and renders them back.
//! - `POST /run` runs the simulation and renders the results.
//! - `POST /api/run` is the JSON equivalent of `/run`.

use crate::{
    render::{render_page, FailedRunPage, FormPage, ResultPage},
    Simulation, SimulationError, SimulationParameters, SimulationParametersForm,
    SimulationReport,
};
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

#[derive(Clone)]
pub struct AppState {
    simulation: Arc<Simulation>,
}

pub fn router(simulation: Arc<Simulation>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/apply", post(apply))
        .route("/run", post(run))
        .route("/api/run", post(run_json))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { simulation })
}

async fn index() -> Response {
    let form = SimulationParametersForm::from(&SimulationParameters::default());
    page(StatusCode::OK, &FormPage::new(&form))
}

async fn apply(Form(form): Form<SimulationParametersForm>) -> Response {
    match SimulationParameters::try_from(&form) {
        Ok(_) => page(
            StatusCode::OK,
            &FormPage::new(&form).with_notice("Parameters applied."),
        ),
        Err(e) => page(
            StatusCode::BAD_REQUEST,
            &FormPage::new(&form).with_error(e.to_string()),
        ),
    }
}

async fn run(
    State(state): State<AppState>,
    Form(form): Form<SimulationParametersForm>,
) -> Response {
    let params = match SimulationParameters::try_from(&form) {
        Ok(params) => params,
        Err(e) => {
            return page(
                StatusCode::BAD_REQUEST,
                &FormPage::new(&form).with_error(e.to_string()),
            )
        }
    };

    let prepared = match state.simulation.prepare(&params).await {
        Ok(prepared) => prepared,
        Err(e) => {
            return page(
                error_status(&e),
                &FormPage::new(&form).with_error(e.to_string()),
            )
        }
    };

    match state.simulation.analyse(&prepared).await {
        Ok(report) => page(StatusCode::OK, &ResultPage::from(&report)),
        Err(e) => page(
            error_status(&e),
            &FailedRunPage::new(&prepared, e.to_string()),
        ),
    }
}

async fn run_json(
    State(state): State<AppState>,
    Json(params): Json<SimulationParameters>,
) -> Result<Json<SimulationReport>, (StatusCode, Json<serde_json::Value>)> {
    state
        .simulation
        .run(&params)
        .await
        .map(Json)
        .map_err(|e| (error_status(&e), Json(json!({ "error": e.to_string() }))))
}

async fn healthz() -> &'static str {
    "ok"
}

fn error_status(error: &SimulationError) -> StatusCode {
    match error {
        SimulationError::Params(e) => {
            warn!(error = %e, "rejected simulation parameters");
            StatusCode::BAD_REQUEST
        }
        SimulationError::LanguageModel(e) => {
            error!(error = %e, "completion failed");
            StatusCode::BAD_GATEWAY
        }
    }
}

fn page(status: StatusCode, template: &impl Template) -> Response {
    match render_page(template) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Template error: {e}")),
            )
                .into_response()
        }
    }
}
