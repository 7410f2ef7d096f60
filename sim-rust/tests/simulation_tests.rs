use std::sync::Arc;
use supply_sim::{
    roles::ROLES, ProcessMode, Simulation, SimulationConfig, SimulationError,
    SimulationParameters,
};
use supply_sim_sdk::{
    sdk_test::{MockLanguageModel, MockSearchClient},
    LanguageModelError, Message, ModelResponse, ModelUsage, SearchResult,
};

fn params() -> SimulationParameters {
    SimulationParameters {
        product_name: "Trail Bike 29".to_string(),
        competitor_name: Some("Ridgeway".to_string()),
        ..Default::default()
    }
}

fn search() -> Arc<MockSearchClient> {
    Arc::new(
        MockSearchClient::new()
            .with_results(
                "Trail Bike 29",
                vec![SearchResult::new(
                    "Trail Bike 29 launch",
                    "Frames sourced from Taiwan.",
                    "https://example.com/launch",
                )],
            )
            .with_results(
                "Ridgeway",
                vec![SearchResult::new(
                    "Ridgeway cuts prices",
                    "Entry models drop 10%.",
                    "https://example.com/ridgeway",
                )],
            ),
    )
}

#[tokio::test]
async fn combined_run_sends_one_prompt_and_returns_analysis() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(ModelResponse {
        text: "Costs are dominated by frames.".to_string(),
        usage: Some(ModelUsage {
            input_tokens: 400,
            output_tokens: 50,
        }),
    });
    let search = search();

    let simulation = Simulation::new(model.clone(), search.clone(), SimulationConfig::default());
    let report = simulation.run(&params()).await.expect("simulation runs");

    assert_eq!(report.analysis, "Costs are dominated by frames.");
    assert_eq!(
        report.usage,
        Some(ModelUsage {
            input_tokens: 400,
            output_tokens: 50,
        })
    );
    assert_eq!(search.tracked_queries(), vec!["Trail Bike 29", "Ridgeway"]);

    let inputs = model.tracked_generate_inputs();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].temperature, Some(0.5));
    assert_eq!(inputs[0].system_prompt, None);
    assert_eq!(inputs[0].messages.len(), 1);

    let prompt = inputs[0].messages[0].content();
    assert_eq!(report.prompts, vec![prompt.to_string()]);
    assert!(prompt.contains("Trail Bike 29 launch. Frames sourced from Taiwan.\n"));
    assert!(prompt.contains("Ridgeway cuts prices. Entry models drop 10%.\n"));
    assert!(prompt.contains("Monthly manufacturing capacity: 10000 units"));
    assert!(prompt.contains("competitiveness against 'Ridgeway'"));

    assert_eq!(
        report.series.production_plan,
        [8000.0, 8500.0, 9000.0, 9000.0, 9500.0]
    );
    assert!((report.series.monthly_costs[0] - 408_000.0).abs() < 1e-6);
}

#[tokio::test]
async fn fan_out_run_asks_each_role_in_order() {
    let model = Arc::new(MockLanguageModel::new());
    for role in &ROLES {
        model.enqueue_generate(ModelResponse::text(format!("{} findings\n", role.role)));
    }

    let simulation = Simulation::new(
        model.clone(),
        search(),
        SimulationConfig {
            process: ProcessMode::FanOut,
            ..Default::default()
        },
    );
    let report = simulation.run(&params()).await.expect("simulation runs");

    let inputs = model.tracked_generate_inputs();
    assert_eq!(inputs.len(), ROLES.len());
    for (input, role) in inputs.iter().zip(&ROLES) {
        let system_prompt = input.system_prompt.as_deref().unwrap();
        assert!(system_prompt.starts_with(&format!("You are the {}", role.role)));
        assert!(input.messages[0]
            .content()
            .contains(&format!("Task for the {}:", role.role)));
    }

    assert_eq!(report.prompts.len(), ROLES.len());
    assert!(report
        .analysis
        .starts_with("## Supplier\n\nSupplier findings\n\n## Manufacturer"));
    assert!(report
        .analysis
        .ends_with("## Competitor Analyst\n\nCompetitor Analyst findings"));
    assert_eq!(report.usage, None);
}

#[tokio::test]
async fn completion_errors_propagate() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(LanguageModelError::Refusal("no".to_string()));

    let simulation = Simulation::new(model.clone(), search(), SimulationConfig::default());
    let error = simulation.run(&params()).await.unwrap_err();

    assert!(matches!(
        error,
        SimulationError::LanguageModel(LanguageModelError::Refusal(_))
    ));
}

#[tokio::test]
async fn fan_out_stops_at_first_failure() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(ModelResponse::text("Supplier findings"));
    model.enqueue_generate(LanguageModelError::InvalidInput("quota".to_string()));

    let simulation = Simulation::new(
        model.clone(),
        search(),
        SimulationConfig {
            process: ProcessMode::FanOut,
            ..Default::default()
        },
    );
    assert!(simulation.run(&params()).await.is_err());
    assert_eq!(model.tracked_generate_inputs().len(), 2);
}

#[tokio::test]
async fn invalid_parameters_never_reach_the_clients() {
    let model = Arc::new(MockLanguageModel::new());
    let search = search();

    let simulation = Simulation::new(model.clone(), search.clone(), SimulationConfig::default());
    let error = simulation
        .run(&SimulationParameters {
            manufacturing_capacity: 50,
            ..params()
        })
        .await
        .unwrap_err();

    assert!(matches!(error, SimulationError::Params(_)));
    assert!(model.tracked_generate_inputs().is_empty());
    assert!(search.tracked_queries().is_empty());
}

#[tokio::test]
async fn placeholder_search_results_are_folded_into_the_prompt() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(ModelResponse::text("ok"));
    let search = Arc::new(
        MockSearchClient::new().with_results("Trail Bike 29", vec![SearchResult::not_found()]),
    );

    let simulation = Simulation::new(model.clone(), search, SimulationConfig::default());
    let report = simulation
        .run(&SimulationParameters {
            competitor_name: None,
            ..params()
        })
        .await
        .unwrap();

    assert_eq!(report.enrichment.combined_text, "No data found. \n");
    let inputs = model.tracked_generate_inputs();
    assert!(matches!(&inputs[0].messages[0], Message::User(m) if m.content.contains("No data found. \n")));
}

#[tokio::test]
async fn prepare_gathers_searches_and_series_without_the_model() {
    let model = Arc::new(MockLanguageModel::new());
    let search = search();

    let simulation = Simulation::new(model.clone(), search.clone(), SimulationConfig::default());
    let prepared = simulation.prepare(&params()).await.expect("parameters are valid");

    assert!(model.tracked_generate_inputs().is_empty());
    assert_eq!(search.tracked_queries(), vec!["Trail Bike 29", "Ridgeway"]);
    assert_eq!(prepared.enrichment.product.as_ref().map(Vec::len), Some(1));
    assert!((prepared.series.total_cost() - 2_244_000.0).abs() < 1e-6);

    model.enqueue_generate(ModelResponse::text("Late analysis"));
    let report = simulation.analyse(&prepared).await.expect("analysis runs");
    assert_eq!(report.analysis, "Late analysis");
    assert_eq!(report.series, prepared.series);
    assert_eq!(search.tracked_queries().len(), 2);
}

#[tokio::test]
async fn unconfigured_search_still_runs_the_analysis() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(ModelResponse::text("ok"));
    let search = Arc::new(MockSearchClient::new().unconfigured());

    let simulation = Simulation::new(model.clone(), search.clone(), SimulationConfig::default());
    let report = simulation.run(&params()).await.expect("simulation runs");

    assert!(report.enrichment.search_disabled);
    assert!(search.tracked_queries().is_empty());
    assert_eq!(model.tracked_generate_inputs().len(), 1);
}
