use crate::{roles::ROLES, AnalystRole, SimulationParameters};

/// Fixed instructions describing the expected shape of the answer. The last
/// one is completed with the competitor name.
const OUTPUT_INSTRUCTIONS: [&str; 3] = [
    "A breakdown of total costs (raw materials + production + logistics).",
    "An analysis of the main risks and mitigation strategies.",
    "Suggestions to optimise the supply chain (reduce costs, lead time, etc.).",
];

/// The prompt sent in the combined process: every parameter, the search
/// snippets, one analysis line per role and the output instructions.
pub fn build_prompt(params: &SimulationParameters, enrichment_text: &str) -> String {
    let analyses = ROLES
        .iter()
        .enumerate()
        .map(|(i, role)| format!("{}. {}: {}", i + 1, role.role, role.analysis))
        .collect::<Vec<_>>()
        .join("\n");

    let outputs = OUTPUT_INSTRUCTIONS
        .iter()
        .map(|line| format!("- {line}"))
        .chain(std::iter::once(competitor_focus(params)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{context}\n\nCarry out the following analysis:\n{analyses}\n\nProvide:\n{outputs}\n",
        context = context_block(params, enrichment_text),
    )
}

/// The prompt for a single role in the fan-out process. The role's
/// backstory goes into the system prompt, see [`AnalystRole::system_prompt`].
pub fn build_role_prompt(
    role: &AnalystRole,
    params: &SimulationParameters,
    enrichment_text: &str,
) -> String {
    format!(
        "{context}\n\nTask for the {name}: {task}\nExpected output: {expected}\n{focus}\n",
        context = context_block(params, enrichment_text),
        name = role.role,
        task = role.task,
        expected = role.expected_output,
        focus = competitor_focus(params),
    )
}

fn context_block(params: &SimulationParameters, enrichment_text: &str) -> String {
    let product = &params.product_name;
    format!(
        "We are simulating a supply chain for the product '{product}' with the following parameters:\n\
         \n\
         - Product: {product}\n\
         - Supplier lead time: {lead_time} days\n\
         - Supplier cost factor: {supplier_cost_factor}\n\
         - Monthly manufacturing capacity: {capacity} units\n\
         - Manufacturing cost per unit: {cost_per_unit} €\n\
         - Logistics cost factor: {logistics_cost_factor}\n\
         - Expected retail demand: {demand} units/month\n\
         - Retail price: {price} €\n\
         \n\
         Real-world data (web search) on the product and/or competitors:\n\
         {enrichment_text}",
        lead_time = params.supplier_lead_time,
        supplier_cost_factor = params.supplier_cost_factor,
        capacity = params.manufacturing_capacity,
        cost_per_unit = params.manufacturing_cost_per_unit,
        logistics_cost_factor = params.logistics_cost_factor,
        demand = params.retail_demand_forecast,
        price = params.retail_price,
    )
}

fn competitor_focus(params: &SimulationParameters) -> String {
    format!(
        "- A focus on competitiveness against '{}' (if provided).",
        params.competitor_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RETAILER;

    fn params() -> SimulationParameters {
        SimulationParameters {
            product_name: "Solar Inverter X2".to_string(),
            competitor_name: Some("Voltix".to_string()),
            supplier_lead_time: 21,
            supplier_cost_factor: 1.25,
            manufacturing_capacity: 12_000,
            manufacturing_cost_per_unit: 74.5,
            logistics_cost_factor: 0.8,
            retail_demand_forecast: 9000,
            retail_price: 249.0,
        }
    }

    #[test]
    fn contains_every_parameter_value() {
        let prompt = build_prompt(&params(), "");
        for expected in [
            "'Solar Inverter X2'",
            "Supplier lead time: 21 days",
            "Supplier cost factor: 1.25",
            "Monthly manufacturing capacity: 12000 units",
            "Manufacturing cost per unit: 74.5 €",
            "Logistics cost factor: 0.8",
            "Expected retail demand: 9000 units/month",
            "Retail price: 249 €",
            "'Voltix'",
        ] {
            assert!(prompt.contains(expected), "missing {expected:?} in:\n{prompt}");
        }
    }

    #[test]
    fn has_eight_parameter_lines_five_analyses_and_four_outputs() {
        let prompt = build_prompt(&params(), "");

        let (head, rest) = prompt.split_once("Real-world data").unwrap();
        assert_eq!(head.lines().filter(|l| l.starts_with("- ")).count(), 8);

        let (analysis, outputs) = rest.split_once("Provide:").unwrap();
        for (i, role) in ROLES.iter().enumerate() {
            assert!(analysis.contains(&format!("{}. {}:", i + 1, role.role)));
        }
        assert_eq!(outputs.lines().filter(|l| l.starts_with("- ")).count(), 4);
    }

    #[test]
    fn embeds_enrichment_text() {
        let prompt = build_prompt(&params(), "Inverter review. Great efficiency.\n");
        assert!(prompt.contains(
            "Real-world data (web search) on the product and/or competitors:\nInverter review. Great efficiency.\n"
        ));
    }

    #[test]
    fn missing_competitor_leaves_empty_quote() {
        let params = SimulationParameters {
            competitor_name: None,
            ..params()
        };
        assert!(build_prompt(&params, "").contains("competitiveness against '' (if provided)"));
    }

    #[test]
    fn role_prompt_carries_task_and_parameters() {
        let prompt = build_role_prompt(&RETAILER, &params(), "");
        assert!(prompt.contains("Task for the Retailer: Forecast retail demand"));
        assert!(prompt.contains("Expected output: Demand forecast"));
        assert!(prompt.contains("Retail price: 249 €"));
        assert!(prompt.contains("'Voltix'"));
    }

    #[test]
    fn is_pure() {
        assert_eq!(build_prompt(&params(), "x"), build_prompt(&params(), "x"));
    }
}
