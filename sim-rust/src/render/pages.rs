use super::{
    chart::{self, Axes, LineSeries, Marker},
    format_number,
};
use crate::{
    params::{
        FieldLimits, LOGISTICS_COST_FACTOR_LIMITS, MANUFACTURING_CAPACITY_LIMITS,
        MANUFACTURING_COST_PER_UNIT_LIMITS, RETAIL_DEMAND_FORECAST_LIMITS, RETAIL_PRICE_LIMITS,
        SUPPLIER_COST_FACTOR_LIMITS, SUPPLIER_LEAD_TIME_LIMITS,
    },
    series::MONTHS,
    DerivedSeries, Enrichment, PreparedRun, SimulationParameters, SimulationParametersForm,
    SimulationReport,
};
use askama::Template;
use supply_sim_sdk::SearchResult;

/// One input of the parameters form.
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub numeric: bool,
    pub min: String,
    pub max: String,
    pub step: &'static str,
    pub required: bool,
}

impl FieldView {
    fn text(name: &'static str, label: &'static str, value: &str, required: bool) -> Self {
        Self {
            name,
            label,
            value: value.to_string(),
            numeric: false,
            min: String::new(),
            max: String::new(),
            step: "",
            required,
        }
    }

    fn number(label: &'static str, limits: FieldLimits, step: &'static str, value: &str) -> Self {
        Self {
            name: limits.field,
            label,
            value: value.to_string(),
            numeric: true,
            min: limits.min.to_string(),
            max: limits.max.to_string(),
            step,
            required: true,
        }
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormPage {
    pub fields: Vec<FieldView>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl FormPage {
    pub fn new(form: &SimulationParametersForm) -> Self {
        let fields = vec![
            FieldView::text("product_name", "Product / scenario name *", &form.product_name, true),
            FieldView::text(
                "competitor_name",
                "Competitor name (optional)",
                &form.competitor_name,
                false,
            ),
            FieldView::number(
                "Average supplier lead time (days)",
                SUPPLIER_LEAD_TIME_LIMITS,
                "1",
                &form.supplier_lead_time,
            ),
            FieldView::number(
                "Supplier cost factor",
                SUPPLIER_COST_FACTOR_LIMITS,
                "0.01",
                &form.supplier_cost_factor,
            ),
            FieldView::number(
                "Manufacturing capacity (units per month)",
                MANUFACTURING_CAPACITY_LIMITS,
                "1",
                &form.manufacturing_capacity,
            ),
            FieldView::number(
                "Manufacturing cost per unit (€)",
                MANUFACTURING_COST_PER_UNIT_LIMITS,
                "0.01",
                &form.manufacturing_cost_per_unit,
            ),
            FieldView::number(
                "Logistics cost factor",
                LOGISTICS_COST_FACTOR_LIMITS,
                "0.01",
                &form.logistics_cost_factor,
            ),
            FieldView::number(
                "Expected demand (units per month)",
                RETAIL_DEMAND_FORECAST_LIMITS,
                "1",
                &form.retail_demand_forecast,
            ),
            FieldView::number(
                "Retail price (€)",
                RETAIL_PRICE_LIMITS,
                "0.01",
                &form.retail_price,
            ),
        ];

        Self {
            fields,
            error: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

/// Search hits for one query.
pub struct SearchSection {
    pub heading: String,
    pub results: Vec<SearchResult>,
}

/// The search block of a page: either the hit lists or a notice that web
/// search is turned off.
pub struct SearchView {
    pub notice: Option<String>,
    pub sections: Vec<SearchSection>,
}

impl SearchView {
    pub fn new(enrichment: &Enrichment, params: &SimulationParameters) -> Self {
        let notice = enrichment.search_disabled.then(|| {
            "Web search is disabled because no SerpAPI key is configured. \
             The analysis relies on the parameters alone."
                .to_string()
        });

        let mut sections = Vec::new();
        if enrichment.is_empty() {
            return Self { notice, sections };
        }
        if let Some(results) = &enrichment.product {
            sections.push(SearchSection {
                heading: "Real-world data on the product / scenario".to_string(),
                results: results.clone(),
            });
        }
        if let Some(results) = &enrichment.competitor {
            sections.push(SearchSection {
                heading: format!(
                    "Real-world data on competitor '{}'",
                    params.competitor_label()
                ),
                results: results.clone(),
            });
        }
        Self { notice, sections }
    }
}

pub struct CostRow {
    pub month: &'static str,
    pub amount: String,
}

/// Both charts and the cost table.
pub struct ChartsView {
    pub demand_chart: String,
    pub cost_chart: String,
    pub cost_rows: Vec<CostRow>,
    pub total_cost: String,
}

impl From<&DerivedSeries> for ChartsView {
    fn from(series: &DerivedSeries) -> Self {
        let demand_chart = chart::line_chart(
            Axes {
                title: "Demand vs. Production",
                x_label: "Months",
                y_label: "Units",
            },
            &MONTHS,
            &[
                LineSeries {
                    label: "Planned production",
                    values: &series.production_plan,
                    color: "#e24a33",
                    marker: Marker::Circle,
                },
                LineSeries {
                    label: "Expected demand",
                    values: &series.demand_curve,
                    color: "#348abd",
                    marker: Marker::Square,
                },
            ],
        );
        let cost_chart = chart::bar_chart(
            Axes {
                title: "Estimated Total Costs",
                x_label: "Months",
                y_label: "€",
            },
            &MONTHS,
            &series.monthly_costs,
            "cadetblue",
        );

        Self {
            demand_chart,
            cost_chart,
            cost_rows: series
                .cost_rows()
                .map(|(month, amount)| CostRow {
                    month,
                    amount: format_number(amount, 2),
                })
                .collect(),
            total_cost: format_number(series.total_cost(), 2),
        }
    }
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub product_name: String,
    pub search: SearchView,
    pub analysis: String,
    pub charts: ChartsView,
    pub form: SimulationParametersForm,
}

impl From<&SimulationReport> for ResultPage {
    fn from(report: &SimulationReport) -> Self {
        Self {
            product_name: report.params.product_name.clone(),
            search: SearchView::new(&report.enrichment, &report.params),
            analysis: report.analysis.clone(),
            charts: ChartsView::from(&report.series),
            form: SimulationParametersForm::from(&report.params),
        }
    }
}

/// Shown when the completion fails. The searches and the series do not
/// depend on the model and are still rendered.
#[derive(Template)]
#[template(path = "failed.html")]
pub struct FailedRunPage {
    pub product_name: String,
    pub message: String,
    pub search: SearchView,
    pub charts: ChartsView,
}

impl FailedRunPage {
    pub fn new(prepared: &PreparedRun, message: impl Into<String>) -> Self {
        Self {
            product_name: prepared.params.product_name.clone(),
            message: message.into(),
            search: SearchView::new(&prepared.enrichment, &prepared.params),
            charts: ChartsView::from(&prepared.series),
        }
    }
}
