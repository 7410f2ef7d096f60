use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive bounds a form field accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLimits {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldLimits {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    fn check(&self, value: f64) -> Result<(), ParamsError> {
        if (self.min..=self.max).contains(&value) {
            Ok(())
        } else {
            Err(ParamsError::OutOfRange {
                field: self.field,
                min: self.min,
                max: self.max,
                value,
            })
        }
    }
}

pub const SUPPLIER_LEAD_TIME_LIMITS: FieldLimits =
    FieldLimits::new("supplier_lead_time", 1.0, 60.0);
pub const SUPPLIER_COST_FACTOR_LIMITS: FieldLimits =
    FieldLimits::new("supplier_cost_factor", 0.1, 10.0);
pub const MANUFACTURING_CAPACITY_LIMITS: FieldLimits =
    FieldLimits::new("manufacturing_capacity", 100.0, 100_000.0);
pub const MANUFACTURING_COST_PER_UNIT_LIMITS: FieldLimits =
    FieldLimits::new("manufacturing_cost_per_unit", 1.0, 2000.0);
pub const LOGISTICS_COST_FACTOR_LIMITS: FieldLimits =
    FieldLimits::new("logistics_cost_factor", 0.1, 10.0);
pub const RETAIL_DEMAND_FORECAST_LIMITS: FieldLimits =
    FieldLimits::new("retail_demand_forecast", 100.0, 200_000.0);
pub const RETAIL_PRICE_LIMITS: FieldLimits = FieldLimits::new("retail_price", 1.0, 5000.0);

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParamsError {
    #[error("A product or scenario name is required")]
    MissingProductName,
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// The inputs of one simulation run, captured from the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_name: Option<String>,
    /// Average supplier lead time, in days.
    pub supplier_lead_time: u32,
    pub supplier_cost_factor: f64,
    /// Units per month.
    pub manufacturing_capacity: u32,
    /// EUR per unit.
    pub manufacturing_cost_per_unit: f64,
    pub logistics_cost_factor: f64,
    /// Units per month.
    pub retail_demand_forecast: u32,
    /// EUR per unit.
    pub retail_price: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            product_name: "Sample Product".to_string(),
            competitor_name: None,
            supplier_lead_time: 15,
            supplier_cost_factor: 1.0,
            manufacturing_capacity: 10_000,
            manufacturing_cost_per_unit: 50.0,
            logistics_cost_factor: 1.0,
            retail_demand_forecast: 5000,
            retail_price: 120.0,
        }
    }
}

impl SimulationParameters {
    /// Check every field against the limits the form enforces.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.product_name.trim().is_empty() {
            return Err(ParamsError::MissingProductName);
        }
        SUPPLIER_LEAD_TIME_LIMITS.check(f64::from(self.supplier_lead_time))?;
        SUPPLIER_COST_FACTOR_LIMITS.check(self.supplier_cost_factor)?;
        MANUFACTURING_CAPACITY_LIMITS.check(f64::from(self.manufacturing_capacity))?;
        MANUFACTURING_COST_PER_UNIT_LIMITS.check(self.manufacturing_cost_per_unit)?;
        LOGISTICS_COST_FACTOR_LIMITS.check(self.logistics_cost_factor)?;
        RETAIL_DEMAND_FORECAST_LIMITS.check(f64::from(self.retail_demand_forecast))?;
        RETAIL_PRICE_LIMITS.check(self.retail_price)?;
        Ok(())
    }

    /// The competitor name, or an empty string when none was given.
    pub fn competitor_label(&self) -> &str {
        self.competitor_name.as_deref().unwrap_or_default()
    }
}

/// Raw URL-encoded form submission. Every field arrives as text and is
/// parsed and range-checked when converted into [`SimulationParameters`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParametersForm {
    pub product_name: String,
    pub competitor_name: String,
    pub supplier_lead_time: String,
    pub supplier_cost_factor: String,
    pub manufacturing_capacity: String,
    pub manufacturing_cost_per_unit: String,
    pub logistics_cost_factor: String,
    pub retail_demand_forecast: String,
    pub retail_price: String,
}

impl From<&SimulationParameters> for SimulationParametersForm {
    fn from(params: &SimulationParameters) -> Self {
        Self {
            product_name: params.product_name.clone(),
            competitor_name: params.competitor_label().to_string(),
            supplier_lead_time: params.supplier_lead_time.to_string(),
            supplier_cost_factor: params.supplier_cost_factor.to_string(),
            manufacturing_capacity: params.manufacturing_capacity.to_string(),
            manufacturing_cost_per_unit: params.manufacturing_cost_per_unit.to_string(),
            logistics_cost_factor: params.logistics_cost_factor.to_string(),
            retail_demand_forecast: params.retail_demand_forecast.to_string(),
            retail_price: params.retail_price.to_string(),
        }
    }
}

impl TryFrom<&SimulationParametersForm> for SimulationParameters {
    type Error = ParamsError;

    fn try_from(form: &SimulationParametersForm) -> Result<Self, Self::Error> {
        let competitor_name = form.competitor_name.trim();

        let params = Self {
            product_name: form.product_name.trim().to_string(),
            competitor_name: (!competitor_name.is_empty()).then(|| competitor_name.to_string()),
            supplier_lead_time: parse_field("supplier_lead_time", &form.supplier_lead_time)?,
            supplier_cost_factor: parse_field("supplier_cost_factor", &form.supplier_cost_factor)?,
            manufacturing_capacity: parse_field(
                "manufacturing_capacity",
                &form.manufacturing_capacity,
            )?,
            manufacturing_cost_per_unit: parse_field(
                "manufacturing_cost_per_unit",
                &form.manufacturing_cost_per_unit,
            )?,
            logistics_cost_factor: parse_field(
                "logistics_cost_factor",
                &form.logistics_cost_factor,
            )?,
            retail_demand_forecast: parse_field(
                "retail_demand_forecast",
                &form.retail_demand_forecast,
            )?,
            retail_price: parse_field("retail_price", &form.retail_price)?,
        };

        params.validate()?;
        Ok(params)
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParamsError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParamsError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_limits() {
        assert_eq!(SimulationParameters::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_lead_time() {
        let params = SimulationParameters {
            supplier_lead_time: 61,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::OutOfRange {
                field: "supplier_lead_time",
                min: 1.0,
                max: 60.0,
                value: 61.0,
            })
        );
    }

    #[test]
    fn rejects_blank_product_name() {
        let params = SimulationParameters {
            product_name: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::MissingProductName));
    }

    #[test]
    fn form_round_trips_defaults() {
        let defaults = SimulationParameters::default();
        let form = SimulationParametersForm::from(&defaults);
        assert_eq!(SimulationParameters::try_from(&form), Ok(defaults));
    }

    #[test]
    fn blank_competitor_becomes_none() {
        let form = SimulationParametersForm {
            competitor_name: "  ".to_string(),
            ..SimulationParametersForm::from(&SimulationParameters::default())
        };
        let params = SimulationParameters::try_from(&form).unwrap();
        assert_eq!(params.competitor_name, None);
        assert_eq!(params.competitor_label(), "");
    }

    #[test]
    fn reports_unparseable_numbers() {
        let form = SimulationParametersForm {
            manufacturing_capacity: "ten thousand".to_string(),
            ..SimulationParametersForm::from(&SimulationParameters::default())
        };
        assert_eq!(
            SimulationParameters::try_from(&form),
            Err(ParamsError::InvalidNumber {
                field: "manufacturing_capacity",
                value: "ten thousand".to_string(),
            })
        );
    }

    #[test]
    fn negative_integers_do_not_parse() {
        let form = SimulationParametersForm {
            retail_demand_forecast: "-5".to_string(),
            ..SimulationParametersForm::from(&SimulationParameters::default())
        };
        assert!(matches!(
            SimulationParameters::try_from(&form),
            Err(ParamsError::InvalidNumber { field: "retail_demand_forecast", .. })
        ));
    }
}
