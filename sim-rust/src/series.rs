//! Illustrative monthly series derived from the simulation inputs with fixed
//! multiplier tables. They chart the scenario; they do not depend on the
//! model's analysis.

use crate::SimulationParameters;
use serde::Serialize;

pub const MONTHS: [&str; 5] = ["M1", "M2", "M3", "M4", "M5"];

/// Share of manufacturing capacity planned for each month.
pub const PRODUCTION_MULTIPLIERS: [f64; 5] = [0.8, 0.85, 0.9, 0.9, 0.95];

/// Seasonal adjustment applied to the retail demand forecast.
pub const DEMAND_MULTIPLIERS: [f64; 5] = [1.0, 1.05, 0.95, 1.1, 1.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub production_plan: [f64; 5],
    pub demand_curve: [f64; 5],
    /// Raw material plus logistics cost for each planned month, in EUR.
    pub monthly_costs: [f64; 5],
}

impl DerivedSeries {
    pub fn compute(params: &SimulationParameters) -> Self {
        Self::from_inputs(
            params.manufacturing_capacity,
            params.retail_demand_forecast,
            params.manufacturing_cost_per_unit,
            params.supplier_cost_factor,
            params.logistics_cost_factor,
        )
    }

    pub fn from_inputs(
        manufacturing_capacity: u32,
        retail_demand_forecast: u32,
        manufacturing_cost_per_unit: f64,
        supplier_cost_factor: f64,
        logistics_cost_factor: f64,
    ) -> Self {
        let capacity = f64::from(manufacturing_capacity);
        let forecast = f64::from(retail_demand_forecast);

        let production_plan = PRODUCTION_MULTIPLIERS.map(|multiplier| capacity * multiplier);
        let demand_curve = DEMAND_MULTIPLIERS.map(|multiplier| forecast * multiplier);
        let monthly_costs = production_plan.map(|production| {
            let raw_material_cost = production * (manufacturing_cost_per_unit * supplier_cost_factor);
            // Logistics is billed per thousand units shipped.
            let logistics_cost = (production / 1000.0) * 1000.0 * logistics_cost_factor;
            raw_material_cost + logistics_cost
        });

        Self {
            production_plan,
            demand_curve,
            monthly_costs,
        }
    }

    /// Cost over the whole planning horizon.
    pub fn total_cost(&self) -> f64 {
        self.monthly_costs.iter().sum()
    }

    /// Planned production minus expected demand, per month. Negative values
    /// are a likely stockout.
    pub fn gap(&self) -> [f64; 5] {
        let mut gap = [0.0; 5];
        for (i, slot) in gap.iter_mut().enumerate() {
            *slot = self.production_plan[i] - self.demand_curve[i];
        }
        gap
    }

    /// Month label paired with each monthly cost, for tabular output.
    pub fn cost_rows(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        MONTHS.iter().copied().zip(self.monthly_costs.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn production_follows_capacity() {
        let series = DerivedSeries::from_inputs(10_000, 5000, 50.0, 1.0, 1.0);
        assert_close(
            &series.production_plan,
            &[8000.0, 8500.0, 9000.0, 9000.0, 9500.0],
        );
    }

    #[test]
    fn demand_follows_forecast() {
        let series = DerivedSeries::from_inputs(10_000, 5000, 50.0, 1.0, 1.0);
        assert_close(&series.demand_curve, &[5000.0, 5250.0, 4750.0, 5500.0, 5000.0]);
    }

    #[test]
    fn monthly_cost_adds_raw_material_and_logistics() {
        let series = DerivedSeries::from_inputs(10_000, 5000, 50.0, 1.0, 1.0);
        assert_close(
            &series.monthly_costs,
            &[408_000.0, 433_500.0, 459_000.0, 459_000.0, 484_500.0],
        );
        assert!((series.total_cost() - 2_244_000.0).abs() < 1e-6);
    }

    #[test]
    fn cost_factors_scale_their_components() {
        let series = DerivedSeries::from_inputs(1000, 100, 10.0, 2.0, 3.0);
        // 800 * (10 * 2) + 800 * 3
        assert!((series.monthly_costs[0] - 18_400.0).abs() < 1e-6);
    }

    #[test]
    fn is_deterministic() {
        let params = SimulationParameters::default();
        assert_eq!(DerivedSeries::compute(&params), DerivedSeries::compute(&params));
    }

    #[test]
    fn gap_is_production_minus_demand() {
        let series = DerivedSeries::from_inputs(10_000, 5000, 50.0, 1.0, 1.0);
        assert_close(&series.gap(), &[3000.0, 3250.0, 4250.0, 3500.0, 4500.0]);
    }

    #[test]
    fn cost_rows_pair_months_with_costs() {
        let series = DerivedSeries::from_inputs(10_000, 5000, 50.0, 1.0, 1.0);
        let rows: Vec<_> = series.cost_rows().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].0, "M1");
        assert_eq!(rows[4].0, "M5");
    }
}
