//! Turns scheduled solutions into cost breakdowns.

#[cfg(test)]
#[path = "../../tests/unit/costing/costing_test.rs"]
mod costing_test;

use crate::models::common::{Cost, Float, HOURS_PER_DAY};
use crate::models::{CostBreakdown, ScheduleResult, Solution};

/// Cost settings shared by all phases.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostSettings {
    /// Fuel cost per unit of consumption.
    pub fuel_cost_rate: Float,
    /// Port cost as a percentage of vessel and equipment cost.
    pub port_markup_pct: Float,
}

/// Calculates solution costs. Missing rates or consumption data contribute zero and produce
/// a warning.
#[derive(Clone, Debug, Default)]
pub struct CostEvaluator {
    settings: CostSettings,
}

impl CostEvaluator {
    /// Creates a new instance of `CostEvaluator`.
    pub fn new(settings: CostSettings) -> Self {
        Self { settings }
    }

    /// Returns cost breakdown of the solution together with missing data warnings.
    pub fn cost(&self, solution: &Solution, schedule: &ScheduleResult) -> (CostBreakdown, Vec<String>) {
        let mut warnings = Vec::new();

        let active_hours = schedule.sea_time + schedule.transit_time;
        let prorate = |rate: Float, quantity: usize, mobilisation_pct: Float| {
            let hourly = quantity as Float * rate / HOURS_PER_DAY;
            hourly * active_hours + hourly * schedule.prep_time * mobilisation_pct / 100.
        };

        let vessel_cost: Cost = solution
            .vessels
            .iter()
            .enumerate()
            .map(|(slot, assignment)| {
                let vessel = &assignment.vessel;
                let Some(rate) = vessel.mean_day_rate() else {
                    warnings.push(format!("vessel '{}': missing day rate", vessel.id));
                    return 0.;
                };

                prorate(rate, assignment.quantity, mobilisation_pct(solution, slot, &mut warnings))
            })
            .sum();

        let equipment_cost: Cost = solution
            .equipment
            .iter()
            .map(|assignment| {
                let equipment = &assignment.equipment;
                match (equipment.specs.cost_per_unit, equipment.specs.day_rate) {
                    (Some(cost_per_unit), _) => assignment.quantity as Float * cost_per_unit,
                    (None, Some(rate)) => {
                        let mobilisation = mobilisation_pct(solution, assignment.vessel_slot, &mut warnings);
                        prorate(rate, assignment.quantity, mobilisation)
                    }
                    (None, None) => {
                        warnings.push(format!("equipment '{}': missing day rate", equipment.id));
                        0.
                    }
                }
            })
            .sum();

        let consumption: Float = solution
            .vessels
            .iter()
            .map(|assignment| match assignment.vessel.specs.fuel_consumption {
                Some(consumption) => assignment.quantity as Float * consumption,
                None => {
                    warnings.push(format!("vessel '{}': missing fuel consumption", assignment.vessel.id));
                    0.
                }
            })
            .sum();

        let fuel_cost = self.settings.fuel_cost_rate * consumption * schedule.transit_time;
        let port_cost = self.settings.port_markup_pct / 100. * (vessel_cost + equipment_cost);

        (CostBreakdown::new(vessel_cost, equipment_cost, port_cost, fuel_cost), warnings)
    }
}

fn mobilisation_pct(solution: &Solution, vessel_slot: usize, warnings: &mut Vec<String>) -> Float {
    let Some(vessel) = solution.vessels.get(vessel_slot).map(|assignment| &assignment.vessel) else {
        return 0.;
    };

    vessel.specs.mobilisation_pct.unwrap_or_else(|| {
        warnings.push(format!("vessel '{}': missing mobilisation percentage", vessel.id));
        0.
    })
}
