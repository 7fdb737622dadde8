#[cfg(test)]
#[path = "../../tests/unit/scheduling/durations_test.rs"]
mod durations_test;

use crate::models::common::{Duration, Float};
use crate::models::{Olc, OperationTimes, Solution};
use crate::utils::{GenericResult, compare_floats};

/// Kilometers in one nautical mile.
const KM_PER_NAUTICAL_MILE: Float = 1.852;

/// Estimates operation durations of a solution. Specific operation types provide their own
/// formulas, the planner only consumes resulting numbers.
pub trait DurationEstimator: Send + Sync {
    /// Estimates durations of the solution executed with a strategy of the given index.
    fn estimate(&self, strategy_index: usize, solution: &Solution) -> GenericResult<OperationTimes>;
}

/// A weather sensitive leg of an operation at sea.
#[derive(Clone, Debug, PartialEq)]
pub struct SeaLeg {
    /// A leg name, e.g. "installation".
    pub name: String,
    /// A leg duration [h].
    pub duration: Duration,
    /// Operational limits of the leg.
    pub olc: Olc,
}

/// Durations of one strategy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrategyDurations {
    /// Preparation time at port [h].
    pub prep_time: Duration,
    /// Legs at sea.
    pub legs: Vec<SeaLeg>,
    /// Total transit distance [km].
    pub transit_distance: Float,
}

/// An estimator which uses precomputed durations per strategy. Transit time is derived from the
/// distance and the slowest vessel, leg limits are tightened by limits of solution candidates.
#[derive(Clone, Debug, Default)]
pub struct TabularDurations {
    strategies: Vec<StrategyDurations>,
}

impl TabularDurations {
    /// Creates a new instance of `TabularDurations`.
    pub fn new(strategies: Vec<StrategyDurations>) -> Self {
        Self { strategies }
    }
}

impl DurationEstimator for TabularDurations {
    fn estimate(&self, strategy_index: usize, solution: &Solution) -> GenericResult<OperationTimes> {
        let strategy = self
            .strategies
            .get(strategy_index)
            .ok_or_else(|| format!("no durations defined for strategy with index {strategy_index}"))?;

        let solution_olc = solution
            .vessels
            .iter()
            .map(|assignment| assignment.vessel.olc())
            .chain(solution.equipment.iter().map(|assignment| assignment.equipment.olc()))
            .fold(Olc::default(), |acc, olc| acc.tighten(&olc));

        let leg_olcs = strategy.legs.iter().map(|leg| leg.olc.tighten(&solution_olc)).collect::<Vec<_>>();
        let olc = leg_olcs.iter().fold(solution_olc, |acc, olc| acc.tighten(olc));

        let transit_time = if strategy.transit_distance > 0. {
            let slowest = solution
                .vessels
                .iter()
                .filter_map(|assignment| assignment.vessel.specs.transit_speed)
                .filter(|speed| *speed > 0.)
                .min_by(|a, b| compare_floats(*a, *b))
                .ok_or_else(|| "cannot estimate transit time: no vessel has transit speed".to_string())?;

            strategy.transit_distance / (slowest * KM_PER_NAUTICAL_MILE)
        } else {
            0.
        };

        Ok(OperationTimes {
            prep_time: strategy.prep_time,
            sea_time: strategy.legs.iter().map(|leg| leg.duration).sum(),
            transit_time,
            leg_olcs,
            olc,
        })
    }
}
