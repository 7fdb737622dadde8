//! Selects the cheapest plan among all scheduled and costed solutions.

#[cfg(test)]
#[path = "../../tests/unit/selection/selection_test.rs"]
mod selection_test;

use crate::models::Solution;
use crate::models::common::Cost;
use crate::utils::map_reduce;
use std::cmp::Ordering;

/// Solutions evaluated with one sequencing strategy.
#[derive(Clone, Debug)]
pub struct StrategyEvaluation {
    /// A strategy index.
    pub index: usize,
    /// A strategy name.
    pub name: String,
    /// Solutions in matching order, only scheduled and costed ones participate in selection.
    pub solutions: Vec<Solution>,
}

/// Identifies a selected solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// An index of the strategy.
    pub strategy_index: usize,
    /// An index of the solution within strategy evaluation.
    pub solution_index: usize,
}

#[derive(Clone, Copy)]
struct SelectionKey<'a> {
    total: Cost,
    vessel: Cost,
    equipment: Cost,
    port: Cost,
    fuel: Cost,
    solution_index: usize,
    strategy_index: usize,
    strategy_name: &'a str,
}

impl SelectionKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        self.total
            .total_cmp(&other.total)
            .then_with(|| self.vessel.total_cmp(&other.vessel))
            .then_with(|| self.equipment.total_cmp(&other.equipment))
            .then_with(|| self.port.total_cmp(&other.port))
            .then_with(|| self.fuel.total_cmp(&other.fuel))
            .then_with(|| self.solution_index.cmp(&other.solution_index))
            .then_with(|| self.strategy_index.cmp(&other.strategy_index))
            .then_with(|| self.strategy_name.cmp(other.strategy_name))
    }
}

/// Returns a solution with the lexicographically minimal tuple of total, vessel, equipment, port
/// and fuel costs, solution index, strategy index and strategy name. The reduction runs in
/// parallel, the result does not depend on evaluation order.
pub fn select_optimal(evaluations: &[StrategyEvaluation]) -> Option<Selection> {
    let keys = evaluations
        .iter()
        .flat_map(|evaluation| {
            evaluation.solutions.iter().enumerate().filter_map(move |(solution_index, solution)| {
                solution.schedule.as_ref()?;
                let cost = solution.cost.as_ref()?;

                Some(SelectionKey {
                    total: cost.total_cost,
                    vessel: cost.vessel_cost,
                    equipment: cost.equipment_cost,
                    port: cost.port_cost,
                    fuel: cost.fuel_cost,
                    solution_index,
                    strategy_index: evaluation.index,
                    strategy_name: evaluation.name.as_str(),
                })
            })
        })
        .collect::<Vec<_>>();

    map_reduce(
        keys.as_slice(),
        |key| Some(*key),
        || None,
        |left, right| match (left, right) {
            (Some(left), Some(right)) => Some(if left.compare(&right) == Ordering::Greater { right } else { left }),
            (left, None) => left,
            (None, right) => right,
        },
    )
    .map(|key| Selection { strategy_index: key.strategy_index, solution_index: key.solution_index })
}
