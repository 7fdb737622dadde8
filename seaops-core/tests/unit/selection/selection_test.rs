use super::*;
use crate::helpers::models::*;
use crate::models::{CostBreakdown, ScheduleResult, WindowStrategy};

fn create_costed_solution(cost: Option<CostBreakdown>) -> Solution {
    let mut solution = create_solution(test_vessel("v1", "tug", &[]), vec![], test_port("p1", &[]));
    solution.schedule = Some(ScheduleResult {
        prep_time: 0.,
        sea_time: 0.,
        transit_time: 0.,
        start_delay: 0.,
        waiting_time: None,
        leg_olcs: vec![],
        strategy: WindowStrategy::Whole,
        years: vec![],
        dropped_years: vec![],
    });
    solution.cost = cost;

    solution
}

fn create_evaluation(index: usize, totals: &[Cost]) -> StrategyEvaluation {
    StrategyEvaluation {
        index,
        name: format!("strategy{index}"),
        solutions: totals
            .iter()
            .map(|total| create_costed_solution(Some(CostBreakdown::new(*total, 0., 0., 0.))))
            .collect(),
    }
}

#[test]
fn can_select_lowest_index_on_equal_costs() {
    let evaluations = vec![create_evaluation(0, &[10., 7., 7., 9.])];

    let selection = select_optimal(&evaluations);

    assert_eq!(selection, Some(Selection { strategy_index: 0, solution_index: 1 }));
}

#[test]
fn can_break_ties_by_solution_index_before_strategy_index() {
    let evaluations = vec![create_evaluation(0, &[10., 10., 5.]), create_evaluation(1, &[10., 5., 10.])];

    let selection = select_optimal(&evaluations);

    assert_eq!(selection, Some(Selection { strategy_index: 1, solution_index: 1 }));
}

#[test]
fn can_break_total_ties_by_cost_components() {
    let mut evaluation = create_evaluation(0, &[]);
    evaluation.solutions = vec![
        create_costed_solution(Some(CostBreakdown::new(60., 40., 0., 0.))),
        create_costed_solution(Some(CostBreakdown::new(50., 50., 0., 0.))),
    ];

    let selection = select_optimal(&[evaluation]);

    assert_eq!(selection, Some(Selection { strategy_index: 0, solution_index: 1 }));
}

#[test]
fn can_ignore_unscheduled_solutions() {
    let mut evaluation = create_evaluation(0, &[10., 20.]);
    evaluation.solutions[0].schedule = None;
    evaluation.solutions.push(create_costed_solution(None));

    let selection = select_optimal(&[evaluation]);

    assert_eq!(selection, Some(Selection { strategy_index: 0, solution_index: 1 }));
}

#[test]
fn can_return_none_without_costed_solutions() {
    assert_eq!(select_optimal(&[]), None);
    assert_eq!(select_optimal(&[create_evaluation(0, &[])]), None);
}

#[test]
fn can_select_deterministically_on_large_input() {
    let totals = (0..10_000).map(|idx| (100 + idx % 7) as Cost).collect::<Vec<_>>();
    let evaluations = vec![create_evaluation(0, &totals), create_evaluation(1, &totals)];

    (0..5).for_each(|_| {
        assert_eq!(select_optimal(&evaluations), Some(Selection { strategy_index: 0, solution_index: 0 }));
    });
}
