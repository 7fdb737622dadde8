use super::*;
use crate::helpers::models::*;
use crate::helpers::weather::*;
use crate::scheduling::StrategyDurations;
use crate::utils::Parallelism;
use std::sync::Mutex;

fn create_catalog() -> Catalog {
    let barge = |id: &str, rate: Float| {
        test_vessel(
            id,
            "barge",
            &[
                (VesselAttr::DayRateMin, rate),
                (VesselAttr::DayRateMax, rate),
                (VesselAttr::MobilisationPct, 0.),
                (VesselAttr::FuelConsumption, 1.),
                (VesselAttr::TransitSpeed, 10.),
            ],
        )
    };

    Catalog::new(
        vec![barge("b1", 2400.), barge("b2", 4800.)],
        vec![test_equipment("r1", "rov", &[(EquipmentAttr::DayRate, 240.)])],
        vec![test_port("p1", &[])],
    )
}

fn create_strategy(sea_time: Float, olc: Olc) -> StrategyDurations {
    durations(0., vec![sea_leg(sea_time, olc)], 0.)
}

fn create_planner(config: PlannerConfig) -> Planner {
    let environment = Arc::new(Environment { parallelism: Parallelism::new(2), ..Environment::default() });

    Planner::new(environment, Arc::new(create_calm_series(2000, 2001)), config)
}

fn get_plan(result: &PhaseResult) -> &PhasePlan {
    match &result.outcome {
        PhaseOutcome::Planned(plan) => plan,
        outcome => panic!("unexpected outcome: {outcome:?}"),
    }
}

#[test]
fn can_plan_cheapest_solution_across_strategies() {
    let calm = Olc::new(2., 0., 0., 0.);
    let phase = create_simple_phase("barge", "rov", vec![create_strategy(48., calm), create_strategy(24., calm)]);

    let result = create_planner(PlannerConfig::default()).plan_phase(&create_catalog(), &phase, phase.requested_start);

    let plan = get_plan(&result);
    assert_eq!(plan.strategy_index, 1);
    assert_eq!(plan.strategy_name, "strategy1");
    assert_eq!(plan.solution_index, 0);
    assert_eq!(plan.solution.vessels[0].vessel.id, "b1");
    assert_eq!(plan.evaluated, 4);
    assert_eq!(plan.scheduled, 4);
    assert_close!(plan.cost.total_cost, 2640.);
    assert_eq!(plan.schedule.start_delay, 0.);
    assert_eq!(plan.completion(), datetime(2000, 1, 2, 0));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn can_report_no_feasible_combination() {
    let mut phase = create_simple_phase("barge", "rov", vec![create_strategy(24., Olc::default())]);
    phase.requirements.vessels = kind_rules(vec![("barge", rules(&["vessel.deck_space sup 100"]))]);
    let config = PlannerConfig { allow_missing_fields: false, ..PlannerConfig::default() };

    let result = create_planner(config).plan_phase(&create_catalog(), &phase, phase.requested_start);

    match result.outcome {
        PhaseOutcome::NoFeasibleCombination(report) => {
            assert_eq!(report.filters[0].rejections[0].rule, "vessel.deck_space >= 100");
            assert_eq!(report.filters[0].rejections[0].count, 2);
            assert_eq!(report.discarded_templates.len(), 1);
        }
        outcome => panic!("unexpected outcome: {outcome:?}"),
    }
}

#[test]
fn can_record_lenient_filtering_in_diagnostics() {
    let mut phase = create_simple_phase("barge", "rov", vec![create_strategy(24., Olc::default())]);
    phase.requirements.vessels = kind_rules(vec![("barge", rules(&["vessel.deck_space sup 100"]))]);

    let result = create_planner(PlannerConfig::default()).plan_phase(&create_catalog(), &phase, phase.requested_start);

    get_plan(&result);
    assert_eq!(result.diagnostics.len(), 2);
    assert!(result.diagnostics.warnings().all(|warning| warning.contains("missing field 'vessel.deck_space'")));
}

#[test]
fn can_report_no_weather_window() {
    let phase = create_simple_phase("barge", "rov", vec![create_strategy(24., Olc::new(0.5, 0., 0., 0.))]);

    let result = create_planner(PlannerConfig::default()).plan_phase(&create_catalog(), &phase, phase.requested_start);

    match result.outcome {
        PhaseOutcome::NoWeatherWindow(report) => {
            assert_eq!(report.matched, 2);
            assert_eq!(report.unscheduled, 2);
            assert_eq!(report.failures.len(), 1);
            assert_eq!(report.failures[0].required, 24.);
            assert_eq!(report.unestimated, 0);
        }
        outcome => panic!("unexpected outcome: {outcome:?}"),
    }
}

#[test]
fn can_report_estimation_errors_separately_from_window_failures() {
    let catalog = Catalog::new(
        vec![test_vessel("b1", "barge", &[(VesselAttr::DayRateMin, 2400.), (VesselAttr::DayRateMax, 2400.)])],
        vec![test_equipment("r1", "rov", &[(EquipmentAttr::DayRate, 240.)])],
        vec![test_port("p1", &[])],
    );
    let phase = create_simple_phase("barge", "rov", vec![durations(0., vec![sea_leg(24., Olc::default())], 100.)]);

    let result = create_planner(PlannerConfig::default()).plan_phase(&catalog, &phase, phase.requested_start);

    match result.outcome {
        PhaseOutcome::NoWeatherWindow(report) => {
            assert_eq!(report.matched, 1);
            assert_eq!(report.unscheduled, 1);
            assert_eq!(report.unestimated, 1);
            assert!(report.failures.is_empty());
            assert_eq!(report.estimation_errors.len(), 1);
            assert!(report.estimation_errors[0].contains("no vessel has transit speed"));
            assert!(report.to_string().contains("durations of 1 cannot be estimated"));
        }
        outcome => panic!("unexpected outcome: {outcome:?}"),
    }
}

#[test]
fn can_plan_project_without_aborting_on_failed_phase() {
    let calm = Olc::new(2., 0., 0., 0.);
    let mut failing = create_simple_phase("crane vessel", "rov", vec![create_strategy(24., calm)]);
    failing.name = "failing".to_string();
    let project = Project {
        catalog: create_catalog(),
        phases: vec![
            create_simple_phase("barge", "rov", vec![create_strategy(24., calm)]),
            failing,
            create_simple_phase("barge", "rov", vec![create_strategy(24., calm)]),
        ],
    };
    let config = PlannerConfig { chain_phases: true, ..PlannerConfig::default() };

    let plan = create_planner(config).plan_project(&project);

    assert_eq!(plan.phases.len(), 3);
    assert!(matches!(plan.phases[1].outcome, PhaseOutcome::NoFeasibleCombination(_)));
    assert_eq!(get_plan(&plan.phases[0]).requested_start, datetime(2000, 1, 1, 0));
    assert_eq!(get_plan(&plan.phases[2]).requested_start, datetime(2000, 1, 2, 0));
    assert_close!(plan.total_cost(), 2640. * 2.);
}

#[test]
fn can_log_selected_plan() {
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let logger_messages = messages.clone();
    let environment = Arc::new(Environment {
        parallelism: Parallelism::new(1),
        logger: Arc::new(move |msg: &str| logger_messages.lock().expect("not poisoned").push(msg.to_string())),
        quota: None,
    });
    let planner = Planner::new(environment, Arc::new(create_calm_series(2000, 2001)), PlannerConfig::default());
    let phase = create_simple_phase("barge", "rov", vec![create_strategy(24., Olc::default())]);

    planner.plan_phase(&create_catalog(), &phase, phase.requested_start);

    let messages = messages.lock().expect("not poisoned");
    assert!(messages.iter().any(|msg| msg.starts_with("phase 'phase': matched 2 of 2 combinations")));
    assert!(messages.iter().any(|msg| msg.contains("selected solution 0 with strategy 'strategy0'")));
}
