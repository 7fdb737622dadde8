#[cfg(test)]
#[path = "../../tests/unit/planning/planner_test.rs"]
mod planner_test;

use super::Diagnostics;
use crate::costing::{CostEvaluator, CostSettings};
use crate::matching::{MatchReport, match_solutions};
use crate::models::common::Float;
use crate::models::*;
use crate::scheduling::{DelayStatistic, WeatherWindowScheduler, WindowCache, WindowFailure};
use crate::selection::{StrategyEvaluation, select_optimal};
use crate::utils::{Environment, ThreadPool, Timer, parallel_into_collect};
use std::fmt;
use std::sync::Arc;
use time::PrimitiveDateTime;

/// Planner settings.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Whether a rule which cannot be evaluated because of missing data lets a candidate pass.
    pub allow_missing_fields: bool,
    /// Cost settings.
    pub costs: CostSettings,
    /// A reduction of per year schedules.
    pub delay_statistic: DelayStatistic,
    /// Whether a phase starts when the previously planned phase is completed.
    pub chain_phases: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            allow_missing_fields: true,
            costs: CostSettings::default(),
            delay_statistic: DelayStatistic::default(),
            chain_phases: false,
        }
    }
}

/// A plan chosen for a phase.
#[derive(Clone, Debug)]
pub struct PhasePlan {
    /// An index of the chosen strategy.
    pub strategy_index: usize,
    /// A name of the chosen strategy.
    pub strategy_name: String,
    /// An index of the chosen solution in matching order.
    pub solution_index: usize,
    /// The chosen solution.
    pub solution: Solution,
    /// A schedule of the chosen solution.
    pub schedule: ScheduleResult,
    /// A cost of the chosen solution.
    pub cost: CostBreakdown,
    /// A requested start used for scheduling.
    pub requested_start: PrimitiveDateTime,
    /// Amount of evaluated strategy and solution pairs.
    pub evaluated: usize,
    /// Amount of scheduled strategy and solution pairs.
    pub scheduled: usize,
}

impl PhasePlan {
    /// Returns an estimated completion of the phase.
    pub fn completion(&self) -> PrimitiveDateTime {
        self.requested_start + time::Duration::seconds_f64(self.schedule.total_time() * 3600.)
    }
}

/// Explains why no matched solution can be scheduled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleReport {
    /// Amount of matched solutions.
    pub matched: usize,
    /// Amount of strategy and solution pairs which were not scheduled.
    pub unscheduled: usize,
    /// Distinct window search failures.
    pub failures: Vec<WindowFailure>,
    /// Amount of strategy and solution pairs which durations cannot be estimated, so weather
    /// windows were never searched for them.
    pub unestimated: usize,
    /// Distinct duration estimation errors.
    pub estimation_errors: Vec<String>,
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} matched solutions cannot be scheduled", self.unscheduled, self.matched)?;
        if self.unestimated > 0 {
            write!(f, ", durations of {} cannot be estimated", self.unestimated)?;
        }
        self.estimation_errors.iter().try_for_each(|err| write!(f, "; {err}"))?;
        self.failures.iter().try_for_each(|failure| write!(f, "; {failure}"))
    }
}

/// A terminal status of a phase.
#[derive(Clone, Debug)]
pub enum PhaseOutcome {
    /// The phase is planned.
    Planned(Box<PhasePlan>),
    /// All combinations are pruned by filtering or matching rules.
    NoFeasibleCombination(MatchReport),
    /// No matched solution fits into weather windows.
    NoWeatherWindow(ScheduleReport),
}

/// A result of phase planning.
#[derive(Clone, Debug)]
pub struct PhaseResult {
    /// A phase name.
    pub name: String,
    /// An outcome.
    pub outcome: PhaseOutcome,
    /// Missing data warnings.
    pub diagnostics: Diagnostics,
}

/// A result of project planning: one result per phase in project order.
#[derive(Clone, Debug)]
pub struct ProjectPlan {
    /// Phase results.
    pub phases: Vec<PhaseResult>,
}

impl ProjectPlan {
    /// Returns total cost of all planned phases.
    pub fn total_cost(&self) -> Float {
        self.phases
            .iter()
            .filter_map(|phase| match &phase.outcome {
                PhaseOutcome::Planned(plan) => Some(plan.cost.total_cost),
                _ => None,
            })
            .sum()
    }
}

enum EvaluationError {
    Estimation(String),
    Window(WindowFailure),
}

struct Evaluation {
    strategy_index: usize,
    solution: Solution,
    error: Option<EvaluationError>,
    warnings: Vec<String>,
}

/// Runs the match, schedule, cost and select pipeline over project phases.
pub struct Planner {
    environment: Arc<Environment>,
    scheduler: WeatherWindowScheduler,
    costs: CostEvaluator,
    config: PlannerConfig,
    pool: ThreadPool,
}

impl Planner {
    /// Creates a new instance of `Planner` with a fresh window cache.
    pub fn new(environment: Arc<Environment>, series: Arc<WeatherSeries>, config: PlannerConfig) -> Self {
        Self::new_with_cache(environment, series, Arc::new(WindowCache::default()), config)
    }

    /// Creates a new instance of `Planner` which shares a window cache dedicated to the series.
    pub fn new_with_cache(
        environment: Arc<Environment>,
        series: Arc<WeatherSeries>,
        cache: Arc<WindowCache>,
        config: PlannerConfig,
    ) -> Self {
        let scheduler = WeatherWindowScheduler::new(series, cache, config.delay_statistic);
        let costs = CostEvaluator::new(config.costs.clone());
        let pool = environment.parallelism.create_pool();

        Self { environment, scheduler, costs, config, pool }
    }

    /// Returns a scheduler used by the planner.
    pub fn scheduler(&self) -> &WeatherWindowScheduler {
        &self.scheduler
    }

    /// Plans all project phases. A failed phase does not stop planning of other phases.
    pub fn plan_project(&self, project: &Project) -> ProjectPlan {
        let timer = Timer::start();
        let mut completion: Option<PrimitiveDateTime> = None;

        let phases = project
            .phases
            .iter()
            .map(|phase| {
                let requested_start = match completion {
                    Some(completion) if self.config.chain_phases => completion,
                    _ => phase.requested_start,
                };

                let result = self.plan_phase(&project.catalog, phase, requested_start);
                if let PhaseOutcome::Planned(plan) = &result.outcome {
                    completion = Some(plan.completion());
                }

                result
            })
            .collect();

        let cache = self.scheduler.cache();
        self.environment.log(&format!(
            "project planned in {}ms, window cache: {} keys, {} hits, {} misses",
            timer.elapsed_millis(),
            cache.len(),
            cache.hits(),
            cache.misses()
        ));

        ProjectPlan { phases }
    }

    /// Plans a single phase starting at the given requested start.
    pub fn plan_phase(&self, catalog: &Catalog, phase: &Phase, requested_start: PrimitiveDateTime) -> PhaseResult {
        let mut diagnostics = Diagnostics::default();

        let (solutions, report) = match_solutions(phase, catalog, self.config.allow_missing_fields);
        if self.config.allow_missing_fields {
            diagnostics.extend(report.filters.iter().flat_map(|filter| filter.unresolved.iter().cloned()));
            diagnostics.extend(report.unresolved.iter().cloned());
        }

        self.environment.log(&format!("phase '{}': {report}", phase.name));

        if solutions.is_empty() {
            return PhaseResult {
                name: phase.name.clone(),
                outcome: PhaseOutcome::NoFeasibleCombination(report),
                diagnostics,
            };
        }

        let matched = solutions.len();
        let tasks = phase
            .strategies
            .iter()
            .enumerate()
            .flat_map(|(strategy_index, _)| solutions.iter().map(move |solution| (strategy_index, solution.clone())))
            .collect::<Vec<_>>();

        let evaluations = self.pool.execute(|| {
            parallel_into_collect(tasks, |(strategy_index, solution)| {
                self.evaluate(phase, strategy_index, solution, requested_start)
            })
        });

        let evaluated = evaluations.len();
        let mut failures: Vec<WindowFailure> = Vec::new();
        let mut estimation_errors: Vec<String> = Vec::new();
        let mut unestimated = 0;
        let mut strategies = phase
            .strategies
            .iter()
            .enumerate()
            .map(|(index, strategy)| StrategyEvaluation {
                index,
                name: strategy.name.clone(),
                solutions: Vec::with_capacity(matched),
            })
            .collect::<Vec<_>>();

        evaluations.into_iter().for_each(|evaluation| {
            diagnostics.extend(evaluation.warnings);
            match evaluation.error {
                Some(EvaluationError::Window(failure)) if !failures.contains(&failure) => failures.push(failure),
                Some(EvaluationError::Estimation(err)) => {
                    unestimated += 1;
                    if !estimation_errors.contains(&err) {
                        estimation_errors.push(err);
                    }
                }
                _ => {}
            }
            strategies[evaluation.strategy_index].solutions.push(evaluation.solution);
        });

        let scheduled = strategies
            .iter()
            .flat_map(|strategy| strategy.solutions.iter())
            .filter(|solution| solution.schedule.is_some() && solution.cost.is_some())
            .count();

        let create_report = || ScheduleReport {
            matched,
            unscheduled: evaluated - scheduled,
            failures: failures.clone(),
            unestimated,
            estimation_errors: estimation_errors.clone(),
        };

        let outcome = match select_optimal(strategies.as_slice()) {
            Some(selection) => {
                let strategy = &strategies[selection.strategy_index];
                let solution = strategy.solutions[selection.solution_index].clone();

                match (solution.schedule.clone(), solution.cost.clone()) {
                    (Some(schedule), Some(cost)) => {
                        self.environment.log(&format!(
                            "phase '{}': selected solution {} with strategy '{}', \
                             total cost: {:.2}, start delay: {:.1}h",
                            phase.name,
                            selection.solution_index,
                            strategy.name,
                            cost.total_cost,
                            schedule.start_delay
                        ));
                        if !schedule.dropped_years.is_empty() {
                            self.environment.log(&format!(
                                "phase '{}': years {:?} cannot be placed with {:?} windows and are not reduced",
                                phase.name, schedule.dropped_years, schedule.strategy
                            ));
                        }

                        PhaseOutcome::Planned(Box::new(PhasePlan {
                            strategy_index: selection.strategy_index,
                            strategy_name: strategy.name.clone(),
                            solution_index: selection.solution_index,
                            solution,
                            schedule,
                            cost,
                            requested_start,
                            evaluated,
                            scheduled,
                        }))
                    }
                    _ => PhaseOutcome::NoWeatherWindow(create_report()),
                }
            }
            None => {
                let report = create_report();
                self.environment.log(&format!("phase '{}': {report}", phase.name));

                PhaseOutcome::NoWeatherWindow(report)
            }
        };

        PhaseResult { name: phase.name.clone(), outcome, diagnostics }
    }

    fn evaluate(
        &self,
        phase: &Phase,
        strategy_index: usize,
        mut solution: Solution,
        requested_start: PrimitiveDateTime,
    ) -> Evaluation {
        let evaluation = |solution: Solution, error: Option<EvaluationError>, warnings: Vec<String>| Evaluation {
            strategy_index,
            solution,
            error,
            warnings,
        };

        let times = match phase.durations.estimate(strategy_index, &solution) {
            Ok(times) => times,
            Err(err) => {
                let strategy =
                    phase.strategies.get(strategy_index).map_or("unknown", |strategy| strategy.name.as_str());
                let err = format!("strategy '{strategy}': {err}");
                return evaluation(solution, Some(EvaluationError::Estimation(err)), Vec::new());
            }
        };

        let quota = self.environment.quota.as_deref();
        let placement = match self.scheduler.schedule(&times.olc, requested_start, times.sea_time, quota) {
            Ok(placement) => placement,
            Err(failure) => return evaluation(solution, Some(EvaluationError::Window(failure)), Vec::new()),
        };

        let schedule = ScheduleResult {
            prep_time: times.prep_time,
            sea_time: times.sea_time,
            transit_time: times.transit_time,
            start_delay: placement.start_delay,
            waiting_time: placement.waiting_time,
            leg_olcs: times.leg_olcs,
            strategy: placement.strategy,
            years: placement.years,
            dropped_years: placement.dropped_years,
        };

        let (cost, warnings) = self.costs.cost(&solution, &schedule);

        solution.schedule = Some(schedule);
        solution.cost = Some(cost);

        evaluation(solution, None, warnings)
    }
}
