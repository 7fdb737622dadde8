//! Contains functionality to configure and run the planner.

pub mod config;
pub mod interruption;

use crate::format::FormatError;
use crate::format::problem::JsonProblem;
use crate::format::weather::read_weather_series;
use seaops_core::prelude::{Environment, Planner, PlannerConfig, Project, ProjectPlan};
use std::io::{BufReader, Read};
use std::sync::Arc;

/// Reads a project and a metocean series, then plans all project phases. Only format and
/// configuration errors are returned as `Err`, phases without a plan are reported in the plan.
pub fn solve_project<P: Read, W: Read>(
    problem: BufReader<P>,
    weather: BufReader<W>,
    config: PlannerConfig,
    environment: Arc<Environment>,
) -> Result<(Project, ProjectPlan), String> {
    let project = problem
        .read_json()
        .map_err(|errors| {
            let errors = errors.iter().map(FormatError::to_string_with_details).collect::<Vec<_>>();
            format!("cannot read problem:\n{}", errors.join("\n"))
        })?;

    let series = read_weather_series(weather)
        .map_err(|err| format!("cannot read metocean series: {}", err.to_string_with_details()))?;

    environment.log(&format!(
        "loaded {} phases and {} metocean records of years {}-{}",
        project.phases.len(),
        series.records().len(),
        series.years().start(),
        series.years().end()
    ));

    let planner = Planner::new(environment, Arc::new(series), config);
    let plan = planner.plan_project(&project);

    Ok((project, plan))
}
