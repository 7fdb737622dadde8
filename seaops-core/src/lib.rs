//! Core crate contains building blocks to plan ***offshore marine operations***: it matches vessels,
//! equipment and ports into feasible combinations, fits operations into weather windows of
//! a multi-year metocean series and selects the cheapest plan.
//!
//! A typical flow is:
//! - build a [`Project`](models::Project) with a candidate catalog and phases
//! - load a [`WeatherSeries`](models::WeatherSeries)
//! - run [`Planner::plan_project`](planning::Planner::plan_project)
//!

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[macro_use]
mod macros;

pub mod costing;
pub mod matching;
pub mod models;
pub mod planning;
pub mod prelude;
pub mod scheduling;
pub mod selection;
pub mod utils;
