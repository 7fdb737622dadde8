//! Planner configuration.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/config_test.rs"]
mod config_test;

extern crate serde_json;

use super::interruption::create_interruption_quota;
use crate::format::{CONFIG_FORMAT_CODE, FormatError};
use seaops_core::prelude::*;
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;

/// A planner configuration.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct Config {
    /// Specifies candidate filtering configuration.
    pub filtering: Option<FilteringConfig>,
    /// Specifies weather window search configuration.
    pub scheduling: Option<SchedulingConfig>,
    /// Specifies costing configuration.
    pub costs: Option<CostsConfig>,
    /// Specifies parallelism configuration.
    pub parallelism: Option<ParallelismConfig>,
    /// Specifies project planning configuration.
    pub planning: Option<PlanningConfig>,
    /// Specifies telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
}

/// A candidate filtering configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FilteringConfig {
    /// Specifies whether a rule which cannot be evaluated due to missing data lets a candidate
    /// pass. Default is true.
    pub allow_missing_fields: Option<bool>,
}

/// Specifies how per year schedules are reduced.
#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DelayStatisticType {
    /// An average over years.
    Mean,
    /// The worst year.
    Max,
}

/// A weather window search configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfig {
    /// A reduction of per year schedules. Default is mean.
    pub delay_statistic: Option<DelayStatisticType>,
    /// Max time of window search in seconds. Default is no limit.
    pub max_search_time: Option<usize>,
}

/// A costing configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CostsConfig {
    /// Fuel cost per unit of consumption. Default is 0.
    pub fuel_cost_rate: Option<Float>,
    /// Port cost as a percentage of vessel and equipment cost. Default is 0.
    pub port_markup_percentage: Option<Float>,
}

/// A parallelism configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ParallelismConfig {
    /// Amount of threads used to evaluate solutions. Default is amount of cpus.
    pub threads: Option<usize>,
}

/// A project planning configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlanningConfig {
    /// Specifies whether every phase starts at completion of the previously planned one.
    /// Default is false.
    pub chain_phases: Option<bool>,
}

/// A telemetry configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryConfig {
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Specifies whether logging is enabled. Default is false.
    pub enabled: bool,
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| {
        FormatError::new_with_details(
            CONFIG_FORMAT_CODE.to_string(),
            "cannot deserialize config".to_string(),
            "check config json: all sections are optional, names are in camel case".to_string(),
            err.to_string(),
        )
        .to_string_with_details()
    })
}

/// Creates planner settings from config.
pub fn create_planner_config(config: &Config) -> PlannerConfig {
    let defaults = PlannerConfig::default();

    let allow_missing_fields = config
        .filtering
        .as_ref()
        .and_then(|filtering| filtering.allow_missing_fields)
        .unwrap_or(defaults.allow_missing_fields);

    let delay_statistic = match config.scheduling.as_ref().and_then(|scheduling| scheduling.delay_statistic) {
        Some(DelayStatisticType::Mean) => DelayStatistic::Mean,
        Some(DelayStatisticType::Max) => DelayStatistic::Max,
        None => defaults.delay_statistic,
    };

    let costs = config.costs.as_ref().map_or(defaults.costs.clone(), |costs| CostSettings {
        fuel_cost_rate: costs.fuel_cost_rate.unwrap_or(defaults.costs.fuel_cost_rate),
        port_markup_pct: costs.port_markup_percentage.unwrap_or(defaults.costs.port_markup_pct),
    });

    let chain_phases =
        config.planning.as_ref().and_then(|planning| planning.chain_phases).unwrap_or(defaults.chain_phases);

    PlannerConfig { allow_missing_fields, costs, delay_statistic, chain_phases }
}

/// Returns true when config enables logging.
pub fn is_logging_enabled(config: &Config) -> bool {
    config.telemetry.as_ref().and_then(|telemetry| telemetry.logging.as_ref()).is_some_and(|logging| logging.enabled)
}

/// Creates an environment from config: thread pool size, logger and search quota which is
/// reached on timeout or interruption.
pub fn create_environment(config: &Config, is_logging: bool) -> Environment {
    let logger: InfoLogger = if is_logging || is_logging_enabled(config) {
        Arc::new(|msg: &str| println!("{msg}"))
    } else {
        Arc::new(|_: &str| {})
    };

    let threads =
        config.parallelism.as_ref().and_then(|parallelism| parallelism.threads).filter(|threads| *threads > 0);
    let parallelism = threads.map_or_else(Parallelism::default, Parallelism::new);

    let max_time = config.scheduling.as_ref().and_then(|scheduling| scheduling.max_search_time);
    let quota = create_interruption_quota(max_time, &logger);

    Environment::new(parallelism, logger, Some(quota))
}

/// Creates planner settings and environment from config file.
pub fn create_from_config_file<R: Read>(
    reader: BufReader<R>,
    is_logging: bool,
) -> Result<(PlannerConfig, Environment), String> {
    read_config(reader).map(|config| (create_planner_config(&config), create_environment(&config, is_logging)))
}
