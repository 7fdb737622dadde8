#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;

use clap::{Arg, ArgAction, ArgMatches, Command};
use seaops_cli::extensions::solve::config::{Config, create_environment, create_from_config_file, create_planner_config};
use seaops_cli::extensions::solve::solve_project;
use seaops_cli::format::plan::JsonPlan;
use std::io::BufReader;
use std::sync::Arc;

const PROBLEM_ARG_NAME: &str = "problem";
const WEATHER_ARG_NAME: &str = "weather";
const CONFIG_ARG_NAME: &str = "config";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const LOG_ARG_NAME: &str = "log";

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Plans phases of an offshore project")
        .arg(
            Arg::new(PROBLEM_ARG_NAME)
                .help("Sets the problem file in json format")
                .short('p')
                .long(PROBLEM_ARG_NAME)
                .required(true),
        )
        .arg(
            Arg::new(WEATHER_ARG_NAME)
                .help("Sets the metocean series file in csv format")
                .short('w')
                .long(WEATHER_ARG_NAME)
                .required(true),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to planner configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for plan output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue)
                .required(false),
        )
}

/// Runs planner command.
pub fn run_solve(
    matches: &ArgMatches,
    out_writer_func: fn(Option<File>) -> BufWriter<Box<dyn Write>>,
) -> Result<(), String> {
    // required
    let problem_path = matches.get_one::<String>(PROBLEM_ARG_NAME).ok_or("problem file is not specified")?;
    let weather_path = matches.get_one::<String>(WEATHER_ARG_NAME).ok_or("weather file is not specified")?;
    let problem_file = open_file(problem_path, "problem");
    let weather_file = open_file(weather_path, "weather");

    // optional
    let is_logging = matches.get_flag(LOG_ARG_NAME);
    let config_file = matches.get_one::<String>(CONFIG_ARG_NAME).map(|path| open_file(path, "config"));
    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out plan"));

    let (planner_config, environment) = if let Some(config_file) = config_file {
        create_from_config_file(BufReader::new(config_file), is_logging)
            .map_err(|err| format!("cannot read config: '{err}'"))?
    } else {
        let config = Config::default();
        (create_planner_config(&config), create_environment(&config, is_logging))
    };

    let (project, plan) = solve_project(
        BufReader::new(problem_file),
        BufReader::new(weather_file),
        planner_config,
        Arc::new(environment),
    )?;

    plan.write_json(&project, out_writer_func(out_result))
}
