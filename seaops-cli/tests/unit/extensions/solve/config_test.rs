use super::*;
use crate::helpers::*;
use seaops_core::utils::Quota;
use std::fs::File;

#[test]
fn can_read_full_config() {
    let file = File::open(CONFIG_PATH).expect("cannot read config from file");

    let config = read_config(BufReader::new(file)).unwrap();

    let filtering = config.filtering.as_ref().expect("no filtering config");
    assert_eq!(filtering.allow_missing_fields, Some(true));

    let scheduling = config.scheduling.as_ref().expect("no scheduling config");
    assert_eq!(scheduling.delay_statistic, Some(DelayStatisticType::Max));
    assert_eq!(scheduling.max_search_time, Some(30));

    let costs = config.costs.as_ref().expect("no costs config");
    assert_eq!(costs.fuel_cost_rate, Some(0.0007));
    assert_eq!(costs.port_markup_percentage, Some(5.));

    assert_eq!(config.parallelism.as_ref().and_then(|parallelism| parallelism.threads), Some(4));
    assert_eq!(config.planning.as_ref().and_then(|planning| planning.chain_phases), Some(true));
    assert!(is_logging_enabled(&config));
}

#[test]
fn can_create_planner_config_from_full_config() {
    let file = File::open(CONFIG_PATH).expect("cannot read config from file");
    let config = read_config(BufReader::new(file)).unwrap();

    let planner_config = create_planner_config(&config);

    assert!(planner_config.allow_missing_fields);
    assert_eq!(planner_config.delay_statistic, DelayStatistic::Max);
    assert_eq!(planner_config.costs, CostSettings { fuel_cost_rate: 0.0007, port_markup_pct: 5. });
    assert!(planner_config.chain_phases);
}

#[test]
fn can_use_defaults_for_empty_config() {
    let config = read_config(create_reader("{}")).unwrap();

    let planner_config = create_planner_config(&config);
    let environment = create_environment(&config, false);

    let defaults = PlannerConfig::default();
    assert_eq!(planner_config.allow_missing_fields, defaults.allow_missing_fields);
    assert_eq!(planner_config.delay_statistic, DelayStatistic::Mean);
    assert_eq!(planner_config.costs, CostSettings::default());
    assert!(!planner_config.chain_phases);
    assert!(!is_logging_enabled(&config));
    assert!(environment.quota.is_some_and(|quota| !quota.is_reached()));
}

#[test]
fn can_use_partial_sections() {
    let json = r#"{
        "filtering": { "allowMissingFields": false },
        "costs": { "portMarkupPercentage": 10 },
        "parallelism": { "threads": 2 }
    }"#;
    let config = read_config(create_reader(json)).unwrap();

    let planner_config = create_planner_config(&config);
    let environment = create_environment(&config, false);

    assert!(!planner_config.allow_missing_fields);
    assert_eq!(planner_config.costs, CostSettings { fuel_cost_rate: 0., port_markup_pct: 10. });
    assert_eq!(environment.parallelism.threads(), 2);
}

#[test]
fn can_report_invalid_config() {
    let json = r#"{ "scheduling": { "delayStatistic": "median" } }"#;

    let err = read_config(create_reader(json)).unwrap_err();

    assert!(err.starts_with("E0003, cause: 'cannot deserialize config'"));
    assert!(err.contains("median"));
}
