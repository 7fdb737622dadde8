use super::*;
use seaops_cli::format::plan::{PhaseStatus, deserialize_plan};

const PROBLEM_PATH: &str = "../data/problem.json";
const WEATHER_PATH: &str = "../data/metocean.csv";
const CONFIG_PATH: &str = "../data/config.full.json";

struct DummyWrite {}

impl Write for DummyWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn run_solve_with_out_writer(matches: &ArgMatches) {
    run_solve(matches, |_| BufWriter::new(Box::new(DummyWrite {}))).unwrap();
}

#[test]
fn can_solve_sample_problem() {
    let args = vec!["solve", "--problem", PROBLEM_PATH, "--weather", WEATHER_PATH];
    let matches = get_solve_app().try_get_matches_from(args).unwrap();

    run_solve_with_out_writer(&matches);
}

#[test]
fn can_solve_sample_problem_with_config() {
    let args = vec!["solve", "-p", PROBLEM_PATH, "-w", WEATHER_PATH, "-c", CONFIG_PATH];
    let matches = get_solve_app().try_get_matches_from(args).unwrap();

    run_solve_with_out_writer(&matches);
}

#[test]
fn can_require_problem_and_weather_paths() {
    get_solve_app().try_get_matches_from(vec!["solve", "--problem", PROBLEM_PATH]).unwrap_err();
    get_solve_app().try_get_matches_from(vec!["solve", "--weather", WEATHER_PATH]).unwrap_err();
}

#[test]
fn can_specify_log_flag() {
    let args = vec!["solve", "-p", PROBLEM_PATH, "-w", WEATHER_PATH, "--log"];
    let matches = get_solve_app().try_get_matches_from(args).unwrap();

    assert!(matches.get_flag(LOG_ARG_NAME));
}

#[test]
fn can_write_plan_to_out_result_file() {
    let tmpfile = tempfile::NamedTempFile::new().unwrap();
    let out_path = tmpfile.path().to_str().unwrap();
    let args = vec!["solve", "-p", PROBLEM_PATH, "-w", WEATHER_PATH, "-o", out_path];
    let matches = get_solve_app().try_get_matches_from(args).unwrap();

    run_solve(&matches, create_write_buffer).unwrap();

    let plan = deserialize_plan(BufReader::new(File::open(out_path).unwrap())).unwrap();
    let statuses = plan.phases.iter().map(|phase| phase.status).collect::<Vec<_>>();
    assert_eq!(
        statuses,
        vec![PhaseStatus::Planned, PhaseStatus::NoWeatherWindow, PhaseStatus::NoFeasibleCombination]
    );
    assert!(plan.total_cost > 0.);
}

#[test]
fn can_return_error_for_invalid_config() {
    let tmpfile = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmpfile.path(), "{ \"costs\": [] }").unwrap();
    let config_path = tmpfile.path().to_str().unwrap();
    let args = vec!["solve", "-p", PROBLEM_PATH, "-w", WEATHER_PATH, "-c", config_path];
    let matches = get_solve_app().try_get_matches_from(args).unwrap();

    let err = run_solve(&matches, |_| BufWriter::new(Box::new(DummyWrite {}))).unwrap_err();

    assert!(err.starts_with("cannot read config"));
    assert!(err.contains("E0003"));
}
