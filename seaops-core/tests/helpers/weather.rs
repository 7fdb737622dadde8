use crate::models::common::Float;
use crate::models::{WeatherRecord, WeatherSeries};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

/// Creates records covering whole calendar years with the given step; the generator receives
/// a sample index and returns `(hs, tp, ws, cs)`.
pub fn create_records<F>(first_year: i32, last_year: i32, step_hours: i64, generator: F) -> Vec<WeatherRecord>
where
    F: Fn(usize) -> (Float, Float, Float, Float),
{
    let start = Date::from_calendar_date(first_year, Month::January, 1).expect("valid date");
    let mut current = PrimitiveDateTime::new(start, Time::MIDNIGHT);
    let mut records = Vec::new();

    while current.year() <= last_year {
        let (hs, tp, ws, cs) = generator(records.len());
        records.push(WeatherRecord {
            year: current.year(),
            month: u8::from(current.month()),
            day: current.day(),
            hour: current.hour(),
            hs,
            tp,
            ws,
            cs,
        });
        current += Duration::hours(step_hours);
    }

    records
}

pub fn create_series<F>(first_year: i32, last_year: i32, step_hours: i64, generator: F) -> WeatherSeries
where
    F: Fn(usize) -> (Float, Float, Float, Float),
{
    WeatherSeries::new(create_records(first_year, last_year, step_hours, generator)).expect("valid series")
}

/// Creates a series where every sample has the same calm conditions.
pub fn create_calm_series(first_year: i32, last_year: i32) -> WeatherSeries {
    create_series(first_year, last_year, 1, |_| (1., 5., 5., 0.1))
}

/// Creates a series where wave height is taken from a repeating pattern of hourly samples.
pub fn create_patterned_series(first_year: i32, last_year: i32, pattern: &[Float]) -> WeatherSeries {
    create_series(first_year, last_year, 1, |idx| (pattern[idx % pattern.len()], 5., 5., 0.))
}

/// Creates a reproducible random series.
pub fn create_random_series(seed: u64, first_year: i32, last_year: i32, step_hours: i64) -> WeatherSeries {
    let records = {
        let mut rng = SmallRng::seed_from_u64(seed);
        let values = (0..(last_year - first_year + 1) as usize * 366 * 24)
            .map(|_| (rng.gen_range(0.0..6.), rng.gen_range(3.0..20.), rng.gen_range(0.0..25.), rng.gen_range(0.0..2.)))
            .collect::<Vec<_>>();

        create_records(first_year, last_year, step_hours, |idx| values[idx])
    };

    WeatherSeries::new(records).expect("valid series")
}
