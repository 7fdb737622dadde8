#[cfg(test)]
#[path = "../../tests/unit/scheduling/scheduler_test.rs"]
mod scheduler_test;

use super::*;
use crate::models::common::{Duration, Float, Timestamp};
use crate::models::*;
use crate::utils::{Quota, compare_floats};
use std::fmt;
use std::sync::Arc;
use time::PrimitiveDateTime;

/// Specifies how schedules found for individual years are reduced into one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelayStatistic {
    /// An average over years.
    #[default]
    Mean,
    /// The worst year.
    Max,
}

/// A successful schedule placement.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSchedule {
    /// A reduced start delay [h].
    pub start_delay: Duration,
    /// A reduced waiting time [h], absent for whole window placements.
    pub waiting_time: Option<Duration>,
    /// A strategy which produced the placement.
    pub strategy: WindowStrategy,
    /// Per year placements.
    pub years: Vec<YearlySchedule>,
    /// Searched years which cannot be placed with the strategy, they are not reduced.
    pub dropped_years: Vec<i32>,
}

/// Explains why an operation cannot be placed into weather windows.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowFailure {
    /// Operational limits used for window extraction.
    pub olc: Olc,
    /// Required duration [h].
    pub required: Duration,
    /// Amount of available windows.
    pub windows: usize,
    /// The longest available window [h].
    pub longest_window: Duration,
    /// Amount of searched years.
    pub years_searched: usize,
    /// Whether the search was stopped by a quota.
    pub is_quota_reached: bool,
}

impl fmt::Display for WindowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no weather window for {} hours under '{}': {} windows, longest is {} hours, searched years: {}",
            self.required, self.olc, self.windows, self.longest_window, self.years_searched
        )?;

        if self.is_quota_reached { write!(f, " (search stopped by quota)") } else { Ok(()) }
    }
}

/// Fits operations into weather windows of a multi-year metocean series.
pub struct WeatherWindowScheduler {
    series: Arc<WeatherSeries>,
    cache: Arc<WindowCache>,
    statistic: DelayStatistic,
}

impl WeatherWindowScheduler {
    /// Creates a new instance of `WeatherWindowScheduler`. The cache must be dedicated to the series.
    pub fn new(series: Arc<WeatherSeries>, cache: Arc<WindowCache>, statistic: DelayStatistic) -> Self {
        Self { series, cache, statistic }
    }

    /// Returns weather series used by the scheduler.
    pub fn series(&self) -> &WeatherSeries {
        self.series.as_ref()
    }

    /// Returns window cache used by the scheduler.
    pub fn cache(&self) -> &WindowCache {
        self.cache.as_ref()
    }

    /// Returns weather windows for the given operational limits.
    pub fn get_weather_windows(&self, olc: &Olc) -> Arc<Vec<WeatherWindow>> {
        self.cache.get_or_compute(olc, || self.series.windows(olc))
    }

    /// Schedules an operation of the required duration under the given operational limits.
    pub fn schedule(
        &self,
        olc: &Olc,
        requested_start: PrimitiveDateTime,
        required: Duration,
        quota: Option<&(dyn Quota + Send + Sync)>,
    ) -> Result<WindowSchedule, WindowFailure> {
        let windows = self.get_weather_windows(olc);

        self.schedule_with_windows(windows.as_slice(), requested_start, required, quota).map_err(|years_searched| {
            WindowFailure {
                olc: *olc,
                required,
                windows: windows.len(),
                longest_window: windows
                    .iter()
                    .map(|window| window.duration)
                    .max_by(|a, b| compare_floats(*a, *b))
                    .unwrap_or(0.),
                years_searched,
                is_quota_reached: quota.is_some_and(|quota| quota.is_reached()),
            }
        })
    }

    /// Schedules an operation using already extracted windows. The requested start is mapped into
    /// every year of the series: the whole window strategy is tried for all years first, then
    /// the combined window one. Years which the chosen strategy cannot place are reported as
    /// dropped. Returns amount of searched years on failure.
    pub fn schedule_with_windows(
        &self,
        windows: &[WeatherWindow],
        requested_start: PrimitiveDateTime,
        required: Duration,
        quota: Option<&(dyn Quota + Send + Sync)>,
    ) -> Result<WindowSchedule, usize> {
        let starts = self.mapped_starts(requested_start);

        let search = |find: fn(&[WeatherWindow], Timestamp, Duration) -> Option<WindowFit>| {
            let mut searched = 0;
            let mut dropped = Vec::new();
            let years = starts
                .iter()
                .take_while(|_| !quota.is_some_and(|quota| quota.is_reached()))
                .inspect(|_| searched += 1)
                .filter_map(|&(year, start)| match find(windows, start, required) {
                    Some(fit) => {
                        Some(YearlySchedule { year, start_delay: fit.start_delay, waiting_time: fit.waiting_time })
                    }
                    None => {
                        dropped.push(year);
                        None
                    }
                })
                .collect::<Vec<_>>();

            (years, dropped, searched)
        };

        let (years, dropped, searched) = search(find_whole_window);
        if !years.is_empty() {
            return Ok(self.reduce(years, dropped, WindowStrategy::Whole));
        }

        let (years, dropped, _) = search(find_combined_windows);
        if !years.is_empty() {
            return Ok(self.reduce(years, dropped, WindowStrategy::Combined));
        }

        Err(searched)
    }

    /// Maps requested start into every year of the series, dropping starts outside of it.
    fn mapped_starts(&self, requested_start: PrimitiveDateTime) -> Vec<(i32, Timestamp)> {
        let end = self.series.end();

        self.series
            .years()
            .filter_map(|year| map_into_year(requested_start, year).ok().map(|start| (year, start)))
            .map(|(year, start)| (year, self.series.timestamp_of(start)))
            .filter(|(_, start)| *start >= 0. && *start < end)
            .collect()
    }

    fn reduce(&self, years: Vec<YearlySchedule>, dropped_years: Vec<i32>, strategy: WindowStrategy) -> WindowSchedule {
        let delays = years.iter().map(|year| year.start_delay);
        let waits = years.iter().filter_map(|year| year.waiting_time);

        let (start_delay, waiting_time) = match self.statistic {
            DelayStatistic::Mean => (mean(delays), mean(waits)),
            DelayStatistic::Max => {
                (delays.max_by(|a, b| compare_floats(*a, *b)), waits.max_by(|a, b| compare_floats(*a, *b)))
            }
        };

        let waiting_time = match strategy {
            WindowStrategy::Whole => None,
            WindowStrategy::Combined => waiting_time,
        };

        WindowSchedule { start_delay: start_delay.unwrap_or(0.), waiting_time, strategy, years, dropped_years }
    }
}

fn mean(values: impl Iterator<Item = Float>) -> Option<Float> {
    let (sum, count) = values.fold((0., 0_usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 { None } else { Some(sum / count as Float) }
}
