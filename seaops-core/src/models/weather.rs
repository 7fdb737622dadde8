//! Metocean time series and operational limit conditions.

#[cfg(test)]
#[path = "../../tests/unit/models/weather_test.rs"]
mod weather_test;

use crate::models::common::{Duration, Float, Timestamp};
use crate::utils::{GenericError, GenericResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;
use time::{Date, Month, PrimitiveDateTime, Time};

const SECONDS_PER_HOUR: Float = 3600.;

/// One sample of a metocean series.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherRecord {
    /// Calendar year.
    pub year: i32,
    /// Month, starting from 1.
    pub month: u8,
    /// Day of month, starting from 1.
    pub day: u8,
    /// Hour of day.
    pub hour: u8,
    /// Significant wave height [m].
    pub hs: Float,
    /// Peak wave period [s].
    pub tp: Float,
    /// Wind speed [m/s].
    pub ws: Float,
    /// Current speed [m/s].
    pub cs: Float,
}

impl WeatherRecord {
    fn datetime(&self) -> GenericResult<PrimitiveDateTime> {
        let date = Date::from_calendar_date(self.year, Month::try_from(self.month)?, self.day)?;
        let time = Time::from_hms(self.hour, 0, 0)?;

        Ok(PrimitiveDateTime::new(date, time))
    }
}

/// Operational limit conditions: thresholds on wave height, wave period, wind speed and current
/// speed. A non-positive threshold is inactive, so the field is always accessible.
#[derive(Clone, Copy, Debug, Default)]
pub struct Olc {
    /// Significant wave height limit [m].
    pub max_hs: Float,
    /// Peak wave period limit [s].
    pub max_tp: Float,
    /// Wind speed limit [m/s].
    pub max_ws: Float,
    /// Current speed limit [m/s].
    pub max_cs: Float,
}

impl Olc {
    /// Creates a new instance of `Olc`.
    pub fn new(max_hs: Float, max_tp: Float, max_ws: Float, max_cs: Float) -> Self {
        Self {
            max_hs: normalize_threshold(max_hs),
            max_tp: normalize_threshold(max_tp),
            max_ws: normalize_threshold(max_ws),
            max_cs: normalize_threshold(max_cs),
        }
    }

    /// Creates `Olc` from optional thresholds, absent ones are inactive.
    pub fn from_optional(
        max_hs: Option<Float>,
        max_tp: Option<Float>,
        max_ws: Option<Float>,
        max_cs: Option<Float>,
    ) -> Self {
        Self::new(max_hs.unwrap_or(0.), max_tp.unwrap_or(0.), max_ws.unwrap_or(0.), max_cs.unwrap_or(0.))
    }

    /// Returns true when no threshold is active.
    pub fn is_unrestricted(&self) -> bool {
        self.thresholds().iter().all(|threshold| *threshold == 0.)
    }

    /// Combines two conditions keeping the lowest active threshold of each field.
    pub fn tighten(&self, other: &Olc) -> Olc {
        let pick = |a: Float, b: Float| match (a > 0., b > 0.) {
            (true, true) => a.min(b),
            (true, false) => a,
            (false, _) => b,
        };

        Olc::new(
            pick(self.max_hs, other.max_hs),
            pick(self.max_tp, other.max_tp),
            pick(self.max_ws, other.max_ws),
            pick(self.max_cs, other.max_cs),
        )
    }

    /// Checks whether the record is accessible: every active field is strictly below its threshold.
    pub fn accepts(&self, record: &WeatherRecord) -> bool {
        let values = [record.hs, record.tp, record.ws, record.cs];

        self.thresholds().iter().zip(values.iter()).all(|(threshold, value)| *threshold == 0. || *value < *threshold)
    }

    fn thresholds(&self) -> [Float; 4] {
        [self.max_hs, self.max_tp, self.max_ws, self.max_cs]
    }
}

fn normalize_threshold(value: Float) -> Float {
    // NOTE map NaN, negative and negative zero to the same inactive value to keep hashing consistent
    if value > 0. { value } else { 0. }
}

impl PartialEq for Olc {
    fn eq(&self, other: &Self) -> bool {
        self.thresholds().iter().zip(other.thresholds().iter()).all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Olc {}

impl Hash for Olc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.thresholds().iter().for_each(|threshold| threshold.to_bits().hash(state));
    }
}

impl fmt::Display for Olc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hs<{} tp<{} ws<{} cs<{}", self.max_hs, self.max_tp, self.max_ws, self.max_cs)
    }
}

/// A maximal contiguous time range where all active OLC thresholds hold.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherWindow {
    /// Start timestamp, hours since series origin.
    pub start: Timestamp,
    /// Exclusive end timestamp: the last accessible sample plus one sampling step.
    pub end: Timestamp,
    /// Start date time.
    pub start_dt: PrimitiveDateTime,
    /// Exclusive end date time.
    pub end_dt: PrimitiveDateTime,
    /// Window duration in hours, a multiple of the sampling step.
    pub duration: Duration,
}

impl WeatherWindow {
    /// Checks whether the window contains the given timestamp.
    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}

/// A regularly sampled metocean series spanning contiguous calendar years.
#[derive(Clone, Debug)]
pub struct WeatherSeries {
    records: Vec<WeatherRecord>,
    origin: PrimitiveDateTime,
    step: Duration,
    years: RangeInclusive<i32>,
}

impl WeatherSeries {
    /// Creates a new instance of `WeatherSeries` validating that samples are ordered, evenly spaced
    /// and cover at least two whole contiguous calendar years without gaps or repeats: the first
    /// sample is on January 1st 00:00 and the last one is one step before the next year begins.
    pub fn new(records: Vec<WeatherRecord>) -> GenericResult<Self> {
        if records.len() < 2 {
            return Err("weather series must have at least two records".into());
        }

        let datetimes = records.iter().map(|record| record.datetime()).collect::<GenericResult<Vec<_>>>()?;

        let step = datetimes[1] - datetimes[0];
        if !step.is_positive() {
            return Err(format!("weather series is not ordered at {}", datetimes[1]).into());
        }

        if let Some(pair) = datetimes.windows(2).find(|pair| pair[1] - pair[0] != step) {
            return Err(GenericError::from(format!(
                "weather series has irregular sampling step between {} and {}, expected {} hours",
                pair[0],
                pair[1],
                step.as_seconds_f64() / SECONDS_PER_HOUR
            )));
        }

        let mut years = records.iter().map(|record| record.year).collect::<Vec<_>>();
        years.dedup();

        if let Some(pair) = years.windows(2).find(|pair| pair[1] != pair[0] + 1) {
            return Err(
                format!("weather series years are not contiguous: {} is followed by {}", pair[0], pair[1]).into()
            );
        }

        if years.len() < 2 {
            return Err(format!("weather series must span at least two years, got: {years:?}").into());
        }

        let years = years[0]..=years[years.len() - 1];

        let start_of_year = |year: i32| -> GenericResult<PrimitiveDateTime> {
            Ok(PrimitiveDateTime::new(Date::from_calendar_date(year, Month::January, 1)?, Time::MIDNIGHT))
        };

        let expected_start = start_of_year(*years.start())?;
        if datetimes[0] != expected_start {
            return Err(format!(
                "weather series must cover whole years: expected to start at {expected_start}, got {}",
                datetimes[0]
            )
            .into());
        }

        let expected_end = start_of_year(*years.end() + 1)?;
        let actual_end = datetimes[datetimes.len() - 1] + step;
        if actual_end != expected_end {
            return Err(format!(
                "weather series must cover whole years: expected to end at {expected_end}, got {actual_end}"
            )
            .into());
        }

        Ok(Self { records, origin: datetimes[0], step: step.as_seconds_f64() / SECONDS_PER_HOUR, years })
    }

    /// Returns series samples.
    pub fn records(&self) -> &[WeatherRecord] {
        self.records.as_slice()
    }

    /// Returns sampling step in hours.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Returns calendar years covered by the series.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.years.clone()
    }

    /// Returns date time of the first sample.
    pub fn origin(&self) -> PrimitiveDateTime {
        self.origin
    }

    /// Returns exclusive end timestamp of the series.
    pub fn end(&self) -> Timestamp {
        self.records.len() as Float * self.step
    }

    /// Converts date time into a timestamp relative to series origin.
    pub fn timestamp_of(&self, datetime: PrimitiveDateTime) -> Timestamp {
        (datetime - self.origin).as_seconds_f64() / SECONDS_PER_HOUR
    }

    /// Converts a timestamp back into date time.
    pub fn datetime_at(&self, timestamp: Timestamp) -> PrimitiveDateTime {
        self.origin + time::Duration::seconds_f64(timestamp * SECONDS_PER_HOUR)
    }

    /// Extracts all weather windows for the given operational limits in chronological order.
    /// Windows touching series boundaries are kept as partial windows.
    pub fn windows(&self, olc: &Olc) -> Vec<WeatherWindow> {
        let mut windows = Vec::new();
        let mut run_start: Option<usize> = None;

        for (idx, record) in self.records.iter().enumerate() {
            match (olc.accepts(record), run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start)) => {
                    windows.push(self.create_window(start, idx));
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some(start) = run_start {
            windows.push(self.create_window(start, self.records.len()));
        }

        windows
    }

    fn create_window(&self, start_idx: usize, end_idx: usize) -> WeatherWindow {
        let start = start_idx as Float * self.step;
        let end = end_idx as Float * self.step;

        WeatherWindow {
            start,
            end,
            start_dt: self.datetime_at(start),
            end_dt: self.datetime_at(end),
            duration: (end_idx - start_idx) as Float * self.step,
        }
    }
}
