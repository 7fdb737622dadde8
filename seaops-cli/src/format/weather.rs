//! Reads a metocean series from a simple csv format with `year,month,day,hour,hs,tp,ws,cs` columns.

#[cfg(test)]
#[path = "../../tests/unit/format/weather_test.rs"]
mod weather_test;

extern crate csv;

use super::{FormatError, WEATHER_FORMAT_CODE};
use seaops_core::prelude::{Float, WeatherRecord, WeatherSeries};
use serde::Deserialize;
use std::io::{BufReader, Read};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
struct CsvRecord {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    hs: Float,
    tp: Float,
    ws: Float,
    cs: Option<Float>,
}

impl From<CsvRecord> for WeatherRecord {
    fn from(record: CsvRecord) -> Self {
        WeatherRecord {
            year: record.year,
            month: record.month,
            day: record.day,
            hour: record.hour,
            hs: record.hs,
            tp: record.tp,
            ws: record.ws,
            cs: record.cs.unwrap_or(0.),
        }
    }
}

/// Reads weather records from csv. An empty current speed is read as zero.
pub fn read_weather_records<R: Read>(reader: BufReader<R>) -> Result<Vec<WeatherRecord>, FormatError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    reader
        .deserialize::<CsvRecord>()
        .map(|entry| entry.map(WeatherRecord::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            FormatError::new_with_details(
                WEATHER_FORMAT_CODE.to_string(),
                "cannot parse metocean csv".to_string(),
                "check that header is 'year,month,day,hour,hs,tp,ws,cs' and every row has numeric values".to_string(),
                format!("{err}"),
            )
        })
}

/// Reads a metocean series from csv and validates its regularity.
pub fn read_weather_series<R: Read>(reader: BufReader<R>) -> Result<WeatherSeries, FormatError> {
    read_weather_records(reader).and_then(|records| {
        WeatherSeries::new(records).map_err(|err| {
            FormatError::new_with_details(
                WEATHER_FORMAT_CODE.to_string(),
                "invalid metocean series".to_string(),
                "provide a regularly sampled series which covers at least two contiguous years".to_string(),
                err.to_string(),
            )
        })
    })
}
