use super::*;
use crate::helpers::weather::*;

fn record(year: i32, month: u8, day: u8, hour: u8) -> WeatherRecord {
    WeatherRecord { year, month, day, hour, hs: 1., tp: 5., ws: 5., cs: 0. }
}

#[test]
fn can_create_series_spanning_two_years() {
    let series = create_series(2000, 2001, 3, |_| (1., 5., 5., 0.));

    assert_eq!(series.step(), 3.);
    assert_eq!(series.years(), 2000..=2001);
    assert_eq!(series.end(), series.records().len() as Float * 3.);
    assert_eq!(series.timestamp_of(series.origin()), 0.);
}

parameterized_test! {can_reject_invalid_series, records, {
    assert!(WeatherSeries::new(records).is_err());
}}

can_reject_invalid_series! {
    case01_single_year: create_records(2000, 2000, 24, |_| (1., 5., 5., 0.)),
    case02_single_record: vec![record(2000, 1, 1, 0)],
    case03_unordered: vec![record(2000, 1, 1, 1), record(2000, 1, 1, 0)],
    case04_irregular_step: vec![record(2000, 12, 31, 0), record(2000, 12, 31, 1), record(2001, 1, 1, 3)],
    case05_invalid_date: vec![record(2001, 2, 29, 0), record(2001, 3, 1, 0)],
    case06_partial_years: (0..48).map(|hour| {
        let (year, month, day) = if hour < 24 { (2000, 12, 31) } else { (2001, 1, 1) };
        record(year, month, day, (hour % 24) as u8)
    }).collect(),
    case07_partial_first_year: {
        let mut records = create_records(2000, 2001, 24, |_| (1., 5., 5., 0.));
        records.drain(0..10);
        records
    },
    case08_partial_last_year: {
        let mut records = create_records(2000, 2001, 24, |_| (1., 5., 5., 0.));
        records.truncate(400);
        records
    },
    case09_year_gap: {
        let mut records = create_records(2000, 2000, 24, |_| (1., 5., 5., 0.));
        records.extend(create_records(2002, 2002, 24, |_| (1., 5., 5., 0.)));
        records
    },
}

#[test]
fn can_extract_windows_including_partial_ones_at_boundaries() {
    // accessible, accessible, blocked, accessible x3, blocked, accessible
    let pattern = [1., 1., 5., 1., 1., 1., 5., 1.];
    let series = create_patterned_series(2000, 2001, &pattern);
    let olc = Olc::new(2., 0., 0., 0.);

    let windows = series.windows(&olc);

    let first = &windows[0];
    assert_eq!((first.start, first.end, first.duration), (0., 2., 2.));
    assert_eq!(first.start_dt, series.origin());
    let second = &windows[1];
    assert_eq!((second.start, second.end, second.duration), (3., 6., 3.));

    // 17544 hourly samples end exactly on the last pattern element, the window is cut by the series end
    let last = windows.last().expect("has windows");
    assert_eq!(last.end, series.end());
    assert_eq!(last.duration, 1.);
}

#[test]
fn can_treat_inactive_thresholds_as_accessible() {
    let series = create_series(2000, 2001, 6, |_| (10., 30., 40., 5.));

    let windows = series.windows(&Olc::default());

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].duration, series.end());
}

#[test]
fn can_use_strict_threshold_comparison() {
    let series = create_series(2000, 2001, 6, |_| (2., 5., 5., 0.));

    assert!(series.windows(&Olc::new(2., 0., 0., 0.)).is_empty());
    assert_eq!(series.windows(&Olc::new(2.01, 0., 0., 0.)).len(), 1);
}

#[test]
fn can_satisfy_window_properties_on_random_series() {
    let series = create_random_series(42, 2000, 2002, 3);
    let olc = Olc::new(3., 15., 15., 0.);

    let windows = series.windows(&olc);

    assert!(!windows.is_empty());
    windows.windows(2).for_each(|pair| assert!(pair[0].end < pair[1].start));

    series.records().iter().enumerate().for_each(|(idx, record)| {
        let timestamp = idx as Float * series.step();
        let inside = windows.iter().any(|window| window.contains(timestamp));
        assert_eq!(inside, olc.accepts(record), "mismatch at sample {idx}");
    });

    windows.iter().for_each(|window| {
        let steps = window.duration / series.step();
        assert!(window.duration > 0. && window.duration <= series.end());
        assert_eq!(steps, steps.round());
    });
}

#[test]
fn can_tighten_olc() {
    let vessel = Olc::new(3., 0., 15., 0.);
    let leg = Olc::new(2.5, 12., 20., 0.);

    assert_eq!(vessel.tighten(&leg), Olc::new(2.5, 12., 15., 0.));
    assert_eq!(Olc::default().tighten(&vessel), vessel);
}

#[test]
fn can_use_normalized_olc_as_key() {
    use std::collections::HashSet;

    let keys = [Olc::new(2., 0., 0., 0.), Olc::new(2., -1., -0., Float::NAN), Olc::new(2., 1., 0., 0.)]
        .into_iter()
        .collect::<HashSet<_>>();

    assert_eq!(keys.len(), 2);
    assert!(Olc::new(0., -5., 0., 0.).is_unrestricted());
}
