#[cfg(test)]
#[path = "../../tests/unit/scheduling/windows_test.rs"]
mod windows_test;

use crate::models::WeatherWindow;
use crate::models::common::{Duration, Timestamp};
use crate::utils::EQUALITY_TOLERANCE;

/// A placement of an operation into weather windows relative to the requested start.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowFit {
    /// An offset from the requested start to the start of the first used window.
    pub start_delay: Duration,
    /// A sum of gaps between used windows, absent when the operation fits one window.
    pub waiting_time: Option<Duration>,
}

/// Finds the earliest window which can accommodate the whole operation starting at or after
/// `start`. A window which already contains `start` is used from `start` onwards.
pub fn find_whole_window(windows: &[WeatherWindow], start: Timestamp, required: Duration) -> Option<WindowFit> {
    if required <= 0. {
        return Some(WindowFit { start_delay: 0., waiting_time: None });
    }

    windows[first_relevant(windows, start)..].iter().find_map(|window| {
        let usable_start = window.start.max(start);

        if window.end - usable_start + EQUALITY_TOLERANCE >= required {
            Some(WindowFit { start_delay: usable_start - start, waiting_time: None })
        } else {
            None
        }
    })
}

/// Accumulates consecutive windows starting from the earliest one at or after `start` until their
/// feasible time reaches the required duration. Waiting time is a sum of bridged gaps only.
pub fn find_combined_windows(windows: &[WeatherWindow], start: Timestamp, required: Duration) -> Option<WindowFit> {
    if required <= 0. {
        return Some(WindowFit { start_delay: 0., waiting_time: Some(0.) });
    }

    let mut windows = windows[first_relevant(windows, start)..].iter();

    let first = windows.next()?;
    let usable_start = first.start.max(start);

    let mut feasible = first.end - usable_start;
    let mut waiting = 0.;
    let mut last_end = first.end;

    while feasible + EQUALITY_TOLERANCE < required {
        let window = windows.next()?;

        waiting += window.start - last_end;
        feasible += window.duration;
        last_end = window.end;
    }

    Some(WindowFit { start_delay: usable_start - start, waiting_time: Some(waiting) })
}

/// Returns an index of the first window which ends after the given timestamp.
fn first_relevant(windows: &[WeatherWindow], start: Timestamp) -> usize {
    windows.partition_point(|window| window.end <= start)
}
