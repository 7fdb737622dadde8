#[cfg(test)]
#[path = "../../tests/unit/scheduling/calendar_test.rs"]
mod calendar_test;

use crate::utils::GenericResult;
use time::{Date, Month, PrimitiveDateTime};

/// Checks whether the year is a leap year according to the Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Maps the month, day and time of the given date time into another year.
/// 29 February becomes 1 March when the target year is not a leap year.
pub fn map_into_year(datetime: PrimitiveDateTime, year: i32) -> GenericResult<PrimitiveDateTime> {
    let (month, day) = match (datetime.month(), datetime.day()) {
        (Month::February, 29) if !is_leap_year(year) => (Month::March, 1),
        (month, day) => (month, day),
    };

    Ok(PrimitiveDateTime::new(Date::from_calendar_date(year, month, day)?, datetime.time()))
}
