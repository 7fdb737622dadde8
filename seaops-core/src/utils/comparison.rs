use crate::models::common::Float;
use std::cmp::Ordering;

/// An absolute tolerance used when two measured values are checked for equality.
pub const EQUALITY_TOLERANCE: Float = 1e-9;

/// Compares floating point numbers, NaN is considered as the greatest value.
#[inline]
pub fn compare_floats(a: Float, b: Float) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

/// Checks whether two numbers are equal within [`EQUALITY_TOLERANCE`].
#[inline]
pub fn is_close(a: Float, b: Float) -> bool {
    (a - b).abs() <= EQUALITY_TOLERANCE
}
