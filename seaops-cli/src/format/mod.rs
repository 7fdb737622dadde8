//! This module defines logic to deserialize a planning problem from json input, read a metocean
//! series from csv and write the resulting project plan as json.
//!

#[cfg(test)]
#[path = "../../tests/unit/format/format_test.rs"]
mod format_test;

extern crate serde_json;

use serde::Serialize;

pub mod plan;
pub mod problem;
pub mod weather;

/// A format error.
#[derive(Clone, Debug, Serialize)]
pub struct FormatError {
    /// An error code in registry.
    pub code: String,
    /// A possible error cause.
    pub cause: String,
    /// An action to take in order to recover from error.
    pub action: String,
    /// A details about exception.
    pub details: Option<String>,
}

impl FormatError {
    /// Creates a new instance of `FormatError` action without details.
    pub fn new(code: String, cause: String, action: String) -> Self {
        Self { code, cause, action, details: None }
    }

    /// Creates a new instance of `FormatError` action.
    pub fn new_with_details(code: String, cause: String, action: String, details: String) -> Self {
        Self { code, cause, action, details: Some(details) }
    }

    /// Formats error together with its details.
    pub fn to_string_with_details(&self) -> String {
        match &self.details {
            Some(details) => format!("{self} details: '{details}'"),
            None => self.to_string(),
        }
    }

    /// Formats multiple format errors into json string.
    pub fn format_many_to_json(errors: &[Self]) -> String {
        serde_json::to_string_pretty(errors).unwrap_or_else(|_| Self::format_many(errors, "\n"))
    }

    /// Formats multiple format errors into string.
    pub fn format_many(errors: &[Self], separator: &str) -> String {
        errors.iter().map(|err| err.to_string()).collect::<Vec<_>>().join(separator)
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}, cause: '{}', action: '{}'.", self.code, self.cause, self.action)
    }
}

/// An error code used when problem json cannot be deserialized.
pub(crate) const PROBLEM_FORMAT_CODE: &str = "E0001";
/// An error code used when metocean csv cannot be parsed.
pub(crate) const WEATHER_FORMAT_CODE: &str = "E0002";
/// An error code used when config json cannot be deserialized.
pub(crate) const CONFIG_FORMAT_CODE: &str = "E0003";
/// An error code used when problem content is invalid.
pub(crate) const VALIDATION_CODE: &str = "E0004";
