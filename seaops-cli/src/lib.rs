//! A crate with readers and writers used by the command line interface of the offshore operation
//! planner: a json problem, a csv metocean series, a json config and a json plan.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod helpers;

pub mod extensions;
pub mod format;
