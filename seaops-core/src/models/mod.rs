//! A collection of models to represent an offshore logistics planning problem and its solution.

pub mod common;

mod catalog;
pub use self::catalog::*;

mod rules;
pub use self::rules::*;

mod template;
pub use self::template::*;

mod solution;
pub use self::solution::*;

mod weather;
pub use self::weather::*;

mod phase;
pub use self::phase::*;
