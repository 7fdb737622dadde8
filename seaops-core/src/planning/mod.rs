//! Plans project phases: matches solutions, schedules and costs them, then selects the cheapest one.

mod diagnostics;
pub use self::diagnostics::*;

mod planner;
pub use self::planner::*;
