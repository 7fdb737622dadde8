//! Contains functionality to fit operations into weather windows of a metocean series.

mod cache;
pub use self::cache::*;

mod calendar;
pub use self::calendar::*;

mod durations;
pub use self::durations::*;

mod scheduler;
pub use self::scheduler::*;

mod windows;
pub use self::windows::*;
