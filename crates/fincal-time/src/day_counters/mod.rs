//! Built-in day-count conventions.

mod actual;
mod business252;
mod simple;
mod thirty360;

pub use actual::{Actual360, Actual365Fixed};
pub use business252::{Business252, BusinessDayCache};
pub use simple::SimpleDayCounter;
pub use thirty360::{Thirty360, Thirty360Convention};
