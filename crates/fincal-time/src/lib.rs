//! # fincal-time
//!
//! Dates, periods, market calendars, day counters, interest rates and
//! schedule generation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// `Calendar` handle, the holiday-oracle trait and the trivial oracles.
pub mod calendar;

/// Market-specific holiday oracles and the market-id table.
pub mod calendars;

/// `Date` type.
pub mod date;

/// `DayCounter` handle and the `DayCountConvention` trait.
pub mod day_counter;

/// Concrete day-count conventions.
pub mod day_counters;

/// Payment / event frequency.
pub mod frequency;

/// IMM (third Wednesday) date helpers.
pub mod imm;

/// `InterestRate`: a rate with its day counter and compounding.
pub mod interest_rate;

/// `Month`: month of the year.
pub mod month;

/// `Period`: a time span in a `TimeUnit`.
pub mod period;

/// `Schedule`: an ordered sequence of dates.
pub mod schedule;

/// `TimeUnit`: days, weeks, months, years.
pub mod time_unit;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, HolidayOracle, NullCalendar, WeekendsOnly};
pub use calendars::united_states::UsMarket;
pub use date::Date;
pub use day_counter::{DayCountConvention, DayCounter};
pub use day_counters::{
    Actual360, Actual365Fixed, Business252, BusinessDayCache, SimpleDayCounter, Thirty360,
    Thirty360Convention,
};
pub use frequency::Frequency;
pub use imm::IMM;
pub use interest_rate::InterestRate;
pub use month::Month;
pub use period::Period;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder, ScheduleMeta};
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
