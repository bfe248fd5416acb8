//! # fincal
//!
//! Dates, market calendars, day counters and schedule generation for
//! fixed-income cash flows.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than on `fincal-core` or `fincal-time` directly.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! fincal = "0.1"
//! ```
//!
//! ```rust
//! use fincal::{Calendar, Date, DateGeneration, Frequency, ScheduleBuilder, UsMarket};
//!
//! let schedule = ScheduleBuilder::new()
//!     .from(Date::from_ymd(2020, 1, 15)?)
//!     .to(Date::from_ymd(2021, 1, 15)?)
//!     .with_frequency(Frequency::Quarterly)
//!     .with_calendar(Calendar::united_states(UsMarket::Settlement))
//!     .with_rule(DateGeneration::Backward)
//!     .build()?;
//! assert_eq!(schedule.size(), 5);
//! # Ok::<(), fincal::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions and settings.
pub use fincal_core as core;

/// Date, calendar, day counter, interest rate and schedule types.
pub use fincal_time as time;

pub use fincal_core::{Compounding, Error, Result, SavedSettings, Settings};
pub use fincal_time::{
    BusinessDayConvention, Calendar, Date, DateGeneration, DayCounter, Frequency, InterestRate,
    Month, Period, Schedule, ScheduleBuilder, TimeUnit, UsMarket, Weekday,
};
