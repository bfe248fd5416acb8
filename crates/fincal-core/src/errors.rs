//! Error types for fincal.
//!
//! Every failure in the library belongs to one of a small, closed set of
//! kinds.  Each kind carries a descriptive message; the `ensure!` and `fail!`
//! macros build them at the point where a precondition is violated.

use thiserror::Error;

/// The top-level error type used throughout fincal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A serial number or a (day, month, year) triple outside the supported
    /// date range, or a date computation that would leave it.
    #[error("date out of range: {0}")]
    DateRange(String),

    /// Division of a period by zero, or arithmetic between periods whose
    /// units cannot be combined.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// Unknown market identifier or otherwise unusable calendar.
    #[error("calendar configuration: {0}")]
    CalendarConfig(String),

    /// Missing or inconsistent schedule inputs.
    #[error("schedule configuration: {0}")]
    ScheduleConfig(String),

    /// Schedule generation left fewer than two dates.
    #[error("degenerate schedule: {0}")]
    DegenerateSchedule(String),
}

impl Error {
    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::DateRange(_) => "DateRangeError",
            Error::InvalidPeriod(_) => "InvalidPeriodError",
            Error::CalendarConfig(_) => "CalendarConfigError",
            Error::ScheduleConfig(_) => "ScheduleConfigError",
            Error::DegenerateSchedule(_) => "DegenerateScheduleError",
        }
    }
}

/// Shorthand `Result` type used throughout fincal.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return early with the given error kind if `$cond` is false.
///
/// # Example
/// ```
/// use fincal_core::{ensure, errors::Error};
/// fn positive_tenor(n: i32) -> fincal_core::errors::Result<i32> {
///     ensure!(n > 0, InvalidPeriod, "non positive tenor ({n}) not allowed");
///     Ok(n)
/// }
/// assert!(positive_tenor(3).is_ok());
/// assert!(matches!(positive_tenor(-1), Err(Error::InvalidPeriod(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:ident, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::$kind(format!($($msg)*)));
        }
    };
}

/// Return early with the given error kind.
///
/// # Example
/// ```
/// use fincal_core::{fail, errors::Error};
/// fn lookup(id: &str) -> fincal_core::errors::Result<()> {
///     fail!(CalendarConfig, "unknown market ({id})");
/// }
/// assert_eq!(lookup("XX").unwrap_err().kind(), "CalendarConfigError");
/// ```
#[macro_export]
macro_rules! fail {
    ($kind:ident, $($msg:tt)*) => {
        return Err($crate::errors::Error::$kind(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_half(n: i32) -> Result<i32> {
        ensure!(n != 0, InvalidPeriod, "cannot be divided by zero");
        ensure!(n % 2 == 0, InvalidPeriod, "{n} cannot be halved exactly");
        Ok(n / 2)
    }

    #[test]
    fn ensure_passes_through() {
        assert_eq!(checked_half(8), Ok(4));
    }

    #[test]
    fn ensure_builds_message() {
        let err = checked_half(3).unwrap_err();
        assert_eq!(err, Error::InvalidPeriod("3 cannot be halved exactly".into()));
        assert_eq!(err.to_string(), "invalid period: 3 cannot be halved exactly");
    }

    #[test]
    fn kinds_are_distinct() {
        let all = [
            Error::DateRange(String::new()),
            Error::InvalidPeriod(String::new()),
            Error::CalendarConfig(String::new()),
            Error::ScheduleConfig(String::new()),
            Error::DegenerateSchedule(String::new()),
        ];
        let mut names: Vec<_> = all.iter().map(Error::kind).collect();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }
}
