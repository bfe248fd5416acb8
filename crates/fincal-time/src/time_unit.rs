//! `TimeUnit`: units of a [`Period`](crate::period::Period).

use std::fmt;

/// A calendar unit of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// Calendar days.
    Days,
    /// Calendar weeks (7 days).
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years (12 months).
    Years,
}

impl TimeUnit {
    /// One-letter symbol used when printing periods (`D`, `W`, `M`, `Y`).
    pub fn symbol(self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Days => "Day(s)",
            TimeUnit::Weeks => "Week(s)",
            TimeUnit::Months => "Month(s)",
            TimeUnit::Years => "Year(s)",
        };
        f.write_str(s)
    }
}
