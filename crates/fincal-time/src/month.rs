//! `Month`: month of the year.

use std::fmt;

use fincal_core::errors::{Error, Result};

/// Month of the year, numbered 1–12 from January.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Month {
    /// January (1).
    January = 1,
    /// February (2).
    February = 2,
    /// March (3).
    March = 3,
    /// April (4).
    April = 4,
    /// May (5).
    May = 5,
    /// June (6).
    June = 6,
    /// July (7).
    July = 7,
    /// August (8).
    August = 8,
    /// September (9).
    September = 9,
    /// October (10).
    October = 10,
    /// November (11).
    November = 11,
    /// December (12).
    December = 12,
}

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// 1-based month number.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Number of days in this month.
    pub fn length(self, leap_year: bool) -> u8 {
        match self {
            Month::February if leap_year => 29,
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    /// Whether this month opens an IMM quarter (March, June, September,
    /// December).
    pub fn is_imm_month(self) -> bool {
        self.number() % 3 == 0
    }

    /// Full English name.
    pub fn long_name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self> {
        match n {
            1..=12 => Ok(MONTHS[usize::from(n) - 1]),
            _ => Err(Error::DateRange(format!("month {n} outside January-December range [1, 12]"))),
        }
    }
}

impl From<Month> for u8 {
    fn from(m: Month) -> u8 {
        m.number()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        for n in 1..=12u8 {
            assert_eq!(Month::try_from(n).map(Month::number), Ok(n));
        }
        assert!(Month::try_from(0).is_err());
        assert!(Month::try_from(13).is_err());
    }

    #[test]
    fn lengths_sum_to_year() {
        let days = |leap| MONTHS.iter().map(|m| u32::from(m.length(leap))).sum::<u32>();
        assert_eq!(days(false), 365);
        assert_eq!(days(true), 366);
    }
}
