//! `Weekday`: day of the week.

use std::fmt;

use fincal_core::errors::{Error, Result};

/// Day of the week, numbered 1–7 from Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday for an ordinal in `1..=7`; any other value wraps modulo 7.
    pub(crate) fn from_ordinal_wrapping(n: i32) -> Self {
        Self::ALL[(n - 1).rem_euclid(7) as usize]
    }

    /// Ordinal, Monday = 1 … Sunday = 7.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Saturday or Sunday.
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Three-letter abbreviation.
    pub fn short_name(self) -> &'static str {
        &self.long_name()[..3]
    }

    /// Full English name.
    pub fn long_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self> {
        match n {
            1..=7 => Ok(Self::ALL[usize::from(n) - 1]),
            _ => Err(Error::DateRange(format!("weekday ordinal {n} outside [1, 7]"))),
        }
    }
}

/// `{}` prints the full name, `{:#}` the abbreviation.
impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(self.short_name())
        } else {
            f.write_str(self.long_name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        for (i, w) in Weekday::ALL.iter().enumerate() {
            assert_eq!(usize::from(w.ordinal()), i + 1);
            assert_eq!(Weekday::try_from(w.ordinal()), Ok(*w));
        }
        assert!(Weekday::try_from(0).is_err());
        assert!(Weekday::try_from(8).is_err());
        assert_eq!(Weekday::from_ordinal_wrapping(8), Weekday::Monday);
        assert_eq!(Weekday::from_ordinal_wrapping(0), Weekday::Sunday);
    }

    #[test]
    fn names() {
        assert_eq!(Weekday::Thursday.to_string(), "Thursday");
        assert_eq!(format!("{:#}", Weekday::Thursday), "Thu");
        assert!(Weekday::Sunday.is_weekend());
        assert!(!Weekday::Friday.is_weekend());
    }
}
