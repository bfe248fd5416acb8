//! `Frequency`: how often events recur in a year.

use std::fmt;
use std::str::FromStr;

use fincal_core::errors::{Error, Result};

/// Event / payment frequency.
///
/// The discriminant is the number of events per year where that is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// No events; a sentinel.
    NoFrequency = -1,
    /// Only at maturity.
    Once = 0,
    /// Once a year.
    Annual = 1,
    /// Twice a year.
    Semiannual = 2,
    /// Every fourth month.
    EveryFourthMonth = 3,
    /// Every third month.
    Quarterly = 4,
    /// Every second month.
    Bimonthly = 6,
    /// Once a month.
    Monthly = 12,
    /// Every fourth week.
    EveryFourthWeek = 13,
    /// Every second week.
    Biweekly = 26,
    /// Once a week.
    Weekly = 52,
    /// Once a day.
    Daily = 365,
    /// A tenor with no exact mapping to events per year.
    OtherFrequency = 999,
}

impl Frequency {
    /// Events per year, `None` for the two sentinels.
    pub fn periods_per_year(self) -> Option<u32> {
        match self {
            Frequency::NoFrequency | Frequency::OtherFrequency => None,
            f => Some(f as u32),
        }
    }

    /// Whether compounding `n` times a year at this frequency is meaningful.
    pub fn is_compounding(self) -> bool {
        !matches!(
            self,
            Frequency::NoFrequency | Frequency::Once | Frequency::OtherFrequency
        )
    }

    pub(crate) fn from_periods_per_year(n: i32) -> Frequency {
        match n {
            1 => Frequency::Annual,
            2 => Frequency::Semiannual,
            3 => Frequency::EveryFourthMonth,
            4 => Frequency::Quarterly,
            6 => Frequency::Bimonthly,
            12 => Frequency::Monthly,
            13 => Frequency::EveryFourthWeek,
            26 => Frequency::Biweekly,
            52 => Frequency::Weekly,
            365 => Frequency::Daily,
            _ => Frequency::OtherFrequency,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Frequency::NoFrequency => "No-Frequency",
            Frequency::Once => "Once",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::EveryFourthMonth => "Every-Fourth-Month",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::EveryFourthWeek => "Every-Fourth-Week",
            Frequency::Biweekly => "Biweekly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::OtherFrequency => "Other-Frequency",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the printed name, case-insensitively.
impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        const ALL: [Frequency; 13] = [
            Frequency::NoFrequency,
            Frequency::Once,
            Frequency::Annual,
            Frequency::Semiannual,
            Frequency::EveryFourthMonth,
            Frequency::Quarterly,
            Frequency::Bimonthly,
            Frequency::Monthly,
            Frequency::EveryFourthWeek,
            Frequency::Biweekly,
            Frequency::Weekly,
            Frequency::Daily,
            Frequency::OtherFrequency,
        ];
        ALL.into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidPeriod(format!("unknown frequency ({s})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_year() {
        assert_eq!(Frequency::Quarterly.periods_per_year(), Some(4));
        assert_eq!(Frequency::Once.periods_per_year(), Some(0));
        assert_eq!(Frequency::OtherFrequency.periods_per_year(), None);
        assert_eq!(Frequency::from_periods_per_year(52), Frequency::Weekly);
        assert_eq!(Frequency::from_periods_per_year(5), Frequency::OtherFrequency);
    }

    #[test]
    fn parse() {
        assert_eq!("semiannual".parse::<Frequency>(), Ok(Frequency::Semiannual));
        assert_eq!(Frequency::EveryFourthWeek.to_string().parse(), Ok(Frequency::EveryFourthWeek));
        assert!("fortnightly".parse::<Frequency>().is_err());
    }
}
