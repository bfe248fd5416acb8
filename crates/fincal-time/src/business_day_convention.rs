//! Business-day conventions.

use std::fmt;
use std::str::FromStr;

use fincal_core::errors::{Error, Result};

/// How to roll a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// First business day after the holiday.
    Following,
    /// First business day after the holiday, unless it falls in the next
    /// month; then the first business day before.
    ModifiedFollowing,
    /// First business day before the holiday.
    Preceding,
    /// First business day before the holiday, unless it falls in the
    /// previous month; then the first business day after.
    ModifiedPreceding,
    /// Leave the date as it is, business day or not.
    Unadjusted,
    /// Like `ModifiedFollowing`, but the roll may not cross the 15th either.
    HalfMonthModifiedFollowing,
    /// Nearest business day; ties go to the following one.
    Nearest,
}

impl BusinessDayConvention {
    const ALL: [BusinessDayConvention; 7] = [
        BusinessDayConvention::Following,
        BusinessDayConvention::ModifiedFollowing,
        BusinessDayConvention::Preceding,
        BusinessDayConvention::ModifiedPreceding,
        BusinessDayConvention::Unadjusted,
        BusinessDayConvention::HalfMonthModifiedFollowing,
        BusinessDayConvention::Nearest,
    ];

    fn name(self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::HalfMonthModifiedFollowing => {
                "Half-Month Modified Following"
            }
            BusinessDayConvention::Nearest => "Nearest",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the printed name or the same name without spaces and hyphens,
/// case-insensitively (`"ModifiedFollowing"`, `"modified following"`).
impl FromStr for BusinessDayConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let squash = |t: &str| {
            t.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .collect::<String>()
                .to_ascii_lowercase()
        };
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|c| squash(c.name()) == wanted)
            .ok_or_else(|| Error::ScheduleConfig(format!("unknown business-day convention ({s})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        use BusinessDayConvention::*;
        assert_eq!("ModifiedFollowing".parse(), Ok(ModifiedFollowing));
        assert_eq!("modified following".parse(), Ok(ModifiedFollowing));
        assert_eq!("Half-Month Modified Following".parse(), Ok(HalfMonthModifiedFollowing));
        for c in BusinessDayConvention::ALL {
            assert_eq!(c.to_string().parse(), Ok(c));
        }
        let err = "EndOfMonth".parse::<BusinessDayConvention>().unwrap_err();
        assert_eq!(err.kind(), "ScheduleConfigError");
    }
}
