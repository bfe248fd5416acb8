//! United States calendars.
//!
//! Every market shares the weekend test plus a handful of federal holidays;
//! observance rules (Saturday holidays moved to Friday, Sunday holidays to
//! Monday) differ per market and are spelled out in each predicate.

use std::fmt;
use std::str::FromStr;

use fincal_core::errors::Error;

use crate::calendar::{western_easter_monday, Calendar, HolidayOracle};
use crate::date::Date;
use crate::weekday::Weekday;

use Weekday::{Friday, Monday, Thursday, Tuesday, Wednesday};

/// Market selector for [`Calendar::united_states`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsMarket {
    /// Generic settlement calendar (federal holidays).
    Settlement,
    /// Settlement calendar for LIBOR-linked instruments.
    LiborImpact,
    /// New York Stock Exchange.
    Nyse,
    /// Government-bond market (SIFMA recommendations).
    GovernmentBond,
    /// Off-peak days for the North American Energy Reliability Council.
    Nerc,
    /// Federal Reserve Bankwire System.
    FederalReserve,
}

impl UsMarket {
    /// All markets, in declaration order.
    pub const ALL: [UsMarket; 6] = [
        UsMarket::Settlement,
        UsMarket::LiborImpact,
        UsMarket::Nyse,
        UsMarket::GovernmentBond,
        UsMarket::Nerc,
        UsMarket::FederalReserve,
    ];

    /// Identifier accepted by [`Calendar::from_market_id`].
    pub fn market_id(self) -> &'static str {
        match self {
            UsMarket::Settlement => "US-SETTLEMENT",
            UsMarket::LiborImpact => "US-LIBOR",
            UsMarket::Nyse => "US-NYSE",
            UsMarket::GovernmentBond => "US-GOVBOND",
            UsMarket::Nerc => "US-NERC",
            UsMarket::FederalReserve => "US-FED",
        }
    }

    pub(crate) fn oracle(self) -> &'static dyn HolidayOracle {
        match self {
            UsMarket::Settlement => &SETTLEMENT,
            UsMarket::LiborImpact => &LIBOR_IMPACT,
            UsMarket::Nyse => &NYSE,
            UsMarket::GovernmentBond => &GOVERNMENT_BOND,
            UsMarket::Nerc => &NERC,
            UsMarket::FederalReserve => &FEDERAL_RESERVE,
        }
    }
}

impl fmt::Display for UsMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.market_id())
    }
}

impl FromStr for UsMarket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsMarket::ALL
            .into_iter()
            .find(|m| m.market_id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::CalendarConfig(format!("unknown US market ({s})")))
    }
}

impl Calendar {
    /// A United States calendar for the given market.
    pub fn united_states(market: UsMarket) -> Self {
        Calendar::new(market.oracle())
    }
}

// ── Shared rules ──────────────────────────────────────────────────────────────

/// The pieces of a date every rule looks at.
#[derive(Clone, Copy)]
struct Day {
    d: u8,
    m: u8,
    y: u16,
    w: Weekday,
}

impl Day {
    fn of(date: Date) -> Self {
        Day {
            d: date.day_of_month(),
            m: date.month().number(),
            y: date.year(),
            w: date.weekday(),
        }
    }

    /// Fixed-date holiday moved to Monday when it falls on a Sunday.
    fn fixed_sunday_observed(self, m: u8, d: u8) -> bool {
        self.m == m && (self.d == d || (self.d == d + 1 && self.w == Monday))
    }

    /// Fixed-date holiday moved to Friday (Saturday) or Monday (Sunday).
    fn fixed_observed(self, m: u8, d: u8) -> bool {
        self.fixed_sunday_observed(m, d) || (self.m == m && self.d == d - 1 && self.w == Friday)
    }

    fn new_years_day(self) -> bool {
        self.fixed_sunday_observed(1, 1)
    }

    fn martin_luther_king(self, since: u16) -> bool {
        self.y >= since && self.m == 1 && self.w == Monday && (15..=21).contains(&self.d)
    }

    fn washington_birthday(self) -> bool {
        if self.y >= 1971 {
            self.m == 2 && self.w == Monday && (15..=21).contains(&self.d)
        } else {
            self.fixed_observed(2, 22)
        }
    }

    fn memorial_day(self) -> bool {
        if self.y >= 1971 {
            self.m == 5 && self.w == Monday && self.d >= 25
        } else {
            self.fixed_observed(5, 30)
        }
    }

    fn juneteenth(self) -> bool {
        self.y >= 2022 && self.fixed_observed(6, 19)
    }

    fn labor_day(self) -> bool {
        self.m == 9 && self.w == Monday && self.d <= 7
    }

    fn columbus_day(self) -> bool {
        self.y >= 1971 && self.m == 10 && self.w == Monday && (8..=14).contains(&self.d)
    }

    /// Between 1971 and 1977 Veterans' Day was the fourth Monday of October.
    fn veterans_day(self, saturday_moves: bool) -> bool {
        if self.y <= 1970 || self.y >= 1978 {
            if saturday_moves {
                self.fixed_observed(11, 11)
            } else {
                self.fixed_sunday_observed(11, 11)
            }
        } else {
            self.m == 10 && self.w == Monday && (22..=28).contains(&self.d)
        }
    }

    fn thanksgiving(self) -> bool {
        self.m == 11 && self.w == Thursday && (22..=28).contains(&self.d)
    }
}

// ── Oracles ───────────────────────────────────────────────────────────────────

/// Federal holidays, with Saturday holidays observed on Friday.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStatesSettlement;

impl HolidayOracle for UnitedStatesSettlement {
    fn name(&self) -> &'static str {
        "US settlement"
    }

    fn is_business_day(&self, date: Date) -> bool {
        let day = Day::of(date);
        if self.is_weekend(day.w) {
            return false;
        }
        !(day.new_years_day()
            // New Year's Day on a Saturday
            || (day.m == 12 && day.d == 31 && day.w == Friday)
            || day.martin_luther_king(1983)
            || day.washington_birthday()
            || day.memorial_day()
            || day.juneteenth()
            || day.fixed_observed(7, 4)
            || day.labor_day()
            || day.columbus_day()
            || day.veterans_day(true)
            || day.thanksgiving()
            || day.fixed_observed(12, 25))
    }
}

/// Settlement calendar, except that since 2015 a weekday on which
/// Independence Day is observed stays open.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStatesLiborImpact;

impl HolidayOracle for UnitedStatesLiborImpact {
    fn name(&self) -> &'static str {
        "US with Libor impact"
    }

    fn is_business_day(&self, date: Date) -> bool {
        let day = Day::of(date);
        let observed_july_4th = day.m == 7
            && ((day.d == 5 && day.w == Monday) || (day.d == 3 && day.w == Friday));
        if observed_july_4th && day.y >= 2015 {
            return true;
        }
        SETTLEMENT.is_business_day(date)
    }
}

/// New York Stock Exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStatesNyse;

impl HolidayOracle for UnitedStatesNyse {
    fn name(&self) -> &'static str {
        "New York stock exchange"
    }

    fn is_business_day(&self, date: Date) -> bool {
        let day = Day::of(date);
        if self.is_weekend(day.w) {
            return false;
        }
        let dd = date.day_of_year();
        let em = western_easter_monday(day.y);
        if day.new_years_day()
            || day.washington_birthday()
            // Good Friday
            || dd + 3 == em
            || day.memorial_day()
            || day.juneteenth()
            || day.fixed_observed(7, 4)
            || day.labor_day()
            || day.thanksgiving()
            || day.fixed_observed(12, 25)
        {
            return false;
        }
        if day.martin_luther_king(1998) {
            return false;
        }
        // Presidential election days
        if (day.y <= 1968 || (day.y <= 1980 && day.y % 4 == 0))
            && day.m == 11
            && day.d <= 7
            && day.w == Tuesday
        {
            return false;
        }
        !nyse_special_closing(day, dd)
    }
}

fn nyse_special_closing(day: Day, dd: u16) -> bool {
    let Day { d, m, y, w } = day;
    matches!(
        (y, m, d),
        // President Bush's funeral
        (2018, 12, 5)
        // Hurricane Sandy
        | (2012, 10, 29) | (2012, 10, 30)
        // President Ford's funeral
        | (2007, 1, 2)
        // President Reagan's funeral
        | (2004, 6, 11)
        // September 11
        | (2001, 9, 11..=14)
        // President Nixon's funeral
        | (1994, 4, 27)
        // Hurricane Gloria
        | (1985, 9, 27)
        // 1977 blackout
        | (1977, 7, 14)
        // Funeral of former President Lyndon B. Johnson
        | (1973, 1, 25)
        // Funeral of former President Harry S. Truman
        | (1972, 12, 28)
        // National Day of Participation for the lunar exploration
        | (1969, 7, 21)
        // Funeral of former President Eisenhower
        | (1969, 3, 31)
        // Closed all day, heavy snow
        | (1969, 2, 10)
        // Day after Independence Day
        | (1968, 7, 5)
        // National Day of Mourning for Martin Luther King Jr.
        | (1968, 4, 9)
        // Funeral of President Kennedy
        | (1963, 11, 25)
        // Day before Decoration Day
        | (1961, 5, 29)
        // Day after Christmas
        | (1958, 12, 26)
        // Christmas Eve
        | (1954 | 1956 | 1965, 12, 24)
    ) || (y == 1968 && dd >= 163 && w == Wednesday) // paperwork crisis
}

/// Government-bond market.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStatesGovernmentBond;

impl HolidayOracle for UnitedStatesGovernmentBond {
    fn name(&self) -> &'static str {
        "US government bond market"
    }

    fn is_business_day(&self, date: Date) -> bool {
        let day = Day::of(date);
        if self.is_weekend(day.w) {
            return false;
        }
        let dd = date.day_of_year();
        let em = western_easter_monday(day.y);
        if day.new_years_day()
            || day.martin_luther_king(1983)
            || day.washington_birthday()
            // Good Friday, open in 2015 for the jobs report
            || (dd + 3 == em && day.y != 2015)
            || day.memorial_day()
            || day.juneteenth()
            || day.fixed_observed(7, 4)
            || day.labor_day()
            || day.columbus_day()
            || day.veterans_day(false)
            || day.thanksgiving()
            || day.fixed_observed(12, 25)
        {
            return false;
        }
        !matches!(
            (day.y, day.m, day.d),
            // President Bush's funeral, Hurricane Sandy, President Reagan's funeral
            (2018, 12, 5) | (2012, 10, 30) | (2004, 6, 11)
        )
    }
}

/// North American Energy Reliability Council off-peak days.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStatesNerc;

impl HolidayOracle for UnitedStatesNerc {
    fn name(&self) -> &'static str {
        "North American Energy Reliability Council"
    }

    fn is_business_day(&self, date: Date) -> bool {
        let day = Day::of(date);
        !(self.is_weekend(day.w)
            || day.new_years_day()
            || day.memorial_day()
            || day.fixed_sunday_observed(7, 4)
            || day.labor_day()
            || day.thanksgiving()
            || day.fixed_sunday_observed(12, 25))
    }
}

/// Federal Reserve Bankwire System; Saturday holidays are not moved.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStatesFederalReserve;

impl HolidayOracle for UnitedStatesFederalReserve {
    fn name(&self) -> &'static str {
        "Federal Reserve Bankwire System"
    }

    fn is_business_day(&self, date: Date) -> bool {
        let day = Day::of(date);
        !(self.is_weekend(day.w)
            || day.new_years_day()
            || day.martin_luther_king(1983)
            || day.washington_birthday()
            || day.memorial_day()
            || day.juneteenth()
            || day.fixed_sunday_observed(7, 4)
            || day.labor_day()
            || day.columbus_day()
            || day.veterans_day(false)
            || day.thanksgiving()
            || day.fixed_sunday_observed(12, 25))
    }
}

static SETTLEMENT: UnitedStatesSettlement = UnitedStatesSettlement;
static LIBOR_IMPACT: UnitedStatesLiborImpact = UnitedStatesLiborImpact;
static NYSE: UnitedStatesNyse = UnitedStatesNyse;
static GOVERNMENT_BOND: UnitedStatesGovernmentBond = UnitedStatesGovernmentBond;
static NERC: UnitedStatesNerc = UnitedStatesNerc;
static FEDERAL_RESERVE: UnitedStatesFederalReserve = UnitedStatesFederalReserve;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn independence_day_2023() {
        let cal = UnitedStatesSettlement;
        // July 4, 2023 is a Tuesday
        assert!(!cal.is_business_day(date(2023, 7, 4)));
    }

    #[test]
    fn thanksgiving_2023() {
        // 4th Thursday of November 2023 = Nov 23
        for market in UsMarket::ALL {
            assert!(!market.oracle().is_business_day(date(2023, 11, 23)), "{market}");
        }
    }

    #[test]
    fn normal_day() {
        let cal = UnitedStatesSettlement;
        assert!(cal.is_business_day(date(2023, 6, 15)));
    }

    #[test]
    fn new_years_day_2000() {
        assert!(!SETTLEMENT.is_business_day(date(2000, 1, 1)));
        assert!(SETTLEMENT.is_business_day(date(2000, 1, 3)));
    }

    #[test]
    fn saturday_new_year() {
        // 2022-01-01 was a Saturday
        assert!(!SETTLEMENT.is_business_day(date(2021, 12, 31)));
        assert!(NYSE.is_business_day(date(2021, 12, 31)));
    }

    #[test]
    fn libor_impact_keeps_observed_independence_day() {
        // 2020-07-04 was a Saturday
        assert!(!SETTLEMENT.is_business_day(date(2020, 7, 3)));
        assert!(LIBOR_IMPACT.is_business_day(date(2020, 7, 3)));
        assert!(!LIBOR_IMPACT.is_business_day(date(2020, 7, 4)));
    }

    #[test]
    fn good_friday() {
        assert!(!NYSE.is_business_day(date(2024, 3, 29)));
        assert!(SETTLEMENT.is_business_day(date(2024, 3, 29)));
        assert!(!GOVERNMENT_BOND.is_business_day(date(2024, 3, 29)));
        assert!(GOVERNMENT_BOND.is_business_day(date(2015, 4, 3)));
    }

    #[test]
    fn nyse_special_closings() {
        assert!(!NYSE.is_business_day(date(2012, 10, 29)));
        assert!(!NYSE.is_business_day(date(2001, 9, 13)));
        assert!(!NYSE.is_business_day(date(1968, 7, 10)));
        // 1976 election day
        assert!(!NYSE.is_business_day(date(1976, 11, 2)));
        assert!(NYSE.is_business_day(date(1984, 11, 6)));
    }

    #[test]
    fn parse_market() {
        assert_eq!("us-nyse".parse::<UsMarket>().unwrap(), UsMarket::Nyse);
        assert!("US-MARS".parse::<UsMarket>().is_err());
    }
}
