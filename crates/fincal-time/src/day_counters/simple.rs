use fincal_core::{Real, Time};

use crate::date::Date;
use crate::day_counter::DayCountConvention;

use super::thirty360::{Thirty360, Thirty360Convention};

/// Simple day counter for use with the `Simple` compounding family.
///
/// Whole-month intervals (same day of month, or month-end to month-end) give
/// an exact `Δyears + Δmonths/12`; anything else falls back to 30/360 (Bond
/// Basis).  The day count is the actual number of days.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleDayCounter;

impl DayCountConvention for SimpleDayCounter {
    fn name(&self) -> &str {
        "Simple"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        let dm1 = d1.day_of_month();
        let dm2 = d2.day_of_month();
        let whole_months = dm1 == dm2
            || (dm1 > dm2 && d2.is_end_of_month())
            || (dm1 < dm2 && d1.is_end_of_month());
        if whole_months {
            let years = Real::from(d2.year()) - Real::from(d1.year());
            let months = Real::from(d2.month().number()) - Real::from(d1.month().number());
            years + months / 12.0
        } else {
            Thirty360::new(Thirty360Convention::BondBasis).year_fraction(d1, d2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn whole_months_are_exact() {
        let dc = SimpleDayCounter;
        assert_abs_diff_eq!(dc.year_fraction(date(2023, 1, 15), date(2023, 4, 15)), 0.25);
        assert_abs_diff_eq!(dc.year_fraction(date(2023, 1, 31), date(2023, 2, 28)), 1.0 / 12.0);
        assert_abs_diff_eq!(dc.year_fraction(date(2023, 2, 28), date(2023, 3, 31)), 1.0 / 12.0);
        assert_abs_diff_eq!(dc.year_fraction(date(2022, 6, 30), date(2023, 12, 31)), 1.5);
    }

    #[test]
    fn broken_period_uses_bond_basis() {
        let dc = SimpleDayCounter;
        let d1 = date(2023, 1, 10);
        let d2 = date(2023, 2, 25);
        assert_abs_diff_eq!(dc.year_fraction(d1, d2), 45.0 / 360.0);
        assert_eq!(dc.day_count(d1, d2), 46);
    }
}
