//! IMM (International Monetary Market) date utilities.
//!
//! IMM dates are the third Wednesday of a month; the main cycle only counts
//! March, June, September and December.

use fincal_core::errors::Result;

use crate::date::Date;
use crate::month::Month;
use crate::weekday::Weekday;

/// IMM date utilities.
pub struct IMM;

impl IMM {
    /// Return `true` if `date` is an IMM date.
    pub fn is_imm_date(date: Date, main_cycle: bool) -> bool {
        if date.weekday() != Weekday::Wednesday || !(15..=21).contains(&date.day_of_month()) {
            return false;
        }
        !main_cycle || date.month().is_imm_month()
    }

    /// Return the first IMM date strictly after `date`.
    ///
    /// A null `date` stands for the evaluation date.
    ///
    /// # Errors
    /// `DateRange` if the next IMM date lies beyond [`Date::MAX`].
    pub fn next_date(date: Date, main_cycle: bool) -> Result<Date> {
        let date = if date.is_null() {
            Date::evaluation_date()
        } else {
            date
        };
        let mut y = date.year();
        let mut m = date.month().number();
        let offset = if main_cycle { 3 } else { 1 };
        let mut skip = offset - m % offset;
        if skip != offset || date.day_of_month() > 21 {
            skip += m;
            if skip <= 12 {
                m = skip;
            } else {
                m = skip - 12;
                y += 1;
            }
        }
        let month = Month::try_from(m)?;
        let result = Date::nth_weekday(3, Weekday::Wednesday, month, y)?;
        if result <= date {
            // already past this month's third Wednesday
            Self::next_date(Date::new(22, month, y)?, main_cycle)
        } else {
            Ok(result)
        }
    }

    /// Return the IMM code for the given date (e.g. `"H5"` for March 2025).
    ///
    /// Returns `None` if the date is not an IMM date.
    pub fn code(date: Date) -> Option<String> {
        if !Self::is_imm_date(date, false) {
            return None;
        }
        const CODES: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];
        let month_code = CODES[usize::from(date.month().number()) - 1];
        Some(format!("{month_code}{}", date.year() % 10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_is_imm_date() {
        // 3rd Wednesday of March 2024 = March 20
        assert!(IMM::is_imm_date(date(2024, 3, 20), true));
        // Not an IMM date
        assert!(!IMM::is_imm_date(date(2024, 3, 21), true));
        // Not a main-cycle month
        assert!(!IMM::is_imm_date(date(2024, 4, 17), true));
        assert!(IMM::is_imm_date(date(2024, 4, 17), false));
    }

    #[test]
    fn test_next_date() {
        assert_eq!(IMM::next_date(date(2024, 1, 1), true).unwrap(), date(2024, 3, 20));
        assert_eq!(IMM::next_date(date(2024, 1, 1), false).unwrap(), date(2024, 1, 17));
        // strictly after
        assert_eq!(IMM::next_date(date(2024, 3, 20), true).unwrap(), date(2024, 6, 19));
        assert_eq!(IMM::next_date(date(2024, 12, 20), true).unwrap(), date(2025, 3, 19));
        assert_eq!(IMM::next_date(date(2024, 1, 18), false).unwrap(), date(2024, 2, 21));
    }

    #[test]
    fn test_code() {
        assert_eq!(IMM::code(date(2025, 3, 19)), Some("H5".to_string()));
        assert_eq!(IMM::code(date(2024, 1, 17)), Some("F4".to_string()));
        assert_eq!(IMM::code(date(2025, 3, 20)), None);
    }
}
