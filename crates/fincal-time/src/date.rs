//! `Date` type.
//!
//! A date is a serial number of days.  Serial 1 is January 1, 1900 (a
//! Monday) and serial 0 is reserved as the "null date" sentinel.
//!
//! # Serial number convention
//! * Valid dates run from January 1, 1901 (serial 366) to December 31, 2199
//!   (serial 109 573).
//! * Year and month are recovered from precomputed offset tables rather than
//!   from a closed form.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use fincal_core::errors::{Error, Result};
use fincal_core::{ensure, fail, Settings};

use crate::month::Month;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i32", into = "i32")
)]
pub struct Date(i32);

const MIN_YEAR: u16 = 1901;
const MAX_YEAR: u16 = 2199;

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// The null date sentinel (serial 0).
    pub const NULL: Date = Date(0);

    /// Minimum valid date: January 1, 1901.
    pub const MIN: Date = Date(366);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number in `[MIN, MAX]`.
    pub fn from_serial(serial: i32) -> Result<Self> {
        ensure!(
            (Self::MIN.0..=Self::MAX.0).contains(&serial),
            DateRange,
            "serial number {serial} outside allowed range [{}, {}], i.e. [{}, {}]",
            Self::MIN.0,
            Self::MAX.0,
            Self::MIN,
            Self::MAX
        );
        Ok(Date(serial))
    }

    /// Create a date from day-of-month, month and year.
    ///
    /// ```
    /// use fincal_time::{Date, Month};
    /// let d = Date::new(29, Month::February, 2024).unwrap();
    /// assert_eq!(d.to_string(), "2024-2-29");
    /// assert!(Date::new(29, Month::February, 2023).is_err());
    /// ```
    pub fn new(day: u8, month: Month, year: u16) -> Result<Self> {
        ensure!(
            (MIN_YEAR..=MAX_YEAR).contains(&year),
            DateRange,
            "year {year} out of bound, it must be in [{MIN_YEAR}, {MAX_YEAR}]"
        );
        let len = month.length(is_leap_year(year));
        ensure!(
            (1..=len).contains(&day),
            DateRange,
            "day {day} outside {month} day-range [1, {len}]"
        );
        Ok(Date(
            year_offset(year) + month_offset(month.number(), is_leap_year(year)) + i32::from(day),
        ))
    }

    /// Create a date from year, month number (1–12) and day-of-month.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        Self::new(day, Month::try_from(month)?, year)
    }

    /// Wrap a serial number already known to be in range.
    pub(crate) const fn from_serial_unchecked(serial: i32) -> Self {
        Date(serial)
    }

    /// Today's date according to the system clock (UTC).
    pub fn today() -> Self {
        let days = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() / 86_400)
            .unwrap_or(0);
        let serial = UNIX_EPOCH_SERIAL.saturating_add(i32::try_from(days).unwrap_or(i32::MAX));
        Date(serial.min(Self::MAX.0))
    }

    /// The process-wide evaluation date, falling back to [`Date::today`]
    /// when none has been set.
    pub fn evaluation_date() -> Self {
        Settings::instance()
            .evaluation_date_serial()
            .map_or_else(Self::today, Date)
    }

    /// Set the process-wide evaluation date.
    pub fn set_evaluation_date(self) {
        Settings::instance().set_evaluation_date_serial(self.0);
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(self) -> i32 {
        self.0
    }

    /// Return `true` if this is the null date sentinel.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Return the weekday.
    pub fn weekday(self) -> Weekday {
        // serial 1 is a Monday
        Weekday::from_ordinal_wrapping(self.0)
    }

    /// Return the year.
    pub fn year(self) -> u16 {
        let mut y = (self.0 / 365) as u16 + 1900;
        if self.0 <= year_offset(y) {
            y -= 1;
        }
        y
    }

    /// Return the day of the year (January 1 = 1).
    pub fn day_of_year(self) -> u16 {
        (self.0 - year_offset(self.year())) as u16
    }

    /// Return the month.
    pub fn month(self) -> Month {
        self.month_number_in(self.year())
    }

    fn month_number_in(self, year: u16) -> Month {
        let doy = self.0 - year_offset(year);
        let leap = is_leap_year(year);
        let mut m = (doy / 30 + 1).min(12) as u8;
        while doy <= month_offset(m, leap) {
            m -= 1;
        }
        while m < 12 && doy > month_offset(m + 1, leap) {
            m += 1;
        }
        // `m` is in 1..=12 by construction.
        Month::try_from(m).unwrap_or(Month::December)
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(self) -> u8 {
        let y = self.year();
        let m = self.month_number_in(y);
        (self.0 - year_offset(y) - month_offset(m.number(), is_leap_year(y))) as u8
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        match self.0.checked_add(n) {
            Some(serial) => Self::from_serial(serial),
            None => fail!(DateRange, "{self} plus {n} days overflows"),
        }
    }

    /// The following day.
    pub fn succ(self) -> Result<Self> {
        self.add_days(1)
    }

    /// The preceding day.
    pub fn pred(self) -> Result<Self> {
        self.add_days(-1)
    }

    /// Advance by `n` units, ignoring any calendar.
    ///
    /// Month and year steps keep the day of the month, clamped to the length
    /// of the destination month: January 31 plus one month is the last day
    /// of February.
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => match n.checked_mul(7) {
                Some(days) => self.add_days(days),
                None => fail!(DateRange, "{self} plus {n} weeks overflows"),
            },
            TimeUnit::Months | TimeUnit::Years => {
                let months = if unit == TimeUnit::Years {
                    i64::from(n) * 12
                } else {
                    i64::from(n)
                };
                let y = self.year();
                let m = self.month_number_in(y);
                let d = self.day_of_month();
                let total = i64::from(y) * 12 + i64::from(m.number()) - 1 + months;
                let new_y = total.div_euclid(12);
                ensure!(
                    (i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&new_y),
                    DateRange,
                    "year {new_y} out of bound, it must be in [{MIN_YEAR}, {MAX_YEAR}]"
                );
                let new_y = new_y as u16;
                let new_m = Month::try_from((total.rem_euclid(12) + 1) as u8)?;
                let len = new_m.length(is_leap_year(new_y));
                Date::new(d.min(len), new_m, new_y)
            }
        }
    }

    /// Advance by a [`Period`].
    pub fn add_period(self, p: Period) -> Result<Self> {
        self.advance(p.length, p.unit)
    }

    /// Step back by a [`Period`].
    pub fn sub_period(self, p: Period) -> Result<Self> {
        match p.length.checked_neg() {
            Some(n) => self.advance(n, p.unit),
            None => fail!(DateRange, "cannot negate {p}"),
        }
    }

    /// Number of calendar days from `self` to `other`; positive if
    /// `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let y = self.year();
        let m = self.month_number_in(y);
        let leap = is_leap_year(y);
        Date(year_offset(y) + month_offset(m.number(), leap) + i32::from(m.length(leap)))
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// The first date on or after `self` falling on `weekday`.
    ///
    /// E.g. the Friday following Tuesday, January 15th 2002 is January 18th.
    pub fn next_weekday(self, weekday: Weekday) -> Result<Self> {
        let wd = i32::from(self.weekday().ordinal());
        let target = i32::from(weekday.ordinal());
        self.add_days((target - wd).rem_euclid(7))
    }

    /// The `n`-th occurrence of `weekday` in the given month.
    ///
    /// For example, the 4th Thursday of March 1998 was March 26th.
    ///
    /// # Errors
    /// `DateRange` if `n` is outside `[1, 5]` or the month has no such
    /// occurrence.
    pub fn nth_weekday(n: u8, weekday: Weekday, month: Month, year: u16) -> Result<Self> {
        ensure!(
            (1..=5).contains(&n),
            DateRange,
            "zeroth or more than fifth weekday in a month requested ({n})"
        );
        let first = Date::new(1, month, year)?;
        let skip = (i32::from(weekday.ordinal()) - i32::from(first.weekday().ordinal()))
            .rem_euclid(7) as u8;
        let day = 1 + skip + 7 * (n - 1);
        ensure!(
            day <= month.length(is_leap_year(year)),
            DateRange,
            "no {n}-th {weekday} in {month} {year}"
        );
        Date::new(day, month, year)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────
//
// The operators panic where the checked methods above would return an error.

/// # Panics
/// If the result leaves `[Date::MIN, Date::MAX]`.
impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

/// # Panics
/// If the result leaves `[Date::MIN, Date::MAX]`.
impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i32> for Date {
    fn sub_assign(&mut self, rhs: i32) {
        *self = *self - rhs;
    }
}

/// # Panics
/// If the result leaves `[Date::MIN, Date::MAX]`.
impl std::ops::Add<Period> for Date {
    type Output = Self;
    fn add(self, rhs: Period) -> Self {
        self.add_period(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

/// # Panics
/// If the result leaves `[Date::MIN, Date::MAX]`.
impl std::ops::Sub<Period> for Date {
    type Output = Self;
    fn sub(self, rhs: Period) -> Self {
        self.sub_period(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl TryFrom<i32> for Date {
    type Error = Error;

    /// Serial 0 maps to [`Date::NULL`]; anything else must be a valid date.
    fn try_from(serial: i32) -> Result<Self> {
        if serial == 0 {
            Ok(Date::NULL)
        } else {
            Date::from_serial(serial)
        }
    }
}

impl From<Date> for i32 {
    fn from(d: Date) -> i32 {
        d.0
    }
}

// ── Parsing and display ───────────────────────────────────────────────────────

/// Parses `yyyy-m-d`, with or without zero padding.
impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(3, '-');
        let mut field = |what: &str| -> Result<u32> {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(|| Error::DateRange(format!("cannot read {what} from \"{s}\"")))
        };
        let (y, m, d) = (field("year")?, field("month")?, field("day")?);
        match (u16::try_from(y), u8::try_from(m), u8::try_from(d)) {
            (Ok(y), Ok(m), Ok(d)) => Date::from_ymd(y, m, d),
            _ => fail!(DateRange, "\"{s}\" is not a valid date"),
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null date");
        }
        let y = self.year();
        write!(
            f,
            "{y}-{}-{}",
            self.month_number_in(y).number(),
            self.day_of_month()
        )
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Date(null)");
        }
        let y = self.year();
        let m = self.month_number_in(y).number();
        write!(f, "Date({y:04}-{m:02}-{:02})", self.day_of_month())
    }
}

// ── Offset tables ─────────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: u16, month: Month) -> u8 {
    month.length(is_leap_year(year))
}

const FIRST_TABLE_YEAR: u16 = 1899;
const LAST_TABLE_YEAR: u16 = 2200;
const TABLE_LEN: usize = (LAST_TABLE_YEAR - FIRST_TABLE_YEAR + 1) as usize;

/// Serial of December 31 of the previous year, for 1899..=2200.
static YEAR_OFFSET: [i32; TABLE_LEN] = build_year_offsets();

const fn build_year_offsets() -> [i32; TABLE_LEN] {
    let mut table = [0i32; TABLE_LEN];
    table[0] = -365;
    let mut i = 1;
    while i < TABLE_LEN {
        let prev = FIRST_TABLE_YEAR + i as u16 - 1;
        table[i] = table[i - 1] + if is_leap_year(prev) { 366 } else { 365 };
        i += 1;
    }
    table
}

const MONTH_OFFSET: [i32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const MONTH_LEAP_OFFSET: [i32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

// Serial of 1970-01-01.
const UNIX_EPOCH_SERIAL: i32 = 25_568;

fn year_offset(year: u16) -> i32 {
    let idx = usize::from(year.clamp(FIRST_TABLE_YEAR, LAST_TABLE_YEAR) - FIRST_TABLE_YEAR);
    YEAR_OFFSET[idx]
}

/// Days in the year before the first of month `m` (1..=13).
fn month_offset(m: u8, leap: bool) -> i32 {
    let idx = usize::from(m.clamp(1, 13) - 1);
    if leap {
        MONTH_LEAP_OFFSET[idx]
    } else {
        MONTH_OFFSET[idx]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
