//! `Calendar` handle and the holiday-oracle trait behind it.
//!
//! A [`HolidayOracle`] knows, for one market, which dates are business days.
//! Oracles are stateless `'static` values shared by every [`Calendar`] that
//! refers to the same market.  A `Calendar` layers per-handle added/removed
//! holidays on top of its oracle and builds adjustment, advancement and
//! business-day counting solely on [`Calendar::is_business_day`].

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fincal_core::errors::Result;
use fincal_core::fail;
use tracing::debug;

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;

/// Business-day rules for a single market.
pub trait HolidayOracle: fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"New York stock exchange"`).
    fn name(&self) -> &'static str;

    /// Whether `weekday` is part of this market's weekend.
    fn is_weekend(&self, weekday: Weekday) -> bool {
        weekday.is_weekend()
    }

    /// Whether `date` is a business day, ignoring any per-calendar overrides.
    fn is_business_day(&self, date: Date) -> bool;
}

/// Every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl HolidayOracle for NullCalendar {
    fn name(&self) -> &'static str {
        "Null"
    }

    fn is_weekend(&self, _weekday: Weekday) -> bool {
        false
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Only Saturdays and Sundays are holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl HolidayOracle for WeekendsOnly {
    fn name(&self) -> &'static str {
        "weekends only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date.weekday())
    }
}

pub(crate) static NULL_CALENDAR: NullCalendar = NullCalendar;
pub(crate) static WEEKENDS_ONLY: WeekendsOnly = WeekendsOnly;

/// Day of the year of Western Easter Monday.
pub fn western_easter_monday(year: u16) -> u16 {
    // Anonymous Gregorian algorithm for Easter Sunday.
    let y = i32::from(year);
    let a = y % 19;
    let b = y / 100;
    let c = y % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    // March has 31 days; January and February 59 (60 in leap years).
    let before_march = if crate::date::is_leap_year(year) { 60 } else { 59 };
    let easter_sunday = before_march + if month == 3 { day } else { 31 + day };
    (easter_sunday + 1) as u16
}

#[derive(Debug, Default)]
struct HolidayOverrides {
    added: BTreeSet<Date>,
    removed: BTreeSet<Date>,
}

/// A market calendar.
///
/// `Calendar` is a cheap handle: clones share the same oracle *and* the same
/// added/removed-holiday sets, so a holiday added through one clone is seen
/// by all of them.  Two calendars built separately for the same market do not
/// share overrides but still compare equal, since equality is by name.
///
/// `Calendar::default()` is the empty calendar.  It compares equal only to
/// another empty calendar and otherwise behaves like [`NullCalendar`].
#[derive(Clone, Default)]
pub struct Calendar {
    oracle: Option<&'static dyn HolidayOracle>,
    overrides: Arc<RwLock<HolidayOverrides>>,
}

impl Calendar {
    /// A calendar over the given market oracle, with no overrides.
    pub fn new(oracle: &'static dyn HolidayOracle) -> Self {
        Self {
            oracle: Some(oracle),
            overrides: Arc::default(),
        }
    }

    /// Every day is a business day.
    pub fn null() -> Self {
        Self::new(&NULL_CALENDAR)
    }

    /// Saturdays and Sundays are holidays, nothing else.
    pub fn weekends_only() -> Self {
        Self::new(&WEEKENDS_ONLY)
    }

    /// Look up a calendar by market identifier (e.g. `"US-NYSE"`); see
    /// [`crate::calendars::MARKET_IDS`].
    ///
    /// # Errors
    /// `CalendarConfig` for an unknown identifier.
    pub fn from_market_id(id: &str) -> Result<Self> {
        match crate::calendars::oracle_for(id) {
            Some(oracle) => Ok(Self::new(oracle)),
            None => fail!(CalendarConfig, "unknown market ({id})"),
        }
    }

    /// Whether this is the empty calendar.
    pub fn is_empty(&self) -> bool {
        self.oracle.is_none()
    }

    /// The market name; empty for the empty calendar.
    pub fn name(&self) -> &'static str {
        self.oracle.map_or("", |o| o.name())
    }

    fn oracle(&self) -> &'static dyn HolidayOracle {
        self.oracle.unwrap_or(&NULL_CALENDAR)
    }

    fn read(&self) -> RwLockReadGuard<'_, HolidayOverrides> {
        self.overrides.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HolidayOverrides> {
        self.overrides.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Business-day status ──────────────────────────────────────────────────

    /// Whether `date` is a business day.
    ///
    /// An added holiday always wins, then a removed holiday (even on a
    /// weekend), then the market rules.
    pub fn is_business_day(&self, date: Date) -> bool {
        {
            let overrides = self.read();
            if overrides.added.contains(&date) {
                return false;
            }
            if overrides.removed.contains(&date) {
                return true;
            }
        }
        self.oracle().is_business_day(date)
    }

    /// Whether `date` is not a business day.
    pub fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Whether `weekday` belongs to the market's weekend.
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        self.oracle().is_weekend(weekday)
    }

    /// Whether `date` is the last business day of its month, i.e. no
    /// business day follows it within the month.
    pub fn is_end_of_month(&self, date: Date) -> bool {
        let last = date.end_of_month().serial();
        !(date.serial() + 1..=last)
            .map(Date::from_serial_unchecked)
            .any(|d| self.is_business_day(d))
    }

    /// The last business day of the month containing `date`.
    pub fn end_of_month(&self, date: Date) -> Result<Date> {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    // ── Overrides ────────────────────────────────────────────────────────────

    /// Make `date` a holiday for this calendar and all its clones.
    pub fn add_holiday(&self, date: Date) {
        let is_business = self.oracle().is_business_day(date);
        let mut overrides = self.write();
        // a genuine holiday that was removed is simply restored
        overrides.removed.remove(&date);
        if is_business {
            overrides.added.insert(date);
        }
        debug!(calendar = self.name(), %date, "holiday added");
    }

    /// Make `date` a business day for this calendar and all its clones.
    pub fn remove_holiday(&self, date: Date) {
        let is_business = self.oracle().is_business_day(date);
        let mut overrides = self.write();
        overrides.added.remove(&date);
        if !is_business {
            overrides.removed.insert(date);
        }
        debug!(calendar = self.name(), %date, "holiday removed");
    }

    /// Snapshot of the holidays added to this calendar.
    pub fn added_holidays(&self) -> BTreeSet<Date> {
        self.read().added.clone()
    }

    /// Snapshot of the holidays removed from this calendar.
    pub fn removed_holidays(&self) -> BTreeSet<Date> {
        self.read().removed.clone()
    }

    /// Holidays in `[from, to]`, optionally including weekend days.
    pub fn holiday_list(&self, from: Date, to: Date, include_weekends: bool) -> Vec<Date> {
        (from.serial()..=to.serial())
            .map(Date::from_serial_unchecked)
            .filter(|&d| {
                self.is_holiday(d) && (include_weekends || !self.is_weekend(d.weekday()))
            })
            .collect()
    }

    /// Business days in `[from, to]`.
    pub fn business_day_list(&self, from: Date, to: Date) -> Vec<Date> {
        (from.serial()..=to.serial())
            .map(Date::from_serial_unchecked)
            .filter(|&d| self.is_business_day(d))
            .collect()
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    fn roll(&self, mut date: Date, step: i32) -> Result<Date> {
        while self.is_holiday(date) {
            date = date.add_days(step)?;
        }
        Ok(date)
    }

    /// Move `date` onto a business day according to `convention`.
    ///
    /// # Errors
    /// `DateRange` if the roll runs off the supported date range.
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        use BusinessDayConvention::*;
        if convention == Unadjusted || self.is_business_day(date) {
            return Ok(date);
        }
        match convention {
            Following | ModifiedFollowing | HalfMonthModifiedFollowing => {
                let next = self.roll(date, 1)?;
                let crosses_month = next.month() != date.month();
                let crosses_mid_month = convention == HalfMonthModifiedFollowing
                    && date.day_of_month() <= 15
                    && next.day_of_month() > 15;
                if convention != Following && (crosses_month || crosses_mid_month) {
                    self.roll(date, -1)
                } else {
                    Ok(next)
                }
            }
            Preceding | ModifiedPreceding => {
                let prev = self.roll(date, -1)?;
                if convention == ModifiedPreceding && prev.month() != date.month() {
                    self.roll(date, 1)
                } else {
                    Ok(prev)
                }
            }
            Nearest => {
                let (mut up, mut down) = (date, date);
                while self.is_holiday(up) && self.is_holiday(down) {
                    up = up.succ()?;
                    down = down.pred()?;
                }
                Ok(if self.is_business_day(up) { up } else { down })
            }
            Unadjusted => Ok(date),
        }
    }

    /// Move `date` by `n` units.
    ///
    /// Days and weeks count business days (`n` or `7n` of them); months and
    /// years move the date on the calendar-naive grid and then adjust it.
    /// With `end_of_month`, a start date at the end of its month lands at the
    /// end of the target month: the calendar month-end for adjusting
    /// conventions, the raw month-end for `Unadjusted`.
    pub fn advance(
        &self,
        date: Date,
        n: i32,
        unit: TimeUnit,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        if n == 0 {
            return self.adjust(date, convention);
        }
        match unit {
            TimeUnit::Days | TimeUnit::Weeks => {
                let count = if unit == TimeUnit::Weeks {
                    i64::from(n) * 7
                } else {
                    i64::from(n)
                };
                let step = if count > 0 { 1 } else { -1 };
                let mut d = date;
                for _ in 0..count.unsigned_abs() {
                    d = d.add_days(step)?;
                    d = self.roll(d, step)?;
                }
                Ok(d)
            }
            TimeUnit::Months | TimeUnit::Years => {
                let target = date.advance(n, unit)?;
                if end_of_month {
                    if convention == BusinessDayConvention::Unadjusted {
                        if date.is_end_of_month() {
                            return Ok(target.end_of_month());
                        }
                    } else if self.is_end_of_month(date) {
                        return self.end_of_month(target);
                    }
                }
                self.adjust(target, convention)
            }
        }
    }

    /// [`advance`](Self::advance) by a [`Period`].
    pub fn advance_by(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        self.advance(date, period.length, period.unit, convention, end_of_month)
    }

    /// Number of business days between `from` and `to`.
    ///
    /// The endpoints count only if they are business days and the matching
    /// `include_*` flag is set.  The result is negative when `from > to`.
    pub fn bizdays_between(
        &self,
        from: Date,
        to: Date,
        include_first: bool,
        include_last: bool,
    ) -> i32 {
        if from == to {
            return i32::from(include_first && include_last && self.is_business_day(from));
        }
        let (lo, hi) = if from < to { (from, to) } else { (to, from) };
        let mut count = (lo.serial()..=hi.serial())
            .map(Date::from_serial_unchecked)
            .filter(|&d| self.is_business_day(d))
            .count() as i32;
        if !include_first && self.is_business_day(from) {
            count -= 1;
        }
        if !include_last && self.is_business_day(to) {
            count -= 1;
        }
        if from > to {
            -count
        } else {
            count
        }
    }
}

/// Equal when both are empty or both name the same market; holiday
/// overrides are not compared.
impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        match (self.oracle, other.oracle) {
            (None, None) => true,
            (Some(a), Some(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl Eq for Calendar {}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overrides = self.read();
        f.debug_struct("Calendar")
            .field("name", &self.name())
            .field("added", &overrides.added.len())
            .field("removed", &overrides.removed.len())
            .finish()
    }
}
