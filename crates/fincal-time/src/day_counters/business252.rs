//! Business/252 day counter.
//!
//! Counts business days under a calendar (first date included, last
//! excluded) and divides by 252.  Whole months and whole years are summed
//! from a memo of per-calendar subtotals, so long intervals cost one pass
//! over the partial months at either end.
//!
//! The memo is keyed by calendar name and never invalidated on its own: it
//! assumes the calendar's holidays do not change after the first query.
//! Call [`BusinessDayCache::clear`] after adding or removing holidays.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fincal_core::{Real, Time};
use tracing::trace;

use crate::calendar::Calendar;
use crate::date::{is_leap_year, Date};
use crate::day_counter::DayCountConvention;

/// Memoized business-day totals per calendar month and calendar year.
#[derive(Debug, Default)]
pub struct BusinessDayCache {
    monthly: HashMap<(&'static str, u16, u8), i64>,
    yearly: HashMap<(&'static str, u16), i64>,
}

impl BusinessDayCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every memoized total.
    pub fn clear(&mut self) {
        self.monthly.clear();
        self.yearly.clear();
    }

    /// Number of memoized month totals.
    pub fn len(&self) -> usize {
        self.monthly.len()
    }

    /// Whether nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty() && self.yearly.is_empty()
    }

    /// Business days in the month starting at `first`.
    fn month_total(&mut self, calendar: &Calendar, first: Date) -> i64 {
        let key = (calendar.name(), first.year(), first.month().number());
        *self.monthly.entry(key).or_insert_with(|| {
            let total = i64::from(calendar.bizdays_between(first, first.end_of_month(), true, true));
            trace!(calendar = key.0, year = key.1, month = key.2, total, "month total cached");
            total
        })
    }

    /// Business days in the year starting at `jan1`.
    fn year_total(&mut self, calendar: &Calendar, jan1: Date) -> i64 {
        let key = (calendar.name(), jan1.year());
        if let Some(&total) = self.yearly.get(&key) {
            return total;
        }
        let mut total = 0;
        let mut first = jan1;
        for _ in 0..12 {
            total += self.month_total(calendar, first);
            first = next_month_start(first);
        }
        trace!(calendar = key.0, year = key.1, total, "year total cached");
        self.yearly.insert(key, total);
        total
    }
}

fn same_month(d1: Date, d2: Date) -> bool {
    d1.year() == d2.year() && d1.month() == d2.month()
}

// Only called on dates with a later date in a following month, so the result
// never leaves the supported range.
fn next_month_start(d: Date) -> Date {
    Date::from_serial_unchecked(d.end_of_month().serial() + 1)
}

fn next_year_start(jan1: Date) -> Date {
    let days = if is_leap_year(jan1.year()) { 366 } else { 365 };
    Date::from_serial_unchecked(jan1.serial() + days)
}

/// Business/252 day counter.
#[derive(Clone)]
pub struct Business252 {
    calendar: Calendar,
    name: String,
    cache: Arc<Mutex<BusinessDayCache>>,
}

impl Business252 {
    /// A Business/252 counter over `calendar` with its own empty cache.
    pub fn new(calendar: Calendar) -> Self {
        Self::with_cache(calendar, Arc::default())
    }

    /// A Business/252 counter sharing an existing cache.
    pub fn with_cache(calendar: Calendar, cache: Arc<Mutex<BusinessDayCache>>) -> Self {
        let name = format!("Business/252({})", calendar.name());
        Self {
            calendar,
            name,
            cache,
        }
    }

    /// The calendar business days are counted on.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The shared memo.
    pub fn cache(&self) -> Arc<Mutex<BusinessDayCache>> {
        Arc::clone(&self.cache)
    }

    fn lock(&self) -> MutexGuard<'_, BusinessDayCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn between(&self, d1: Date, d2: Date) -> i64 {
        i64::from(self.calendar.bizdays_between(d1, d2, true, false))
    }
}

impl DayCountConvention for Business252 {
    fn name(&self) -> &str {
        &self.name
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        // the memo holds first-included, last-excluded figures, so reversed
        // intervals are counted directly
        if same_month(d1, d2) || d1 >= d2 {
            return self.between(d1, d2);
        }
        let mut cache = self.lock();
        let mut d = next_month_start(d1);
        let mut total = self.between(d1, d);
        if d1.year() != d2.year() {
            while d.year() == d1.year() {
                total += cache.month_total(&self.calendar, d);
                d = next_month_start(d);
            }
            while d.year() != d2.year() {
                total += cache.year_total(&self.calendar, d);
                d = next_year_start(d);
            }
        }
        while !same_month(d, d2) {
            total += cache.month_total(&self.calendar, d);
            d = next_month_start(d);
        }
        total + self.between(d, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 252.0
    }
}

impl fmt::Debug for Business252 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Business252")
            .field("calendar", &self.calendar.name())
            .finish()
    }
}
