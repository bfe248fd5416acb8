//! `Schedule`: a sequence of dates.
//!
//! A `Schedule` holds the payment/accrual dates of an instrument, either
//! given explicitly or generated from an effective date, a termination date,
//! a tenor, a calendar and business-day conventions under a
//! [`DateGeneration`] rule.  Each interval between consecutive dates carries a
//! regular/irregular (stub) flag.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use fincal_core::errors::{Error, Result};
use fincal_core::{ensure, fail};
use tracing::debug;

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::frequency::Frequency;
use crate::imm::IMM;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;

use BusinessDayConvention::Unadjusted;

/// Date generation rule for schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateGeneration {
    /// Dates generated backward from the termination date.
    Backward,
    /// Dates generated forward from the effective date.
    Forward,
    /// No intermediate dates.
    Zero,
    /// Forward, with every date but the first and last moved to the third
    /// Wednesday of its month.
    ThirdWednesday,
    /// As `ThirdWednesday`, but the first and last dates move too.
    ThirdWednesdayInclusive,
    /// Forward, with the dates after the effective date on the 20th of the
    /// month.
    Twentieth,
    /// As `Twentieth`, on March, June, September and December only.
    TwentiethIMM,
    /// Credit default swaps before the 2009 Big Bang: as `TwentiethIMM`,
    /// with a first stub of at least 30 days and an unadjusted effective date.
    OldCDS,
    /// Credit default swaps after 2009: starts at the twentieth preceding the
    /// effective date; the termination date is not adjusted.
    CDS,
    /// As `CDS`, under the 2015 roll conventions.
    CDS2015,
}

impl DateGeneration {
    const ALL: [DateGeneration; 10] = [
        DateGeneration::Backward,
        DateGeneration::Forward,
        DateGeneration::Zero,
        DateGeneration::ThirdWednesday,
        DateGeneration::ThirdWednesdayInclusive,
        DateGeneration::Twentieth,
        DateGeneration::TwentiethIMM,
        DateGeneration::OldCDS,
        DateGeneration::CDS,
        DateGeneration::CDS2015,
    ];

    fn name(self) -> &'static str {
        match self {
            DateGeneration::Backward => "Backward",
            DateGeneration::Forward => "Forward",
            DateGeneration::Zero => "Zero",
            DateGeneration::ThirdWednesday => "ThirdWednesday",
            DateGeneration::ThirdWednesdayInclusive => "ThirdWednesdayInclusive",
            DateGeneration::Twentieth => "Twentieth",
            DateGeneration::TwentiethIMM => "TwentiethIMM",
            DateGeneration::OldCDS => "OldCDS",
            DateGeneration::CDS => "CDS",
            DateGeneration::CDS2015 => "CDS2015",
        }
    }

    /// Rules rolling on the 20th of the month.
    fn is_twentieth(self) -> bool {
        matches!(
            self,
            DateGeneration::Twentieth
                | DateGeneration::TwentiethIMM
                | DateGeneration::OldCDS
                | DateGeneration::CDS
                | DateGeneration::CDS2015
        )
    }

    /// Twentieth rules restricted to IMM months.
    fn is_imm_twentieth(self) -> bool {
        self.is_twentieth() && self != DateGeneration::Twentieth
    }

    fn is_cds(self) -> bool {
        matches!(self, DateGeneration::CDS | DateGeneration::CDS2015)
    }

    fn is_third_wednesday(self) -> bool {
        matches!(
            self,
            DateGeneration::ThirdWednesday | DateGeneration::ThirdWednesdayInclusive
        )
    }
}

impl fmt::Display for DateGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the printed rule name, case-insensitively.
impl FromStr for DateGeneration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::ScheduleConfig(format!("unknown date generation rule ({s})")))
    }
}

// ── Date helpers ──────────────────────────────────────────────────────────────

fn twentieth_of(d: Date) -> Result<Date> {
    Date::new(20, d.month(), d.year())
}

/// Months to move `d` onto the nearest IMM month, forward or backward.
fn imm_month_shift(d: Date, forward: bool) -> i32 {
    let m = i32::from(d.month().number()) % 3;
    match (m, forward) {
        (0, _) => 0,
        (m, true) => 3 - m,
        (m, false) => -m,
    }
}

fn next_twentieth(d: Date, rule: DateGeneration) -> Result<Date> {
    let mut result = twentieth_of(d)?;
    if result < d {
        result = result.advance(1, TimeUnit::Months)?;
    }
    if rule.is_imm_twentieth() {
        result = result.advance(imm_month_shift(result, true), TimeUnit::Months)?;
    }
    Ok(result)
}

fn previous_twentieth(d: Date, rule: DateGeneration) -> Result<Date> {
    let mut result = twentieth_of(d)?;
    if result > d {
        result = result.advance(-1, TimeUnit::Months)?;
    }
    if rule.is_imm_twentieth() {
        result = result.advance(imm_month_shift(result, false), TimeUnit::Months)?;
    }
    Ok(result)
}

fn third_wednesday(d: Date) -> Result<Date> {
    Date::nth_weekday(3, Weekday::Wednesday, d.month(), d.year())
}

/// Whether the end-of-month convention is meaningful for `tenor`.
fn allows_end_of_month(tenor: Period) -> bool {
    matches!(tenor.unit, TimeUnit::Months | TimeUnit::Years) && tenor.length >= 1
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// An ordered sequence of coupon/payment dates.
///
/// A schedule always holds at least two strictly increasing dates.  The
/// regular flags, when present, have one entry per interval.
#[derive(Debug, Clone)]
pub struct Schedule {
    tenor: Option<Period>,
    calendar: Calendar,
    convention: BusinessDayConvention,
    termination_convention: Option<BusinessDayConvention>,
    rule: Option<DateGeneration>,
    end_of_month: Option<bool>,
    first_date: Option<Date>,
    next_to_last_date: Option<Date>,
    dates: Vec<Date>,
    is_regular: Vec<bool>,
}

/// Optional information attached to an explicit date list.
#[derive(Debug, Clone, Default)]
pub struct ScheduleMeta {
    /// Calendar the dates were adjusted on; empty means the null calendar.
    pub calendar: Calendar,
    /// Convention for intermediate dates; `None` means `Unadjusted`.
    pub convention: Option<BusinessDayConvention>,
    /// Convention for the termination date.
    pub termination_convention: Option<BusinessDayConvention>,
    /// Tenor between regular dates.
    pub tenor: Option<Period>,
    /// Rule the dates follow.
    pub rule: Option<DateGeneration>,
    /// End-of-month flag; cleared when `tenor` does not allow it.
    pub end_of_month: Option<bool>,
    /// One flag per interval, or empty.
    pub is_regular: Vec<bool>,
}

impl Schedule {
    /// Build a schedule from an explicit list of dates.
    ///
    /// # Errors
    /// `DegenerateSchedule` for fewer than two dates, `ScheduleConfig` if the
    /// dates are not strictly increasing.
    pub fn from_dates(dates: Vec<Date>) -> Result<Self> {
        Self::from_dates_with_meta(dates, ScheduleMeta::default())
    }

    /// Build a schedule from an explicit list of dates plus meta information.
    ///
    /// # Errors
    /// As [`from_dates`](Self::from_dates); also `ScheduleConfig` if
    /// `meta.is_regular` is neither empty nor one entry per interval.
    pub fn from_dates_with_meta(dates: Vec<Date>, meta: ScheduleMeta) -> Result<Self> {
        ensure!(
            dates.len() >= 2,
            DegenerateSchedule,
            "a schedule needs at least two dates ({} given)",
            dates.len()
        );
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            fail!(ScheduleConfig, "dates not strictly increasing ({} followed by {})", w[0], w[1]);
        }
        ensure!(
            meta.is_regular.is_empty() || meta.is_regular.len() == dates.len() - 1,
            ScheduleConfig,
            "is_regular size ({}) must be zero or equal to the number of dates - 1 ({})",
            meta.is_regular.len(),
            dates.len() - 1
        );
        let end_of_month = match meta.tenor {
            Some(tenor) if !allows_end_of_month(tenor) => Some(false),
            _ => meta.end_of_month,
        };
        let calendar = if meta.calendar.is_empty() {
            Calendar::null()
        } else {
            meta.calendar
        };
        Ok(Self {
            tenor: meta.tenor,
            calendar,
            convention: meta.convention.unwrap_or(Unadjusted),
            termination_convention: meta.termination_convention,
            rule: meta.rule,
            end_of_month,
            first_date: None,
            next_to_last_date: None,
            dates,
            is_regular: meta.is_regular,
        })
    }

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// The `i`-th date, if any.
    pub fn date(&self, i: usize) -> Option<Date> {
        self.dates.get(i).copied()
    }

    /// All dates in the schedule.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Iterate over the dates.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Date>> {
        self.dates.iter().copied()
    }

    /// The first date.
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// The last date.
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Index of the first date not before `d`.
    pub fn lower_bound(&self, d: Date) -> usize {
        self.dates.partition_point(|&x| x < d)
    }

    /// The first date on or after `d`.
    pub fn next_date(&self, d: Date) -> Option<Date> {
        self.date(self.lower_bound(d))
    }

    /// The last date strictly before `d`.
    pub fn previous_date(&self, d: Date) -> Option<Date> {
        self.lower_bound(d).checked_sub(1).and_then(|i| self.date(i))
    }

    /// Whether regular flags are available.
    pub fn has_is_regular(&self) -> bool {
        !self.is_regular.is_empty()
    }

    /// Whether the `i`-th interval (1-based, ending at date `i`) is regular.
    ///
    /// # Errors
    /// `ScheduleConfig` if flags are unavailable or `i` is outside
    /// `[1, size - 1]`.
    pub fn is_regular(&self, i: usize) -> Result<bool> {
        let flags = self.is_regular_flags()?;
        ensure!(
            (1..=flags.len()).contains(&i),
            ScheduleConfig,
            "index ({i}) must be in [1, {}]",
            flags.len()
        );
        Ok(flags[i - 1])
    }

    /// One regular flag per interval.
    pub fn is_regular_flags(&self) -> Result<&[bool]> {
        ensure!(
            self.has_is_regular(),
            ScheduleConfig,
            "full interface (is_regular) not available"
        );
        Ok(&self.is_regular)
    }

    /// The calendar the dates were adjusted on.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Convention for intermediate dates.
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Whether a tenor is recorded.
    pub fn has_tenor(&self) -> bool {
        self.tenor.is_some()
    }

    /// The tenor.
    pub fn tenor(&self) -> Result<Period> {
        match self.tenor {
            Some(t) => Ok(t),
            None => fail!(ScheduleConfig, "full interface (tenor) not available"),
        }
    }

    /// Whether a termination-date convention is recorded.
    pub fn has_termination_convention(&self) -> bool {
        self.termination_convention.is_some()
    }

    /// Convention for the termination date.
    pub fn termination_convention(&self) -> Result<BusinessDayConvention> {
        match self.termination_convention {
            Some(c) => Ok(c),
            None => fail!(ScheduleConfig, "full interface (termination date bdc) not available"),
        }
    }

    /// Whether a generation rule is recorded.
    pub fn has_rule(&self) -> bool {
        self.rule.is_some()
    }

    /// The generation rule.
    pub fn rule(&self) -> Result<DateGeneration> {
        match self.rule {
            Some(r) => Ok(r),
            None => fail!(ScheduleConfig, "full interface (rule) not available"),
        }
    }

    /// Whether an end-of-month flag is recorded.
    pub fn has_end_of_month(&self) -> bool {
        self.end_of_month.is_some()
    }

    /// The end-of-month flag.
    pub fn end_of_month(&self) -> Result<bool> {
        match self.end_of_month {
            Some(f) => Ok(f),
            None => fail!(ScheduleConfig, "full interface (end of month) not available"),
        }
    }

    /// Explicit first (stub) date used in generation.
    pub fn first_date(&self) -> Option<Date> {
        self.first_date
    }

    /// Explicit next-to-last (stub) date used in generation.
    pub fn next_to_last_date(&self) -> Option<Date> {
        self.next_to_last_date
    }

    /// The part of the schedule on or after `truncation_date`, which becomes
    /// an irregular first date if it is not already a schedule date.
    ///
    /// # Errors
    /// `ScheduleConfig` unless `truncation_date` is before the last date.
    pub fn after(&self, truncation_date: Date) -> Result<Schedule> {
        ensure!(
            truncation_date < self.end_date(),
            ScheduleConfig,
            "truncation date {truncation_date} must be before the last schedule date {}",
            self.end_date()
        );
        let mut result = self.clone();
        let keep_from = result.lower_bound(truncation_date);
        result.dates.drain(..keep_from);
        if result.has_is_regular() {
            result.is_regular.drain(..keep_from);
        }
        if result.dates[0] != truncation_date {
            result.dates.insert(0, truncation_date);
            if self.has_is_regular() {
                result.is_regular.insert(0, false);
            }
        }
        if result.first_date.is_some_and(|d| d <= truncation_date) {
            result.first_date = None;
        }
        if result.next_to_last_date.is_some_and(|d| d <= truncation_date) {
            result.next_to_last_date = None;
        }
        Ok(result)
    }

    /// The part of the schedule on or before `truncation_date`, which becomes
    /// an irregular, unadjusted last date if it is not already a schedule
    /// date.
    ///
    /// # Errors
    /// `ScheduleConfig` unless `truncation_date` is after the first date.
    pub fn until(&self, truncation_date: Date) -> Result<Schedule> {
        ensure!(
            truncation_date > self.start_date(),
            ScheduleConfig,
            "truncation date {truncation_date} must be later than schedule first date {}",
            self.start_date()
        );
        let mut result = self.clone();
        let keep = result.dates.partition_point(|&x| x <= truncation_date);
        let dropped = result.dates.len() - keep;
        result.dates.truncate(keep);
        if result.has_is_regular() {
            result.is_regular.truncate(keep - 1);
        }
        if result.end_date() != truncation_date {
            result.dates.push(truncation_date);
            if self.has_is_regular() {
                result.is_regular.push(false);
            }
            result.termination_convention = Some(Unadjusted);
        } else if dropped > 0 {
            result.termination_convention = Some(result.convention);
        }
        if result.next_to_last_date.is_some_and(|d| d >= truncation_date) {
            result.next_to_last_date = None;
        }
        if result.first_date.is_some_and(|d| d >= truncation_date) {
            result.first_date = None;
        }
        Ok(result)
    }
}

impl Index<usize> for Schedule {
    type Output = Date;

    fn index(&self, i: usize) -> &Date {
        &self.dates[i]
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = Date;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Date>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Inputs and working state of rule-based generation.
struct Generator {
    effective: Date,
    termination: Date,
    tenor: Period,
    calendar: Calendar,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
    first: Option<Date>,
    next_to_last: Option<Date>,
    null: Calendar,
    dates: Vec<Date>,
    is_regular: Vec<bool>,
}

impl Generator {
    #[allow(clippy::too_many_arguments)]
    fn new(
        effective: Option<Date>,
        termination: Date,
        tenor: Period,
        calendar: Calendar,
        convention: BusinessDayConvention,
        termination_convention: BusinessDayConvention,
        rule: DateGeneration,
        end_of_month: bool,
        first: Option<Date>,
        next_to_last: Option<Date>,
    ) -> Result<Self> {
        let next_to_last = next_to_last.filter(|&d| d != termination);
        let effective = match effective {
            Some(d) => d,
            None if first.is_none() && rule == DateGeneration::Backward => {
                placeholder_effective_date(termination, next_to_last)?
            }
            None => fail!(ScheduleConfig, "null effective date"),
        };
        let first = first.filter(|&d| d != effective);
        ensure!(
            effective < termination,
            ScheduleConfig,
            "effective date ({effective}) later than or equal to termination date ({termination})"
        );
        let rule = if tenor.length == 0 {
            DateGeneration::Zero
        } else {
            ensure!(
                tenor.length > 0,
                ScheduleConfig,
                "non positive tenor ({tenor}) not allowed"
            );
            rule
        };
        let end_of_month = end_of_month && allows_end_of_month(tenor);
        let tenor = if rule == DateGeneration::Zero {
            Period::new(0, TimeUnit::Years)
        } else {
            tenor
        };

        if let Some(first) = first {
            match rule {
                DateGeneration::Backward | DateGeneration::Forward => ensure!(
                    first > effective && first <= termination,
                    ScheduleConfig,
                    "first date ({first}) out of effective-termination date range \
                     ({effective}, {termination}]"
                ),
                r if r.is_third_wednesday() => ensure!(
                    IMM::is_imm_date(first, false),
                    ScheduleConfig,
                    "first date ({first}) is not an IMM date"
                ),
                r => fail!(ScheduleConfig, "first date incompatible with {r} date generation rule"),
            }
        }
        if let Some(ntl) = next_to_last {
            match rule {
                DateGeneration::Backward | DateGeneration::Forward => ensure!(
                    ntl >= effective && ntl < termination,
                    ScheduleConfig,
                    "next to last date ({ntl}) out of effective-termination date range \
                     [{effective}, {termination})"
                ),
                r if r.is_third_wednesday() => ensure!(
                    IMM::is_imm_date(ntl, false),
                    ScheduleConfig,
                    "next-to-last date ({ntl}) is not an IMM date"
                ),
                r => fail!(
                    ScheduleConfig,
                    "next to last date incompatible with {r} date generation rule"
                ),
            }
        }
        if end_of_month && (rule.is_twentieth() || rule.is_third_wednesday()) {
            fail!(
                ScheduleConfig,
                "end_of_month convention incompatible with {rule} date generation rule"
            );
        }

        Ok(Self {
            effective,
            termination,
            tenor,
            calendar,
            convention,
            termination_convention,
            rule,
            end_of_month,
            first,
            next_to_last,
            null: Calendar::null(),
            dates: Vec::new(),
            is_regular: Vec::new(),
        })
    }

    fn adjusted(&self, d: Date) -> Result<Date> {
        self.calendar.adjust(d, self.convention)
    }

    /// `seed` moved by `periods` tenors on the null calendar; `None` once the
    /// step leaves the supported date range.
    fn step(&self, seed: Date, periods: i32) -> Result<Option<Date>> {
        let Some(n) = periods.checked_mul(self.tenor.length) else {
            fail!(InvalidPeriod, "{periods} times {} overflows", self.tenor);
        };
        match self
            .null
            .advance(seed, n, self.tenor.unit, self.convention, self.end_of_month)
        {
            Ok(d) => Ok(Some(d)),
            Err(Error::DateRange(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn front(&self) -> Date {
        self.dates[0]
    }

    fn back(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    fn push_front(&mut self, d: Date, regular: bool) {
        self.dates.insert(0, d);
        self.is_regular.insert(0, regular);
    }

    fn push_back(&mut self, d: Date, regular: bool) {
        self.dates.push(d);
        self.is_regular.push(regular);
    }

    /// Generate raw dates backward from the termination date; returns the
    /// seed of the regular roll.
    fn backward(&mut self) -> Result<Date> {
        self.dates.push(self.termination);
        let mut seed = self.termination;
        if let Some(ntl) = self.next_to_last {
            let regular = self.step(seed, -1)? == Some(ntl);
            self.push_front(ntl, regular);
            seed = ntl;
        }
        let exit = self.first.unwrap_or(self.effective);
        let mut periods = 1;
        loop {
            match self.step(seed, -periods)? {
                Some(temp) if temp >= exit => {
                    // skip dates that would be duplicates after adjustment
                    if self.adjusted(self.front())? != self.adjusted(temp)? {
                        self.push_front(temp, true);
                    }
                    periods += 1;
                }
                _ => {
                    if let Some(first) = self.first {
                        if self.adjusted(self.front())? != self.adjusted(first)? {
                            self.push_front(first, false);
                        }
                    }
                    break;
                }
            }
        }
        if self.adjusted(self.front())? != self.adjusted(self.effective)? {
            self.push_front(self.effective, false);
        }
        Ok(seed)
    }

    /// Generate raw dates forward from the effective date (or, for the CDS
    /// rules, from the preceding twentieth); returns the seed of the regular
    /// roll.
    fn forward(&mut self) -> Result<Date> {
        let rule = self.rule;
        if rule.is_cds() {
            let prev = previous_twentieth(self.effective, rule)?;
            if self.adjusted(prev)? > self.effective {
                self.dates.push(prev.advance(-3, TimeUnit::Months)?);
                self.is_regular.push(true);
            }
            self.dates.push(prev);
        } else {
            self.dates.push(self.effective);
        }
        let mut seed = self.back();

        if let Some(first) = self.first {
            let regular = self.step(seed, 1)? == Some(first);
            self.push_back(first, regular);
            seed = first;
        } else if rule.is_twentieth() {
            let mut next = next_twentieth(self.effective, rule)?;
            if rule == DateGeneration::OldCDS && next - self.effective < 30 {
                // the first stub must be at least 30 calendar days
                next = next_twentieth(next.succ()?, rule)?;
            }
            if next != self.effective {
                self.push_back(next, rule.is_cds());
                seed = next;
            }
        }

        let exit = self.next_to_last.unwrap_or(self.termination);
        let mut periods = 1;
        loop {
            match self.step(seed, periods)? {
                Some(temp) if temp <= exit => {
                    if self.adjusted(self.back())? != self.adjusted(temp)? {
                        self.push_back(temp, true);
                    }
                    periods += 1;
                }
                _ => {
                    if let Some(ntl) = self.next_to_last {
                        if self.adjusted(self.back())? != self.adjusted(ntl)? {
                            self.push_back(ntl, false);
                        }
                    }
                    break;
                }
            }
        }

        let tconv = self.termination_convention;
        if self.calendar.adjust(self.back(), tconv)?
            != self.calendar.adjust(self.termination, tconv)?
        {
            if rule.is_twentieth() {
                self.push_back(next_twentieth(self.termination, rule)?, true);
            } else {
                self.push_back(self.termination, false);
            }
        }
        Ok(seed)
    }

    /// Snap or adjust the raw dates.
    fn finish_dates(&mut self, seed: Date) -> Result<()> {
        match self.rule {
            DateGeneration::ThirdWednesday => {
                let last = self.dates.len() - 1;
                for i in 1..last {
                    self.dates[i] = third_wednesday(self.dates[i])?;
                }
                self.merge_repeated_dates();
            }
            DateGeneration::ThirdWednesdayInclusive => {
                for d in &mut self.dates {
                    *d = third_wednesday(*d)?;
                }
                self.merge_repeated_dates();
            }
            _ => {}
        }
        let last = self.dates.len() - 1;

        if self.end_of_month && self.calendar.is_end_of_month(seed) {
            for i in 1..last {
                let d = self.dates[i];
                self.dates[i] = if self.convention == Unadjusted {
                    d.end_of_month()
                } else {
                    self.calendar.end_of_month(d)?
                };
            }
            let (mut d1, mut d2) = (self.front(), self.back());
            if self.termination_convention != Unadjusted {
                d1 = self.calendar.end_of_month(d1)?;
                d2 = self.calendar.end_of_month(d2)?;
            } else if self.rule == DateGeneration::Backward {
                // the termination date seeds a backward roll
                d2 = d2.end_of_month();
            } else {
                d1 = d1.end_of_month();
            }
            if d1 != d2 {
                self.dates[0] = d1;
                self.dates[last] = d2;
            } else {
                debug!(%d1, "end-of-month snap skipped, it would leave a single date");
            }
        } else {
            // the effective date of an old CDS schedule stays unadjusted
            if self.rule != DateGeneration::OldCDS {
                self.dates[0] = self.adjusted(self.dates[0])?;
            }
            for i in 1..last {
                self.dates[i] = self.adjusted(self.dates[i])?;
            }
            if self.termination_convention != Unadjusted && !self.rule.is_cds() {
                self.dates[last] = self
                    .calendar
                    .adjust(self.dates[last], self.termination_convention)?;
            }
        }
        Ok(())
    }

    /// Collapse runs of equal dates, as left by snapping several dates of one
    /// month to its third Wednesday, dropping the empty intervals' flags.
    fn merge_repeated_dates(&mut self) {
        let mut i = 1;
        while i < self.dates.len() {
            if self.dates[i] == self.dates[i - 1] {
                debug!(date = %self.dates[i], "repeated third-Wednesday date merged");
                self.dates.remove(i);
                if i - 1 < self.is_regular.len() {
                    self.is_regular.remove(i - 1);
                }
            } else {
                i += 1;
            }
        }
    }

    /// Drop dates that adjustment pushed onto (or past) their neighbours.
    fn remove_collapsed_dates(&mut self) {
        let n = self.dates.len();
        if n >= 2 && self.dates[n - 2] >= self.dates[n - 1] {
            let k = self.is_regular.len();
            if k >= 2 {
                self.is_regular[k - 2] = self.dates[n - 2] == self.dates[n - 1];
            }
            debug!(dropped = %self.dates[n - 2], "next-to-last date collapsed onto the last");
            self.dates[n - 2] = self.dates[n - 1];
            self.dates.pop();
            self.is_regular.pop();
        }
        if self.dates.len() >= 2 && self.dates[1] <= self.dates[0] {
            if self.is_regular.len() >= 2 {
                self.is_regular[1] = self.dates[1] == self.dates[0];
            }
            debug!(dropped = %self.dates[1], "second date collapsed onto the first");
            self.dates[1] = self.dates[0];
            self.dates.remove(0);
            if !self.is_regular.is_empty() {
                self.is_regular.remove(0);
            }
        }
    }

    fn generate(mut self) -> Result<Schedule> {
        debug!(
            rule = %self.rule,
            effective = %self.effective,
            termination = %self.termination,
            tenor = %self.tenor,
            "generating schedule"
        );
        let seed = match self.rule {
            DateGeneration::Zero => {
                self.dates = vec![self.effective, self.termination];
                self.is_regular = vec![true];
                self.effective
            }
            DateGeneration::Backward => self.backward()?,
            _ => self.forward()?,
        };
        self.finish_dates(seed)?;
        self.remove_collapsed_dates();
        ensure!(
            self.dates.len() > 1,
            DegenerateSchedule,
            "degenerate single date ({}) schedule\n seed date: {seed}\n effective date: {}\n \
             termination date: {}\n generation rule: {}\n end of month: {}",
            self.front(),
            self.effective,
            self.termination,
            self.rule,
            self.end_of_month
        );
        debug!(dates = self.dates.len(), "schedule generated");
        Ok(Schedule {
            tenor: Some(self.tenor),
            calendar: self.calendar,
            convention: self.convention,
            termination_convention: Some(self.termination_convention),
            rule: Some(self.rule),
            end_of_month: Some(self.end_of_month),
            first_date: self.first,
            next_to_last_date: self.next_to_last,
            dates: self.dates,
            is_regular: self.is_regular,
        })
    }
}

/// Effective date standing in for a missing one: whole years before the
/// anchor (next-to-last date, else termination) reaching back past the
/// evaluation date.
fn placeholder_effective_date(termination: Date, next_to_last: Option<Date>) -> Result<Date> {
    let eval = Date::evaluation_date();
    ensure!(
        eval < termination,
        ScheduleConfig,
        "null effective date with evaluation date ({eval}) not before termination ({termination})"
    );
    let anchor = next_to_last.unwrap_or(termination);
    let years = (anchor - eval) / 366 + 1;
    anchor.advance(-years, TimeUnit::Years)
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Tenor {
    Period(Period),
    Frequency(Frequency),
}

/// Builder for rule-based [`Schedule`]s.
///
/// Unset options take dynamic defaults: the convention is `Following` when a
/// calendar was given and `Unadjusted` otherwise; the termination convention
/// follows the convention; the calendar is the null calendar; the rule is
/// `Backward`.
///
/// ```
/// use fincal_time::{Calendar, Date, Frequency, ScheduleBuilder, UsMarket};
///
/// let schedule = ScheduleBuilder::new()
///     .from(Date::from_ymd(2020, 1, 15).unwrap())
///     .to(Date::from_ymd(2021, 1, 15).unwrap())
///     .with_frequency(Frequency::Quarterly)
///     .with_calendar(Calendar::united_states(UsMarket::Settlement))
///     .build()
///     .unwrap();
/// assert_eq!(schedule.size(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    effective_date: Option<Date>,
    termination_date: Option<Date>,
    tenor: Option<Tenor>,
    calendar: Calendar,
    convention: Option<BusinessDayConvention>,
    termination_convention: Option<BusinessDayConvention>,
    rule: Option<DateGeneration>,
    end_of_month: bool,
    first_date: Option<Date>,
    next_to_last_date: Option<Date>,
}

impl ScheduleBuilder {
    /// Begin building a schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the effective date.
    pub fn from(mut self, d: Date) -> Self {
        self.effective_date = Some(d);
        self
    }

    /// Set the termination date.
    pub fn to(mut self, d: Date) -> Self {
        self.termination_date = Some(d);
        self
    }

    /// Set the tenor between regular dates.
    pub fn with_tenor(mut self, tenor: Period) -> Self {
        self.tenor = Some(Tenor::Period(tenor));
        self
    }

    /// Set the tenor from a frequency.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.tenor = Some(Tenor::Frequency(frequency));
        self
    }

    /// Set the calendar used for adjustment.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Set the business-day convention for intermediate dates.
    pub fn with_convention(mut self, c: BusinessDayConvention) -> Self {
        self.convention = Some(c);
        self
    }

    /// Set the business-day convention for the termination date.
    pub fn with_termination_convention(mut self, c: BusinessDayConvention) -> Self {
        self.termination_convention = Some(c);
        self
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Generate forward from the effective date.
    pub fn forwards(self) -> Self {
        self.with_rule(DateGeneration::Forward)
    }

    /// Generate backward from the termination date.
    pub fn backwards(self) -> Self {
        self.with_rule(DateGeneration::Backward)
    }

    /// Whether to snap dates to the end of the month.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    /// Optional first irregular coupon date.
    pub fn with_first_date(mut self, d: Date) -> Self {
        self.first_date = Some(d);
        self
    }

    /// Optional next-to-last (penultimate) irregular coupon date.
    pub fn with_next_to_last_date(mut self, d: Date) -> Self {
        self.next_to_last_date = Some(d);
        self
    }

    /// Build the `Schedule`.
    ///
    /// # Errors
    /// `ScheduleConfig` if the termination date or the tenor is missing, or
    /// for any inconsistency in the inputs; `DegenerateSchedule` if fewer
    /// than two dates survive generation.
    pub fn build(self) -> Result<Schedule> {
        let Some(termination) = self.termination_date else {
            fail!(ScheduleConfig, "termination date not provided");
        };
        let tenor = match self.tenor {
            Some(Tenor::Period(p)) => p,
            Some(Tenor::Frequency(f)) => Period::from_frequency(f)?,
            None => fail!(ScheduleConfig, "tenor/frequency not provided"),
        };
        let convention = self.convention.unwrap_or(if self.calendar.is_empty() {
            Unadjusted
        } else {
            BusinessDayConvention::Following
        });
        let termination_convention = self.termination_convention.unwrap_or(convention);
        let calendar = if self.calendar.is_empty() {
            Calendar::null()
        } else {
            self.calendar
        };
        Generator::new(
            self.effective_date,
            termination,
            tenor,
            calendar,
            convention,
            termination_convention,
            self.rule.unwrap_or(DateGeneration::Backward),
            self.end_of_month,
            self.first_date,
            self.next_to_last_date,
        )?
        .generate()
    }
}
