//! 30/360 day counters.
//!
//! Every variant computes `360·Δyears + 30·Δmonths + Δdays` after clamping
//! the day-of-month of either end:
//!
//! * **USA**: a start on the 31st or on the last day of February becomes the
//!   30th; an end on the 31st becomes the 30th if the start is the 30th or
//!   31st; an end on the last of February becomes the 30th if the start is
//!   the last of February too.
//! * **Bond Basis** (ISMA): a start on the 31st becomes the 30th; an end on
//!   the 31st becomes the 30th if the start is the 30th or 31st.
//! * **European** (Eurobond Basis, 30E/360): any 31st becomes the 30th.
//! * **Italian**: as European, and February days after the 27th become the
//!   30th.
//! * **ISDA** (German): as European, and the last day of February becomes the
//!   30th, except for the termination date.
//! * **NASD**: a start on the 31st becomes the 30th; an end on the 31st
//!   becomes the 30th if the start is the 30th or later, otherwise the 1st of
//!   the following month.

use fincal_core::{Real, Time};

use crate::date::{is_leap_year, Date};
use crate::day_counter::DayCountConvention;

/// 30/360 conventions; several are aliases of the same rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thirty360Convention {
    /// 30/360 (US).
    Usa,
    /// US (ISMA) bond basis.
    BondBasis,
    /// 30E/360.
    European,
    /// Alias of [`European`](Self::European).
    EurobondBasis,
    /// 30/360 (Italian).
    Italian,
    /// Alias of [`Isda`](Self::Isda).
    German,
    /// Alias of [`BondBasis`](Self::BondBasis).
    Isma,
    /// 30E/360 (ISDA).
    Isda,
    /// 30/360 (NASD).
    Nasd,
}

/// 30/360 day counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thirty360 {
    convention: Thirty360Convention,
    termination_date: Option<Date>,
    is_last_period: bool,
}

impl Thirty360 {
    /// A 30/360 day counter under `convention`.
    pub fn new(convention: Thirty360Convention) -> Self {
        Self {
            convention,
            termination_date: None,
            is_last_period: false,
        }
    }

    /// Set the termination date consulted by the ISDA variant: an end date
    /// equal to it keeps a last-of-February day unclamped.
    pub fn with_termination_date(mut self, termination_date: Date) -> Self {
        self.termination_date = Some(termination_date);
        self
    }

    /// For the ISDA variant without a termination date: whether every
    /// interval measured is the last one of its schedule.
    pub fn with_last_period(mut self, is_last_period: bool) -> Self {
        self.is_last_period = is_last_period;
        self
    }

    /// The convention.
    pub fn convention(&self) -> Thirty360Convention {
        self.convention
    }
}

fn is_last_of_february(d: i64, m: i64, y: u16) -> bool {
    m == 2 && d == 28 + i64::from(is_leap_year(y))
}

impl DayCountConvention for Thirty360 {
    fn name(&self) -> &str {
        use Thirty360Convention::*;
        match self.convention {
            Usa => "30/360 (US)",
            BondBasis | Isma => "30/360 (Bond Basis)",
            European | EurobondBasis => "30E/360 (Eurobond Basis)",
            Italian => "30/360 (Italian)",
            German | Isda => "30E/360 (ISDA)",
            Nasd => "30/360 (NASD)",
        }
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        use Thirty360Convention::*;
        let (y1, y2) = (d1.year(), d2.year());
        let m1 = i64::from(d1.month().number());
        let mut m2 = i64::from(d2.month().number());
        let mut dd1 = i64::from(d1.day_of_month());
        let mut dd2 = i64::from(d2.day_of_month());

        match self.convention {
            Usa => {
                let feb_end_start = is_last_of_february(dd1, m1, y1);
                if dd1 == 31 {
                    dd1 = 30;
                }
                if dd2 == 31 && dd1 >= 30 {
                    dd2 = 30;
                }
                if feb_end_start && is_last_of_february(dd2, m2, y2) {
                    dd2 = 30;
                }
                if feb_end_start {
                    dd1 = 30;
                }
            }
            BondBasis | Isma => {
                if dd1 == 31 {
                    dd1 = 30;
                }
                if dd2 == 31 && dd1 == 30 {
                    dd2 = 30;
                }
            }
            European | EurobondBasis => {
                dd1 = dd1.min(30);
                dd2 = dd2.min(30);
            }
            Italian => {
                dd1 = dd1.min(30);
                dd2 = dd2.min(30);
                if m1 == 2 && dd1 > 27 {
                    dd1 = 30;
                }
                if m2 == 2 && dd2 > 27 {
                    dd2 = 30;
                }
            }
            German | Isda => {
                let is_termination = match self.termination_date {
                    Some(t) => d2 == t,
                    None => self.is_last_period,
                };
                if dd1 == 31 || is_last_of_february(dd1, m1, y1) {
                    dd1 = 30;
                }
                if dd2 == 31 || (!is_termination && is_last_of_february(dd2, m2, y2)) {
                    dd2 = 30;
                }
            }
            Nasd => {
                if dd1 == 31 {
                    dd1 = 30;
                }
                if dd2 == 31 {
                    if dd1 >= 30 {
                        dd2 = 30;
                    } else {
                        dd2 = 1;
                        m2 += 1;
                    }
                }
            }
        }

        360 * (i64::from(y2) - i64::from(y1)) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}
