//! `Period`: a time span expressed in a [`TimeUnit`].
//!
//! Arithmetic between periods of different units is only defined where the
//! conversion is exact (years and months, weeks and days) or where one side
//! has zero length; everything else fails with `InvalidPeriod`.  Ordering is
//! partial: `1M` and `30D` cannot be compared.

use std::cmp::Ordering;
use std::fmt;

use fincal_core::errors::{Error, Result};
use fincal_core::{ensure, fail};

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;

/// A time span made up of a signed integer length and a [`TimeUnit`].
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Default for Period {
    fn default() -> Self {
        Period::new(0, TimeUnit::Days)
    }
}

impl Period {
    /// Create a new period.
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// The tenor between two events of the given frequency.
    ///
    /// `NoFrequency` maps to `0D` and `Once` to `0Y`.
    ///
    /// # Errors
    /// `InvalidPeriod` for `OtherFrequency`.
    pub fn from_frequency(freq: Frequency) -> Result<Self> {
        let p = match freq {
            Frequency::NoFrequency => Period::new(0, TimeUnit::Days),
            Frequency::Once => Period::new(0, TimeUnit::Years),
            Frequency::Annual => Period::new(1, TimeUnit::Years),
            Frequency::Semiannual
            | Frequency::EveryFourthMonth
            | Frequency::Quarterly
            | Frequency::Bimonthly
            | Frequency::Monthly => Period::new(12 / freq as i32, TimeUnit::Months),
            Frequency::EveryFourthWeek | Frequency::Biweekly | Frequency::Weekly => {
                Period::new(52 / freq as i32, TimeUnit::Weeks)
            }
            Frequency::Daily => Period::new(1, TimeUnit::Days),
            Frequency::OtherFrequency => fail!(InvalidPeriod, "unknown frequency ({freq})"),
        };
        Ok(p)
    }

    /// The frequency whose events are spaced by this period, or
    /// `OtherFrequency` when the ratio is not exact.
    pub fn frequency(self) -> Frequency {
        let len = self.length.unsigned_abs();
        if len == 0 {
            return match self.unit {
                TimeUnit::Years => Frequency::Once,
                _ => Frequency::NoFrequency,
            };
        }
        match self.unit {
            TimeUnit::Years if len == 1 => Frequency::Annual,
            TimeUnit::Months if len <= 12 && 12 % len == 0 => {
                Frequency::from_periods_per_year((12 / len) as i32)
            }
            TimeUnit::Weeks => match len {
                1 => Frequency::Weekly,
                2 => Frequency::Biweekly,
                4 => Frequency::EveryFourthWeek,
                _ => Frequency::OtherFrequency,
            },
            TimeUnit::Days if len == 1 => Frequency::Daily,
            _ => Frequency::OtherFrequency,
        }
    }

    /// Months that are a whole number of years become years.
    pub fn normalized(self) -> Self {
        match self.unit {
            TimeUnit::Months if self.length != 0 && self.length % 12 == 0 => {
                Period::new(self.length / 12, TimeUnit::Years)
            }
            _ => self,
        }
    }

    /// `self + rhs`, converting units where exact.
    ///
    /// ```
    /// use fincal_time::{Period, TimeUnit::*};
    /// let p = Period::new(1, Years).checked_add(Period::new(6, Months)).unwrap();
    /// assert_eq!(p.to_string(), "1Y6M");
    /// assert!(Period::new(1, Months).checked_add(Period::new(1, Days)).is_err());
    /// ```
    pub fn checked_add(self, rhs: Period) -> Result<Self> {
        use TimeUnit::*;
        if self.length == 0 {
            return Ok(rhs);
        }
        if self.unit == rhs.unit {
            return self.combine(rhs, self.length.checked_add(rhs.length), self.unit);
        }
        match (self.unit, rhs.unit) {
            (Years, Months) => {
                let len = self.length.checked_mul(12).and_then(|l| l.checked_add(rhs.length));
                self.combine(rhs, len, Months)
            }
            (Months, Years) => {
                let len = rhs.length.checked_mul(12).and_then(|l| l.checked_add(self.length));
                self.combine(rhs, len, Months)
            }
            (Weeks, Days) => {
                let len = self.length.checked_mul(7).and_then(|l| l.checked_add(rhs.length));
                self.combine(rhs, len, Days)
            }
            (Days, Weeks) => {
                let len = rhs.length.checked_mul(7).and_then(|l| l.checked_add(self.length));
                self.combine(rhs, len, Days)
            }
            _ => {
                ensure!(
                    rhs.length == 0,
                    InvalidPeriod,
                    "impossible addition between {self} and {rhs}"
                );
                Ok(self)
            }
        }
    }

    /// `self - rhs`; see [`checked_add`](Self::checked_add).
    pub fn checked_sub(self, rhs: Period) -> Result<Self> {
        self.checked_add(-rhs)
    }

    /// `self / n`, falling back to months (for years) or days (for weeks)
    /// when the division is not exact in the original unit.
    pub fn checked_div(self, n: i32) -> Result<Self> {
        ensure!(n != 0, InvalidPeriod, "{self} cannot be divided by zero");
        if self.length % n == 0 {
            return Ok(Period::new(self.length / n, self.unit));
        }
        let (len, unit) = match self.unit {
            TimeUnit::Years => (self.length.checked_mul(12), TimeUnit::Months),
            TimeUnit::Weeks => (self.length.checked_mul(7), TimeUnit::Days),
            unit => (Some(self.length), unit),
        };
        match len {
            Some(len) if len % n == 0 => Ok(Period::new(len / n, unit)),
            _ => fail!(InvalidPeriod, "{self} cannot be divided by {n}"),
        }
    }

    /// Length in years.
    ///
    /// # Errors
    /// `InvalidPeriod` for a non-zero period in days or weeks.
    pub fn years(self) -> Result<f64> {
        match self.unit {
            _ if self.length == 0 => Ok(0.0),
            TimeUnit::Months => Ok(f64::from(self.length) / 12.0),
            TimeUnit::Years => Ok(f64::from(self.length)),
            u => fail!(InvalidPeriod, "cannot convert {u} into Year(s)"),
        }
    }

    /// Length in months.
    ///
    /// # Errors
    /// `InvalidPeriod` for a non-zero period in days or weeks.
    pub fn months(self) -> Result<f64> {
        match self.unit {
            _ if self.length == 0 => Ok(0.0),
            TimeUnit::Months => Ok(f64::from(self.length)),
            TimeUnit::Years => Ok(f64::from(self.length) * 12.0),
            u => fail!(InvalidPeriod, "cannot convert {u} into Month(s)"),
        }
    }

    /// Length in weeks.
    ///
    /// # Errors
    /// `InvalidPeriod` for a non-zero period in months or years.
    pub fn weeks(self) -> Result<f64> {
        match self.unit {
            _ if self.length == 0 => Ok(0.0),
            TimeUnit::Days => Ok(f64::from(self.length) / 7.0),
            TimeUnit::Weeks => Ok(f64::from(self.length)),
            u => fail!(InvalidPeriod, "cannot convert {u} into Week(s)"),
        }
    }

    /// Length in days.
    ///
    /// # Errors
    /// `InvalidPeriod` for a non-zero period in months or years.
    pub fn days(self) -> Result<f64> {
        match self.unit {
            _ if self.length == 0 => Ok(0.0),
            TimeUnit::Days => Ok(f64::from(self.length)),
            TimeUnit::Weeks => Ok(f64::from(self.length) * 7.0),
            u => fail!(InvalidPeriod, "cannot convert {u} into Day(s)"),
        }
    }

    fn combine(self, rhs: Period, len: Option<i32>, unit: TimeUnit) -> Result<Self> {
        match len {
            Some(length) => Ok(Period::new(length, unit)),
            None => fail!(InvalidPeriod, "{self} plus {rhs} overflows"),
        }
    }

    /// Bounds, in days, of the span this period can cover.
    fn day_range(self) -> (i64, i64) {
        let n = i64::from(self.length);
        let (lo, hi) = match self.unit {
            TimeUnit::Days => (n, n),
            TimeUnit::Weeks => (7 * n, 7 * n),
            TimeUnit::Months => (28 * n, 31 * n),
            TimeUnit::Years => (365 * n, 366 * n),
        };
        (lo.min(hi), lo.max(hi))
    }

    /// `Some(self < rhs)`, or `None` when the comparison is undecidable.
    fn less_than(self, rhs: Period) -> Option<bool> {
        use TimeUnit::*;
        let (a, b) = (i64::from(self.length), i64::from(rhs.length));
        if a == 0 {
            return Some(b > 0);
        }
        if b == 0 {
            return Some(a < 0);
        }
        match (self.unit, rhs.unit) {
            (x, y) if x == y => Some(a < b),
            (Months, Years) => Some(a < 12 * b),
            (Years, Months) => Some(12 * a < b),
            (Days, Weeks) => Some(a < 7 * b),
            (Weeks, Days) => Some(7 * a < b),
            _ => {
                let (lo1, hi1) = self.day_range();
                let (lo2, hi2) = rhs.day_range();
                if hi1 < lo2 {
                    Some(true)
                } else if lo1 > hi2 {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.less_than(*other)?, other.less_than(*self)?) {
            (true, _) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => Some(Ordering::Equal),
        }
    }
}

/// Two periods are equal when neither is shorter than the other, so
/// `12M == 1Y` and `0D == 0Y`; undecidable pairs compare unequal.
impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        Period::new(-self.length, self.unit)
    }
}

impl std::ops::Mul<i32> for Period {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Period::new(self.length * rhs, self.unit)
    }
}

impl std::ops::Mul<Period> for i32 {
    type Output = Period;
    fn mul(self, rhs: Period) -> Period {
        rhs * self
    }
}

impl TryFrom<Frequency> for Period {
    type Error = Error;

    fn try_from(freq: Frequency) -> Result<Self> {
        Period::from_frequency(freq)
    }
}

/// Whole years (weeks) are split out of months (days): `18M` prints as
/// `1Y6M`, `17D` as `2W3D`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (big, ratio) = match self.unit {
            TimeUnit::Days => ('W', 7),
            TimeUnit::Months => ('Y', 12),
            TimeUnit::Weeks | TimeUnit::Years => {
                return write!(f, "{}{}", self.length, self.unit.symbol());
            }
        };
        let mut n = self.length;
        let mut whole = 0;
        if n >= ratio {
            whole = n / ratio;
            n %= ratio;
            write!(f, "{whole}{big}")?;
        }
        if n != 0 || whole == 0 {
            write!(f, "{n}{}", self.unit.symbol())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period({self})")
    }
}
