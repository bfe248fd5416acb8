//! `DayCounter` handle and the `DayCountConvention` trait behind it.
//!
//! A day counter computes the **day count fraction** (the fraction of a year
//! between two dates) used when discounting or accruing interest.  Concrete
//! conventions live in [`crate::day_counters`].

use std::fmt;
use std::sync::Arc;

use fincal_core::Time;

use crate::date::Date;

/// A convention for counting days and the fraction of a year between two
/// dates.
pub trait DayCountConvention: fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        i64::from(d2 - d1)
    }

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;

    /// Fraction of a year between `d1` and `d2` with reference period hints.
    ///
    /// Defaults to [`year_fraction`][Self::year_fraction].
    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Date,
        _ref_end: Date,
    ) -> Time {
        self.year_fraction(d1, d2)
    }
}

/// Shared handle to a day-count convention.
///
/// Clones share the convention (and, for Business/252, its cache).  Two
/// handles are equal when their conventions have the same name.
///
/// ```
/// use fincal_time::{Actual360, Date, DayCounter};
///
/// let dc = DayCounter::new(Actual360);
/// let d1 = Date::from_ymd(2023, 1, 1).unwrap();
/// let d2 = Date::from_ymd(2023, 7, 1).unwrap();
/// assert_eq!(dc.day_count(d1, d2), 181);
/// assert_eq!(dc.to_string(), "Actual/360");
/// ```
#[derive(Clone)]
pub struct DayCounter {
    inner: Arc<dyn DayCountConvention>,
}

impl DayCounter {
    /// Wrap a convention in a handle.
    pub fn new(convention: impl DayCountConvention + 'static) -> Self {
        Self {
            inner: Arc::new(convention),
        }
    }

    /// Name of the underlying convention.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// See [`DayCountConvention::day_count`].
    pub fn day_count(&self, d1: Date, d2: Date) -> i64 {
        self.inner.day_count(d1, d2)
    }

    /// See [`DayCountConvention::year_fraction`].
    pub fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.inner.year_fraction(d1, d2)
    }

    /// See [`DayCountConvention::year_fraction_with_ref`].
    pub fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        ref_start: Date,
        ref_end: Date,
    ) -> Time {
        self.inner.year_fraction_with_ref(d1, d2, ref_start, ref_end)
    }
}

impl<C: DayCountConvention + 'static> From<C> for DayCounter {
    fn from(convention: C) -> Self {
        Self::new(convention)
    }
}

impl PartialEq for DayCounter {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for DayCounter {}

impl fmt::Display for DayCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for DayCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DayCounter").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_counters::{Actual360, Actual365Fixed, Thirty360, Thirty360Convention};

    #[test]
    fn equality_by_name() {
        assert_eq!(DayCounter::new(Actual360), DayCounter::from(Actual360));
        assert_ne!(DayCounter::new(Actual360), DayCounter::new(Actual365Fixed));
        // aliases of the same rule set share a name
        assert_eq!(
            DayCounter::new(Thirty360::new(Thirty360Convention::European)),
            DayCounter::new(Thirty360::new(Thirty360Convention::EurobondBasis))
        );
    }

    #[test]
    fn default_day_count_is_actual() {
        #[derive(Debug)]
        struct Half;
        impl DayCountConvention for Half {
            fn name(&self) -> &str {
                "half"
            }
            fn year_fraction(&self, d1: Date, d2: Date) -> Time {
                self.day_count(d1, d2) as Time / 2.0
            }
        }
        let dc = DayCounter::new(Half);
        let d1 = Date::from_ymd(2023, 1, 1).unwrap();
        let d2 = Date::from_ymd(2023, 1, 11).unwrap();
        assert_eq!(dc.day_count(d1, d2), 10);
        assert_eq!(dc.year_fraction_with_ref(d1, d2, d1, d2), 5.0);
    }
}
