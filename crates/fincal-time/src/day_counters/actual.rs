use fincal_core::{Real, Time};

use crate::date::Date;
use crate::day_counter::DayCountConvention;

/// Actual/365 (Fixed) day counter.
///
/// `year_fraction = actual_days / 365`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCountConvention for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360 day counter.
///
/// `year_fraction = actual_days / 360`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCountConvention for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}
