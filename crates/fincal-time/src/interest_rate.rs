//! Interest rate with compounding and day-counting conventions.
//!
//! An `InterestRate` bundles a rate value with a [`DayCounter`], a
//! [`Compounding`] convention and a [`Frequency`].  It can compute compound
//! factors, discount factors, equivalent rates and implied rates.

use std::fmt;

use fincal_core::errors::Result;
use fincal_core::{ensure, Compounding, DiscountFactor, Rate, Real, Time};

use crate::date::Date;
use crate::day_counter::DayCounter;
use crate::frequency::Frequency;

/// An interest rate with associated compounding and day-counting conventions.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestRate {
    rate: Rate,
    day_counter: DayCounter,
    compounding: Compounding,
    frequency: Frequency,
}

impl InterestRate {
    /// Create a new interest rate.
    ///
    /// # Arguments
    /// * `rate`: the annual rate as a decimal (e.g. 0.05 = 5%)
    /// * `day_counter`: day counter for year-fraction calculations
    /// * `compounding`: compounding convention
    /// * `frequency`: compounding frequency (ignored for Simple and Continuous)
    ///
    /// # Errors
    /// `InvalidPeriod` if the compounding convention needs a frequency and
    /// `frequency` is not a compounding one.
    pub fn new(
        rate: Rate,
        day_counter: impl Into<DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<Self> {
        ensure!(
            !compounding.needs_frequency() || frequency.is_compounding(),
            InvalidPeriod,
            "{frequency} frequency not allowed for {compounding}"
        );
        Ok(Self {
            rate,
            day_counter: day_counter.into(),
            compounding,
            frequency,
        })
    }

    /// The rate value.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// The day counter.
    pub fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    /// The compounding convention.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// The compounding frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    fn periods(frequency: Frequency) -> Real {
        Real::from(frequency.periods_per_year().unwrap_or(1))
    }

    /// Compound factor over a time period `t` (in years).
    ///
    /// # Errors
    /// `InvalidPeriod` if `t` is negative.
    pub fn compound_factor_time(&self, t: Time) -> Result<Real> {
        ensure!(t >= 0.0, InvalidPeriod, "negative time ({t}) not allowed");
        let r = self.rate;
        let f = Self::periods(self.frequency);
        let factor = match self.compounding {
            Compounding::Simple => 1.0 + r * t,
            Compounding::Compounded => (1.0 + r / f).powf(f * t),
            Compounding::Continuous => (r * t).exp(),
            Compounding::SimpleThenCompounded => {
                if t <= 1.0 / f {
                    1.0 + r * t
                } else {
                    (1.0 + r / f).powf(f * t)
                }
            }
            Compounding::CompoundedThenSimple => {
                if t > 1.0 / f {
                    1.0 + r * t
                } else {
                    (1.0 + r / f).powf(f * t)
                }
            }
        };
        Ok(factor)
    }

    /// Compound factor between two dates, measured with this rate's day
    /// counter.
    pub fn compound_factor(&self, d1: Date, d2: Date) -> Result<Real> {
        self.compound_factor_time(self.day_counter.year_fraction(d1, d2))
    }

    /// Discount factor over a time period `t` (in years).
    pub fn discount_factor_time(&self, t: Time) -> Result<DiscountFactor> {
        Ok(1.0 / self.compound_factor_time(t)?)
    }

    /// Discount factor between two dates.
    pub fn discount_factor(&self, d1: Date, d2: Date) -> Result<DiscountFactor> {
        Ok(1.0 / self.compound_factor(d1, d2)?)
    }

    /// Implied rate from a compound factor observed over time `t`.
    ///
    /// # Errors
    /// `InvalidPeriod` if `compound` is not positive, if `t` is not positive
    /// (or negative when `compound` is 1), or if `frequency` does not suit
    /// `compounding`.
    pub fn implied_rate(
        compound: Real,
        day_counter: impl Into<DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
        t: Time,
    ) -> Result<InterestRate> {
        ensure!(compound > 0.0, InvalidPeriod, "positive compound factor required");
        let rate = if compound == 1.0 {
            ensure!(t >= 0.0, InvalidPeriod, "non negative time ({t}) required");
            0.0
        } else {
            ensure!(t > 0.0, InvalidPeriod, "positive time ({t}) required");
            let f = Self::periods(frequency);
            let simple = || (compound - 1.0) / t;
            let compounded = || (compound.powf(1.0 / (f * t)) - 1.0) * f;
            match compounding {
                Compounding::Simple => simple(),
                Compounding::Compounded => compounded(),
                Compounding::Continuous => compound.ln() / t,
                Compounding::SimpleThenCompounded => {
                    if t < 1.0 / f {
                        simple()
                    } else {
                        compounded()
                    }
                }
                Compounding::CompoundedThenSimple => {
                    if t > 1.0 / f {
                        simple()
                    } else {
                        compounded()
                    }
                }
            }
        };
        InterestRate::new(rate, day_counter, compounding, frequency)
    }

    /// Implied rate from a compound factor observed between two dates.
    ///
    /// # Errors
    /// As [`implied_rate`](Self::implied_rate); also `InvalidPeriod` if
    /// `d1 > d2`.
    pub fn implied_rate_between(
        compound: Real,
        day_counter: impl Into<DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
        d1: Date,
        d2: Date,
    ) -> Result<InterestRate> {
        ensure!(
            d2 >= d1,
            InvalidPeriod,
            "d1 ({d1}) later than d2 ({d2})"
        );
        let day_counter = day_counter.into();
        let t = day_counter.year_fraction(d1, d2);
        Self::implied_rate(compound, day_counter, compounding, frequency, t)
    }

    /// The rate under `compounding`/`frequency` giving the same compound
    /// factor over `t`; the day counter is kept.
    pub fn equivalent_rate(
        &self,
        compounding: Compounding,
        frequency: Frequency,
        t: Time,
    ) -> Result<InterestRate> {
        Self::implied_rate(
            self.compound_factor_time(t)?,
            self.day_counter.clone(),
            compounding,
            frequency,
            t,
        )
    }

    /// The rate under another day counter and compounding giving the same
    /// compound factor between `d1` and `d2`.
    pub fn equivalent_rate_between(
        &self,
        day_counter: impl Into<DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
        d1: Date,
        d2: Date,
    ) -> Result<InterestRate> {
        ensure!(
            d2 >= d1,
            InvalidPeriod,
            "d1 ({d1}) later than d2 ({d2})"
        );
        let day_counter = day_counter.into();
        let t1 = self.day_counter.year_fraction(d1, d2);
        let t2 = day_counter.year_fraction(d1, d2);
        Self::implied_rate(
            self.compound_factor_time(t1)?,
            day_counter,
            compounding,
            frequency,
            t2,
        )
    }
}

/// E.g. `5.000000 % Actual/365 (Fixed) Annual compounding`.
impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} % {} ", self.rate * 100.0, self.day_counter)?;
        let freq = self.frequency;
        let months = 12 / self.frequency.periods_per_year().unwrap_or(1).max(1);
        match self.compounding {
            Compounding::Simple => f.write_str("simple compounding"),
            Compounding::Compounded => write!(f, "{freq} compounding"),
            Compounding::Continuous => f.write_str("continuous compounding"),
            Compounding::SimpleThenCompounded => write!(
                f,
                "simple compounding up to {months} months, then {freq} compounding"
            ),
            Compounding::CompoundedThenSimple => write!(
                f,
                "compounding up to {months} months, then {freq} simple compounding"
            ),
        }
    }
}
