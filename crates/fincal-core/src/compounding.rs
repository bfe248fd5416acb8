//! Compounding conventions for interest rates.

use std::fmt;

/// How interest accrues over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compounding {
    /// Simple interest: `1 + r·t`
    Simple,
    /// Compounded `f` times a year: `(1 + r/f)^(f·t)`
    Compounded,
    /// Continuously compounded: `e^(r·t)`
    Continuous,
    /// Simple up to the first coupon period, compounded thereafter.
    SimpleThenCompounded,
    /// Compounded up to the first coupon period, simple thereafter.
    CompoundedThenSimple,
}

impl Compounding {
    /// Whether the convention needs a compounding frequency to be meaningful.
    pub fn needs_frequency(self) -> bool {
        !matches!(self, Compounding::Simple | Compounding::Continuous)
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Compounding::Simple => "simple compounding",
            Compounding::Compounded => "compounded",
            Compounding::Continuous => "continuous compounding",
            Compounding::SimpleThenCompounded => "simple compounding up to one period, then compounded",
            Compounding::CompoundedThenSimple => "compounded up to one period, then simple",
        };
        f.write_str(s)
    }
}
