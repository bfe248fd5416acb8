//! Integration tests for `InterestRate`.

use approx::assert_abs_diff_eq;
use fincal_core::Compounding::{self, *};
use fincal_time::{
    Actual360, Actual365Fixed, Date, DayCounter, Frequency, InterestRate, Thirty360,
    Thirty360Convention,
};
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

struct Conversion {
    rate: f64,
    compounding: Compounding,
    frequency: Frequency,
    time: f64,
    expected: f64,
    compounding2: Compounding,
    frequency2: Frequency,
}

#[test]
fn rate_conversions() {
    use Frequency::*;
    let cases = [
        Conversion { rate: 0.08, compounding: Compounded, frequency: Quarterly, time: 2.0, expected: 0.0808, compounding2: Compounded, frequency2: Semiannual },
        Conversion { rate: 0.08, compounding: Compounded, frequency: Quarterly, time: 2.0, expected: 0.0824, compounding2: Compounded, frequency2: Annual },
        Conversion { rate: 0.07, compounding: Compounded, frequency: Quarterly, time: 2.5, expected: 0.0706, compounding2: Compounded, frequency2: Semiannual },
        Conversion { rate: 0.06, compounding: Compounded, frequency: Semiannual, time: 3.0, expected: 0.0596, compounding2: Compounded, frequency2: Quarterly },
        Conversion { rate: 0.05, compounding: Compounded, frequency: Annual, time: 3.5, expected: 0.0494, compounding2: Compounded, frequency2: Semiannual },
        Conversion { rate: 0.10, compounding: Continuous, frequency: NoFrequency, time: 2.0, expected: 0.1052, compounding2: Compounded, frequency2: Annual },
        Conversion { rate: 0.10, compounding: Continuous, frequency: NoFrequency, time: 2.0, expected: 0.1107, compounding2: Simple, frequency2: Annual },
        Conversion { rate: 0.10, compounding: Compounded, frequency: Quarterly, time: 1.0, expected: 0.0988, compounding2: Continuous, frequency2: NoFrequency },
    ];
    for c in cases {
        let ir = InterestRate::new(c.rate, Actual365Fixed, c.compounding, c.frequency).unwrap();
        let converted = ir.equivalent_rate(c.compounding2, c.frequency2, c.time).unwrap();
        assert_abs_diff_eq!(converted.rate(), c.expected, epsilon = 5e-5);
        // same compound factor over the conversion horizon
        assert_abs_diff_eq!(
            converted.compound_factor_time(c.time).unwrap(),
            ir.compound_factor_time(c.time).unwrap(),
            epsilon = 1e-12
        );
        let back = converted.equivalent_rate(c.compounding, c.frequency, c.time).unwrap();
        assert_abs_diff_eq!(back.rate(), c.rate, epsilon = 1e-10);
    }
}

#[test]
fn date_based_factors() {
    let simple = InterestRate::new(0.04, Actual360, Simple, Frequency::Annual).unwrap();
    let (d1, d2) = (date(2023, 1, 1), date(2023, 7, 1));
    assert_abs_diff_eq!(
        simple.discount_factor(d1, d2).unwrap(),
        1.0 / (1.0 + 0.04 * 181.0 / 360.0),
        epsilon = 1e-14
    );

    let annual = InterestRate::new(0.05, Actual365Fixed, Compounded, Frequency::Annual).unwrap();
    assert_abs_diff_eq!(
        annual.compound_factor(date(2023, 3, 1), date(2024, 3, 1)).unwrap(),
        1.05f64.powf(366.0 / 365.0),
        epsilon = 1e-14
    );
    assert_eq!(
        annual.compound_factor(d2, d1).unwrap_err().kind(),
        "InvalidPeriodError"
    );
}

#[test]
fn implied_rate_between_dates() {
    let (d1, d2) = (date(2023, 1, 15), date(2024, 1, 15));
    let ir = InterestRate::implied_rate_between(1.05, Thirty360::new(Thirty360Convention::BondBasis), Compounded, Frequency::Annual, d1, d2)
        .unwrap();
    assert_abs_diff_eq!(ir.rate(), 0.05, epsilon = 1e-12);
    assert_eq!(ir.day_counter().name(), "30/360 (Bond Basis)");
    assert!(
        InterestRate::implied_rate_between(1.05, Actual360, Simple, Frequency::Annual, d2, d1).is_err()
    );
}

#[test]
fn equivalent_rate_across_day_counters() {
    let (d1, d2) = (date(2023, 1, 1), date(2024, 1, 1));
    let act365 = InterestRate::new(0.05, Actual365Fixed, Simple, Frequency::Annual).unwrap();
    let act360 = act365
        .equivalent_rate_between(Actual360, Simple, Frequency::Annual, d1, d2)
        .unwrap();
    assert_abs_diff_eq!(act360.rate(), 0.05 * 360.0 / 365.0, epsilon = 1e-14);
    assert_eq!(act360.day_counter(), &DayCounter::new(Actual360));
}

#[test]
fn frequency_required_for_compounding() {
    for comp in [Compounded, SimpleThenCompounded, CompoundedThenSimple] {
        for freq in [Frequency::Once, Frequency::NoFrequency, Frequency::OtherFrequency] {
            let err = InterestRate::new(0.05, Actual365Fixed, comp, freq).unwrap_err();
            assert_eq!(err.kind(), "InvalidPeriodError");
        }
    }
    assert!(InterestRate::new(0.05, Actual365Fixed, Continuous, Frequency::NoFrequency).is_ok());
}

#[test]
fn display() {
    let ir = InterestRate::new(0.0375, Actual360, Continuous, Frequency::NoFrequency).unwrap();
    assert_eq!(ir.to_string(), "3.750000 % Actual/360 continuous compounding");
    let ir = InterestRate::new(0.05, Actual360, Simple, Frequency::Annual).unwrap();
    assert_eq!(ir.to_string(), "5.000000 % Actual/360 simple compounding");
}

proptest! {
    #[test]
    fn discount_is_reciprocal_of_compound(
        rate in 0.0f64..0.25,
        t in 0.0f64..30.0,
    ) {
        let ir = InterestRate::new(rate, Actual365Fixed, Compounded, Frequency::Semiannual).unwrap();
        let product = ir.compound_factor_time(t).unwrap() * ir.discount_factor_time(t).unwrap();
        prop_assert!((product - 1.0).abs() < 1e-12);
    }
}
