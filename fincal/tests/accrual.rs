//! End-to-end use of the façade: generate a coupon schedule and accrue on it.

use approx::assert_abs_diff_eq;
use fincal::time::{Thirty360, Thirty360Convention};
use fincal::{
    BusinessDayConvention, Calendar, Compounding, Date, DayCounter, Frequency, InterestRate,
    ScheduleBuilder, UsMarket,
};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn semiannual_bond_coupons() {
    let schedule = ScheduleBuilder::new()
        .from(date(2021, 5, 15))
        .to(date(2024, 5, 15))
        .with_frequency(Frequency::Semiannual)
        .with_calendar(Calendar::united_states(UsMarket::GovernmentBond))
        .with_convention(BusinessDayConvention::Unadjusted)
        .build()
        .unwrap();
    assert_eq!(schedule.size(), 7);

    let dc = DayCounter::new(Thirty360::new(Thirty360Convention::BondBasis));
    let accrued: f64 = schedule
        .dates()
        .windows(2)
        .map(|w| dc.year_fraction(w[0], w[1]))
        .sum();
    assert_abs_diff_eq!(accrued, 3.0, epsilon = 1e-12);

    let rate = InterestRate::new(0.04, dc, Compounding::Compounded, Frequency::Semiannual).unwrap();
    let growth = schedule
        .dates()
        .windows(2)
        .map(|w| rate.compound_factor(w[0], w[1]).unwrap())
        .product::<f64>();
    assert_abs_diff_eq!(growth, 1.02f64.powi(6), epsilon = 1e-12);
}

#[test]
fn market_ids_resolve_through_the_facade() {
    let cal = Calendar::from_market_id("US-GOVBOND").unwrap();
    assert_eq!(cal, Calendar::united_states(UsMarket::GovernmentBond));
    assert_eq!(
        Calendar::from_market_id("nowhere").unwrap_err(),
        fincal::Error::CalendarConfig("unknown market (nowhere)".into())
    );
}
