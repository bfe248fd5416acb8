//! Integration tests for the `DayCounter` handle and the built-in conventions.

use std::sync::{Arc, Mutex};

use approx::assert_abs_diff_eq;
use fincal_time::{
    Actual360, Actual365Fixed, Business252, BusinessDayCache, Calendar, Date, DayCountConvention,
    DayCounter, SimpleDayCounter, Thirty360, Thirty360Convention, UsMarket,
};
use proptest::prelude::*;

use Thirty360Convention::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

// ───────────────────────── actual ─────────────────────────

#[test]
fn actual_conventions() {
    let (d1, d2) = (date(2023, 3, 1), date(2024, 3, 1));
    let a365 = DayCounter::new(Actual365Fixed);
    let a360 = DayCounter::new(Actual360);
    assert_eq!(a365.day_count(d1, d2), 366);
    assert_abs_diff_eq!(a365.year_fraction(d1, d2), 366.0 / 365.0, epsilon = 1e-15);
    assert_abs_diff_eq!(a360.year_fraction(d1, d2), 366.0 / 360.0, epsilon = 1e-15);
    assert_abs_diff_eq!(
        a360.year_fraction(date(2023, 2, 1), date(2023, 8, 15)),
        195.0 / 360.0,
        epsilon = 1e-15
    );
}

// ───────────────────────── 30/360 ─────────────────────────

#[test]
fn thirty360_variants() {
    let count = |c: Thirty360Convention, d1: Date, d2: Date| Thirty360::new(c).day_count(d1, d2);
    assert_eq!(count(Usa, date(2024, 2, 29), date(2024, 3, 31)), 31);
    assert_eq!(count(Usa, date(2024, 2, 29), date(2025, 2, 28)), 360);
    assert_eq!(count(Nasd, date(2023, 1, 15), date(2023, 3, 31)), 76);
    assert_eq!(count(European, date(2023, 1, 31), date(2023, 3, 31)), 60);
    assert_eq!(count(EurobondBasis, date(2023, 1, 31), date(2023, 3, 31)), 60);
    assert_eq!(count(Italian, date(2023, 2, 28), date(2023, 3, 31)), 30);
    assert_eq!(count(Isma, date(2023, 1, 31), date(2023, 3, 31)), 60);
    assert_abs_diff_eq!(
        Thirty360::new(BondBasis).year_fraction(date(2023, 1, 15), date(2023, 7, 15)),
        0.5,
        epsilon = 1e-15
    );
}

#[test]
fn thirty360_isda_termination_date() {
    let dc = Thirty360::new(Isda).with_termination_date(date(2024, 2, 29));
    // the last day of February is only kept as is when it is the termination date
    assert_eq!(dc.day_count(date(2023, 8, 31), date(2024, 2, 29)), 179);
    assert_eq!(dc.day_count(date(2023, 2, 28), date(2023, 8, 31)), 180);
    assert_eq!(Thirty360::new(Isda).day_count(date(2023, 8, 31), date(2024, 2, 29)), 180);
}

// ───────────────────────── simple ─────────────────────────

#[test]
fn simple_day_counter() {
    let dc = DayCounter::new(SimpleDayCounter);
    assert_abs_diff_eq!(dc.year_fraction(date(2023, 1, 31), date(2023, 4, 30)), 0.25);
    assert_abs_diff_eq!(dc.year_fraction(date(2020, 6, 15), date(2023, 6, 15)), 3.0);
    assert_abs_diff_eq!(
        dc.year_fraction(date(2023, 1, 10), date(2023, 2, 25)),
        45.0 / 360.0,
        epsilon = 1e-15
    );
    assert_eq!(dc.day_count(date(2023, 1, 31), date(2023, 4, 30)), 89);
}

// ───────────────────────── business/252 ─────────────────────────

#[test]
fn business252_counts() {
    let nyse = Business252::new(Calendar::united_states(UsMarket::Nyse));
    assert_eq!(nyse.day_count(date(2019, 12, 31), date(2023, 2, 15)), 787);
    assert_eq!(nyse.day_count(date(2022, 1, 1), date(2023, 1, 1)), 251);
    assert_abs_diff_eq!(
        nyse.year_fraction(date(2022, 1, 1), date(2023, 1, 1)),
        251.0 / 252.0,
        epsilon = 1e-15
    );
    let settlement = Business252::new(Calendar::united_states(UsMarket::Settlement));
    assert_eq!(settlement.day_count(date(2020, 3, 17), date(2020, 11, 2)), 160);
}

#[test]
fn business252_shared_cache() {
    let cache = Arc::new(Mutex::new(BusinessDayCache::new()));
    let a = Business252::with_cache(Calendar::united_states(UsMarket::Nyse), Arc::clone(&cache));
    let b = Business252::with_cache(Calendar::united_states(UsMarket::Nyse), Arc::clone(&cache));
    assert_eq!(a.day_count(date(2021, 1, 4), date(2021, 4, 1)), b.day_count(date(2021, 1, 4), date(2021, 4, 1)));
    assert!(!cache.lock().unwrap().is_empty());
    assert!(Arc::ptr_eq(&a.cache(), &cache));
    cache.lock().unwrap().clear();
    assert!(cache.lock().unwrap().is_empty());
}

// ───────────────────────── handle ─────────────────────────

#[test]
fn handle_identity() {
    let a: DayCounter = Actual360.into();
    let b = DayCounter::new(Actual360);
    assert_eq!(a, b);
    assert_ne!(a, DayCounter::new(Actual365Fixed));
    assert_eq!(a.to_string(), "Actual/360");
    assert_eq!(DayCounter::new(Thirty360::new(German)), DayCounter::new(Thirty360::new(Isda)));
    assert_eq!(
        DayCounter::new(Business252::new(Calendar::united_states(UsMarket::Nyse))).name(),
        "Business/252(New York stock exchange)"
    );
    let (d1, d2) = (date(2023, 1, 1), date(2023, 7, 1));
    assert_eq!(a.year_fraction_with_ref(d1, d2, d1, d2), a.year_fraction(d1, d2));
}

// ───────────────────────── properties ─────────────────────────

proptest! {
    #[test]
    fn business252_matches_direct_count(
        start in 40_000i32..46_000,
        span in 0i32..1_500,
    ) {
        let cal = Calendar::united_states(UsMarket::Settlement);
        let dc = Business252::new(cal.clone());
        let d1 = Date::from_serial(start).unwrap();
        let d2 = Date::from_serial(start + span).unwrap();
        prop_assert_eq!(dc.day_count(d1, d2), i64::from(cal.bizdays_between(d1, d2, true, false)));
    }

    #[test]
    fn actual_year_fraction_is_antisymmetric(a in 40_000i32..46_000, b in 40_000i32..46_000) {
        let dc = DayCounter::new(Actual365Fixed);
        let (d1, d2) = (Date::from_serial(a).unwrap(), Date::from_serial(b).unwrap());
        prop_assert!((dc.year_fraction(d1, d2) + dc.year_fraction(d2, d1)).abs() < 1e-12);
    }
}
