//! Integration tests for `Date`, `Period`, `Frequency` and the IMM helpers.

use fincal_time::date::{days_in_month, is_leap_year};
use fincal_time::{Date, Frequency, Month, Period, TimeUnit, Weekday, IMM};
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

// ───────────────────────── serial numbers ─────────────────────────

#[test]
fn known_serials() {
    assert_eq!(date(1901, 1, 1).serial(), 366);
    assert_eq!(date(2000, 2, 29).serial(), 36_584);
    assert_eq!(date(2023, 3, 5).serial(), 44_989);
    assert_eq!(date(2199, 12, 31).serial(), 109_573);
    assert_eq!(Date::from_serial(44_989).unwrap(), date(2023, 3, 5));
    assert_eq!(date(2023, 3, 5).weekday(), Weekday::Sunday);
    assert_eq!(date(2000, 2, 29).weekday(), Weekday::Tuesday);
}

#[test]
fn out_of_range_is_a_date_range_error() {
    let err = Date::from_ymd(1900, 6, 1).unwrap_err();
    assert_eq!(err.kind(), "DateRangeError");
    assert_eq!(Date::from_ymd(2023, 2, 29).unwrap_err().kind(), "DateRangeError");
    assert_eq!(Date::from_ymd(2023, 13, 1).unwrap_err().kind(), "DateRangeError");
    assert_eq!(Date::MAX.succ().unwrap_err().kind(), "DateRangeError");
    assert_eq!(Date::MIN.pred().unwrap_err().kind(), "DateRangeError");
    assert_eq!(
        Date::MAX.advance(1, TimeUnit::Years).unwrap_err().kind(),
        "DateRangeError"
    );
}

#[test]
fn day_of_year_and_month_end() {
    assert_eq!(date(2024, 12, 31).day_of_year(), 366);
    assert_eq!(date(2023, 12, 31).day_of_year(), 365);
    assert_eq!(date(2023, 3, 1).day_of_year(), 60);
    assert_eq!(days_in_month(2024, Month::February), 29);
    assert_eq!(days_in_month(2100, Month::February), 28);
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(date(2100, 2, 28).is_end_of_month());
}

#[test]
fn month_and_year_arithmetic_clamps() {
    let d = date(2020, 2, 29);
    assert_eq!(d.advance(1, TimeUnit::Years).unwrap(), date(2021, 2, 28));
    assert_eq!(d.advance(4, TimeUnit::Years).unwrap(), date(2024, 2, 29));
    assert_eq!(date(2023, 3, 31).advance(-1, TimeUnit::Months).unwrap(), date(2023, 2, 28));
    assert_eq!(date(2023, 10, 31).advance(3, TimeUnit::Months).unwrap(), date(2024, 1, 31));
    assert_eq!(date(2023, 12, 25).add_period(Period::new(2, TimeUnit::Weeks)).unwrap(), date(2024, 1, 8));
}

// ───────────────────────── periods ─────────────────────────

#[test]
fn period_comparison() {
    let m = |n| Period::new(n, TimeUnit::Months);
    let y = |n| Period::new(n, TimeUnit::Years);
    let d = |n| Period::new(n, TimeUnit::Days);
    let w = |n| Period::new(n, TimeUnit::Weeks);
    assert_eq!(m(12), y(1));
    assert_eq!(w(2), d(14));
    assert!(m(11) < y(1));
    assert!(d(27) < m(1));
    assert!(d(367) > y(1));
    assert!(m(1).partial_cmp(&d(30)).is_none());
    assert!(y(1).partial_cmp(&d(365)).is_none());
    assert!(m(1) != d(30));
}

#[test]
fn period_arithmetic_and_display() {
    let p = Period::new(1, TimeUnit::Years)
        .checked_add(Period::new(6, TimeUnit::Months))
        .unwrap();
    assert_eq!(p.to_string(), "1Y6M");
    assert_eq!(Period::new(17, TimeUnit::Days).to_string(), "2W3D");
    assert_eq!(Period::new(3, TimeUnit::Months).to_string(), "3M");
    assert_eq!(
        Period::new(3, TimeUnit::Weeks)
            .checked_sub(Period::new(2, TimeUnit::Days))
            .unwrap(),
        Period::new(19, TimeUnit::Days)
    );
    assert_eq!(
        Period::new(0, TimeUnit::Days).checked_add(Period::new(2, TimeUnit::Years)).unwrap().unit,
        TimeUnit::Years
    );
    let err = Period::new(1, TimeUnit::Months)
        .checked_add(Period::new(1, TimeUnit::Weeks))
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidPeriodError");
    assert_eq!(
        Period::new(1, TimeUnit::Years).checked_div(4).unwrap(),
        Period::new(3, TimeUnit::Months)
    );
    assert!(Period::new(1, TimeUnit::Years).checked_div(5).is_err());
    assert_eq!(-Period::new(3, TimeUnit::Months), Period::new(-3, TimeUnit::Months));
    assert_eq!(Period::new(3, TimeUnit::Months) * 4, Period::new(1, TimeUnit::Years));
    assert_eq!(Period::new(18, TimeUnit::Months).years().unwrap(), 1.5);
    assert!(Period::new(1, TimeUnit::Weeks).months().is_err());
}

#[test]
fn frequency_mapping() {
    let cases = [
        (Frequency::Annual, Period::new(1, TimeUnit::Years)),
        (Frequency::Semiannual, Period::new(6, TimeUnit::Months)),
        (Frequency::EveryFourthMonth, Period::new(4, TimeUnit::Months)),
        (Frequency::Quarterly, Period::new(3, TimeUnit::Months)),
        (Frequency::Bimonthly, Period::new(2, TimeUnit::Months)),
        (Frequency::Monthly, Period::new(1, TimeUnit::Months)),
        (Frequency::EveryFourthWeek, Period::new(4, TimeUnit::Weeks)),
        (Frequency::Biweekly, Period::new(2, TimeUnit::Weeks)),
        (Frequency::Weekly, Period::new(1, TimeUnit::Weeks)),
        (Frequency::Daily, Period::new(1, TimeUnit::Days)),
    ];
    for (freq, period) in cases {
        let p = Period::from_frequency(freq).unwrap();
        assert_eq!(p.length, period.length, "{freq}");
        assert_eq!(p.unit, period.unit, "{freq}");
        assert_eq!(p.frequency(), freq);
    }
    let once = Period::from_frequency(Frequency::Once).unwrap();
    assert_eq!((once.length, once.unit), (0, TimeUnit::Years));
    let none = Period::from_frequency(Frequency::NoFrequency).unwrap();
    assert_eq!((none.length, none.unit), (0, TimeUnit::Days));
    assert_eq!(
        Period::from_frequency(Frequency::OtherFrequency).unwrap_err().kind(),
        "InvalidPeriodError"
    );
    assert_eq!(Period::new(5, TimeUnit::Months).frequency(), Frequency::OtherFrequency);
    assert_eq!("semiannual".parse::<Frequency>().unwrap(), Frequency::Semiannual);
}

// ───────────────────────── IMM ─────────────────────────

#[test]
fn imm_dates() {
    assert!(IMM::is_imm_date(date(2023, 6, 21), true));
    assert!(IMM::is_imm_date(date(2023, 7, 19), false));
    assert!(!IMM::is_imm_date(date(2023, 7, 19), true));
    assert!(!IMM::is_imm_date(date(2023, 6, 14), false));

    assert_eq!(IMM::next_date(date(2023, 3, 14), true).unwrap(), date(2023, 3, 15));
    assert_eq!(IMM::next_date(date(2023, 3, 15), true).unwrap(), date(2023, 6, 21));
    assert_eq!(IMM::next_date(date(2023, 3, 16), true).unwrap(), date(2023, 6, 21));
    assert_eq!(IMM::next_date(date(2023, 12, 25), false).unwrap(), date(2024, 1, 17));

    assert_eq!(IMM::code(date(2023, 6, 21)).as_deref(), Some("M3"));
    assert_eq!(IMM::code(date(2023, 6, 20)), None);
}

// ───────────────────────── properties ─────────────────────────

proptest! {
    #[test]
    fn serial_ymd_roundtrip(serial in Date::MIN.serial()..=Date::MAX.serial()) {
        let d = Date::from_serial(serial).unwrap();
        let back = Date::from_ymd(d.year(), d.month().number(), d.day_of_month()).unwrap();
        prop_assert_eq!(back, d);
        prop_assert_eq!(d.to_string().parse::<Date>().unwrap(), d);
    }

    #[test]
    fn successive_serials_are_successive_days(serial in Date::MIN.serial()..Date::MAX.serial()) {
        let d = Date::from_serial(serial).unwrap();
        let next = d.succ().unwrap();
        prop_assert_eq!(next - d, 1);
        prop_assert_eq!(next.weekday().ordinal() % 7, (d.weekday().ordinal() + 1) % 7);
        if d.is_end_of_month() {
            prop_assert_eq!(next.day_of_month(), 1);
        } else {
            prop_assert_eq!(next.day_of_month(), d.day_of_month() + 1);
            prop_assert_eq!(next.month(), d.month());
        }
    }

    #[test]
    fn leap_years_are_consistent(year in 1901u16..=2199) {
        let feb = days_in_month(year, Month::February);
        prop_assert_eq!(feb == 29, is_leap_year(year));
        let dec31 = date(year, 12, 31);
        prop_assert_eq!(dec31.day_of_year(), if is_leap_year(year) { 366 } else { 365 });
    }
}

#[cfg(feature = "serde")]
#[test]
fn serde_roundtrip() {
    let d = date(2024, 2, 29);
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(json, d.serial().to_string());
    assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), d);
    assert!(serde_json::from_str::<Date>("12").is_err());

    let p = Period::new(6, TimeUnit::Months);
    let back: Period = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
    assert_eq!((back.length, back.unit), (6, TimeUnit::Months));
}
