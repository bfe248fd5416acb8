use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fincal_time::{
    Business252, BusinessDayConvention, Calendar, Date, DateGeneration, DayCountConvention,
    DayCounter, Frequency, ScheduleBuilder, UsMarket,
};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn calendar_benchmark(c: &mut Criterion) {
    let nyse = Calendar::united_states(UsMarket::Nyse);
    let start = date(2000, 1, 1);
    c.bench_function("nyse is_business_day 10y", |b| {
        b.iter(|| (0..3_653).filter(|&n| nyse.is_business_day(black_box(start + n))).count())
    });
    c.bench_function("settlement adjust modified following", |b| {
        let cal = Calendar::united_states(UsMarket::Settlement);
        b.iter(|| cal.adjust(black_box(date(2023, 12, 30)), BusinessDayConvention::ModifiedFollowing))
    });
}

fn schedule_benchmark(c: &mut Criterion) {
    let builder = ScheduleBuilder::new()
        .from(date(2020, 1, 15))
        .to(date(2050, 1, 15))
        .with_frequency(Frequency::Monthly)
        .with_calendar(Calendar::united_states(UsMarket::GovernmentBond))
        .with_convention(BusinessDayConvention::ModifiedFollowing)
        .with_rule(DateGeneration::Backward)
        .end_of_month(true);
    c.bench_function("30y monthly eom schedule", |b| b.iter(|| black_box(builder.clone()).build()));
}

fn business252_benchmark(c: &mut Criterion) {
    let (d1, d2) = (date(2005, 3, 17), date(2035, 11, 2));
    c.bench_function("business252 cold cache", |b| {
        b.iter(|| {
            let dc = Business252::new(Calendar::united_states(UsMarket::Nyse));
            dc.day_count(black_box(d1), black_box(d2))
        })
    });
    let warm = DayCounter::new(Business252::new(Calendar::united_states(UsMarket::Nyse)));
    warm.day_count(d1, d2);
    c.bench_function("business252 warm cache", |b| {
        b.iter(|| warm.year_fraction(black_box(d1), black_box(d2)))
    });
}

criterion_group!(benches, calendar_benchmark, schedule_benchmark, business252_benchmark);
criterion_main!(benches);
