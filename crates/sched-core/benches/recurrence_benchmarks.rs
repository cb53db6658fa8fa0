use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sched_core::date::CalendarDate;
use sched_core::recurrence::{next_date, RecurrenceRule};

fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

fn bench_rule_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_parsing");

    for rule in ["d 7", "y", "w 1,3,5", "m 1,15,-1", "m -2,-1,1,2,3,4,5,6,7,8,9,10 1,2,3,4,5,6,7,8,9,10,11,12"] {
        group.bench_with_input(BenchmarkId::from_parameter(rule), rule, |b, rule| {
            b.iter(|| black_box(rule).parse::<RecurrenceRule>().unwrap())
        });
    }
    group.finish();
}

fn bench_next_after(c: &mut Criterion) {
    let now = date("20240115");
    let mut group = c.benchmark_group("next_after");

    // Old start dates force daily and yearly rules to step a long way.
    let cases = [
        ("daily_stale_start", "d 1", "19900101"),
        ("yearly_stale_start", "y", "19040229"),
        ("weekly_single_day", "w 7", "20240101"),
        ("monthly_sparse", "m 29 2", "20240101"),
    ];
    for (name, repeat, start) in cases {
        let rule: RecurrenceRule = repeat.parse().unwrap();
        let start = date(start);
        group.bench_function(name, |b| {
            b.iter(|| rule.next_after(black_box(now), black_box(start)).unwrap())
        });
    }
    group.finish();
}

fn bench_exhausted_scan(c: &mut Criterion) {
    let now = date("20240115");

    c.bench_function("monthly_no_match_full_scan", |b| {
        b.iter(|| next_date(black_box(now), "20240101", "m 31 2").unwrap_err())
    });
}

criterion_group!(benches, bench_rule_parsing, bench_next_after, bench_exhausted_scan);
criterion_main!(benches);
