//! Performance benchmarks for the casual pay engine.
//!
//! Covers the per-shift calculation, the tax schedule, and the full pipeline
//! at increasing shift counts.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use casual_pay::calculation::{
    DateWindow, TimelineOptions, build_timeline, calculate_shift, calculate_tax,
};
use casual_pay::config::{ConfigLoader, ReferenceData};
use casual_pay::models::{PayCycle, RawShift, TaxProfile, UserProfile};

fn load_fixtures() -> (ReferenceData, UserProfile) {
    let loader = ConfigLoader::load("./config/casual").expect("Failed to load config");
    let profile = ConfigLoader::load_user("./config/user.yaml").expect("Failed to load user");
    (loader.data().clone(), profile)
}

/// Generates `count` shifts spread over both fixture employers, including
/// evening, weekend and overnight shifts.
fn create_shifts(count: usize) -> Vec<RawShift> {
    let first = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let patterns = [
        ("emp_cafe", "Harbour Cafe", (9, 0), (17, 0)),
        ("emp_cafe", "Harbour Cafe", (16, 0), (21, 0)),
        ("emp_bar", "Corner Bar", (22, 0), (3, 0)),
        ("emp_bar", "Corner Bar", (18, 0), (23, 30)),
    ];

    (0..count)
        .map(|i| {
            let (employer_id, employer, start, end) = patterns[i % patterns.len()];
            RawShift {
                date: first + Duration::days((i / 2) as i64),
                employer_id: employer_id.to_string(),
                employer: employer.to_string(),
                start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
                end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            }
        })
        .collect()
}

fn bench_single_shift(c: &mut Criterion) {
    let (data, profile) = load_fixtures();
    let shift = &create_shifts(2)[1];
    let employer = profile.employer(&shift.employer_id).unwrap();

    c.bench_function("single_shift", |b| {
        b.iter(|| black_box(calculate_shift(black_box(shift), employer, &data)))
    });
}

fn bench_tax(c: &mut Criterion) {
    let profile = TaxProfile::default();
    let gross = Decimal::new(123_456, 2);

    let mut group = c.benchmark_group("tax");
    for cycle in [PayCycle::Weekly, PayCycle::Fortnightly, PayCycle::Monthly] {
        group.bench_with_input(BenchmarkId::from_parameter(cycle), &cycle, |b, cycle| {
            b.iter(|| black_box(calculate_tax(black_box(gross), *cycle, &profile)))
        });
    }
    group.finish();
}

fn bench_timeline_scaling(c: &mut Criterion) {
    let (data, profile) = load_fixtures();
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let options = TimelineOptions {
        window: Some(DateWindow::around(today, 3, 1)),
        apply_tax: true,
    };

    let mut group = c.benchmark_group("timeline");
    for shift_count in [10usize, 100, 1000].iter() {
        let shifts = create_shifts(*shift_count);
        group.throughput(Throughput::Elements(*shift_count as u64));
        group.bench_with_input(
            BenchmarkId::new("shifts", shift_count),
            &shifts,
            |b, shifts| {
                b.iter(|| black_box(build_timeline(shifts, &profile.employers, &data, &options)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_single_shift, bench_tax, bench_timeline_scaling);
criterion_main!(benches);
