//! Benchmarks for the scoring engine.

use beepulse::model::{
    AuditScores, DeviceVitals, DnsRecords, MeasurementBundle, MetricSample, RealUserExperience,
    SecuritySignals, ThreatStatus,
};
use beepulse::scoring::PulseScorer;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn bundle(with_real_user: bool) -> MeasurementBundle {
    let mut bundle = MeasurementBundle::new(
        AuditScores::new(68, 92, 85, 78),
        SecuritySignals::new(ThreatStatus::Ok, "A", "B+")
            .with_missing_headers(["Content-Security-Policy", "X-Frame-Options", "Referrer-Policy"]),
    );
    bundle.dns = DnsRecords::complete(2);
    if with_real_user {
        let vitals = DeviceVitals::new(
            MetricSample::new(2400.0, 72),
            MetricSample::new(0.08, 88),
            MetricSample::new(210.0, 64),
        );
        bundle.real_user_experience = Some(RealUserExperience {
            mobile: vitals,
            desktop: vitals,
        });
    }
    bundle
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    for with_real_user in [false, true] {
        let input = bundle(with_real_user);
        group.bench_with_input(
            BenchmarkId::from_parameter(if with_real_user { "real-user" } else { "lab-only" }),
            &input,
            |b, input| b.iter(|| PulseScorer::score(black_box(input))),
        );
    }
    group.finish();
}

fn bench_parse_and_score(c: &mut Criterion) {
    let json = serde_json::to_string(&bundle(true)).unwrap_or_default();
    c.bench_function("parse_and_score", |b| {
        b.iter(|| {
            beepulse::pipeline::parse_bundle_str(black_box(&json))
                .map(|bundle| PulseScorer::score(&bundle))
        });
    });
}

criterion_group!(benches, bench_score, bench_parse_and_score);
criterion_main!(benches);
