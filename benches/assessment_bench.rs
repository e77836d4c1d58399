//! Performance benchmarks for tape assessment

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tape_quality::analysis::products::{ProductCatalog, SUPERLINK_PHASE};
use tape_quality::features::statistics::{piecewise_statistics, Statistic};
use tape_quality::preprocessing::tape_section::find_tape_bounds;
use tape_quality::{assess_tape, AssessmentConfig, MeasurementSeries};

/// 200 m of tape at 1 mm resolution with periodic drop-outs
fn synthetic_tape() -> MeasurementSeries {
    let n = 200_001;
    let positions: Vec<f64> = (0..n).map(|i| i as f64 * 1e-3).collect();
    let values: Vec<f64> = (0..n)
        .map(|i| {
            let ripple = 3.0 * (i as f64 * 0.01).sin();
            match i % 25_000 {
                0..=4 => 40.0,
                _ => 150.0 + ripple,
            }
        })
        .collect();
    MeasurementSeries::from_columns(&positions, &values).unwrap()
}

fn bench_assess_tape(c: &mut Criterion) {
    let series = synthetic_tape();
    let spec = ProductCatalog::builtin().get(SUPERLINK_PHASE).unwrap();
    let config = AssessmentConfig::default();

    c.bench_function("assess_tape_200m", |b| {
        b.iter(|| {
            let _ = assess_tape(
                black_box(series.clone()),
                "bench",
                black_box(spec),
                black_box(&config),
            );
        });
    });
}

fn bench_piecewise_average(c: &mut Criterion) {
    let series = synthetic_tape();
    let bounds = find_tape_bounds(&series, 108.0).unwrap();

    c.bench_function("piecewise_average_1m", |b| {
        b.iter(|| {
            let _ = piecewise_statistics(
                black_box(&series),
                black_box(&bounds),
                Statistic::Average,
                Some(1.0),
            );
        });
    });
}

criterion_group!(benches, bench_assess_tape, bench_piecewise_average);
criterion_main!(benches);
