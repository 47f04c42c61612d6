//! Benchmarks for weighted multivariate FTS training and forecasting.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fts_forecast::core::DataFrame;
use fts_forecast::models::{FtsModel, Variable, WeightedMVFTS, WeightedMVFTSConfig};
use fts_forecast::partition::{CategoricalPartitioner, GridPartitioner};
use fts_forecast::seasonal::{DatePart, DateTimeSeasonalIndexer, SeasonalIndexer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_hourly(n: usize) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(42);
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps = (0..n).map(|i| base + Duration::hours(i as i64)).collect();
    let load = (0..n)
        .map(|i| {
            let daily = (2.0 * std::f64::consts::PI * (i % 24) as f64 / 24.0).sin();
            100.0 + 40.0 * daily + rng.gen_range(-5.0..5.0)
        })
        .collect();
    DataFrame::builder()
        .datetime("date", timestamps)
        .numeric("load", load)
        .build()
        .unwrap()
}

fn make_model(order: usize) -> WeightedMVFTS {
    let indexer =
        DateTimeSeasonalIndexer::new("date", vec![DatePart::Hour], vec![None], "load").unwrap();
    let hour = Variable::seasonal("hour", indexer, 0, CategoricalPartitioner::new("H")).unwrap();
    let load = Variable::new("load", "load", GridPartitioner::new(20).unwrap());
    WeightedMVFTS::new(vec![hour, load.clone()], load)
        .unwrap()
        .with_config(WeightedMVFTSConfig::new().with_order(order))
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("wmvfts_train");

    for size in [24 * 30, 24 * 90, 24 * 365].iter() {
        let data = generate_hourly(*size);

        for order in [1, 2] {
            group.bench_with_input(
                BenchmarkId::new(format!("order{}", order), size),
                size,
                |b, _| {
                    b.iter(|| {
                        let mut model = make_model(order);
                        model.train(black_box(&data)).unwrap();
                        model
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("wmvfts_forecast");

    let data = generate_hourly(24 * 365);
    let mut model = make_model(1);
    model.train(&data).unwrap();

    for size in [24, 24 * 7, 24 * 30].iter() {
        let window = data.slice(0, *size).unwrap();
        group.bench_with_input(BenchmarkId::new("forecast", size), size, |b, _| {
            // unseen noisy patterns are expected; only the work is measured
            b.iter(|| model.forecast(black_box(&window)).ok())
        });
    }

    group.finish();
}

fn bench_indexer(c: &mut Criterion) {
    let data = generate_hourly(24 * 365);
    let indexer = DateTimeSeasonalIndexer::new(
        "date",
        vec![DatePart::Month, DatePart::DayOfWeek, DatePart::Hour],
        vec![None, None, Some(4)],
        "load",
    )
    .unwrap();

    c.bench_function("datetime_season_of_data", |b| {
        b.iter(|| indexer.get_season_of_data(black_box(&data)).unwrap())
    });
}

criterion_group!(benches, bench_training, bench_forecast, bench_indexer);
criterion_main!(benches);
