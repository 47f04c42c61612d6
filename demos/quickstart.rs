//! Quickstart example demonstrating basic usage of fts-forecast.
//!
//! Run with: cargo run --example quickstart

use chrono::{Duration, TimeZone, Utc};
use fts_forecast::core::DataFrame;
use fts_forecast::models::{
    FtsModel, MissingPatternPolicy, Variable, WeightedMVFTS, WeightedMVFTSConfig,
};
use fts_forecast::partition::{CategoricalPartitioner, GridPartitioner};
use fts_forecast::seasonal::{DatePart, DateTimeSeasonalIndexer, SeasonalIndexer};

fn main() {
    println!("=== fts-forecast Quickstart ===\n");

    // 1. Hourly load with a daily cycle
    let n = 24 * 21;
    let timestamps: Vec<_> = (0..n)
        .map(|i| {
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(i as i64)
        })
        .collect();
    let load: Vec<f64> = (0..n)
        .map(|i| {
            let daily = 30.0 * (2.0 * std::f64::consts::PI * (i % 24) as f64 / 24.0).sin();
            let wiggle = 2.0 * (i as f64 * 0.7).cos();
            100.0 + daily + wiggle
        })
        .collect();

    let data = DataFrame::builder()
        .datetime("date", timestamps)
        .numeric("load", load)
        .build()
        .unwrap();
    println!("Created frame with {} rows", data.len());

    // 2. Season tuples from the date column
    let indexer = DateTimeSeasonalIndexer::new(
        "date",
        vec![DatePart::DayOfWeek, DatePart::Hour],
        vec![None, Some(6)],
        "load",
    )
    .unwrap();
    let seasons = indexer.get_season_of_data(&data.slice(0, 3).unwrap()).unwrap();
    println!("First seasons [day_of_week, hour/6]: {:?}", seasons);

    // 3. Train a weighted multivariate FTS on (hour bucket, load)
    let hour = Variable::seasonal("hour", indexer, 1, CategoricalPartitioner::new("H")).unwrap();
    let load = Variable::new("load", "load", GridPartitioner::new(12).unwrap());

    let config = WeightedMVFTSConfig::new()
        .with_order(1)
        .with_missing_pattern(MissingPatternPolicy::Persistence);
    let mut model = WeightedMVFTS::new(vec![hour, load.clone()], load)
        .unwrap()
        .with_config(config);

    let split = n - 24;
    model.train(&data.slice(0, split).unwrap()).unwrap();
    println!("\n--- {} ---", model.name());
    println!("Learned {} relationship groups", model.len());

    // 4. One-step-ahead forecasts over the held-out day
    println!("\n--- One-step forecasts ---");
    let test = data.slice(split - 1, n).unwrap();
    let forecast = model.forecast(&test).unwrap();
    let actual = test.numeric("load").unwrap();

    let mut abs_error = 0.0;
    for k in 0..24 {
        println!(
            "  h={:>2}: forecast {:>8.3}  actual {:>8.3}",
            k,
            forecast[k],
            actual[k + 1]
        );
        abs_error += (forecast[k] - actual[k + 1]).abs();
    }
    println!("\nMAE: {:.4}", abs_error / 24.0);

    // 5. Persist and restore
    let json = model.to_json().unwrap();
    let restored = WeightedMVFTS::from_json(&json).unwrap();
    println!(
        "Restored model with {} groups ({} bytes)",
        restored.len(),
        json.len()
    );
}
