//! Integration tests combining seasonal indexers with the weighted model.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fts_forecast::core::DataFrame;
use fts_forecast::models::{
    FtsModel, MissingPatternPolicy, Variable, WeightedMVFTS, WeightedMVFTSConfig,
};
use fts_forecast::partition::{CategoricalPartitioner, GridPartitioner};
use fts_forecast::seasonal::{
    DataFrameSeasonalIndexer, DatePart, DateTimeSeasonalIndexer, SeasonValue, SeasonalIndexer,
    SeasonalIndexerKind,
};
use fts_forecast::ForecastError;

fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n).map(|i| base + Duration::hours(i as i64)).collect()
}

/// Hourly load with a strong daily profile.
fn hourly_load(n: usize) -> DataFrame {
    let timestamps = make_timestamps(n);
    let load: Vec<f64> = (0..n)
        .map(|i| {
            let hour = (i % 24) as f64;
            100.0 + 50.0 * (2.0 * std::f64::consts::PI * hour / 24.0).sin()
        })
        .collect();
    DataFrame::builder()
        .datetime("date", timestamps)
        .numeric("load", load)
        .build()
        .unwrap()
}

fn hour_indexer() -> DateTimeSeasonalIndexer {
    DateTimeSeasonalIndexer::new("date", vec![DatePart::Hour], vec![Some(3)], "load").unwrap()
}

fn seasonal_model() -> WeightedMVFTS {
    let hour = Variable::seasonal("hour", hour_indexer(), 0, CategoricalPartitioner::new("H"))
        .unwrap();
    let load = Variable::new("load", "load", GridPartitioner::new(10).unwrap());
    WeightedMVFTS::new(vec![hour, load.clone()], load).unwrap()
}

#[test]
fn data_frame_indexer_matches_on_every_dimension() {
    let df = DataFrame::builder()
        .numeric("month", vec![3.0, 3.0])
        .numeric("hour", vec![9.0, 12.0])
        .numeric("load", vec![1.0, 2.0])
        .build()
        .unwrap();
    let indexer = DataFrameSeasonalIndexer::new(
        vec!["month".to_string(), "hour".to_string()],
        vec![None, Some(4)],
        "load",
    )
    .unwrap();

    let q = |m: i64, h: i64| vec![SeasonValue::Int(m), SeasonValue::Int(h)];
    let hit = indexer.get_data_by_season(&df, &[q(3, 2)]).unwrap();
    assert_eq!(hit.numeric("load").unwrap(), &[1.0]);
    let other = indexer.get_data_by_season(&df, &[q(3, 3)]).unwrap();
    assert_eq!(other.numeric("load").unwrap(), &[2.0]);
}

#[test]
fn date_time_indexer_rejects_reverse_operations() {
    let indexer: SeasonalIndexerKind = hour_indexer().into();
    let df = hourly_load(4);
    let season = vec![SeasonValue::Int(0)];

    assert!(matches!(
        indexer.get_season_by_index(1),
        Err(ForecastError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        indexer.get_index_by_season(&season),
        Err(ForecastError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        indexer.get_data_by_season(&df, &[season]),
        Err(ForecastError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        indexer.set_data(df, vec![0.0; 4]),
        Err(ForecastError::UnsupportedOperation { .. })
    ));
}

#[test]
fn seasonal_model_trains_and_forecasts() {
    let data = hourly_load(24 * 14);
    let mut model = seasonal_model();
    model.train(&data).unwrap();

    assert!(model.is_trained());
    assert!(!model.is_empty());
    assert!(model.flrgs().keys().all(|k| k.starts_with("hour:H")));

    // Forecast the day after training using the last training day as windows.
    let last_day = data.slice(data.len() - 24, data.len()).unwrap();
    let forecast = model.forecast(&last_day).unwrap();
    assert_eq!(forecast.len(), 24);

    // The profile repeats exactly, so every forecast lands near the next value.
    let load = last_day.numeric("load").unwrap();
    for k in 0..23 {
        let actual = load[k + 1];
        assert!(
            (forecast[k] - actual).abs() < 20.0,
            "forecast {} too far from {} at step {}",
            forecast[k],
            actual,
            k
        );
    }
}

#[test]
fn unseen_season_uses_configured_policy() {
    // Training covers only the first twelve hours of each day.
    let full = hourly_load(24 * 7);
    let rows: Vec<usize> = (0..full.len()).filter(|i| i % 24 < 12).collect();
    let morning = full.take(&rows).unwrap();

    let mut model = seasonal_model();
    model.train(&morning).unwrap();

    let evening = full.slice(18, 20).unwrap();
    assert!(matches!(
        model.forecast(&evening),
        Err(ForecastError::UnknownPattern(_))
    ));

    let mut lenient = seasonal_model().with_config(
        WeightedMVFTSConfig::new().with_missing_pattern(MissingPatternPolicy::Persistence),
    );
    lenient.train(&morning).unwrap();
    let forecast = lenient.forecast(&evening).unwrap();
    assert_eq!(forecast, evening.numeric("load").unwrap().to_vec());
}

#[test]
fn persisted_model_forecasts_identically() {
    let data = hourly_load(24 * 7);
    let mut model = seasonal_model()
        .with_config(WeightedMVFTSConfig::new().with_order(2).with_alpha_cut(0.1));
    model.train(&data).unwrap();

    let json = model.to_json().unwrap();
    let restored = WeightedMVFTS::from_json(&json).unwrap();

    let query = data.slice(24, 48).unwrap();
    assert_eq!(restored.order(), 2);
    assert_eq!(restored.forecast(&query), model.forecast(&query));
}
