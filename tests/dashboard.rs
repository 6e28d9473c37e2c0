use renewable_trends::analyzer::{aggregate, compute_summary, forecast_range, goal_progress_for_region};
use renewable_trends::loader::load_series;
use renewable_trends::reports::{generate_correlations, generate_region_summary};
use renewable_trends::{AnalyzerConfig, TimeSeries};
use std::path::PathBuf;

fn bundled(file: &str, region: &str) -> TimeSeries {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file);
    let (series, report) = load_series(path, region).unwrap();
    assert_eq!(report.parse_errors, 0);
    assert_eq!(report.duplicate_years, 0);
    series
}

fn all_regions() -> Vec<TimeSeries> {
    vec![
        bundled("eu_data.csv", "EU"),
        bundled("india_data.csv", "India"),
        bundled("usa_data.csv", "USA"),
    ]
}

#[test]
fn bundled_data_covers_2014_to_2023() {
    for series in all_regions() {
        assert_eq!(series.len(), 10, "{}", series.region_id());
        assert_eq!(series.first().map(|(y, _)| y), Some(2014));
        assert_eq!(series.last().map(|(y, _)| y), Some(2023));
    }
}

#[test]
fn eu_growth_matches_dashboard_headline() {
    let eu = bundled("eu_data.csv", "EU");
    let summary = compute_summary(&eu, &AnalyzerConfig::default()).unwrap();
    assert!((summary.growth_pct - 30.555_555).abs() < 1e-4);
    let progress = goal_progress_for_region(&eu, &AnalyzerConfig::default()).unwrap();
    assert!(progress.progress_ratio > 0.5 && progress.progress_ratio < 1.0);
}

#[test]
fn all_mode_aggregates_every_region() {
    let config = AnalyzerConfig::default();
    let series = all_regions();
    let summaries: Vec<_> = series
        .iter()
        .map(|s| compute_summary(s, &config).unwrap())
        .collect();
    let agg = aggregate(&summaries).unwrap();
    let expected: f64 = summaries.iter().map(|s| s.estimated_energy_twh).sum();
    assert_eq!(agg.region_count, 3);
    assert!((agg.total_energy_twh - expected).abs() < 1e-9);

    let (rows, _) = generate_region_summary(&series, &config);
    assert_eq!(rows.len(), 4);
}

#[test]
fn forecasts_keep_rising_trend() {
    for series in all_regions() {
        let fc = forecast_range(&series, 7).unwrap();
        assert!(fc.slope > 0.0);
        assert_eq!(fc.predictions.len(), 7);
        let (_, last_observed) = series.last().unwrap();
        assert!(fc.predictions[6].1 > last_observed);
    }
}

#[test]
fn regions_are_positively_correlated() {
    let rows = generate_correlations(&all_regions());
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row.shared_years, 10);
        assert!(row.coefficient.parse::<f64>().unwrap() > 0.9);
    }
}
