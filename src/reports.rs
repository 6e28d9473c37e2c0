// Report builders: run the analyzer over every loaded region and turn its
// records into display rows. A failure for one region is logged and that
// region is left out of the affected report.
use crate::analyzer::{
    aggregate, compute_summary, correlate, forecast_range, goal_progress_for_region,
    year_over_year,
};
use crate::config::AnalyzerConfig;
use crate::types::{
    CorrelationRow, DashboardSummary, ForecastRow, GeoSite, RegionSummaryRow, SiteRankingRow,
    SummaryMetrics, TimeSeries, TrendRow,
};
use crate::util::{format_number, format_percent};
use tracing::warn;

pub const AGGREGATE_LABEL: &str = "ALL";

pub fn generate_region_summary(
    series: &[TimeSeries],
    config: &AnalyzerConfig,
) -> (Vec<RegionSummaryRow>, Vec<SummaryMetrics>) {
    let mut rows = Vec::new();
    let mut summaries = Vec::new();
    for s in series {
        let summary = match compute_summary(s, config) {
            Ok(m) => m,
            Err(e) => {
                warn!(region = s.region_id(), error = %e, "skipping region summary");
                continue;
            }
        };
        let (target, goal_progress) = match goal_progress_for_region(s, config) {
            Ok(g) => (
                format_number(g.target_pct, 1),
                format_percent(g.progress_ratio),
            ),
            Err(e) => {
                warn!(region = s.region_id(), error = %e, "no goal progress");
                ("-".to_string(), "-".to_string())
            }
        };
        rows.push(RegionSummaryRow {
            region: summary.region_id.clone(),
            latest_share: format_number(summary.latest_share, 2),
            average_share: format_number(summary.average_share, 2),
            growth_pct: format_number(summary.growth_pct, 1),
            energy_twh: format_number(summary.estimated_energy_twh, 1),
            co2_saved_mt: format_number(summary.estimated_co2_saved_mt, 2),
            target,
            goal_progress,
        });
        summaries.push(summary);
    }

    // Multiple regions get an extra combined row.
    if summaries.len() > 1 {
        if let Ok(agg) = aggregate(&summaries) {
            rows.push(RegionSummaryRow {
                region: AGGREGATE_LABEL.to_string(),
                latest_share: format_number(agg.avg_latest_share, 2),
                average_share: "-".to_string(),
                growth_pct: format_number(agg.avg_growth_pct, 1),
                energy_twh: format_number(agg.total_energy_twh, 1),
                co2_saved_mt: format_number(agg.total_co2_saved_mt, 2),
                target: "-".to_string(),
                goal_progress: "-".to_string(),
            });
        }
    }
    (rows, summaries)
}

pub fn generate_trends(series: &[TimeSeries]) -> Vec<TrendRow> {
    let mut rows = Vec::new();
    for s in series {
        let changes = match year_over_year(s) {
            Ok(c) => c,
            Err(e) => {
                warn!(region = s.region_id(), error = %e, "skipping trend");
                continue;
            }
        };
        if let Some((year, share)) = s.first() {
            rows.push(TrendRow {
                region: s.region_id().to_string(),
                year,
                share: format_number(share, 2),
                yoy_change: "-".to_string(),
            });
        }
        rows.extend(changes.into_iter().map(|c| TrendRow {
            region: s.region_id().to_string(),
            year: c.year,
            share: format_number(c.share, 2),
            yoy_change: format_number(c.change_pct, 2),
        }));
    }
    rows
}

pub fn generate_forecasts(series: &[TimeSeries], horizon: u32) -> Vec<ForecastRow> {
    let mut rows = Vec::new();
    for s in series {
        let fc = match forecast_range(s, horizon) {
            Ok(f) => f,
            Err(e) => {
                warn!(region = s.region_id(), error = %e, "skipping forecast");
                continue;
            }
        };
        let slope = format_number(fc.slope, 3);
        let r_squared = format_number(fc.r_squared, 3);
        rows.extend(fc.predictions.iter().map(|(year, predicted)| ForecastRow {
            region: fc.region_id.clone(),
            year: *year,
            predicted_share: format_number(*predicted, 2),
            slope: slope.clone(),
            r_squared: r_squared.clone(),
        }));
    }
    rows
}

/// Pearson correlation for every unordered pair of regions.
pub fn generate_correlations(series: &[TimeSeries]) -> Vec<CorrelationRow> {
    let mut rows = Vec::new();
    for (i, a) in series.iter().enumerate() {
        for b in &series[i + 1..] {
            match correlate(a, b) {
                Ok(c) => rows.push(CorrelationRow {
                    region_a: c.region_a,
                    region_b: c.region_b,
                    shared_years: c.years.len(),
                    coefficient: format_number(c.coefficient, 3),
                }),
                Err(e) => warn!(
                    region_a = a.region_id(),
                    region_b = b.region_id(),
                    error = %e,
                    "skipping correlation"
                ),
            }
        }
    }
    rows
}

/// Rows for sites already ranked by composite score.
pub fn generate_site_ranking(ranked: &[GeoSite]) -> Vec<SiteRankingRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, site)| SiteRankingRow {
            rank: idx + 1,
            name: site.name.clone(),
            energy_type: site.energy_type.clone(),
            potential_score: format_number(site.potential_score, 1),
            deployment_index: format_number(site.deployment_index, 1),
            composite_score: site
                .composite_score
                .map(|c| format_number(c, 2))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn generate_summary(
    series: &[TimeSeries],
    summaries: &[SummaryMetrics],
    generated_on: chrono::NaiveDate,
) -> DashboardSummary {
    let aggregate = match aggregate(summaries) {
        Ok(a) => Some(a),
        Err(e) => {
            warn!(error = %e, "no aggregate metrics");
            None
        }
    };
    DashboardSummary {
        generated_on,
        regions: series.iter().map(|s| s.region_id().to_string()).collect(),
        aggregate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rank_sites;
    use crate::sites::reference_sites;

    fn sample() -> Vec<TimeSeries> {
        vec![
            TimeSeries::new("EU", vec![(2014, 18.0), (2018, 20.5), (2023, 24.0)]).unwrap(),
            TimeSeries::new("India", vec![(2014, 13.0), (2018, 17.0), (2023, 22.4)]).unwrap(),
        ]
    }

    #[test]
    fn region_summary_includes_aggregate_row() {
        let (rows, summaries) = generate_region_summary(&sample(), &AnalyzerConfig::default());
        assert_eq!(summaries.len(), 2);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].region, "EU");
        assert_eq!(rows[0].growth_pct, "33.3");
        assert_eq!(rows[0].target, "40.0");
        assert_eq!(rows[0].goal_progress, "60.0%");
        assert_eq!(rows[2].region, AGGREGATE_LABEL);
        assert_eq!(rows[2].energy_twh, "696.0");
    }

    #[test]
    fn region_summary_skips_failing_regions() {
        let mut series = sample();
        series.push(TimeSeries::new("USA", vec![(2014, 0.0), (2023, 21.0)]).unwrap());
        series.push(TimeSeries::new("Mars", vec![(2014, 1.0), (2023, 2.0)]).unwrap());
        let (rows, summaries) = generate_region_summary(&series, &AnalyzerConfig::default());
        assert_eq!(summaries.len(), 3);
        assert!(rows.iter().all(|r| r.region != "USA"));
        let mars = rows.iter().find(|r| r.region == "Mars").unwrap();
        assert_eq!(mars.goal_progress, "-");
    }

    #[test]
    fn single_region_has_no_aggregate_row() {
        let series = sample();
        let (rows, _) = generate_region_summary(&series[..1], &AnalyzerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn trends_start_with_baseline_row() {
        let rows = generate_trends(&sample());
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].yoy_change, "-");
        assert_eq!(rows[1].year, 2018);
        assert_eq!(rows[1].yoy_change, "13.89");
    }

    #[test]
    fn trend_changes_use_thousands_separators() {
        let series =
            vec![TimeSeries::new("USA", vec![(2020, 1.0), (2021, 20.0), (2022, 10.0)]).unwrap()];
        let rows = generate_trends(&series);
        assert_eq!(rows[1].yoy_change, "1,900.00");
        assert_eq!(rows[2].yoy_change, "-50.00");
    }

    #[test]
    fn forecasts_cover_horizon_per_region() {
        let rows = generate_forecasts(&sample(), 7);
        assert_eq!(rows.len(), 14);
        assert_eq!(rows[0].year, 2024);
        assert_eq!(rows[6].year, 2030);
        assert_eq!(rows[7].region, "India");
    }

    #[test]
    fn correlations_are_pairwise() {
        let mut series = sample();
        series.push(TimeSeries::new("USA", vec![(2014, 13.0), (2023, 21.0)]).unwrap());
        let rows = generate_correlations(&series);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].region_a, "EU");
        assert_eq!(rows[0].region_b, "India");
        assert_eq!(rows[0].shared_years, 3);
    }

    #[test]
    fn site_ranking_numbers_from_one() {
        let ranked = rank_sites(reference_sites(), 0.6).unwrap();
        let rows = generate_site_ranking(&ranked);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].composite_score, "9.10");
        assert_eq!(rows.len(), ranked.len());
    }

    #[test]
    fn summary_without_regions_has_no_aggregate() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let summary = generate_summary(&[], &[], date);
        assert!(summary.aggregate.is_none());
        assert!(summary.regions.is_empty());
    }
}
