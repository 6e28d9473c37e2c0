//! Pure trend computations over renewable-share time series.
//!
//! Every function here is stateless: inputs arrive as explicit arguments,
//! outputs are plain records, and invalid input is reported through
//! [`AnalysisError`] rather than a sentinel value. Nothing in this module
//! performs I/O or logging.
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::types::{
    AggregateMetrics, Correlation, ForecastResult, GeoSite, GoalProgress, InstallationSimulation,
    SummaryMetrics, TimeSeries, YearOverYear,
};
use crate::util::average;
use std::cmp::Ordering;

const HOURS_PER_YEAR: f64 = 8760.0;
const MWH_PER_TWH: f64 = 1e6;

fn require_points(actual: usize, required: usize) -> Result<()> {
    if actual < required {
        return Err(AnalysisError::InsufficientData { required, actual });
    }
    Ok(())
}

/// Summary indicators for one region.
///
/// Energy and CO2 figures are derived from the latest share through the
/// configured scale factors.
pub fn compute_summary(series: &TimeSeries, config: &AnalyzerConfig) -> Result<SummaryMetrics> {
    require_points(series.len(), 2)?;
    let points = series.points();
    let first_share = points[0].1;
    let latest_share = points[points.len() - 1].1;
    if first_share == 0.0 {
        return Err(AnalysisError::DivisionByZero(format!(
            "growth of `{}` from a zero first share",
            series.region_id()
        )));
    }
    let shares: Vec<f64> = series.shares().collect();
    let growth_pct = (latest_share - first_share) / first_share * 100.0;
    let estimated_energy_twh = latest_share * config.energy_scale_twh_per_percent;
    Ok(SummaryMetrics {
        region_id: series.region_id().to_string(),
        latest_share,
        first_share,
        average_share: average(&shares),
        growth_pct,
        estimated_energy_twh,
        estimated_co2_saved_mt: estimated_energy_twh * config.co2_factor_mt_per_twh,
    })
}

pub fn compute_goal_progress(series: &TimeSeries, target_pct: f64) -> Result<GoalProgress> {
    if !target_pct.is_finite() || target_pct <= 0.0 {
        return Err(AnalysisError::InvalidTarget(target_pct));
    }
    let (_, current_share) = series.last().ok_or(AnalysisError::InsufficientData {
        required: 1,
        actual: 0,
    })?;
    Ok(GoalProgress {
        current_share,
        target_pct,
        progress_ratio: (current_share / target_pct).min(1.0),
    })
}

/// Goal progress against the target configured for the series' region.
pub fn goal_progress_for_region(
    series: &TimeSeries,
    config: &AnalyzerConfig,
) -> Result<GoalProgress> {
    let target = config
        .target_for(series.region_id())
        .ok_or_else(|| AnalysisError::UnknownRegion(series.region_id().to_string()))?;
    compute_goal_progress(series, target)
}

/// Ordinary least-squares fit of `share = slope * year + intercept`.
///
/// Returns `(slope, intercept)`. Deviations are taken from the means before
/// multiplying so year magnitudes around 2000 do not cost precision.
pub fn fit_linear(points: &[(i32, f64)]) -> Result<(f64, f64)> {
    require_points(points.len(), 2)?;
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| *x as f64).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| *y).sum::<f64>() / n;
    let (mut cov, mut var) = (0.0, 0.0);
    for (x, y) in points {
        let dx = *x as f64 - mean_x;
        cov += dx * (y - mean_y);
        var += dx * dx;
    }
    if var == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "all observed years are identical".to_string(),
        ));
    }
    let slope = cov / var;
    Ok((slope, mean_y - slope * mean_x))
}

fn r_squared(points: &[(i32, f64)], slope: f64, intercept: f64) -> f64 {
    let mean_y = points.iter().map(|(_, y)| *y).sum::<f64>() / points.len() as f64;
    let (mut ss_res, mut ss_tot) = (0.0, 0.0);
    for (x, y) in points {
        let fitted = slope * *x as f64 + intercept;
        ss_res += (y - fitted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }
    // A flat series is fitted exactly by a flat line.
    if ss_tot == 0.0 {
        return 1.0;
    }
    1.0 - ss_res / ss_tot
}

/// Fit a line to the observed points and evaluate it at `future_years`.
///
/// Predictions are deliberately left unclamped.
pub fn forecast(series: &TimeSeries, future_years: &[i32]) -> Result<ForecastResult> {
    if future_years.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let (slope, intercept) = fit_linear(series.points())?;
    let predictions = future_years
        .iter()
        .map(|&year| (year, slope * year as f64 + intercept))
        .collect();
    Ok(ForecastResult {
        region_id: series.region_id().to_string(),
        slope,
        intercept,
        r_squared: r_squared(series.points(), slope, intercept),
        predictions,
    })
}

/// Forecast the `horizon` years immediately after the last observation.
pub fn forecast_range(series: &TimeSeries, horizon: u32) -> Result<ForecastResult> {
    require_points(series.len(), 2)?;
    let (last_year, _) = series.last().ok_or(AnalysisError::InsufficientData {
        required: 2,
        actual: 0,
    })?;
    let bad_horizon = || AnalysisError::InvalidParameter {
        name: "horizon",
        value: horizon as f64,
    };
    // Years past i32::MAX cannot be represented.
    let span = i32::try_from(horizon).map_err(|_| bad_horizon())?;
    if last_year.checked_add(span).is_none() {
        return Err(bad_horizon());
    }
    let years: Vec<i32> = (1..=span).map(|offset| last_year + offset).collect();
    forecast(series, &years)
}

pub fn aggregate(summaries: &[SummaryMetrics]) -> Result<AggregateMetrics> {
    if summaries.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let latest: Vec<f64> = summaries.iter().map(|s| s.latest_share).collect();
    let growth: Vec<f64> = summaries.iter().map(|s| s.growth_pct).collect();
    Ok(AggregateMetrics {
        region_count: summaries.len(),
        avg_latest_share: average(&latest),
        total_energy_twh: summaries.iter().map(|s| s.estimated_energy_twh).sum(),
        avg_growth_pct: average(&growth),
        total_co2_saved_mt: summaries.iter().map(|s| s.estimated_co2_saved_mt).sum(),
    })
}

/// Score every site as `deployment_index * weight + potential_score * (1 - weight)`.
///
/// Returns fresh copies in input order; the input slice is untouched.
pub fn compute_composite_scores(sites: &[GeoSite], weight: f64) -> Result<Vec<GeoSite>> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(AnalysisError::InvalidWeight(weight));
    }
    Ok(sites
        .iter()
        .map(|site| GeoSite {
            composite_score: Some(
                site.deployment_index * weight + site.potential_score * (1.0 - weight),
            ),
            ..site.clone()
        })
        .collect())
}

/// Composite scores sorted best first. Ties keep input order.
pub fn rank_sites(sites: &[GeoSite], weight: f64) -> Result<Vec<GeoSite>> {
    let mut scored = compute_composite_scores(sites, weight)?;
    scored.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
    });
    Ok(scored)
}

/// Percentage change between consecutive observations.
pub fn year_over_year(series: &TimeSeries) -> Result<Vec<YearOverYear>> {
    require_points(series.len(), 2)?;
    series
        .points()
        .windows(2)
        .map(|pair| {
            let (prev_year, prev) = pair[0];
            let (year, share) = pair[1];
            if prev == 0.0 {
                return Err(AnalysisError::DivisionByZero(format!(
                    "change of `{}` from a zero share in {}",
                    series.region_id(),
                    prev_year
                )));
            }
            Ok(YearOverYear {
                year,
                share,
                change_pct: (share - prev) / prev * 100.0,
            })
        })
        .collect()
}

/// Pearson correlation of two series over the years both observe.
pub fn correlate(a: &TimeSeries, b: &TimeSeries) -> Result<Correlation> {
    // Both sides are strictly ascending, so a merge walk finds shared years.
    let (pa, pb) = (a.points(), b.points());
    let (mut i, mut j) = (0, 0);
    let mut shared: Vec<(i32, f64, f64)> = Vec::new();
    while i < pa.len() && j < pb.len() {
        match pa[i].0.cmp(&pb[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                shared.push((pa[i].0, pa[i].1, pb[j].1));
                i += 1;
                j += 1;
            }
        }
    }
    require_points(shared.len(), 2)?;

    let n = shared.len() as f64;
    let mean_a = shared.iter().map(|(_, x, _)| x).sum::<f64>() / n;
    let mean_b = shared.iter().map(|(_, _, y)| y).sum::<f64>() / n;
    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (_, x, y) in &shared {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return Err(AnalysisError::DegenerateInput(format!(
            "constant share over shared years of `{}` and `{}`",
            a.region_id(),
            b.region_id()
        )));
    }
    Ok(Correlation {
        region_a: a.region_id().to_string(),
        region_b: b.region_id().to_string(),
        years: shared.iter().map(|(year, _, _)| *year).collect(),
        coefficient: cov / (var_a * var_b).sqrt(),
    })
}

/// Annual output, cost and avoided emissions of a hypothetical installation.
pub fn simulate_installation(
    capacity_mw: f64,
    efficiency_pct: f64,
    cost_per_mw_musd: f64,
    config: &AnalyzerConfig,
) -> Result<InstallationSimulation> {
    if !capacity_mw.is_finite() || capacity_mw < 0.0 {
        return Err(AnalysisError::InvalidParameter {
            name: "capacity_mw",
            value: capacity_mw,
        });
    }
    if !efficiency_pct.is_finite() || efficiency_pct <= 0.0 || efficiency_pct > 100.0 {
        return Err(AnalysisError::InvalidParameter {
            name: "efficiency_pct",
            value: efficiency_pct,
        });
    }
    if !cost_per_mw_musd.is_finite() || cost_per_mw_musd < 0.0 {
        return Err(AnalysisError::InvalidParameter {
            name: "cost_per_mw_musd",
            value: cost_per_mw_musd,
        });
    }
    let annual_energy_twh = capacity_mw * (efficiency_pct / 100.0) * HOURS_PER_YEAR / MWH_PER_TWH;
    Ok(InstallationSimulation {
        annual_energy_twh,
        total_cost_musd: capacity_mw * cost_per_mw_musd,
        co2_saved_mt: annual_energy_twh * config.co2_factor_mt_per_twh,
    })
}
