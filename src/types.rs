use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One region's yearly renewable-share observations.
///
/// Years are strictly ascending and shares are percentages in `[0, 100]`.
/// The series is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    region_id: String,
    points: Vec<(i32, f64)>,
}

impl TimeSeries {
    /// Build a series, checking ordering and share range.
    ///
    /// Point counts are not checked here; each analyzer operation enforces
    /// its own minimum.
    pub fn new(region_id: impl Into<String>, points: Vec<(i32, f64)>) -> Result<Self> {
        let region_id = region_id.into();
        for window in points.windows(2) {
            if window[1].0 <= window[0].0 {
                return Err(AnalysisError::InvalidSeries {
                    region: region_id,
                    reason: format!(
                        "years must be strictly ascending ({} followed by {})",
                        window[0].0, window[1].0
                    ),
                });
            }
        }
        if let Some((year, share)) = points
            .iter()
            .find(|(_, s)| !s.is_finite() || !(0.0..=100.0).contains(s))
        {
            return Err(AnalysisError::InvalidSeries {
                region: region_id,
                reason: format!("share {} for {} is outside [0, 100]", share, year),
            });
        }
        Ok(Self { region_id, points })
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn points(&self) -> &[(i32, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(i32, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(i32, f64)> {
        self.points.last().copied()
    }

    pub fn shares(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, s)| *s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub region_id: String,
    pub latest_share: f64,
    pub first_share: f64,
    pub average_share: f64,
    pub growth_pct: f64,
    pub estimated_energy_twh: f64,
    pub estimated_co2_saved_mt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub current_share: f64,
    pub target_pct: f64,
    /// `min(current_share / target_pct, 1.0)`
    pub progress_ratio: f64,
}

/// Fitted line `share = slope * year + intercept` and its predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub region_id: String,
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination over the observed points.
    pub r_squared: f64,
    /// Predicted shares, not clamped to `[0, 100]`.
    pub predictions: Vec<(i32, f64)>,
}

/// Candidate deployment site from the reference map dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoSite {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub energy_type: String,
    pub potential_score: f64,
    pub deployment_index: f64,
    #[serde(default)]
    pub composite_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub region_count: usize,
    pub avg_latest_share: f64,
    pub total_energy_twh: f64,
    pub avg_growth_pct: f64,
    pub total_co2_saved_mt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearOverYear {
    pub year: i32,
    pub share: f64,
    pub change_pct: f64,
}

/// Pearson correlation of two regions over their shared years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub region_a: String,
    pub region_b: String,
    pub years: Vec<i32>,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationSimulation {
    pub annual_energy_twh: f64,
    pub total_cost_musd: f64,
    pub co2_saved_mt: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Renewable Share (%)")]
    pub share: Option<String>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RegionSummaryRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "LatestShare")]
    #[tabled(rename = "LatestShare")]
    pub latest_share: String,
    #[serde(rename = "AvgShare")]
    #[tabled(rename = "AvgShare")]
    pub average_share: String,
    #[serde(rename = "GrowthPct")]
    #[tabled(rename = "GrowthPct")]
    pub growth_pct: String,
    #[serde(rename = "EnergyTWh")]
    #[tabled(rename = "EnergyTWh")]
    pub energy_twh: String,
    #[serde(rename = "Co2SavedMt")]
    #[tabled(rename = "Co2SavedMt")]
    pub co2_saved_mt: String,
    #[serde(rename = "Target")]
    #[tabled(rename = "Target")]
    pub target: String,
    #[serde(rename = "GoalProgress")]
    #[tabled(rename = "GoalProgress")]
    pub goal_progress: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TrendRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share")]
    pub share: String,
    #[serde(rename = "YoYChange")]
    #[tabled(rename = "YoYChange")]
    pub yoy_change: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ForecastRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "PredictedShare")]
    #[tabled(rename = "PredictedShare")]
    pub predicted_share: String,
    #[serde(rename = "Slope")]
    #[tabled(rename = "Slope")]
    pub slope: String,
    #[serde(rename = "RSquared")]
    #[tabled(rename = "RSquared")]
    pub r_squared: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CorrelationRow {
    #[serde(rename = "RegionA")]
    #[tabled(rename = "RegionA")]
    pub region_a: String,
    #[serde(rename = "RegionB")]
    #[tabled(rename = "RegionB")]
    pub region_b: String,
    #[serde(rename = "SharedYears")]
    #[tabled(rename = "SharedYears")]
    pub shared_years: usize,
    #[serde(rename = "Pearson")]
    #[tabled(rename = "Pearson")]
    pub coefficient: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SiteRankingRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Site")]
    #[tabled(rename = "Site")]
    pub name: String,
    #[serde(rename = "Type")]
    #[tabled(rename = "Type")]
    pub energy_type: String,
    #[serde(rename = "Potential")]
    #[tabled(rename = "Potential")]
    pub potential_score: String,
    #[serde(rename = "Deployment")]
    #[tabled(rename = "Deployment")]
    pub deployment_index: String,
    #[serde(rename = "Composite")]
    #[tabled(rename = "Composite")]
    pub composite_score: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub generated_on: chrono::NaiveDate,
    pub regions: Vec<String>,
    pub aggregate: Option<AggregateMetrics>,
}
