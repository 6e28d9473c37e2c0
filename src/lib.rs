//! Renewable-energy adoption trend analysis.
//!
//! The [`analyzer`] module is the pure computation core: it turns yearly
//! renewable-share observations into summary metrics, goal progress, linear
//! forecasts, aggregates and weighted site scores. Everything else in the
//! crate (CSV loading, report rows, exports) is the presentation side that
//! feeds it and formats its output.
pub mod analyzer;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod reports;
pub mod sites;
pub mod types;
pub mod util;

pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use types::{
    AggregateMetrics, Correlation, ForecastResult, GeoSite, GoalProgress, InstallationSimulation,
    SummaryMetrics, TimeSeries, YearOverYear,
};
