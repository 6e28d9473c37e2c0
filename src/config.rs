// Deployment-tunable constants consumed by the analyzer.
//
// The conversion factors are rough visual estimates carried over from the
// dashboards, not measured unit conversions. They stay configurable so a
// deployment can swap them without touching the analyzer.
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

pub const DEFAULT_ENERGY_SCALE_TWH_PER_PERCENT: f64 = 15.0;
pub const DEFAULT_CO2_FACTOR_MT_PER_TWH: f64 = 0.7;
pub const DEFAULT_SITE_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// TWh of annual generation represented by one percentage point of share.
    pub energy_scale_twh_per_percent: f64,
    /// Million tonnes of CO2 avoided per TWh of renewable generation.
    pub co2_factor_mt_per_twh: f64,
    /// 2030 renewable-share targets in percent, keyed by region id.
    pub default_targets: BTreeMap<String, f64>,
    /// Weight given to deployment strength when scoring sites.
    pub default_weight: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        let default_targets = [("EU", 40.0), ("India", 30.0), ("USA", 50.0)]
            .into_iter()
            .map(|(region, target)| (region.to_string(), target))
            .collect();
        Self {
            energy_scale_twh_per_percent: DEFAULT_ENERGY_SCALE_TWH_PER_PERCENT,
            co2_factor_mt_per_twh: DEFAULT_CO2_FACTOR_MT_PER_TWH,
            default_targets,
            default_weight: DEFAULT_SITE_WEIGHT,
        }
    }
}

impl AnalyzerConfig {
    /// Read a JSON config file. Missing fields fall back to the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: AnalyzerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("energy_scale_twh_per_percent", self.energy_scale_twh_per_percent),
            ("co2_factor_mt_per_twh", self.co2_factor_mt_per_twh),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidParameter { name, value });
            }
        }
        if let Some(target) = self
            .default_targets
            .values()
            .find(|t| !t.is_finite() || **t <= 0.0)
        {
            return Err(AnalysisError::InvalidTarget(*target));
        }
        if !(0.0..=1.0).contains(&self.default_weight) {
            return Err(AnalysisError::InvalidWeight(self.default_weight));
        }
        Ok(())
    }

    pub fn target_for(&self, region_id: &str) -> Option<f64> {
        self.default_targets.get(region_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_for("EU"), Some(40.0));
        assert_eq!(config.target_for("India"), Some(30.0));
        assert_eq!(config.target_for("Mars"), None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"co2_factor_mt_per_twh": 0.5}}"#).unwrap();
        let config = AnalyzerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.co2_factor_mt_per_twh, 0.5);
        assert_eq!(
            config.energy_scale_twh_per_percent,
            DEFAULT_ENERGY_SCALE_TWH_PER_PERCENT
        );
        assert_eq!(config.default_weight, DEFAULT_SITE_WEIGHT);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = AnalyzerConfig::default();
        config.default_weight = 1.5;
        assert_eq!(config.validate(), Err(AnalysisError::InvalidWeight(1.5)));

        let mut config = AnalyzerConfig::default();
        config.default_targets.insert("EU".into(), 0.0);
        assert_eq!(config.validate(), Err(AnalysisError::InvalidTarget(0.0)));

        let mut config = AnalyzerConfig::default();
        config.energy_scale_twh_per_percent = -1.0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_weight": 2.0}}"#).unwrap();
        assert!(AnalyzerConfig::from_json_file(file.path()).is_err());
    }
}
