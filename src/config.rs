use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ForecastError;
use crate::models::Unit;

/// Pipeline configuration loaded from a TOML file.
///
/// ```toml
/// dataset = "data/raw/oil_production.csv"
/// urr_file = "data/processed/urr_estimates.csv"
/// output_path = "output"
/// unit = "EJ"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Historical production CSV (`Year`, `Production` columns, exajoules).
    pub dataset: PathBuf,
    /// URR estimate table CSV (`estimate`, `value` columns).
    pub urr_file: PathBuf,
    /// Directory the chart is written into.
    pub output_path: PathBuf,
    /// Display unit; datasets are exajoules and are converted when `Gb`.
    #[serde(default)]
    pub unit: Unit,
}

impl PipelineConfig {
    /// Load a configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ForecastError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
