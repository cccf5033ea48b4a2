use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// How many exajoules one gigabarrel of oil represents.
pub const EJ_PER_GB: f64 = 6.9;

/// Display unit for production and URR values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    /// Exajoules.
    #[default]
    #[serde(rename = "EJ")]
    Exajoules,
    /// Gigabarrels.
    #[serde(rename = "Gb")]
    Gigabarrels,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Exajoules => write!(f, "EJ"),
            Unit::Gigabarrels => write!(f, "Gb"),
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "EJ" | "ej" => Ok(Unit::Exajoules),
            "Gb" | "gb" | "GB" => Ok(Unit::Gigabarrels),
            other => Err(ForecastError::InvalidInput(format!(
                "Unknown unit '{other}'. Use 'EJ' (exajoules) or 'Gb' (gigabarrels)"
            ))),
        }
    }
}

/// Historical annual production series.
///
/// Years and production are parallel sequences of equal length; production is
/// a rate per period in a caller-chosen unit. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionSeries {
    years: Vec<f64>,
    production: Vec<f64>,
}

impl ProductionSeries {
    /// Build a series, validating the parallel-sequence invariants.
    pub fn new(years: Vec<f64>, production: Vec<f64>) -> Result<Self, ForecastError> {
        if years.len() != production.len() {
            return Err(ForecastError::InvalidInput(format!(
                "years ({}) and production ({}) differ in length",
                years.len(),
                production.len()
            )));
        }
        if years.is_empty() {
            return Err(ForecastError::InsufficientData(
                "production series is empty".to_string(),
            ));
        }
        if years.iter().any(|y| !y.is_finite()) {
            return Err(ForecastError::InvalidInput(
                "years contain non-finite values".to_string(),
            ));
        }
        if production.iter().any(|p| !p.is_finite()) {
            return Err(ForecastError::InvalidInput(
                "production contains non-finite values".to_string(),
            ));
        }
        Ok(Self { years, production })
    }

    pub fn years(&self) -> &[f64] {
        &self.years
    }

    pub fn production(&self) -> &[f64] {
        &self.production
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// First observed year.
    pub fn first_year(&self) -> f64 {
        self.years[0]
    }

    /// Last observed year.
    pub fn last_year(&self) -> f64 {
        self.years[self.years.len() - 1]
    }

    /// Sum of all historical production.
    pub fn total_production(&self) -> f64 {
        self.production.iter().sum()
    }

    /// Highest observed annual production.
    pub fn peak_observed(&self) -> f64 {
        self.production.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Convert an exajoule series to gigabarrels. Years are unchanged.
    pub fn to_gigabarrels(&self) -> Self {
        Self {
            years: self.years.clone(),
            production: self.production.iter().map(|p| p / EJ_PER_GB).collect(),
        }
    }
}
