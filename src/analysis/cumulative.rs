use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::models::FittedModel;

/// Projection horizon for cumulative and future-production calculations.
///
/// The horizon is inclusive of its terminal year, which defaults to 2100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionHorizon {
    pub terminal_year: f64,
}

impl Default for ProjectionHorizon {
    fn default() -> Self {
        Self {
            terminal_year: 2100.0,
        }
    }
}

impl ProjectionHorizon {
    /// Annual steps from the year after `last_year` through the terminal year
    /// inclusive. Empty when `last_year` already reaches the horizon.
    pub fn future_years(&self, last_year: f64) -> Vec<f64> {
        let start = last_year + 1.0;
        let stop = self.terminal_year + 1.0;
        if start >= stop {
            return Vec::new();
        }
        let n = (stop - start).ceil() as usize;
        (0..n).map(|i| start + i as f64).collect()
    }

    /// Annual steps from `first_year` through the terminal year inclusive.
    pub fn full_years(&self, first_year: f64) -> Vec<f64> {
        let stop = self.terminal_year + 1.0;
        if first_year >= stop {
            return Vec::new();
        }
        let n = (stop - first_year).ceil() as usize;
        (0..n).map(|i| first_year + i as f64).collect()
    }
}

/// Total cumulative production: historical sum plus the model-projected tail
/// from the year after the last observation through the default terminal
/// year (2100).
pub fn calculate_cumulative_production(
    years: &[f64],
    production: &[f64],
    model: &FittedModel,
) -> Result<f64, ForecastError> {
    calculate_cumulative_production_with_horizon(
        years,
        production,
        model,
        &ProjectionHorizon::default(),
    )
}

/// Cumulative production against an explicit horizon.
pub fn calculate_cumulative_production_with_horizon(
    years: &[f64],
    production: &[f64],
    model: &FittedModel,
    horizon: &ProjectionHorizon,
) -> Result<f64, ForecastError> {
    if years.len() != production.len() {
        return Err(ForecastError::InvalidInput(format!(
            "years ({}) and production ({}) differ in length",
            years.len(),
            production.len()
        )));
    }
    let last_year = *years.last().ok_or_else(|| {
        ForecastError::InsufficientData("cannot project from an empty series".to_string())
    })?;
    if years.iter().any(|v| !v.is_finite()) || production.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::InvalidInput(
            "years and production must be finite".to_string(),
        ));
    }

    let future_years = horizon.future_years(last_year);
    let projected = model.evaluate(&future_years);

    let historical: f64 = production.iter().sum();
    let future: f64 = projected.iter().sum();
    Ok(historical + future)
}
