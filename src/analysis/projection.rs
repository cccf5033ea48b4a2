use serde::{Deserialize, Serialize};

use crate::analysis::ProjectionHorizon;
use crate::error::ForecastError;
use crate::models::{
    hubbert_curve, laherrere_bell_curve, HubbertParameters, LaherrereParameters, ProductionSeries,
};

/// Both models evaluated over the full historical-to-terminal year range,
/// for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureProduction {
    /// Contiguous years from the first historical year through the terminal
    /// year, inclusive.
    pub years: Vec<f64>,
    pub laherrere: Vec<f64>,
    pub hubbert: Vec<f64>,
}

/// Evaluate both fitted models across the full projection range with the
/// default horizon. No fitting happens here.
pub fn calculate_future_production(
    series: &ProductionSeries,
    laherrere: &LaherrereParameters,
    hubbert: &HubbertParameters,
    urr: f64,
) -> Result<FutureProduction, ForecastError> {
    calculate_future_production_with_horizon(
        series,
        laherrere,
        hubbert,
        urr,
        &ProjectionHorizon::default(),
    )
}

/// Evaluate both fitted models against an explicit horizon.
///
/// `urr` is forwarded to the Laherrère evaluation (where it is ignored) and
/// must agree with the URR echoed in the Hubbert record.
pub fn calculate_future_production_with_horizon(
    series: &ProductionSeries,
    laherrere: &LaherrereParameters,
    hubbert: &HubbertParameters,
    urr: f64,
    horizon: &ProjectionHorizon,
) -> Result<FutureProduction, ForecastError> {
    let rel = (urr - hubbert.urr).abs() / hubbert.urr.abs().max(f64::MIN_POSITIVE);
    if rel > 1e-9 {
        return Err(ForecastError::InvalidInput(format!(
            "urr ({urr}) disagrees with the fitted Hubbert urr ({})",
            hubbert.urr
        )));
    }

    let years = horizon.full_years(series.first_year());
    let laherrere_fit = laherrere_bell_curve(
        &years,
        laherrere.peak_production,
        laherrere.tm,
        laherrere.c,
        Some(urr),
    );
    let hubbert_fit = hubbert_curve(&years, hubbert.urr, hubbert.steepness, hubbert.peak_time);

    Ok(FutureProduction {
        years,
        laherrere: laherrere_fit,
        hubbert: hubbert_fit,
    })
}
