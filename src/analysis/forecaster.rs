use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{
    calculate_cumulative_production_with_horizon, fit_hubbert_curve_with,
    fit_laherrere_model_with, HubbertFitConfig, LaherrereFitConfig, ProjectionHorizon,
};
use crate::error::ForecastError;
use crate::models::{FittedModel, HubbertParameters, LaherrereParameters, ProductionSeries, Unit};

/// Complete forecast for one dataset and one URR estimate: both fitted
/// parameter sets plus both cumulative-extraction totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub urr: f64,
    pub unit: Unit,
    pub hubbert: HubbertParameters,
    pub laherrere: LaherrereParameters,
    pub hubbert_cumulative: f64,
    pub laherrere_cumulative: f64,
}

/// Unified forecasting API over one production series and a fixed URR.
pub struct Forecaster<'a> {
    series: &'a ProductionSeries,
    urr: f64,
    unit: Unit,
}

impl<'a> Forecaster<'a> {
    pub fn new(series: &'a ProductionSeries, urr: f64, unit: Unit) -> Self {
        Self { series, urr, unit }
    }

    /// Fit the Hubbert curve with the default bounds.
    pub fn fit_hubbert(&self) -> Result<HubbertParameters, ForecastError> {
        fit_hubbert_curve_with(
            self.series.years(),
            self.series.production(),
            self.urr,
            &HubbertFitConfig::default(),
        )
    }

    /// Fit the Laherrère bell curve with the default bounds.
    pub fn fit_laherrere(&self) -> Result<LaherrereParameters, ForecastError> {
        fit_laherrere_model_with(
            self.series.years(),
            self.series.production(),
            self.urr,
            &LaherrereFitConfig::default(),
        )
    }

    /// Run both fits and both cumulative calculations with default
    /// configuration.
    pub fn forecast(&self) -> Result<ForecastReport, ForecastError> {
        self.forecast_with(
            &HubbertFitConfig::default(),
            &LaherrereFitConfig::default(),
            &ProjectionHorizon::default(),
        )
    }

    /// Run the full forecast with explicit fit configuration and horizon.
    ///
    /// Either both fits succeed or the whole forecast fails; no partial
    /// report is produced.
    pub fn forecast_with(
        &self,
        hubbert_config: &HubbertFitConfig,
        laherrere_config: &LaherrereFitConfig,
        horizon: &ProjectionHorizon,
    ) -> Result<ForecastReport, ForecastError> {
        let laherrere = fit_laherrere_model_with(
            self.series.years(),
            self.series.production(),
            self.urr,
            laherrere_config,
        )?;
        let hubbert = fit_hubbert_curve_with(
            self.series.years(),
            self.series.production(),
            self.urr,
            hubbert_config,
        )?;

        let hubbert_cumulative = calculate_cumulative_production_with_horizon(
            self.series.years(),
            self.series.production(),
            &FittedModel::Hubbert(hubbert),
            horizon,
        )?;
        let laherrere_cumulative = calculate_cumulative_production_with_horizon(
            self.series.years(),
            self.series.production(),
            &FittedModel::Laherrere(laherrere),
            horizon,
        )?;

        info!(
            urr = self.urr,
            hubbert_peak = hubbert.peak_time,
            laherrere_peak = laherrere.tm,
            "forecast complete"
        );

        Ok(ForecastReport {
            urr: self.urr,
            unit: self.unit,
            hubbert,
            laherrere,
            hubbert_cumulative,
            laherrere_cumulative,
        })
    }
}
