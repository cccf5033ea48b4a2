mod cumulative;
mod fit;
mod forecaster;
mod projection;

pub use cumulative::{
    calculate_cumulative_production, calculate_cumulative_production_with_horizon,
    ProjectionHorizon,
};
pub use fit::{
    fit_hubbert_curve, fit_hubbert_curve_with, fit_laherrere_model, fit_laherrere_model_with,
    HubbertFitConfig, LaherrereFitConfig,
};
pub use forecaster::{ForecastReport, Forecaster};
pub use projection::{
    calculate_future_production, calculate_future_production_with_horizon, FutureProduction,
};
