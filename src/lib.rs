pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::{ForecastReport, Forecaster};
pub use config::PipelineConfig;
pub use error::ForecastError;
pub use models::{
    FittedModel, HubbertParameters, LaherrereParameters, ProductionSeries, Unit,
};
