use thiserror::Error;

/// Errors that can occur in the forecasting pipeline.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Fit failed: {0}")]
    FitFailed(String),

    #[error("URR lookup error: {0}")]
    UrrLookup(String),

    #[error("Plot error: {0}")]
    Plot(String),
}
