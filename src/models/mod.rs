mod hubbert;
mod laherrere;
mod series;

use serde::{Deserialize, Serialize};

pub use hubbert::{hubbert_curve, hubbert_rate, HubbertParameters};
pub use laherrere::{laherrere_bell_curve, laherrere_rate, LaherrereParameters};
pub use series::{ProductionSeries, Unit, EJ_PER_GB};

/// A fitted depletion model.
///
/// Closed set of variants, each carrying its own parameter record. Evaluation
/// dispatches on the variant, so parameter order can never silently desync
/// from a model signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum FittedModel {
    Hubbert(HubbertParameters),
    Laherrere(LaherrereParameters),
}

impl FittedModel {
    /// Production rate at time `t`.
    pub fn rate(&self, t: f64) -> f64 {
        match self {
            FittedModel::Hubbert(p) => p.rate(t),
            FittedModel::Laherrere(p) => p.rate(t),
        }
    }

    /// Evaluate the model elementwise over `times`.
    pub fn evaluate(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.rate(t)).collect()
    }

    /// Year of peak production.
    pub fn peak_year(&self) -> f64 {
        match self {
            FittedModel::Hubbert(p) => p.peak_time,
            FittedModel::Laherrere(p) => p.tm,
        }
    }

    /// Human-readable model name.
    pub fn name(&self) -> &'static str {
        match self {
            FittedModel::Hubbert(_) => "Hubbert",
            FittedModel::Laherrere(_) => "Laherrère",
        }
    }
}
