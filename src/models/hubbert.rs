use serde::{Deserialize, Serialize};

/// Fitted Hubbert curve parameters.
///
/// `urr` is the fixed fitting constraint echoed back unchanged; `steepness`
/// and `peak_time` are the fit outputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HubbertParameters {
    /// Ultimate recoverable resources, total extractable amount.
    pub urr: f64,
    /// Steepness of the logistic curve (> 0).
    pub steepness: f64,
    /// Year of peak production.
    pub peak_time: f64,
}

/// Annual production rate at time `t` under the Hubbert model.
///
/// The Hubbert curve is the time-derivative of a logistic cumulative-production
/// curve: with `x = exp(-steepness * (t - peak_time))`,
/// `rate = urr * steepness * x / (1 + x)^2`. It is symmetric about
/// `peak_time`, where it attains its maximum `urr * steepness / 4`.
pub fn hubbert_rate(t: f64, urr: f64, steepness: f64, peak_time: f64) -> f64 {
    let x = (-steepness * (t - peak_time)).exp();
    urr * steepness * x / (1.0 + x).powi(2)
}

/// Evaluate the Hubbert curve elementwise over `time`.
///
/// An empty `time` slice produces an empty vector.
pub fn hubbert_curve(time: &[f64], urr: f64, steepness: f64, peak_time: f64) -> Vec<f64> {
    time.iter()
        .map(|&t| hubbert_rate(t, urr, steepness, peak_time))
        .collect()
}

impl HubbertParameters {
    /// Production rate at time `t` for these parameters.
    pub fn rate(&self, t: f64) -> f64 {
        hubbert_rate(t, self.urr, self.steepness, self.peak_time)
    }

    /// Peak annual production implied by the parameters, `urr * steepness / 4`.
    pub fn peak_rate(&self) -> f64 {
        self.urr * self.steepness / 4.0
    }
}
