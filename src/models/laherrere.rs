use serde::{Deserialize, Serialize};

/// Fitted Laherrère bell curve parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaherrereParameters {
    /// Peak annual production rate (> 0).
    pub peak_production: f64,
    /// Year of peak production.
    pub tm: f64,
    /// Width parameter controlling steepness (> 0); larger is broader.
    pub c: f64,
}

/// Annual production rate at time `t` under the Laherrère bell curve.
///
/// `rate = 2 * peak_production / (1 + cosh(-5/c * (t - tm)))`, a symmetric
/// bell peaking at `t = tm` with value `peak_production`.
pub fn laherrere_rate(t: f64, peak_production: f64, tm: f64, c: f64) -> f64 {
    let cosh_term = (-5.0 / c * (t - tm)).cosh();
    2.0 * peak_production / (1.0 + cosh_term)
}

/// Evaluate the Laherrère bell curve elementwise over `t`.
///
/// `urr` is accepted for interface symmetry with the Hubbert signature but
/// does not enter the formula; it is ignored. An empty `t` slice produces an
/// empty vector.
pub fn laherrere_bell_curve(
    t: &[f64],
    peak_production: f64,
    tm: f64,
    c: f64,
    _urr: Option<f64>,
) -> Vec<f64> {
    t.iter()
        .map(|&t| laherrere_rate(t, peak_production, tm, c))
        .collect()
}

impl LaherrereParameters {
    /// Production rate at time `t` for these parameters.
    pub fn rate(&self, t: f64) -> f64 {
        laherrere_rate(t, self.peak_production, self.tm, self.c)
    }
}
