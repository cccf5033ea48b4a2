//! Bounded nonlinear least-squares fits for the two depletion models.
//!
//! Both fits hold the supplied URR fixed and solve only for the remaining
//! shape parameters. The `levenberg-marquardt` solver is unconstrained, so
//! box bounds are enforced with smooth parameter transforms: internally the
//! solver walks an unconstrained space, and every internal value maps to an
//! external value inside the box.

use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt, TerminationReason};
use nalgebra::{storage::Owned, Const, DVector, Dyn, OMatrix, Vector2, Vector3, U2, U3};
use tracing::debug;

use crate::error::ForecastError;
use crate::models::{hubbert_rate, laherrere_rate, HubbertParameters, LaherrereParameters};

/// Bounds and initial guesses for the Hubbert fit.
///
/// The defaults encode a conservative assumption that peak extraction falls
/// within the 2030-2040 decade.
#[derive(Debug, Clone)]
pub struct HubbertFitConfig {
    pub initial_steepness: f64,
    pub initial_peak_time: f64,
    pub steepness_bounds: (f64, f64),
    pub peak_time_bounds: (f64, f64),
}

impl Default for HubbertFitConfig {
    fn default() -> Self {
        Self {
            initial_steepness: 0.02,
            initial_peak_time: 2040.0,
            steepness_bounds: (0.01, 0.05),
            peak_time_bounds: (2030.0, 2040.0),
        }
    }
}

/// Bounds and initial guesses for the Laherrère fit.
///
/// The initial peak production is always taken from the data (its maximum),
/// so only the remaining guesses and the boxes are configurable. The peak
/// production upper bound may be `f64::INFINITY`.
#[derive(Debug, Clone)]
pub struct LaherrereFitConfig {
    pub initial_tm: f64,
    pub initial_c: f64,
    pub peak_production_bounds: (f64, f64),
    pub tm_bounds: (f64, f64),
    pub c_bounds: (f64, f64),
}

impl Default for LaherrereFitConfig {
    fn default() -> Self {
        Self {
            initial_tm: 2040.0,
            initial_c: 200.0,
            peak_production_bounds: (0.0, f64::INFINITY),
            tm_bounds: (2030.0, 2040.0),
            c_bounds: (10.0, 300.0),
        }
    }
}

/// Fit the Hubbert curve to historical production data with the default
/// bounds, holding `urr` fixed.
pub fn fit_hubbert_curve(
    years: &[f64],
    production: &[f64],
    urr: f64,
) -> Result<HubbertParameters, ForecastError> {
    fit_hubbert_curve_with(years, production, urr, &HubbertFitConfig::default())
}

/// Fit the Hubbert curve with explicit bounds and initial guesses.
pub fn fit_hubbert_curve_with(
    years: &[f64],
    production: &[f64],
    urr: f64,
    config: &HubbertFitConfig,
) -> Result<HubbertParameters, ForecastError> {
    validate_fit_inputs(years, production, urr, 2)?;

    let bounds = [
        Bound::new(config.steepness_bounds.0, config.steepness_bounds.1)?,
        Bound::new(config.peak_time_bounds.0, config.peak_time_bounds.1)?,
    ];
    let u0 = Vector2::new(
        bounds[0].to_internal(config.initial_steepness),
        bounds[1].to_internal(config.initial_peak_time),
    );

    let problem = HubbertProblem {
        years,
        production,
        urr,
        bounds,
        u: u0,
    };
    let (solved, report) = LevenbergMarquardt::new().minimize(problem);
    check_termination("Hubbert", &report.termination)?;

    let steepness = bounds[0].to_external(solved.u[0]);
    let peak_time = bounds[1].to_external(solved.u[1]);
    debug!(
        steepness,
        peak_time,
        objective = report.objective_function,
        evaluations = report.number_of_evaluations,
        "Hubbert fit converged"
    );

    Ok(HubbertParameters {
        urr,
        steepness,
        peak_time,
    })
}

/// Fit the Laherrère bell curve with the default bounds, holding `urr` fixed.
///
/// URR is carried along to match the curve's interface but does not enter the
/// evaluation.
pub fn fit_laherrere_model(
    years: &[f64],
    production: &[f64],
    urr: f64,
) -> Result<LaherrereParameters, ForecastError> {
    fit_laherrere_model_with(years, production, urr, &LaherrereFitConfig::default())
}

/// Fit the Laherrère bell curve with explicit bounds and initial guesses.
pub fn fit_laherrere_model_with(
    years: &[f64],
    production: &[f64],
    urr: f64,
    config: &LaherrereFitConfig,
) -> Result<LaherrereParameters, ForecastError> {
    validate_fit_inputs(years, production, urr, 3)?;

    let bounds = [
        Bound::new(
            config.peak_production_bounds.0,
            config.peak_production_bounds.1,
        )?,
        Bound::new(config.tm_bounds.0, config.tm_bounds.1)?,
        Bound::new(config.c_bounds.0, config.c_bounds.1)?,
    ];
    let initial_peak = production.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let u0 = Vector3::new(
        bounds[0].to_internal(initial_peak),
        bounds[1].to_internal(config.initial_tm),
        bounds[2].to_internal(config.initial_c),
    );

    let problem = LaherrereProblem {
        years,
        production,
        bounds,
        u: u0,
    };
    let (solved, report) = LevenbergMarquardt::new().minimize(problem);
    check_termination("Laherrère", &report.termination)?;

    let peak_production = bounds[0].to_external(solved.u[0]);
    let tm = bounds[1].to_external(solved.u[1]);
    let c = bounds[2].to_external(solved.u[2]);
    debug!(
        peak_production,
        tm,
        c,
        objective = report.objective_function,
        evaluations = report.number_of_evaluations,
        "Laherrère fit converged"
    );

    Ok(LaherrereParameters {
        peak_production,
        tm,
        c,
    })
}

fn validate_fit_inputs(
    years: &[f64],
    production: &[f64],
    urr: f64,
    free_params: usize,
) -> Result<(), ForecastError> {
    if years.len() != production.len() {
        return Err(ForecastError::InvalidInput(format!(
            "years ({}) and production ({}) differ in length",
            years.len(),
            production.len()
        )));
    }
    if years.len() < free_params {
        return Err(ForecastError::InsufficientData(format!(
            "need at least {free_params} observations, got {}",
            years.len()
        )));
    }
    if years.iter().any(|v| !v.is_finite()) || production.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::InvalidInput(
            "years and production must be finite".to_string(),
        ));
    }
    if !urr.is_finite() || urr <= 0.0 {
        return Err(ForecastError::InvalidInput(format!(
            "urr must be a positive number, got {urr}"
        )));
    }
    Ok(())
}

fn check_termination(model: &str, termination: &TerminationReason) -> Result<(), ForecastError> {
    // `NoImprovementPossible` means the fit hit machine precision before the
    // tolerances triggered, which happens on noise-free data; treat it as
    // converged like the explicit success states.
    let ok = termination.was_successful()
        || matches!(termination, TerminationReason::NoImprovementPossible(_));
    if ok {
        Ok(())
    } else {
        Err(ForecastError::FitFailed(format!(
            "{model} fit did not converge: {termination:?}"
        )))
    }
}

/// Smooth map between a box-constrained external parameter and an
/// unconstrained internal one: a logistic transform for two-sided intervals,
/// a shifted hyperbola for lower-only bounds.
#[derive(Debug, Clone, Copy)]
struct Bound {
    lo: f64,
    hi: f64,
}

impl Bound {
    fn new(lo: f64, hi: f64) -> Result<Self, ForecastError> {
        if !lo.is_finite() || lo >= hi {
            return Err(ForecastError::InvalidInput(format!(
                "invalid parameter bounds [{lo}, {hi}]"
            )));
        }
        Ok(Self { lo, hi })
    }

    /// External -> internal. The value is nudged strictly inside the box
    /// first; a guess sitting exactly on a bound would otherwise map to
    /// infinity, where the transform gradient vanishes and the solver cannot
    /// move.
    fn to_internal(&self, x: f64) -> f64 {
        if self.hi.is_finite() {
            let margin = (self.hi - self.lo) * 1e-3;
            let x = x.clamp(self.lo + margin, self.hi - margin);
            ((x - self.lo) / (self.hi - x)).ln()
        } else {
            let shifted = x.max(self.lo) - self.lo + 1.0;
            (shifted * shifted - 1.0).max(0.0).sqrt()
        }
    }

    /// Internal -> external, always inside the box.
    fn to_external(&self, u: f64) -> f64 {
        if self.hi.is_finite() {
            self.lo + (self.hi - self.lo) * sigmoid(u)
        } else {
            self.lo - 1.0 + (u * u + 1.0).sqrt()
        }
    }

    /// d(external)/d(internal), for chain-ruled jacobians.
    fn gradient(&self, u: f64) -> f64 {
        if self.hi.is_finite() {
            let s = sigmoid(u);
            (self.hi - self.lo) * s * (1.0 - s)
        } else {
            u / (u * u + 1.0).sqrt()
        }
    }
}

fn sigmoid(u: f64) -> f64 {
    1.0 / (1.0 + (-u).exp())
}

/// Least-squares problem for the Hubbert fit over `(steepness, peak_time)`,
/// URR held fixed.
struct HubbertProblem<'a> {
    years: &'a [f64],
    production: &'a [f64],
    urr: f64,
    bounds: [Bound; 2],
    /// Internal (unconstrained) parameter vector.
    u: Vector2<f64>,
}

impl LeastSquaresProblem<f64, Dyn, U2> for HubbertProblem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, U2>;
    type ParameterStorage = Owned<f64, U2>;

    fn set_params(&mut self, u: &Vector2<f64>) {
        self.u = *u;
    }

    fn params(&self) -> Vector2<f64> {
        self.u
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let steepness = self.bounds[0].to_external(self.u[0]);
        let peak_time = self.bounds[1].to_external(self.u[1]);
        Some(DVector::from_iterator(
            self.years.len(),
            self.years
                .iter()
                .zip(self.production)
                .map(|(&t, &y)| hubbert_rate(t, self.urr, steepness, peak_time) - y),
        ))
    }

    fn jacobian(&self) -> Option<OMatrix<f64, Dyn, U2>> {
        let steepness = self.bounds[0].to_external(self.u[0]);
        let peak_time = self.bounds[1].to_external(self.u[1]);
        let ds_du = self.bounds[0].gradient(self.u[0]);
        let dp_du = self.bounds[1].gradient(self.u[1]);

        let mut jac = OMatrix::<f64, Dyn, U2>::zeros_generic(Dyn(self.years.len()), Const::<2>);
        for (i, &t) in self.years.iter().enumerate() {
            let d = t - peak_time;
            let x = (-steepness * d).exp();
            let one_plus = 1.0 + x;
            // d/dx [x/(1+x)^2] = (1-x)/(1+x)^3, chained with dx/dsteepness and
            // dx/dpeak_time.
            let df_ds = self.urr * x / one_plus.powi(2)
                - self.urr * steepness * d * x * (1.0 - x) / one_plus.powi(3);
            let df_dp = self.urr * steepness * steepness * x * (1.0 - x) / one_plus.powi(3);
            jac[(i, 0)] = df_ds * ds_du;
            jac[(i, 1)] = df_dp * dp_du;
        }
        Some(jac)
    }
}

/// Least-squares problem for the Laherrère fit over
/// `(peak_production, tm, c)`.
struct LaherrereProblem<'a> {
    years: &'a [f64],
    production: &'a [f64],
    bounds: [Bound; 3],
    u: Vector3<f64>,
}

impl LeastSquaresProblem<f64, Dyn, U3> for LaherrereProblem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, U3>;
    type ParameterStorage = Owned<f64, U3>;

    fn set_params(&mut self, u: &Vector3<f64>) {
        self.u = *u;
    }

    fn params(&self) -> Vector3<f64> {
        self.u
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let peak = self.bounds[0].to_external(self.u[0]);
        let tm = self.bounds[1].to_external(self.u[1]);
        let c = self.bounds[2].to_external(self.u[2]);
        Some(DVector::from_iterator(
            self.years.len(),
            self.years
                .iter()
                .zip(self.production)
                .map(|(&t, &y)| laherrere_rate(t, peak, tm, c) - y),
        ))
    }

    fn jacobian(&self) -> Option<OMatrix<f64, Dyn, U3>> {
        let peak = self.bounds[0].to_external(self.u[0]);
        let tm = self.bounds[1].to_external(self.u[1]);
        let c = self.bounds[2].to_external(self.u[2]);
        let dpk_du = self.bounds[0].gradient(self.u[0]);
        let dtm_du = self.bounds[1].gradient(self.u[1]);
        let dc_du = self.bounds[2].gradient(self.u[2]);

        let mut jac = OMatrix::<f64, Dyn, U3>::zeros_generic(Dyn(self.years.len()), Const::<3>);
        for (i, &t) in self.years.iter().enumerate() {
            let z = 5.0 * (t - tm) / c;
            let g = 1.0 + z.cosh();
            let sinh_z = z.sinh();
            let df_dpk = 2.0 / g;
            let df_dtm = 10.0 * peak * sinh_z / (c * g * g);
            let df_dc = 2.0 * peak * z * sinh_z / (c * g * g);
            jac[(i, 0)] = df_dpk * dpk_du;
            jac[(i, 1)] = df_dtm * dtm_du;
            jac[(i, 2)] = df_dc * dc_du;
        }
        Some(jac)
    }
}
