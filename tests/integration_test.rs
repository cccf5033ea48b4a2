use assert_approx_eq::assert_approx_eq;
use tempfile::TempDir;

use peakcast::{
    analysis::{
        calculate_cumulative_production, calculate_future_production, fit_hubbert_curve,
        fit_laherrere_model, ProjectionHorizon,
    },
    error::ForecastError,
    io::{read_production_csv, read_report_json, write_production_csv, write_report_json},
    models::{
        hubbert_curve, laherrere_bell_curve, FittedModel, ProductionSeries, Unit,
    },
    Forecaster,
};

/// Synthetic Hubbert data with known parameters, peaking inside the default
/// fit bounds.
fn synthetic_hubbert_series(urr: f64, steepness: f64, peak_time: f64) -> ProductionSeries {
    let years: Vec<f64> = (2000..2050).map(|y| y as f64).collect();
    let production = hubbert_curve(&years, urr, steepness, peak_time);
    ProductionSeries::new(years, production).unwrap()
}

fn synthetic_laherrere_series(peak: f64, tm: f64, c: f64) -> ProductionSeries {
    let years: Vec<f64> = (2000..2050).map(|y| y as f64).collect();
    let production = laherrere_bell_curve(&years, peak, tm, c, None);
    ProductionSeries::new(years, production).unwrap()
}

// --- Fit round-trips ---

#[test]
fn test_hubbert_roundtrip_through_series() {
    let urr = 1000.0;
    let series = synthetic_hubbert_series(urr, 0.03, 2034.0);

    let fitted = fit_hubbert_curve(series.years(), series.production(), urr).unwrap();

    assert_approx_eq!(fitted.urr, urr, 1e-12);
    assert!((fitted.steepness - 0.03).abs() <= 0.05 * 0.03);
    assert!((fitted.peak_time - 2034.0).abs() <= 1.0);
}

#[test]
fn test_laherrere_roundtrip_through_series() {
    let series = synthetic_laherrere_series(50.0, 2035.0, 150.0);

    let fitted = fit_laherrere_model(series.years(), series.production(), 1000.0).unwrap();

    assert!((fitted.peak_production - 50.0).abs() <= 0.05 * 50.0);
    assert!((fitted.tm - 2035.0).abs() <= 1.0);
    assert!(fitted.c >= 10.0 && fitted.c <= 300.0);
}

// --- Full pipeline over CSV fixtures ---

#[test]
fn test_pipeline_from_csv_to_cumulative() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("production.csv");

    let urr = 1000.0;
    let series = synthetic_hubbert_series(urr, 0.03, 2034.0);
    write_production_csv(&series, &csv_path).unwrap();

    let loaded = read_production_csv(&csv_path).unwrap();
    assert_eq!(loaded.len(), series.len());

    let forecaster = Forecaster::new(&loaded, urr, Unit::Exajoules);
    let report = forecaster.forecast().unwrap();

    // On clean Hubbert data the cumulative from 2000 to 2100 equals the
    // logistic mass over that window, about 61% of the URR here (the curve's
    // pre-2000 head and post-2100 tail are outside the sum).
    assert!(report.hubbert_cumulative > 0.55 * urr);
    assert!(report.hubbert_cumulative < 0.70 * urr);

    // Both models agree on the peak year within the bounds' resolution.
    assert!((report.hubbert.peak_time - report.laherrere.tm).abs() < 5.0);
}

#[test]
fn test_cumulative_consistency_with_manual_projection() {
    let urr = 1000.0;
    let series = synthetic_hubbert_series(urr, 0.03, 2034.0);
    let fitted = fit_hubbert_curve(series.years(), series.production(), urr).unwrap();
    let model = FittedModel::Hubbert(fitted);

    let total =
        calculate_cumulative_production(series.years(), series.production(), &model).unwrap();

    let future: f64 = ProjectionHorizon::default()
        .future_years(series.last_year())
        .iter()
        .map(|&t| model.rate(t))
        .sum();
    assert_approx_eq!(total, series.total_production() + future, 1e-6);
}

#[test]
fn test_future_projection_spans_history_and_forecast() {
    let urr = 1000.0;
    let series = synthetic_hubbert_series(urr, 0.03, 2034.0);
    let forecaster = Forecaster::new(&series, urr, Unit::Exajoules);
    let report = forecaster.forecast().unwrap();

    let projection =
        calculate_future_production(&series, &report.laherrere, &report.hubbert, urr).unwrap();

    assert_eq!(projection.years.first(), Some(&2000.0));
    assert_eq!(projection.years.last(), Some(&2100.0));
    assert_eq!(projection.years.len(), 101);

    // The fitted Hubbert curve should track the synthetic data closely over
    // the historical range.
    for (i, &year) in projection.years.iter().enumerate() {
        if year < 2050.0 {
            let observed = series.production()[i];
            assert!((projection.hubbert[i] - observed).abs() < 0.05 * observed.max(1.0));
        }
    }
}

// --- Error propagation ---

#[test]
fn test_fit_errors_propagate_unmodified() {
    let result = fit_hubbert_curve(&[2000.0], &[10.0], 100.0);
    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));

    let result = fit_laherrere_model(&[2000.0, 2001.0, 2002.0], &[1.0, 2.0, 3.0], -1.0);
    assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
}

#[test]
fn test_csv_with_dirty_rows_still_fits() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("dirty.csv");

    // Build a CSV with some unusable rows around clean synthetic data.
    let series = synthetic_hubbert_series(1000.0, 0.03, 2034.0);
    let mut content = String::from("Year,Production\n");
    content.push_str("not-a-year,1.0\n");
    for (y, p) in series.years().iter().zip(series.production()) {
        content.push_str(&format!("{y},{p}\n"));
    }
    content.push_str("2051,\n");
    std::fs::write(&csv_path, content).unwrap();

    let loaded = read_production_csv(&csv_path).unwrap();
    assert_eq!(loaded.len(), series.len());

    let fitted = fit_hubbert_curve(loaded.years(), loaded.production(), 1000.0).unwrap();
    assert!((fitted.peak_time - 2034.0).abs() <= 1.0);
}

// --- Report persistence ---

#[test]
fn test_report_roundtrip_through_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");

    let series = synthetic_hubbert_series(1000.0, 0.03, 2034.0);
    let forecaster = Forecaster::new(&series, 1000.0, Unit::Exajoules);
    let report = forecaster.forecast().unwrap();

    write_report_json(&report, &path, true).unwrap();
    let loaded = read_report_json(&path).unwrap();

    assert_approx_eq!(loaded.hubbert.steepness, report.hubbert.steepness, 1e-12);
    assert_approx_eq!(
        loaded.laherrere_cumulative,
        report.laherrere_cumulative,
        1e-9
    );
    assert_eq!(loaded.unit, Unit::Exajoules);
}

// --- Unit conversion ---

#[test]
fn test_gigabarrel_conversion_scales_fit_linearly() {
    let urr_ej = 1000.0;
    let series_ej = synthetic_hubbert_series(urr_ej, 0.03, 2034.0);
    let series_gb = series_ej.to_gigabarrels();
    let urr_gb = urr_ej / peakcast::models::EJ_PER_GB;

    let fit_ej = fit_hubbert_curve(series_ej.years(), series_ej.production(), urr_ej).unwrap();
    let fit_gb = fit_hubbert_curve(series_gb.years(), series_gb.production(), urr_gb).unwrap();

    // The shape parameters are unit-invariant; only the URR scales.
    assert!((fit_ej.steepness - fit_gb.steepness).abs() < 1e-6);
    assert!((fit_ej.peak_time - fit_gb.peak_time).abs() < 0.05);
}
