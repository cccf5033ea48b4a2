use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::analysis::{ForecastReport, FutureProduction};
use crate::error::ForecastError;
use crate::models::ProductionSeries;

/// Render the forecast chart as an SVG file: historical production as a
/// scatter, both fitted curves over the full projection range, and dashed
/// vertical markers at each model's peak year.
///
/// Parent directories of `path` are created if needed.
pub fn render_forecast_chart(
    series: &ProductionSeries,
    projection: &FutureProduction,
    report: &ForecastReport,
    path: impl AsRef<Path>,
) -> Result<(), ForecastError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    draw(series, projection, report, path).map_err(|e| ForecastError::Plot(e.to_string()))
}

fn draw(
    series: &ProductionSeries,
    projection: &FutureProduction,
    report: &ForecastReport,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let x_min = projection.years.first().copied().unwrap_or(2000.0);
    let x_max = projection.years.last().copied().unwrap_or(2100.0);

    let y_max = series
        .production()
        .iter()
        .chain(&projection.laherrere)
        .chain(&projection.hubbert)
        .copied()
        .fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, (1280, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Production and Model Fits", ("sans-serif", 28))
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(format!("Production ({}/year)", report.unit))
        .x_labels(10)
        .y_labels(8)
        .draw()?;

    let laherrere_color = RGBColor(255, 140, 0);
    let hubbert_color = RED;
    let history_color = BLUE;
    let laherrere_peak_color = GREEN;
    let hubbert_peak_color = RGBColor(128, 0, 128);

    chart
        .draw_series(LineSeries::new(
            projection
                .years
                .iter()
                .zip(&projection.laherrere)
                .map(|(&x, &y)| (x, y)),
            laherrere_color.stroke_width(2),
        ))?
        .label("Laherrère Model Fit")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], laherrere_color.stroke_width(2))
        });

    chart
        .draw_series(LineSeries::new(
            projection
                .years
                .iter()
                .zip(&projection.hubbert)
                .map(|(&x, &y)| (x, y)),
            hubbert_color.stroke_width(2),
        ))?
        .label("Hubbert Model Fit")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], hubbert_color.stroke_width(2))
        });

    chart
        .draw_series(
            series
                .years()
                .iter()
                .zip(series.production())
                .map(|(&x, &y)| Circle::new((x, y), 3, history_color.filled())),
        )?
        .label("Historical Annual Production")
        .legend(move |(x, y)| Circle::new((x + 10, y), 3, history_color.filled()));

    chart
        .draw_series(DashedLineSeries::new(
            [(report.laherrere.tm, 0.0), (report.laherrere.tm, y_max)],
            6,
            4,
            laherrere_peak_color.stroke_width(1),
        ))?
        .label("Laherrère Peak Year")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], laherrere_peak_color.stroke_width(1))
        });

    chart
        .draw_series(DashedLineSeries::new(
            [(report.hubbert.peak_time, 0.0), (report.hubbert.peak_time, y_max)],
            6,
            4,
            hubbert_peak_color.stroke_width(1),
        ))?
        .label("Hubbert Peak Year")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], hubbert_peak_color.stroke_width(1))
        });

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.85))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}
