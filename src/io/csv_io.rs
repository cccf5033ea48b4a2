use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::error::ForecastError;
use crate::models::ProductionSeries;

/// CSV row structure for historical production data.
///
/// Both columns are read as raw strings so that non-numeric entries can be
/// dropped row-by-row instead of failing the whole file.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct ProductionRow {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Production")]
    production: Option<String>,
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<(Vec<f64>, Vec<f64>, usize), ForecastError> {
    let mut years = Vec::new();
    let mut production = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.deserialize() {
        let row: ProductionRow = result?;
        let year = row.year.as_deref().and_then(parse_number);
        let value = row.production.as_deref().and_then(parse_number);
        match (year, value) {
            (Some(y), Some(p)) => {
                years.push(y);
                production.push(p);
            }
            _ => dropped += 1,
        }
    }

    Ok((years, production, dropped))
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a historical production series from a CSV file with `Year` and
/// `Production` columns.
///
/// Rows with missing or non-numeric values in either column are dropped; a
/// file with no usable rows is an error.
pub fn read_production_csv(path: impl AsRef<Path>) -> Result<ProductionSeries, ForecastError> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let (years, production, dropped) = parse_csv_records(&mut rdr)?;
    if dropped > 0 {
        warn!(
            dropped,
            path = %path.display(),
            "dropped rows with missing or non-numeric values"
        );
    }
    if years.is_empty() {
        return Err(ForecastError::InsufficientData(format!(
            "no usable rows in {}",
            path.display()
        )));
    }

    ProductionSeries::new(years, production)
}

/// Read a historical production series from CSV bytes.
pub fn read_production_csv_from_bytes(data: &[u8]) -> Result<ProductionSeries, ForecastError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let (years, production, dropped) = parse_csv_records(&mut rdr)?;
    if dropped > 0 {
        warn!(dropped, "dropped rows with missing or non-numeric values");
    }
    if years.is_empty() {
        return Err(ForecastError::InsufficientData(
            "no usable rows in CSV data".to_string(),
        ));
    }

    ProductionSeries::new(years, production)
}

/// Write a production series to a CSV file with `Year` and `Production`
/// columns.
pub fn write_production_csv(
    series: &ProductionSeries,
    path: impl AsRef<Path>,
) -> Result<(), ForecastError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for (year, value) in series.years().iter().zip(series.production()) {
        wtr.serialize(ProductionRow {
            year: Some(year.to_string()),
            production: Some(value.to_string()),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_read_valid_csv() {
        let data = b"Year,Production\n2000,50.5\n2001,55.0\n2002,60.25\n";
        let series = read_production_csv_from_bytes(data).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.years(), &[2000.0, 2001.0, 2002.0]);
        assert_approx_eq!(series.production()[2], 60.25, 1e-12);
    }

    #[test]
    fn test_non_numeric_rows_dropped() {
        let data = b"Year,Production\n2000,50\nnot-a-year,55\n2002,sixty\n2003,65\n";
        let series = read_production_csv_from_bytes(data).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.years(), &[2000.0, 2003.0]);
    }

    #[test]
    fn test_missing_values_dropped() {
        let data = b"Year,Production\n2000,50\n2001,\n,60\n2003,65\n";
        let series = read_production_csv_from_bytes(data).unwrap();
        assert_eq!(series.years(), &[2000.0, 2003.0]);
    }

    #[test]
    fn test_short_rows_dropped() {
        let data = b"Year,Production\n2000,50\n2001\n2002,60\n";
        let series = read_production_csv_from_bytes(data).unwrap();
        assert_eq!(series.years(), &[2000.0, 2002.0]);
    }

    #[test]
    fn test_all_rows_unusable_is_error() {
        let data = b"Year,Production\nx,y\n,,\n";
        let result = read_production_csv_from_bytes(data);
        assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
    }

    #[test]
    fn test_whitespace_trimmed() {
        let data = b"Year,Production\n 2000 , 50.5 \n";
        let series = read_production_csv_from_bytes(data).unwrap();
        assert_eq!(series.years(), &[2000.0]);
        assert_approx_eq!(series.production()[0], 50.5, 1e-12);
    }

    #[test]
    fn test_csv_roundtrip() {
        let series = ProductionSeries::new(
            vec![2000.0, 2001.0, 2002.0],
            vec![50.0, 55.5, 60.0],
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("production.csv");

        write_production_csv(&series, &path).unwrap();
        let loaded = read_production_csv(&path).unwrap();

        assert_eq!(loaded.years(), series.years());
        for (a, b) in loaded.production().iter().zip(series.production()) {
            assert_approx_eq!(a, b, 1e-12);
        }
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_production_csv("/nonexistent/production.csv");
        assert!(result.is_err());
    }
}
