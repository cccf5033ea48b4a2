use std::path::Path;

use crate::analysis::ForecastReport;
use crate::error::ForecastError;

/// Write a forecast report to a JSON file.
pub fn write_report_json(
    report: &ForecastReport,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), ForecastError> {
    let content = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

/// Read a forecast report back from a JSON file.
pub fn read_report_json(path: impl AsRef<Path>) -> Result<ForecastReport, ForecastError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HubbertParameters, LaherrereParameters, Unit};
    use assert_approx_eq::assert_approx_eq;

    fn sample_report() -> ForecastReport {
        ForecastReport {
            urr: 12000.0,
            unit: Unit::Exajoules,
            hubbert: HubbertParameters {
                urr: 12000.0,
                steepness: 0.025,
                peak_time: 2033.0,
            },
            laherrere: LaherrereParameters {
                peak_production: 190.0,
                tm: 2034.0,
                c: 160.0,
            },
            hubbert_cumulative: 10850.0,
            laherrere_cumulative: 11020.0,
        }
    }

    #[test]
    fn test_report_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report_json(&sample_report(), &path, true).unwrap();
        let loaded = read_report_json(&path).unwrap();

        assert_approx_eq!(loaded.urr, 12000.0, 1e-12);
        assert_approx_eq!(loaded.hubbert.steepness, 0.025, 1e-12);
        assert_approx_eq!(loaded.laherrere_cumulative, 11020.0, 1e-9);
    }

    #[test]
    fn test_compact_json_has_no_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report_json(&sample_report(), &path, false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.trim().contains('\n'));
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            read_report_json(&path),
            Err(ForecastError::Json(_))
        ));
    }
}
