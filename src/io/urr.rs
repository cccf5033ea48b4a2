use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// One named URR estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrrEstimate {
    pub estimate: String,
    pub value: f64,
}

/// Table of named URR estimates loaded from a CSV file with `estimate` and
/// `value` columns.
#[derive(Debug, Clone)]
pub struct UrrTable {
    estimates: Vec<UrrEstimate>,
}

impl UrrTable {
    /// Load the table from a CSV file. Keys are stored trimmed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ForecastError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;

        let mut estimates = Vec::new();
        for result in rdr.deserialize() {
            let mut row: UrrEstimate = result?;
            row.estimate = row.estimate.trim().to_string();
            estimates.push(row);
        }

        if estimates.is_empty() {
            return Err(ForecastError::InsufficientData(format!(
                "no URR estimates in {}",
                path.as_ref().display()
            )));
        }
        Ok(Self { estimates })
    }

    /// Build a table directly from estimates (used by tests).
    pub fn from_estimates(estimates: Vec<UrrEstimate>) -> Self {
        Self { estimates }
    }

    /// All available estimate keys, in file order.
    pub fn keys(&self) -> Vec<&str> {
        self.estimates.iter().map(|e| e.estimate.as_str()).collect()
    }

    pub fn estimates(&self) -> &[UrrEstimate] {
        &self.estimates
    }

    /// Resolve an estimate key to its URR value.
    ///
    /// A missing key names the available keys; a non-positive value is
    /// rejected here so the fitting core never sees an invalid URR.
    pub fn lookup(&self, key: &str) -> Result<f64, ForecastError> {
        let key = key.trim();
        let found = self
            .estimates
            .iter()
            .find(|e| e.estimate == key)
            .ok_or_else(|| {
                ForecastError::UrrLookup(format!(
                    "URR key '{key}' not found. Available keys: {:?}",
                    self.keys()
                ))
            })?;
        if !found.value.is_finite() || found.value <= 0.0 {
            return Err(ForecastError::UrrLookup(format!(
                "URR estimate '{key}' has non-positive value {}",
                found.value
            )));
        }
        Ok(found.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_table() -> UrrTable {
        UrrTable::from_estimates(vec![
            UrrEstimate {
                estimate: "Estimate1".to_string(),
                value: 12000.0,
            },
            UrrEstimate {
                estimate: "Estimate2".to_string(),
                value: 19000.0,
            },
        ])
    }

    #[test]
    fn test_lookup_found() {
        let table = sample_table();
        assert_eq!(table.lookup("Estimate1").unwrap(), 12000.0);
        assert_eq!(table.lookup("Estimate2").unwrap(), 19000.0);
    }

    #[test]
    fn test_lookup_trims_key() {
        let table = sample_table();
        assert_eq!(table.lookup("  Estimate1 ").unwrap(), 12000.0);
    }

    #[test]
    fn test_lookup_missing_names_available_keys() {
        let table = sample_table();
        let err = table.lookup("Estimate9").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Estimate9"));
        assert!(msg.contains("Estimate1"));
        assert!(msg.contains("Estimate2"));
    }

    #[test]
    fn test_lookup_non_positive_value_rejected() {
        let table = UrrTable::from_estimates(vec![UrrEstimate {
            estimate: "Broken".to_string(),
            value: -5.0,
        }]);
        assert!(matches!(
            table.lookup("Broken"),
            Err(ForecastError::UrrLookup(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urr.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "estimate,value").unwrap();
        writeln!(file, "Estimate1,12000").unwrap();
        writeln!(file, " Estimate2 ,19000.5").unwrap();
        drop(file);

        let table = UrrTable::from_path(&path).unwrap();
        assert_eq!(table.keys(), vec!["Estimate1", "Estimate2"]);
        assert_eq!(table.lookup("Estimate2").unwrap(), 19000.5);
    }

    #[test]
    fn test_from_path_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urr.csv");
        std::fs::write(&path, "estimate,value\n").unwrap();
        let result = UrrTable::from_path(&path);
        assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
    }
}
