//! Tabulation settings for the collision database: whether collision
//! integrals are pre-tabulated on a uniform temperature grid, and the grid
//! bounds. All attributes are optional in the serialized form; absent ones
//! take the defaults below. Validation happens once, at database
//! construction, and only when tabulation is enabled.

use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::transport_api::TransportDbError;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportDbSettings {
    /// pre-tabulate collision integrals on a uniform grid
    pub tabulate: bool,
    /// lower grid bound, K
    pub Tmin: f64,
    /// upper grid bound, K
    pub Tmax: f64,
    /// grid spacing, K
    pub dT: f64,
}

impl Default for TransportDbSettings {
    fn default() -> Self {
        TransportDbSettings {
            tabulate: true,
            Tmin: 300.0,
            Tmax: 20000.0,
            dT: 100.0,
        }
    }
}

impl TransportDbSettings {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses settings from a JSON attribute record; absent attributes keep
    /// their defaults.
    pub fn from_serde(data: serde_json::Value) -> Result<Self, TransportDbError> {
        let settings: TransportDbSettings = serde_json::from_value(data)?;
        Ok(settings)
    }

    /// Loads settings from a JSON file.
    pub fn from_file(file_name: &str) -> Result<Self, TransportDbError> {
        let path = Path::new(file_name);
        if !path.exists() {
            return Err(TransportDbError::FileError(format!(
                "File '{}' does not exist",
                file_name
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TransportDbError::FileError(format!("Failed to read file '{}': {}", file_name, e))
        })?;

        match serde_json::from_str::<TransportDbSettings>(&content) {
            Ok(settings) => {
                info!("Loaded tabulation settings from file '{}'", file_name);
                Ok(settings)
            }
            Err(e) => {
                let error_msg = format!(
                    "Error parsing settings file '{}' at line {}, column {}: {}",
                    file_name,
                    e.line(),
                    e.column(),
                    e
                );
                error!("{}", error_msg);
                Err(TransportDbError::FileError(error_msg))
            }
        }
    }

    /// Checks the grid definition. Skipped entirely when tabulation is off,
    /// since no grid is ever built then.
    pub fn validate(&self) -> Result<(), TransportDbError> {
        if !self.tabulate {
            return Ok(());
        }
        if self.Tmin <= 0.0 {
            return Err(TransportDbError::InvalidSettings(
                "Tmin must be positive".to_string(),
            ));
        }
        if self.Tmax <= 0.0 {
            return Err(TransportDbError::InvalidSettings(
                "Tmax must be positive".to_string(),
            ));
        }
        if self.dT <= 0.0 {
            return Err(TransportDbError::InvalidSettings(
                "dT must be positive".to_string(),
            ));
        }
        if self.Tmin >= self.Tmax {
            return Err(TransportDbError::InvalidSettings(
                "Tmin must be less than Tmax".to_string(),
            ));
        }
        let span = (self.Tmax - self.Tmin) / self.dT;
        if (span - span.round()).abs() / span >= 1.0e-15 {
            return Err(TransportDbError::InvalidSettings(
                "(Tmax - Tmin)/dT must be a positive whole number".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of grid nodes, `Tmin..=Tmax` inclusive. Meaningful only after
    /// `validate` passed.
    pub fn n_points(&self) -> usize {
        ((self.Tmax - self.Tmin) / self.dT).round() as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = TransportDbSettings::new();
        assert!(settings.tabulate);
        assert_eq!(settings.Tmin, 300.0);
        assert_eq!(settings.Tmax, 20000.0);
        assert_eq!(settings.dT, 100.0);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.n_points(), 198);
    }

    #[test]
    fn test_from_serde_partial_attributes() {
        let settings =
            TransportDbSettings::from_serde(serde_json::json!({"Tmax": 10000.0})).unwrap();
        assert!(settings.tabulate);
        assert_eq!(settings.Tmin, 300.0);
        assert_eq!(settings.Tmax, 10000.0);
        assert_eq!(settings.dT, 100.0);

        let settings = TransportDbSettings::from_serde(serde_json::json!({})).unwrap();
        assert_eq!(settings, TransportDbSettings::default());
    }

    #[test]
    fn test_whole_span_validation() {
        // span = 197, whole number
        let ok = TransportDbSettings {
            tabulate: true,
            Tmin: 300.0,
            Tmax: 20000.0,
            dT: 100.0,
        };
        assert!(ok.validate().is_ok());

        // span = 197.5
        let bad = TransportDbSettings {
            Tmax: 20050.0,
            ..ok.clone()
        };
        match bad.validate() {
            Err(TransportDbError::InvalidSettings(msg)) => {
                assert!(msg.contains("whole number"));
            }
            other => panic!("expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_bound_validation() {
        let base = TransportDbSettings::new();

        let bad = TransportDbSettings {
            Tmin: -1.0,
            ..base.clone()
        };
        assert!(bad.validate().is_err());

        let bad = TransportDbSettings {
            dT: 0.0,
            ..base.clone()
        };
        assert!(bad.validate().is_err());

        let bad = TransportDbSettings {
            Tmin: 5000.0,
            Tmax: 400.0,
            ..base.clone()
        };
        assert!(bad.validate().is_err());

        // anything goes when tabulation is off
        let off = TransportDbSettings {
            tabulate: false,
            Tmin: -1.0,
            ..base
        };
        assert!(off.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"tabulate": true, "Tmin": 300.0, "Tmax": 400.0, "dT": 50.0}"#)
            .unwrap();
        let settings = TransportDbSettings::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.Tmax, 400.0);
        assert_eq!(settings.n_points(), 3);

        assert!(TransportDbSettings::from_file("no_such_settings.json").is_err());

        let mut broken = NamedTempFile::new().unwrap();
        broken.write_all(b"{not json").unwrap();
        assert!(TransportDbSettings::from_file(broken.path().to_str().unwrap()).is_err());
    }
}
