use std::path::{Path, PathBuf};

use fractic_server_error::ServerError;

use crate::{
    engine::WeekdayTablePolicy,
    errors::{InvalidRon, ReadError},
};

pub const DEFAULT_SHEET_NAME: &str = "Reporte de Asistencia";

/// Runtime settings, read from a RON file. Every field is optional.
///
/// ```ron
/// (
///     ledger_path: "registros_horas.csv",
///     roster_path: "empleados.csv",
///     sheet_name: Some("Reporte de Asistencia"),
///     expected_minutes: (saturday: 300),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(default)]
pub struct PayrollConfig {
    pub ledger_path: PathBuf,
    pub roster_path: PathBuf,
    /// Worksheet holding the report; `None` reads the first sheet.
    pub sheet_name: Option<String>,
    pub expected_minutes: WeekdayTablePolicy,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("registros_horas.csv"),
            roster_path: PathBuf::from("empleados.csv"),
            sheet_name: Some(DEFAULT_SHEET_NAME.to_string()),
            expected_minutes: WeekdayTablePolicy::default(),
        }
    }
}

impl PayrollConfig {
    pub fn from_string(s: &str) -> Result<Self, ServerError> {
        ron::from_str(s).map_err(|e| InvalidRon::with_debug("PayrollConfig", &e))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        Self::from_string(
            &std::fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(PayrollConfig::from_string("()").unwrap(), PayrollConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = PayrollConfig::from_string(
            r#"(
                ledger_path: "/srv/nomina/horas.csv",
                sheet_name: None,
                expected_minutes: (saturday: 300),
            )"#,
        )
        .unwrap();
        assert_eq!(config.ledger_path, PathBuf::from("/srv/nomina/horas.csv"));
        assert_eq!(config.roster_path, PathBuf::from("empleados.csv"));
        assert_eq!(config.sheet_name, None);
        assert_eq!(config.expected_minutes.saturday, 300);
        assert_eq!(config.expected_minutes.monday, 600);
    }

    #[test]
    fn test_invalid_config() {
        assert!(PayrollConfig::from_string("(ledger_path: 3)").is_err());
        assert!(PayrollConfig::from_string("(unknown").is_err());
    }
}
