//! User settings for the finance tracker
//!
//! Manages the ledger file location, display preferences and the default
//! loan-estimate parameters.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::FinanceError;
use crate::reports::LoanParams;

/// User settings for the finance tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Ledger file, relative to the data directory unless absolute
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default loan-estimate parameters
    #[serde(default)]
    pub loan: LoanParams,
}

fn default_schema_version() -> u32 {
    1
}

fn default_ledger_file() -> String {
    "finance_data.json".to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            ledger_file: default_ledger_file(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            loan: LoanParams::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.loan.validate().map_err(|e| {
                FinanceError::Config(format!("Invalid loan settings: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.ledger_file, "finance_data.json");
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.loan.tenure_years, 20);
        assert!((settings.loan.max_emi_ratio - 0.4).abs() < f64::EPSILON);
        assert!((settings.loan.annual_interest_rate - 0.09).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.ledger_file = "household.json".into();
        settings.loan.tenure_years = 15;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.ledger_file, "household.json");
        assert_eq!(loaded.loan.tenure_years, 15);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "$"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.ledger_file, "finance_data.json");
        assert_eq!(loaded.loan.tenure_years, 20);
    }

    #[test]
    fn test_invalid_loan_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"loan": {"max_emi_ratio": 2.0}}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }
}
