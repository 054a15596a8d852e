//! Full ledger export
//!
//! Exports every transaction plus the headline summary to JSON or YAML, with
//! a schema version for compatibility checking.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Transaction;
use crate::reports::Summary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Output format of a full export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullExportFormat {
    Json { pretty: bool },
    Yaml,
}

/// Full ledger export structure
#[derive(Debug, Clone, Serialize)]
pub struct FullExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Every transaction, in ledger order
    pub transactions: &'a [Transaction],

    /// Totals over the exported transactions
    pub summary: Summary,
}

impl<'a> FullExport<'a> {
    /// Build an export of a ledger snapshot
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            summary: Summary::generate(transactions),
        }
    }

    /// Write the export in the requested format
    pub fn write<W: Write>(&self, mut writer: W, format: FullExportFormat) -> FinanceResult<()> {
        match format {
            FullExportFormat::Json { pretty: true } => serde_json::to_writer_pretty(&mut writer, self)
                .map_err(|e| FinanceError::Export(format!("Failed to write JSON: {}", e)))?,
            FullExportFormat::Json { pretty: false } => serde_json::to_writer(&mut writer, self)
                .map_err(|e| FinanceError::Export(format!("Failed to write JSON: {}", e)))?,
            FullExportFormat::Yaml => {
                writeln!(writer, "# Finance tracker ledger export")
                    .and_then(|_| writeln!(writer, "# Generated: {}", self.exported_at))
                    .map_err(|e| FinanceError::Export(e.to_string()))?;
                serde_yaml::to_writer(&mut writer, self)
                    .map_err(|e| FinanceError::Export(format!("Failed to write YAML: {}", e)))?;
            }
        }

        if matches!(format, FullExportFormat::Json { .. }) {
            writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn ledger() -> Vec<Transaction> {
        vec![
            Transaction::parse("2025-01-01", "Salary", "1000", "Income").unwrap(),
            Transaction::parse("2025-01-02", "Rent", "400", "Expense").unwrap(),
        ]
    }

    #[test]
    fn test_json_export_contains_records_and_summary() {
        let ledger = ledger();
        let mut buffer = Vec::new();
        FullExport::new(&ledger)
            .write(&mut buffer, FullExportFormat::Json { pretty: true })
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(value["transactions"][1]["Amount"], -400.0);
        assert_eq!(value["summary"]["net_savings"], 600.0);
    }

    #[test]
    fn test_compact_json_is_single_line() {
        let ledger = ledger();
        let mut buffer = Vec::new();
        FullExport::new(&ledger)
            .write(&mut buffer, FullExportFormat::Json { pretty: false })
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.trim_end().lines().count(), 1);
    }

    #[test]
    fn test_yaml_export() {
        let ledger = ledger();
        let mut buffer = Vec::new();
        FullExport::new(&ledger)
            .write(&mut buffer, FullExportFormat::Yaml)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Finance tracker ledger export"));
        assert!(text.contains("Category: Rent"));

        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["summary"]["transaction_count"].as_u64(), Some(2));
    }

    #[test]
    fn test_summary_matches_ledger() {
        let ledger = ledger();
        let export = FullExport::new(&ledger);
        assert_eq!(export.summary.total_expense, Money::from_major(400));
    }
}
