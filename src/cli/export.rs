//! CLI commands for data export
//!
//! CSV for spreadsheets and re-import, JSON/YAML for a full export with
//! summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;

use crate::error::{FinanceError, FinanceResult};
use crate::export::{default_export_filename, FullExportFormat};
use crate::services::LedgerService;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (re-importable)
    Csv,
    /// JSON format (transactions and summary)
    Json,
    /// YAML format (transactions and summary, human-readable)
    Yaml,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Output path used when none is given, e.g. `finance_20250115.csv`
pub fn default_output(format: ExportFormat) -> PathBuf {
    let name = default_export_filename(Local::now().date_naive());
    Path::new(&name).with_extension(format.extension())
}

/// Handle `export`
pub fn handle_export(
    service: &LedgerService,
    format: ExportFormat,
    output: Option<PathBuf>,
    compact: bool,
) -> FinanceResult<()> {
    let output = output.unwrap_or_else(|| default_output(format));

    let file = File::create(&output).map_err(|e| {
        FinanceError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => service.export_csv(&mut writer)?,
        ExportFormat::Json => {
            service.export_full(&mut writer, FullExportFormat::Json { pretty: !compact })?
        }
        ExportFormat::Yaml => service.export_full(&mut writer, FullExportFormat::Yaml)?,
    }

    writer.flush().map_err(|e| {
        FinanceError::Export(format!("Failed to write {}: {}", output.display(), e))
    })?;

    println!(
        "Exported {} transactions to: {}",
        service.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_extension() {
        let csv = default_output(ExportFormat::Csv);
        let yaml = default_output(ExportFormat::Yaml);

        let name = csv.to_string_lossy();
        assert!(name.starts_with("finance_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "finance_YYYYMMDD.csv".len());
        assert_eq!(yaml.extension().and_then(|e| e.to_str()), Some("yaml"));
    }
}
