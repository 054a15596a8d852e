//! Export module for the finance tracker
//!
//! - CSV: the interchange format, also accepted by import
//! - JSON/YAML: full ledger export with summary

pub mod csv;
pub mod full;

pub use self::csv::{
    default_export_filename, export_rows, export_transactions_csv, write_csv, ExportRow,
    AMOUNT_COLUMN,
};
pub use self::full::{FullExport, FullExportFormat, EXPORT_SCHEMA_VERSION};
