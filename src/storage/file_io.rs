//! File I/O utilities for the JSON ledger
//!
//! Reading yields an untyped `serde_json::Value` so that the ledger store can
//! validate each record on its own. Writing goes through a temp file and a
//! rename so a failed serialization never leaves a half-written ledger.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::FinanceError;

/// Indentation used for the human-readable ledger file
const INDENT: &[u8] = b"    ";

/// Read a JSON file as a generic value, returning `None` if the file doesn't exist
///
/// Any failure to open or parse an existing file is a `Load` error.
pub fn read_json_value<P: AsRef<Path>>(path: P) -> Result<Option<serde_json::Value>, FinanceError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| FinanceError::Load(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| FinanceError::Load(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file with 4-space indentation
///
/// Data is written to `<path>.tmp` first and then renamed over `path`.
pub fn write_json_pretty<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FinanceError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = with_suffix(path, ".tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinanceError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
    data.serialize(&mut serializer)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinanceError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinanceError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinanceError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Append a suffix to the full path (`ledger.json` -> `ledger.json.tmp`)
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
