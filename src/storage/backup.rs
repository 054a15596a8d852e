//! Backup-on-save handling
//!
//! Before the ledger is rewritten, the existing file is renamed to
//! `<path>.backup_<YYYYMMDD_HHMMSS>`. When two saves land in the same second
//! the later backup gets a `_1`, `_2`, ... suffix. Backups are never pruned.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::file_io::with_suffix;
use crate::error::{FinanceError, FinanceResult};

/// Marker between the ledger file name and the timestamp
pub const BACKUP_MARKER: &str = ".backup_";

/// Timestamp format embedded in backup names
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Length of a formatted timestamp (`YYYYMMDD_HHMMSS`)
const TIMESTAMP_LEN: usize = 15;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created (local time, from the filename)
    pub created_at: NaiveDateTime,
    /// Collision counter for backups created in the same second
    pub sequence: u32,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Pick an unused backup path for `path` at `timestamp`
pub fn backup_path_for(path: &Path, timestamp: NaiveDateTime) -> PathBuf {
    let stamp = format!("{}{}", BACKUP_MARKER, timestamp.format(BACKUP_TIMESTAMP_FORMAT));
    let candidate = with_suffix(path, &stamp);
    if !candidate.exists() {
        return candidate;
    }

    (1u32..)
        .map(|n| with_suffix(path, &format!("{}_{}", stamp, n)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// Rename the file at `path` to a fresh backup name and return that name
pub fn rename_to_backup(path: &Path, timestamp: NaiveDateTime) -> FinanceResult<PathBuf> {
    let backup = backup_path_for(path, timestamp);
    fs::rename(path, &backup).map_err(|e| {
        FinanceError::Storage(format!(
            "Failed to move {} to {}: {}",
            path.display(),
            backup.display(),
            e
        ))
    })?;
    debug!(from = %path.display(), to = %backup.display(), "created backup");
    Ok(backup)
}

/// List all backups of `path`, newest first
pub fn list_backups(path: &Path) -> FinanceResult<Vec<BackupInfo>> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| FinanceError::Storage(format!("Not a file path: {}", path.display())))?
        .to_string_lossy()
        .to_string();
    let prefix = format!("{}{}", file_name, BACKUP_MARKER);

    let mut backups = Vec::new();
    for entry in fs::read_dir(&dir)
        .map_err(|e| FinanceError::Io(format!("Failed to read backup directory: {}", e)))?
    {
        let entry =
            entry.map_err(|e| FinanceError::Io(format!("Failed to read directory entry: {}", e)))?;

        let filename = entry.file_name().to_string_lossy().to_string();
        let Some((created_at, sequence)) = filename
            .strip_prefix(&prefix)
            .and_then(parse_backup_suffix)
        else {
            continue;
        };

        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        backups.push(BackupInfo {
            filename,
            path: entry.path(),
            created_at,
            sequence,
            size_bytes,
        });
    }

    backups.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.sequence.cmp(&a.sequence))
    });

    Ok(backups)
}

/// Parse `YYYYMMDD_HHMMSS` with an optional `_N` collision counter
fn parse_backup_suffix(suffix: &str) -> Option<(NaiveDateTime, u32)> {
    if suffix.len() < TIMESTAMP_LEN || !suffix.is_char_boundary(TIMESTAMP_LEN) {
        return None;
    }
    let (stamp, rest) = suffix.split_at(TIMESTAMP_LEN);
    let created_at = NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT).ok()?;

    let sequence = if rest.is_empty() {
        0
    } else {
        rest.strip_prefix('_')?.parse().ok()?
    };

    Some((created_at, sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn timestamp(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 27)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_backup_name_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        let backup = backup_path_for(&path, timestamp(14, 30, 22));
        assert_eq!(
            backup,
            temp_dir.path().join("ledger.json.backup_20251127_143022")
        );
    }

    #[test]
    fn test_same_second_backups_are_unique() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let ts = timestamp(14, 30, 22);

        fs::write(&path, "[]").unwrap();
        let first = rename_to_backup(&path, ts).unwrap();
        fs::write(&path, "[]").unwrap();
        let second = rename_to_backup(&path, ts).unwrap();

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
        assert!(second.to_string_lossy().ends_with("backup_20251127_143022_1"));
        assert!(!path.exists());
    }

    #[test]
    fn test_list_backups_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        fs::write(temp_dir.path().join("ledger.json.backup_20251127_100000"), "[]").unwrap();
        fs::write(temp_dir.path().join("ledger.json.backup_20251127_120000"), "[]").unwrap();
        fs::write(temp_dir.path().join("ledger.json.backup_20251127_120000_1"), "[]").unwrap();
        fs::write(temp_dir.path().join("other.json.backup_20251127_130000"), "[]").unwrap();
        fs::write(temp_dir.path().join("ledger.json.backup_garbage"), "[]").unwrap();

        let backups = list_backups(&path).unwrap();
        let names: Vec<_> = backups.iter().map(|b| b.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ledger.json.backup_20251127_120000_1",
                "ledger.json.backup_20251127_120000",
                "ledger.json.backup_20251127_100000",
            ]
        );
        assert_eq!(backups[0].size_bytes, 2);
    }

    #[test]
    fn test_list_backups_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent").join("ledger.json");
        assert!(list_backups(&path).unwrap().is_empty());
    }

    #[test]
    fn test_parse_backup_suffix() {
        let (created, seq) = parse_backup_suffix("20251127_143022").unwrap();
        assert_eq!(created, timestamp(14, 30, 22));
        assert_eq!(seq, 0);

        let (_, seq) = parse_backup_suffix("20251127_143022_3").unwrap();
        assert_eq!(seq, 3);

        assert!(parse_backup_suffix("20251127").is_none());
        assert!(parse_backup_suffix("20251127_143022x").is_none());
    }
}
