//! Backup CLI commands
//!
//! Listing the save-time backups of the ledger and restoring one.

use std::path::PathBuf;

use crate::display::format_backup_list;
use crate::error::{FinanceError, FinanceResult};
use crate::services::LedgerService;

/// Handle `backups`
pub fn handle_backups(service: &LedgerService) -> FinanceResult<()> {
    let backups = service.list_backups()?;
    println!("Backups of {}", service.store().path().display());
    print!("{}", format_backup_list(&backups));
    Ok(())
}

/// Resolve a backup argument: `latest`, a path, or a file name next to the
/// ledger
fn resolve_backup(service: &LedgerService, backup: &str) -> FinanceResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return service
            .list_backups()?
            .into_iter()
            .next()
            .map(|b| b.path)
            .ok_or_else(|| FinanceError::Storage("No backups found".into()));
    }

    let as_given = PathBuf::from(backup);
    if as_given.exists() {
        return Ok(as_given);
    }

    let beside_ledger = service
        .store()
        .path()
        .parent()
        .map(|dir| dir.join(backup))
        .unwrap_or(as_given);
    Ok(beside_ledger)
}

/// Handle `restore`
pub fn handle_restore(service: &mut LedgerService, backup: &str) -> FinanceResult<()> {
    let path = resolve_backup(service, backup)?;
    let outcome = service.restore(&path)?;

    println!(
        "Restored {} transactions from {}",
        outcome.load.loaded,
        path.display()
    );
    if !outcome.load.dropped.is_empty() {
        println!("Skipped {} invalid records.", outcome.load.dropped.len());
    }
    if let Some(previous) = outcome.save.backup {
        println!("Previous ledger backed up to: {}", previous.display());
    }
    Ok(())
}
