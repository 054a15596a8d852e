//! CLI command for CSV import

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{FinanceError, FinanceResult};
use crate::services::LedgerService;

/// Handle `import`: append valid rows, report skipped ones, save
pub fn handle_import(service: &mut LedgerService, path: &Path) -> FinanceResult<()> {
    let file = File::open(path).map_err(|e| {
        FinanceError::Import(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let outcome = service.import_csv(BufReader::new(file))?;

    println!(
        "Imported {} transactions from {}",
        outcome.imported_count,
        path.display()
    );
    if !outcome.skipped.is_empty() {
        println!("Skipped {} invalid rows:", outcome.skipped_count());
        for skipped in &outcome.skipped {
            println!("  row {}: {}", skipped.row, skipped.reason);
        }
    }

    if outcome.imported_count > 0 {
        service.save()?;
    }
    Ok(())
}
