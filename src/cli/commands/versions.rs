//! Versions command handler: list catalog snapshots

use selector_helper::core::catalog::list_snapshots;
use selector_helper::error;
use std::path::Path;

/// Print the newest snapshot of every semester, newest semester first
pub fn run(dir: &Path) {
    match list_snapshots(dir) {
        Ok(files) => {
            for (idx, file) in files.iter().enumerate() {
                let latest = if idx == 0 { "  (in use)" } else { "" };
                println!("{}  {}{latest}", file.label(), file.name);
            }
        }
        Err(e) => {
            error!("Failed to list snapshots in {}: {e}", dir.display());
            eprintln!("✗ {e}");
        }
    }
}
