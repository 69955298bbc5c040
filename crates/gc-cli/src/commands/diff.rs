//! Diff command implementation

use std::path::Path;

use colored::Colorize;

use gc_content::UnifiedDiff;
use gc_fs::{NormalizedPath, load_config};

use crate::error::Result;

/// Run the diff command
///
/// Prints the unified diff from the backup file to the intended file.
pub fn run_diff(backup: &Path, intended: &Path, context: usize) -> Result<()> {
    let backup_path = NormalizedPath::new(backup);
    let intended_path = NormalizedPath::new(intended);
    let backup_text = load_config(&backup_path)?;
    let intended_text = load_config(&intended_path)?;

    let diff = UnifiedDiff::new(&backup_text, &intended_text)
        .with_labels(backup_path.as_str(), intended_path.as_str())
        .with_context(context);

    if diff.is_empty() {
        println!("{} No differences.", "OK".green().bold());
        return Ok(());
    }

    for line in diff.lines() {
        let styled = if line.starts_with("---") || line.starts_with("+++") {
            line.bold()
        } else if line.starts_with("@@") {
            line.cyan()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else {
            line.normal()
        };
        println!("{styled}");
    }

    Ok(())
}
