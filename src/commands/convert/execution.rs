//! Commit phase: write the stylesheet, then backups and documents.

use super::types::{ConvertPlan, ConvertResult};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::fs::{atomic_write_file, ensure_backup};

/// Write a plan to disk.
///
/// The caller holds the stylesheet lock. The stylesheet is replaced first
/// (only when the run allocated new classes), so a failure on a later
/// document never leaves a rewritten document referencing an undefined
/// class. Each modified document is then backed up (when `backup` is set)
/// and atomically replaced.
pub fn execute_convert(
    ctx: &ProjectContext,
    plan: &ConvertPlan,
    backup: bool,
) -> Result<ConvertResult> {
    let mut result = ConvertResult::default();

    if !plan.added.is_empty() {
        atomic_write_file(&plan.stylesheet_path, &plan.stylesheet_text)?;
        println!(
            "Appended {} rule(s) to {}",
            plan.added.len(),
            ctx.relative(&plan.stylesheet_path)
        );
        result.stylesheet_written = true;
    }

    for doc in plan.modified() {
        if backup
            && let Some(backup_path) = ensure_backup(&doc.path, &ctx.config.backup_suffix)?
        {
            result.backups.push(backup_path);
        }

        atomic_write_file(&doc.path, &doc.outcome.text)?;
        println!("Rewrote: {}", doc.name);
        result.documents_written += 1;
    }

    Ok(result)
}
