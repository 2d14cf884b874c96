//! Event logging for the convert command.

use super::types::{ConvertPlan, ConvertResult};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use serde_json::json;
use std::path::Path;

/// Append the `convert` event for a finished run.
pub fn log_convert_event(
    ctx: &ProjectContext,
    log_path: &Path,
    plan: &ConvertPlan,
    result: Option<&ConvertResult>,
    dry_run: bool,
) -> Result<()> {
    let modified: Vec<&str> = plan.modified().map(|doc| doc.name.as_str()).collect();

    let event = Event::new(EventAction::Convert).with_details(json!({
        "dry_run": dry_run,
        "stylesheet": ctx.relative(&plan.stylesheet_path),
        "documents_scanned": plan.documents.len(),
        "documents_modified": modified.len(),
        "modified": modified,
        "classes_added": plan.added.len(),
        "classes_reused": plan.reused_count(),
        "styles_stripped": plan.stripped_count(),
        "warnings": plan.warning_count(),
        "backups_created": result.map(|r| r.backups.len()).unwrap_or(0),
    }));

    append_event(log_path, &event)
}
