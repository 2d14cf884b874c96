//! Planning phase: rewrite every document in memory.

use super::types::{ConvertPlan, DocumentPlan};
use crate::context::ProjectContext;
use crate::discover::discover_documents;
use crate::engine::{ClassRegistry, emit, rewrite_document};
use crate::error::{DestyleError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read the stylesheet, treating a missing file as empty.
pub fn read_stylesheet(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(DestyleError::io("read stylesheet", path, e)),
    }
}

/// Rewrite the selected documents against one shared registry.
///
/// Nothing is written. The first read failure or class id collision aborts
/// the whole plan.
pub fn build_convert_plan(ctx: &ProjectContext, paths: &[PathBuf]) -> Result<ConvertPlan> {
    let stylesheet_path = ctx.stylesheet_path();
    let existing = read_stylesheet(&stylesheet_path)?;
    let mut registry = ClassRegistry::seed_from_stylesheet(&ctx.config.class_prefix, &existing)?;

    let mut documents = Vec::new();
    for path in discover_documents(ctx, paths)? {
        if path == stylesheet_path {
            continue;
        }

        let name = ctx.relative(&path);
        let text =
            fs::read_to_string(&path).map_err(|e| DestyleError::io("read document", &path, e))?;
        let outcome = rewrite_document(&text, &mut registry).map_err(|e| e.in_source(&name))?;

        documents.push(DocumentPlan {
            path,
            name,
            outcome,
        });
    }

    let added = registry.pending().to_vec();
    let stylesheet_text = emit(&existing, &added, &ctx.config.block_comment);

    Ok(ConvertPlan {
        documents,
        stylesheet_path,
        stylesheet_text,
        added,
    })
}
