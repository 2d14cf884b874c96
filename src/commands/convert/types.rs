//! Data types for the convert command.

use crate::engine::{CanonicalDeclaration, ClassId, RewriteOutcome};
use std::path::PathBuf;

/// One document after its in-memory rewrite.
#[derive(Debug, Clone)]
pub struct DocumentPlan {
    /// Absolute path of the document.
    pub path: PathBuf,
    /// Root-relative display name.
    pub name: String,
    /// Rewritten text, edits, and warnings.
    pub outcome: RewriteOutcome,
}

/// Everything a run would write, computed before anything is written.
#[derive(Debug, Clone)]
pub struct ConvertPlan {
    /// Every selected document, in path order.
    pub documents: Vec<DocumentPlan>,
    /// Absolute path of the target stylesheet.
    pub stylesheet_path: PathBuf,
    /// Stylesheet text after the new rules are appended.
    pub stylesheet_text: String,
    /// Classes allocated by this run, in allocation order.
    pub added: Vec<(CanonicalDeclaration, ClassId)>,
}

impl ConvertPlan {
    /// Documents whose text changes.
    pub fn modified(&self) -> impl Iterator<Item = &DocumentPlan> {
        self.documents.iter().filter(|doc| doc.outcome.changed())
    }

    pub fn modified_count(&self) -> usize {
        self.modified().count()
    }

    pub fn reused_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.outcome.reused).sum()
    }

    pub fn stripped_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.outcome.stripped).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.outcome.warnings.len()).sum()
    }

    /// Whether committing the plan would write anything.
    pub fn has_changes(&self) -> bool {
        self.modified_count() > 0 || !self.added.is_empty()
    }
}

/// Summary of a committed run.
#[derive(Debug, Default)]
pub struct ConvertResult {
    /// Documents replaced on disk.
    pub documents_written: usize,
    /// Backups created by this run.
    pub backups: Vec<PathBuf>,
    /// Whether the stylesheet was replaced.
    pub stylesheet_written: bool,
}
