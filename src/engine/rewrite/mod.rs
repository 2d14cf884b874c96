//! Rewriting a document so inline styles reference generated classes.
//!
//! Positions are taken from one immutable snapshot of the document. Matches
//! are grouped per tag, sorted by position, and applied in a single forward
//! pass that copies the untouched text between tags verbatim. The output
//! position of every edit is therefore its original position shifted by the
//! length change of all earlier edits; nothing is re-searched in mutated text.

mod tag;


pub use tag::TagEdit;

use super::locate::{Locator, Position, ScanWarning, StyleAttr};
use super::normalize::{CanonicalDeclaration, normalize};
use super::registry::{ClassId, ClassRegistry};
use crate::error::Result;
use std::ops::Range;

/// One tag edit as applied to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    /// Span of the tag in the input document.
    pub original: Range<usize>,
    /// Span of the rewritten tag in the output document.
    pub rewritten: Range<usize>,
    /// Classes the rewritten tag references.
    pub classes: Vec<ClassId>,
}

/// Everything produced by rewriting one document.
#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    /// The rewritten document text.
    pub text: String,
    /// Edited tags, in document order.
    pub edits: Vec<AppliedEdit>,
    /// Classes first allocated while rewriting this document.
    pub allocated: Vec<(CanonicalDeclaration, ClassId)>,
    /// Style attributes converted to a class that already existed.
    pub reused: usize,
    /// Empty style attributes that were removed without a class.
    pub stripped: usize,
    /// Attributes that were skipped.
    pub warnings: Vec<ScanWarning>,
}

impl RewriteOutcome {
    /// Whether the output differs from the input.
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Number of style attributes converted or stripped.
    pub fn converted(&self) -> usize {
        self.allocated.len() + self.reused + self.stripped
    }
}

/// Scan `document` and rewrite every inline style it contains.
pub fn rewrite_document(document: &str, registry: &mut ClassRegistry) -> Result<RewriteOutcome> {
    rewrite(document, Locator::new(document), registry)
}

/// Rewrite `document` using already located attributes.
///
/// `located` must come from a scan of this exact text. Fails only when the
/// registry reports a class id collision; unusable attributes become
/// warnings.
pub fn rewrite<I>(document: &str, located: I, registry: &mut ClassRegistry) -> Result<RewriteOutcome>
where
    I: IntoIterator<Item = std::result::Result<StyleAttr, ScanWarning>>,
{
    let mut outcome = RewriteOutcome::default();

    let mut attrs = Vec::new();
    for item in located {
        match item {
            Ok(attr) => attrs.push(attr),
            Err(warning) => outcome.warnings.push(warning),
        }
    }
    attrs.sort_by_key(|attr| attr.attr.start);

    let plan = plan_tag_edits(document, attrs, registry, &mut outcome)?;

    let mut text = String::with_capacity(document.len());
    let mut cursor = 0;
    for edit in &plan {
        text.push_str(&document[cursor..edit.tag.start]);
        let replacement = edit.render(document);
        let start = text.len();
        text.push_str(&replacement);
        outcome.edits.push(AppliedEdit {
            original: edit.tag.clone(),
            rewritten: start..text.len(),
            classes: edit.add.clone(),
        });
        cursor = edit.tag.end;
    }
    text.push_str(&document[cursor..]);

    outcome.text = text;
    Ok(outcome)
}

/// Group attributes by tag and resolve each declaration to a class.
fn plan_tag_edits(
    document: &str,
    attrs: Vec<StyleAttr>,
    registry: &mut ClassRegistry,
    outcome: &mut RewriteOutcome,
) -> Result<Vec<TagEdit>> {
    let mut plan: Vec<TagEdit> = Vec::new();

    for attr in attrs {
        let declaration = normalize(&document[attr.value.clone()]);

        let same_tag = plan.last().is_some_and(|last| last.tag == attr.tag);
        let overlaps = plan.last().is_some_and(|last| attr.tag.start < last.tag.end);

        if same_tag {
            if let Some(last) = plan.last_mut() {
                last.styles.push(attr);
            }
        } else if overlaps {
            // Overlapping but different tag spans cannot both be applied.
            outcome.warnings.push(ScanWarning::UnboundedTag {
                at: Position::locate(document, attr.attr.start),
            });
            continue;
        } else {
            plan.push(TagEdit::new(attr));
        }

        let Some(edit) = plan.last_mut() else {
            continue;
        };

        if declaration.is_empty() {
            outcome.stripped += 1;
            continue;
        }

        let allocation = registry.allocate(&declaration)?;
        if allocation.fresh {
            outcome
                .allocated
                .push((declaration, allocation.id.clone()));
        } else {
            outcome.reused += 1;
        }
        edit.push_class(allocation.id);
    }

    Ok(plan)
}
