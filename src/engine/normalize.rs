//! Canonical form of an inline `style` attribute value.
//!
//! The canonical form is the deduplication key for generated classes, so it
//! must be stable: segments are trimmed, internal whitespace is collapsed,
//! empty segments are dropped, and the remaining segments are joined with
//! `"; "` and always terminated by a single `;`. Segment order is kept as
//! written because later declarations override earlier ones in CSS.

use std::fmt;

/// A normalized, order-preserving style declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalDeclaration(String);

impl CanonicalDeclaration {
    /// The canonical text, e.g. `color:red; margin:0;`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the source attribute held no declarations at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw `style` attribute value.
pub fn normalize(raw: &str) -> CanonicalDeclaration {
    let segments: Vec<String> = raw
        .split(';')
        .map(collapse_whitespace)
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return CanonicalDeclaration(String::new());
    }

    let mut canonical = segments.join("; ");
    canonical.push(';');
    CanonicalDeclaration(canonical)
}

/// Trim a segment and fold every whitespace run (newlines, tabs) into one space.
fn collapse_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
