//! Appending generated rules to a stylesheet.
//!
//! Output format, one rule per line under a marker comment:
//!
//! ```text
//! /* Generated classes moved from inline styles */
//! .inl-1a2b3c4d { color:red; margin:0; }
//! ```

use super::normalize::CanonicalDeclaration;
use super::registry::ClassId;

/// Marker written above each block of generated rules.
pub const DEFAULT_BLOCK_COMMENT: &str = "Generated classes moved from inline styles";

/// Render one generated rule (without trailing newline).
pub fn render_rule(id: &ClassId, declaration: &CanonicalDeclaration) -> String {
    format!(".{} {{ {} }}", id, declaration)
}

/// Return `existing` with one rule per allocated pair appended.
///
/// Existing content is never modified. With nothing allocated the input is
/// returned unchanged.
pub fn emit(
    existing: &str,
    allocated: &[(CanonicalDeclaration, ClassId)],
    block_comment: &str,
) -> String {
    if allocated.is_empty() {
        return existing.to_string();
    }

    let mut css = String::with_capacity(existing.len() + 64 * (allocated.len() + 1));
    css.push_str(existing);
    if !existing.is_empty() {
        if !existing.ends_with('\n') {
            css.push('\n');
        }
        css.push('\n');
    }

    css.push_str(&format!("/* {} */\n", block_comment));
    for (declaration, id) in allocated {
        css.push_str(&render_rule(id, declaration));
        css.push('\n');
    }
    css
}
