//! Inline style extraction engine.
//!
//! Data flow for one document:
//! 1. [`Locator`] finds `style="..."` attributes and their enclosing tags
//! 2. [`normalize`] turns each value into a [`CanonicalDeclaration`]
//! 3. [`ClassRegistry`] assigns or reuses a [`ClassId`]
//! 4. [`rewrite_document`] applies all tag edits in one forward pass
//! 5. [`emit`] appends the run's new rules to the stylesheet
//!
//! The engine works on in-memory text only; reading and writing files is the
//! caller's job.

pub mod emit;
pub mod locate;
pub mod normalize;
pub mod registry;
pub mod rewrite;

pub use emit::{DEFAULT_BLOCK_COMMENT, emit};
pub use locate::{Locator, Position, ScanWarning, StyleAttr};
pub use normalize::{CanonicalDeclaration, normalize};
pub use registry::{Allocation, ClassId, ClassRegistry, DEFAULT_CLASS_PREFIX, DIGEST_LEN};
pub use rewrite::{AppliedEdit, RewriteOutcome, TagEdit, rewrite, rewrite_document};
