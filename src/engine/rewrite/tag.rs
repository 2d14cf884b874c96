//! Planned edits on a single tag.

use crate::engine::locate::{ClassAttr, StyleAttr, tag_name_end};
use crate::engine::registry::ClassId;
use std::ops::Range;

/// All mutations planned for one tag occurrence.
///
/// Every `style` attribute in the tag is removed. Class ids are merged into
/// the existing `class` attribute, or a new one is inserted right after the
/// tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEdit {
    /// The tag span in the original document.
    pub tag: Range<usize>,
    /// Every `style` attribute found in the tag, in order.
    pub styles: Vec<StyleAttr>,
    /// The tag's existing `class` attribute.
    pub class_attr: Option<ClassAttr>,
    /// Class ids to reference, without duplicates, in first-seen order.
    pub add: Vec<ClassId>,
}

impl TagEdit {
    pub fn new(first: StyleAttr) -> Self {
        Self {
            tag: first.tag.clone(),
            class_attr: first.class.clone(),
            styles: vec![first],
            add: Vec::new(),
        }
    }

    pub fn push_class(&mut self, id: ClassId) {
        if !self.add.contains(&id) {
            self.add.push(id);
        }
    }

    /// Existing class tokens, in order.
    pub fn existing_classes<'a>(&self, document: &'a str) -> Vec<&'a str> {
        self.class_attr
            .as_ref()
            .map(|c| document[c.value.clone()].split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Render the replacement text for the tag span.
    pub fn render(&self, document: &str) -> String {
        let base = self.tag.start;
        let tag_text = &document[self.tag.clone()];
        let bytes = tag_text.as_bytes();
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();

        for style in &self.styles {
            let end = style.attr.end - base;
            let mut start = style.attr.start - base;
            while start > 0 && bytes[start - 1].is_ascii_whitespace() {
                start -= 1;
            }
            edits.push((start..end, String::new()));
        }

        if !self.add.is_empty() {
            match &self.class_attr {
                Some(class) => {
                    if let Some(value) = self.merged_class_value(document) {
                        if class.quoted {
                            edits.push((class.value.start - base..class.value.end - base, value));
                        } else {
                            let attr = class.attr.start - base..class.attr.end - base;
                            edits.push((attr, format!("class=\"{}\"", value)));
                        }
                    }
                }
                None => {
                    let at = tag_name_end(tag_text);
                    let ids: Vec<&str> = self.add.iter().map(ClassId::as_str).collect();
                    edits.push((at..at, format!(" class=\"{}\"", ids.join(" "))));
                }
            }
        }

        // Back to front so earlier ranges stay valid. At equal starts the
        // removal goes first so an insertion at the same point survives.
        edits.sort_by(|a, b| b.0.start.cmp(&a.0.start).then(b.0.end.cmp(&a.0.end)));

        let mut rendered = tag_text.to_string();
        for (range, replacement) in edits {
            rendered.replace_range(range, &replacement);
        }
        rendered
    }

    /// New `class` value, or `None` when every id is already present.
    fn merged_class_value(&self, document: &str) -> Option<String> {
        let mut tokens: Vec<&str> = Vec::new();
        for token in self.existing_classes(document) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        let missing: Vec<&str> = self
            .add
            .iter()
            .map(ClassId::as_str)
            .filter(|id| !tokens.contains(id))
            .collect();
        if missing.is_empty() {
            return None;
        }

        tokens.extend(missing);
        Some(tokens.join(" "))
    }
}
