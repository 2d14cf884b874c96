//! Locating `style="..."` attributes and their enclosing tags.
//!
//! This is a text scanner, not an HTML parser. Known limits:
//! - only double-quoted `style` attributes are recognized, and only when
//!   whitespace separates them from what comes before;
//! - the tag start is the nearest `<` before the attribute, so a `<` or `>`
//!   inside an *earlier* attribute value of the same tag confuses it (a `>`
//!   makes the attribute look like it is outside any tag and it is skipped);
//! - the tag end is the first `>` after the attribute that is not inside a
//!   quoted value.

use std::fmt;
use std::ops::Range;

const STYLE_NEEDLE: &str = "style=\"";
const CLASS_NEEDLE: &str = "class=";

/// A `style="..."` attribute found inside a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAttr {
    /// From the `s` of `style` through the closing quote.
    pub attr: Range<usize>,
    /// The raw declaration between the quotes.
    pub value: Range<usize>,
    /// The enclosing tag, `<` through `>` inclusive.
    pub tag: Range<usize>,
    /// The tag's first `class` attribute, if it has one.
    pub class: Option<ClassAttr>,
}

/// A `class` attribute inside a tag, with a double-quoted, single-quoted or
/// unquoted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAttr {
    pub attr: Range<usize>,
    pub value: Range<usize>,
    /// Unquoted values are rewritten with double quotes when merged.
    pub quoted: bool,
}

/// Line and column (both 1-based) of a byte offset, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn locate(text: &str, offset: usize) -> Self {
        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A style attribute that was skipped. The rest of the document is still
/// processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// `style="` with no closing quote before the end of the document.
    MalformedAttribute { at: Position },
    /// No enclosing `<tag ...>` could be found for the attribute.
    UnboundedTag { at: Position },
    /// `style="` directly after a quoted value, as in `class="a"style="b"`.
    UnseparatedAttribute { at: Position },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::MalformedAttribute { at } => {
                write!(f, "{}: unterminated style attribute", at)
            }
            ScanWarning::UnboundedTag { at } => {
                write!(f, "{}: style attribute is not inside a tag", at)
            }
            ScanWarning::UnseparatedAttribute { at } => {
                write!(
                    f,
                    "{}: style attribute is not separated from the previous attribute",
                    at
                )
            }
        }
    }
}

/// Lazy, left-to-right scan of one document snapshot.
#[derive(Debug)]
pub struct Locator<'a> {
    text: &'a str,
    cursor: usize,
    done: bool,
}

impl<'a> Locator<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            done: false,
        }
    }
}

impl Iterator for Locator<'_> {
    type Item = Result<StyleAttr, ScanWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while !self.done {
            let Some(found) = self.text[self.cursor..].find(STYLE_NEEDLE) else {
                self.done = true;
                break;
            };
            let start = self.cursor + found;
            let value_start = start + STYLE_NEEDLE.len();
            self.cursor = value_start;

            // `data-style="..."` and friends are other attributes.
            if start == 0 || !bytes[start - 1].is_ascii_whitespace() {
                if start > 0 && matches!(bytes[start - 1], b'"' | b'\'') {
                    return Some(Err(ScanWarning::UnseparatedAttribute {
                        at: Position::locate(self.text, start),
                    }));
                }
                continue;
            }

            let Some(value_end) = find_closing_quote(bytes, value_start) else {
                self.done = true;
                return Some(Err(ScanWarning::MalformedAttribute {
                    at: Position::locate(self.text, start),
                }));
            };
            self.cursor = value_end + 1;

            let attr = start..value_end + 1;
            let Some(tag) = enclosing_tag(bytes, &attr) else {
                return Some(Err(ScanWarning::UnboundedTag {
                    at: Position::locate(self.text, start),
                }));
            };
            let class = find_class_attr(self.text, &tag);

            return Some(Ok(StyleAttr {
                attr,
                value: value_start..value_end,
                tag,
                class,
            }));
        }

        None
    }
}

/// Index of the next `"` at or after `from` that is not preceded by a backslash.
fn find_closing_quote(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&i| bytes[i] == b'"' && (i == from || bytes[i - 1] != b'\\'))
}

/// Span of the tag containing `attr`, `<` through `>` inclusive.
fn enclosing_tag(bytes: &[u8], attr: &Range<usize>) -> Option<Range<usize>> {
    let open = bytes[..attr.start]
        .iter()
        .rposition(|&b| b == b'<' || b == b'>')?;
    if bytes[open] != b'<' || !bytes.get(open + 1)?.is_ascii_alphabetic() {
        return None;
    }

    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(attr.end) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(open..i + 1),
            None if b == b'<' => return None,
            None => {}
        }
    }
    None
}

/// First `class` attribute of the tag, ignoring text inside other attribute
/// values.
fn find_class_attr(text: &str, tag: &Range<usize>) -> Option<ClassAttr> {
    let tag_text = &text[tag.clone()];
    let bytes = tag_text.as_bytes();
    let mut quote: Option<u8> = None;

    for i in 1..bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        if bytes[i - 1].is_ascii_whitespace() && tag_text[i..].starts_with(CLASS_NEEDLE) {
            let after = i + CLASS_NEEDLE.len();
            return match bytes.get(after) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let value_start = after + 1;
                    let value_end = value_start + tag_text[value_start..].find(q as char)?;
                    Some(ClassAttr {
                        attr: tag.start + i..tag.start + value_end + 1,
                        value: tag.start + value_start..tag.start + value_end,
                        quoted: true,
                    })
                }
                _ => {
                    let value_end = (after..bytes.len())
                        .find(|&j| bytes[j].is_ascii_whitespace() || bytes[j] == b'>')
                        .unwrap_or(bytes.len());
                    Some(ClassAttr {
                        attr: tag.start + i..tag.start + value_end,
                        value: tag.start + after..tag.start + value_end,
                        quoted: false,
                    })
                }
            };
        }
        if b == b'"' || b == b'\'' {
            quote = Some(b);
        }
    }
    None
}

/// Byte offset just past the tag name, relative to the tag text (`<div ...>`
/// gives 4).
pub fn tag_name_end(tag_text: &str) -> usize {
    tag_text
        .bytes()
        .enumerate()
        .skip(1)
        .find(|&(_, b)| b.is_ascii_whitespace() || b == b'/' || b == b'>')
        .map(|(i, _)| i)
        .unwrap_or(tag_text.len())
}
