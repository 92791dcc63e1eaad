//! Lightweight scanner for opening tags in template text
//!
//! Produces tag names and attributes with byte spans. Quoted values (`"..."`,
//! `'...'`) and braced values (`{...}`, nesting counted) are recognised; a tag
//! that is never closed ends at the end of the input.

use std::ops::Range;

use crate::metadata::{DirectiveHosts, SLOT_ELEMENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDelimiter {
    DoubleQuote,
    SingleQuote,
    Braces,
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub text: String,
    /// Span of the value text, excluding delimiters
    pub span: Range<usize>,
    pub delimiter: ValueDelimiter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub name_span: Range<usize>,
    pub value: Option<AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub name_span: Range<usize>,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

impl Tag {
    pub fn is_component(&self) -> bool {
        is_component_name(&self.name)
    }
}

/// Component tags start with an uppercase ASCII letter
pub fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Kind of tag hosting an attribute position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCategory {
    Element,
    Component,
    /// The slot outlet accepts no directives
    Slot,
}

impl HostCategory {
    pub fn of(tag_name: &str) -> Self {
        if tag_name == SLOT_ELEMENT {
            HostCategory::Slot
        } else if is_component_name(tag_name) {
            HostCategory::Component
        } else {
            HostCategory::Element
        }
    }

    pub fn accepts(self, hosts: &DirectiveHosts) -> bool {
        match self {
            HostCategory::Element => hosts.element,
            HostCategory::Component => hosts.component,
            HostCategory::Slot => false,
        }
    }
}

pub(crate) fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

fn is_attribute_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'' | '<' | '{' | '}')
}

/// Scans all opening tags of `text`. Closing tags (`</div>`) are skipped.
///
/// Callers pass template text with script/style blocks already masked out
/// (see [`super::mask_non_template`]).
pub fn scan_tags(text: &str) -> Vec<Tag> {
    let bytes = text.as_bytes();
    let mut tags = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }
        let name_start = pos + 1;
        match bytes.get(name_start) {
            Some(b) if b.is_ascii_alphabetic() => {}
            _ => {
                pos += 1;
                continue;
            }
        }

        let name_end = text[name_start..]
            .char_indices()
            .find(|(_, c)| !is_tag_name_char(*c))
            .map(|(i, _)| name_start + i)
            .unwrap_or(text.len());

        let (tag, next) = scan_attributes(text, name_start..name_end);
        tags.push(tag);
        pos = next.max(name_end);
    }

    tags
}

fn scan_attributes(text: &str, name_span: Range<usize>) -> (Tag, usize) {
    let bytes = text.as_bytes();
    let mut attributes = Vec::new();
    let mut self_closing = false;
    let mut pos = name_span.end;

    loop {
        while pos < bytes.len() && (bytes[pos] as char).is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        match bytes[pos] {
            b'>' => {
                pos += 1;
                break;
            }
            b'/' => {
                self_closing = bytes.get(pos + 1) == Some(&b'>');
                pos += 1;
                continue;
            }
            // A new tag begins before this one closed
            b'<' => break,
            _ => {}
        }

        let attr_start = pos;
        let attr_end = text[attr_start..]
            .char_indices()
            .find(|(_, c)| !is_attribute_name_char(*c))
            .map(|(i, _)| attr_start + i)
            .unwrap_or(text.len());

        if attr_end == attr_start {
            // Stray character such as an unmatched quote; skip it
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            continue;
        }

        let mut attribute = Attribute {
            name: text[attr_start..attr_end].to_string(),
            name_span: attr_start..attr_end,
            value: None,
        };
        pos = attr_end;

        let mut look = pos;
        while look < bytes.len() && (bytes[look] as char).is_ascii_whitespace() {
            look += 1;
        }
        if bytes.get(look) == Some(&b'=') {
            look += 1;
            while look < bytes.len() && (bytes[look] as char).is_ascii_whitespace() {
                look += 1;
            }
            let (value, after) = scan_value(text, look);
            attribute.value = value;
            pos = after;
        }

        attributes.push(attribute);
    }

    let tag = Tag {
        name: text[name_span.clone()].to_string(),
        name_span,
        attributes,
        self_closing,
    };
    (tag, pos)
}

fn scan_value(text: &str, start: usize) -> (Option<AttributeValue>, usize) {
    let bytes = text.as_bytes();
    match bytes.get(start) {
        Some(&quote @ (b'"' | b'\'')) => {
            let body_start = start + 1;
            let body_end = text[body_start..]
                .find(quote as char)
                .map(|rel| body_start + rel)
                .unwrap_or(text.len());
            let delimiter = if quote == b'"' {
                ValueDelimiter::DoubleQuote
            } else {
                ValueDelimiter::SingleQuote
            };
            let value = AttributeValue {
                text: text[body_start..body_end].to_string(),
                span: body_start..body_end,
                delimiter,
            };
            (Some(value), (body_end + 1).min(text.len()))
        }
        Some(b'{') => {
            let body_start = start + 1;
            let mut depth = 1usize;
            let mut body_end = text.len();
            for (i, c) in text[body_start..].char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            body_end = body_start + i;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            let value = AttributeValue {
                text: text[body_start..body_end].to_string(),
                span: body_start..body_end,
                delimiter: ValueDelimiter::Braces,
            };
            (Some(value), (body_end + 1).min(text.len()))
        }
        Some(_) => {
            let end = text[start..]
                .char_indices()
                .find(|(_, c)| c.is_whitespace() || *c == '>')
                .map(|(i, _)| start + i)
                .unwrap_or(text.len());
            let value = AttributeValue {
                text: text[start..end].to_string(),
                span: start..end,
                delimiter: ValueDelimiter::Bare,
            };
            (Some(value), end)
        }
        None => (None, start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_tags() {
        let tags = scan_tags("<div class=\"a\"><Foo title={t} /></div>");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "div");
        assert_eq!(tags[0].attributes[0].name, "class");
        assert_eq!(tags[0].attributes[0].value.as_ref().unwrap().text, "a");
        assert_eq!(tags[1].name, "Foo");
        assert!(tags[1].is_component());
        assert!(tags[1].self_closing);
        let value = tags[1].attributes[0].value.as_ref().unwrap();
        assert_eq!(value.text, "t");
        assert_eq!(value.delimiter, ValueDelimiter::Braces);
    }

    #[test]
    fn test_name_span_points_at_name() {
        let text = "  <Card />";
        let tags = scan_tags(text);
        assert_eq!(&text[tags[0].name_span.clone()], "Card");
    }

    #[test]
    fn test_directive_and_event_attributes() {
        let text = r#"<li zen:for="item in items" @click="select" disabled>"#;
        let tag = &scan_tags(text)[0];
        let names: Vec<_> = tag.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["zen:for", "@click", "disabled"]);
        assert!(tag.attributes[2].value.is_none());
        let value = tag.attributes[0].value.as_ref().unwrap();
        assert_eq!(&text[value.span.clone()], "item in items");
    }

    #[test]
    fn test_greater_than_inside_quotes() {
        let tags = scan_tags(r#"<p zen:if="a > b">x</p><Bar />"#);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].attributes[0].value.as_ref().unwrap().text, "a > b");
        assert_eq!(tags[1].name, "Bar");
    }

    #[test]
    fn test_closing_tags_and_text_are_skipped() {
        let tags = scan_tags("a < b </div> <span>");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "span");
    }

    #[test]
    fn test_unterminated_tag() {
        let tags = scan_tags("<div zen:if=\"open");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].attributes[0].value.as_ref().unwrap().text, "open");
    }
}
