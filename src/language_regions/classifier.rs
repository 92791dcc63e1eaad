//! Cursor region classification
//!
//! Determines which syntactic region of a `.zen` document an offset falls in,
//! using marker counts over the text before the cursor rather than a parse:
//!
//! - script/style: `<script` opens vs `</script` closes (same for style)
//! - tag: the last `<` that starts a tag has no unquoted `>` after it
//! - attribute value: inside the tag, an opening quote has no closing quote
//! - expression: `{` opens exceed `}` closes in template text
//!
//! Script and style take precedence over every template region. The scan is
//! O(n) in the offset and deliberately not a stack machine, so unbalanced
//! markup degrades the result; the worst case is "template, no tag, no
//! expression", which only affects suggestion relevance.

use tracing::trace;

use super::blocks::mask_non_template;
use super::tags::is_tag_name_char;
use crate::metadata::DIRECTIVE_PREFIX;

/// Syntactic region containing the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Template,
    Script,
    Style,
    Expression,
    Tag,
    AttributeValue,
}

/// Everything the classifier knows about one offset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionContext {
    pub in_script: bool,
    pub in_style: bool,
    pub in_tag: bool,
    pub in_expression: bool,
    pub in_attribute_value: bool,
    /// Name of the tag whose attribute area holds the cursor
    pub tag_name: Option<String>,
    /// Attribute whose value (quoted or braced) holds the cursor
    pub attribute_name: Option<String>,
    /// True while the cursor is still on the tag name itself (`<Fo|`)
    pub in_tag_name: bool,
    /// Identifier run before the cursor, including a leading `@`, `:` or
    /// `zen:` prefix when present
    pub partial: String,
}

impl RegionContext {
    pub fn region(&self) -> Region {
        if self.in_script {
            Region::Script
        } else if self.in_style {
            Region::Style
        } else if self.in_attribute_value {
            Region::AttributeValue
        } else if self.in_expression {
            Region::Expression
        } else if self.in_tag {
            Region::Tag
        } else {
            Region::Template
        }
    }

    /// The partial identifier without any sigil or directive prefix
    pub fn partial_word(&self) -> &str {
        self.partial
            .strip_prefix(DIRECTIVE_PREFIX)
            .or_else(|| self.partial.strip_prefix('@'))
            .or_else(|| self.partial.strip_prefix(':'))
            .unwrap_or(&self.partial)
    }

    /// Leading `@` or `:` sigil of the partial identifier
    pub fn sigil(&self) -> Option<char> {
        if self.partial.starts_with(DIRECTIVE_PREFIX) {
            return None;
        }
        self.partial.chars().next().filter(|c| matches!(c, '@' | ':'))
    }

    /// Whether the cursor sits in the value of an event-handler attribute
    /// (`@click="..."`, `on:click={...}`, `onclick="..."`)
    pub fn is_event_handler_value(&self) -> bool {
        let in_value = self.in_attribute_value || (self.in_tag && self.in_expression);
        in_value && self.attribute_name.as_deref().is_some_and(is_event_attribute)
    }

    /// Whether the cursor sits in the value of a `zen:` directive
    pub fn is_directive_value(&self) -> bool {
        let in_value = self.in_attribute_value || (self.in_tag && self.in_expression);
        in_value
            && self
                .attribute_name
                .as_deref()
                .is_some_and(|name| name.starts_with(DIRECTIVE_PREFIX))
    }
}

/// `@click`, `on:click` and `onclick` style attribute names
pub fn is_event_attribute(name: &str) -> bool {
    if name.starts_with('@') || name.starts_with("on:") {
        return name.len() > 1;
    }
    // `onblur` is the shortest DOM handler attribute
    name.len() > 4
        && name.starts_with("on")
        && name[2..].chars().all(|c| c.is_ascii_lowercase())
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Classifies `offset` in `text`. Never fails.
///
/// Offsets past the end are clamped; offsets inside a multi-byte character
/// snap back to the start of that character.
pub fn classify(text: &str, offset: usize) -> RegionContext {
    let offset = floor_char_boundary(text, offset);
    let before = &text[..offset];

    let mut context = RegionContext {
        partial: extract_partial_identifier(before).to_string(),
        ..Default::default()
    };

    context.in_script = count_opens(before, "<script") > before.matches("</script").count();
    context.in_style = count_opens(before, "<style") > before.matches("</style").count();
    if context.in_script || context.in_style {
        trace!("classify({}) -> embedded block", offset);
        return context;
    }

    let masked = mask_non_template(before);
    let opens = masked.matches('{').count();
    let closes = masked.matches('}').count();
    context.in_expression = opens > closes;

    if let Some(tag_start) = open_tag_start(&masked) {
        context.in_tag = true;
        let tag_text = &masked[tag_start..];
        let name: String = tag_text[1..]
            .chars()
            .take_while(|c| is_tag_name_char(*c))
            .collect();
        context.in_tag_name = 1 + name.len() == tag_text.len();
        context.tag_name = Some(name).filter(|n| !n.is_empty());

        let state = scan_open_tag(tag_text);
        if let Some(value_start) = state.open_quote {
            context.in_attribute_value = true;
            context.attribute_name = attribute_before(&tag_text[..value_start]);
        } else if let Some(brace_start) = state.open_brace {
            context.attribute_name = attribute_before(&tag_text[..brace_start]);
        }
    }

    trace!("classify({}) -> {:?}", offset, context);
    context
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Counts `<script`/`<style` openings followed by a tag boundary
fn count_opens(text: &str, marker: &str) -> usize {
    text.match_indices(marker)
        .filter(|(idx, _)| {
            let next = text[idx + marker.len()..].chars().next();
            next.is_none_or(|c| c == '>' || c == '/' || c.is_whitespace())
        })
        .count()
}

/// Start of the tag still open at the end of `text`, if any
fn open_tag_start(text: &str) -> Option<usize> {
    let start = text
        .char_indices()
        .rev()
        .filter(|(_, c)| *c == '<')
        .map(|(idx, _)| idx)
        .find(|idx| {
            text[idx + 1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
        })?;

    let state = scan_open_tag(&text[start..]);
    (!state.closed).then_some(start)
}

#[derive(Debug, Default)]
struct OpenTagState {
    closed: bool,
    /// Offset (relative to the tag start) of an unclosed quote
    open_quote: Option<usize>,
    /// Offset of an unclosed `{` attribute value
    open_brace: Option<usize>,
}

fn scan_open_tag(tag_text: &str) -> OpenTagState {
    let mut state = OpenTagState::default();
    let mut quote: Option<(char, usize)> = None;
    let mut brace_depth = 0usize;
    let mut brace_start = None;

    for (idx, c) in tag_text.char_indices() {
        if let Some((q, _)) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if brace_depth == 0 => quote = Some((c, idx)),
            '{' => {
                if brace_depth == 0 {
                    brace_start = Some(idx);
                }
                brace_depth += 1;
            }
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '>' if brace_depth == 0 => {
                state.closed = true;
                return state;
            }
            _ => {}
        }
    }

    state.open_quote = quote.map(|(_, idx)| idx);
    if brace_depth > 0 {
        state.open_brace = brace_start;
    }
    state
}

/// Attribute name immediately before a value opener: `name="`, `name = {`
fn attribute_before(text: &str) -> Option<String> {
    let text = text.trim_end().strip_suffix('=')?.trim_end();
    let start = text
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace() || *c == '<')
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    let name = &text[start..];
    (!name.is_empty()).then(|| name.to_string())
}

/// Longest identifier suffix of `before`, keeping a leading `@`, `:` or
/// `zen:` prefix.
pub fn extract_partial_identifier(before: &str) -> &str {
    let word_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_char(*c))
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(before.len());

    let head = &before[..word_start];
    if let Some(rest) = head.strip_suffix(':') {
        if let Some(prefix_head) = rest.strip_suffix("zen") {
            let standalone = prefix_head
                .chars()
                .next_back()
                .is_none_or(|c| !is_identifier_char(c));
            if standalone {
                return &before[word_start - DIRECTIVE_PREFIX.len()..];
            }
        }
        return &before[word_start - 1..];
    }
    if head.ends_with('@') {
        return &before[word_start - 1..];
    }
    &before[word_start..]
}
