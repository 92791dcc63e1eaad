//! Embedded `<script>` and `<style>` blocks
//!
//! Blocks are located by plain substring search. An unterminated block runs
//! to the end of the document, which keeps the script extractor useful while
//! the user is still typing the closing tag.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Script,
    Style,
}

impl BlockKind {
    fn tag(self) -> &'static str {
        match self {
            BlockKind::Script => "script",
            BlockKind::Style => "style",
        }
    }
}

/// One embedded block: the byte range of its opening tag through its closing
/// tag (`outer`) and the byte range of its body (`content`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedBlock {
    pub kind: BlockKind,
    pub outer: Range<usize>,
    pub content: Range<usize>,
}

impl EmbeddedBlock {
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content.clone()]
    }
}

/// Finds every script and style block, ordered by position
pub fn find_blocks(text: &str) -> Vec<EmbeddedBlock> {
    let mut blocks = find_blocks_of(text, BlockKind::Script);
    blocks.extend(find_blocks_of(text, BlockKind::Style));
    blocks.sort_by_key(|b| b.outer.start);
    blocks
}

/// The first script block of the document, if any
pub fn script_block(text: &str) -> Option<EmbeddedBlock> {
    find_blocks_of(text, BlockKind::Script).into_iter().next()
}

fn find_blocks_of(text: &str, kind: BlockKind) -> Vec<EmbeddedBlock> {
    let open = format!("<{}", kind.tag());
    let close = format!("</{}", kind.tag());
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(&open) {
        let start = cursor + found;
        let after_name = start + open.len();

        // `<scripts>` or `<styled-box>` are not blocks
        let boundary = text[after_name..].chars().next();
        if !matches!(boundary, None | Some('>') | Some('/')) && !boundary.is_some_and(char::is_whitespace) {
            cursor = after_name;
            continue;
        }

        let Some(tag_end) = text[after_name..].find('>') else {
            break;
        };
        let content_start = after_name + tag_end + 1;

        let (content_end, outer_end) = match text[content_start..].find(&close) {
            Some(rel) => {
                let content_end = content_start + rel;
                let outer_end = text[content_end..]
                    .find('>')
                    .map(|gt| content_end + gt + 1)
                    .unwrap_or(text.len());
                (content_end, outer_end)
            }
            None => (text.len(), text.len()),
        };

        blocks.push(EmbeddedBlock {
            kind,
            outer: start..outer_end,
            content: content_start..content_end,
        });
        cursor = outer_end;
    }

    blocks
}

/// Returns a copy of `text` where script blocks, style blocks and HTML
/// comments are blanked out with spaces.
///
/// Byte offsets and line breaks are preserved, so offsets found in the masked
/// text are valid in the original.
pub fn mask_non_template(text: &str) -> String {
    let mut hidden: Vec<Range<usize>> = find_blocks(text).into_iter().map(|b| b.outer).collect();

    let mut cursor = 0;
    while let Some(found) = text[cursor..].find("<!--") {
        let start = cursor + found;
        let end = text[start + 4..]
            .find("-->")
            .map(|rel| start + 4 + rel + 3)
            .unwrap_or(text.len());
        hidden.push(start..end);
        cursor = end;
    }

    hidden.sort_by_key(|range| range.start);
    let mut pending = hidden.iter().peekable();

    let mut masked = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        while pending.peek().is_some_and(|range| range.end <= idx) {
            pending.next();
        }
        let is_hidden = pending.peek().is_some_and(|range| range.start <= idx);
        if is_hidden && ch != '\n' && ch != '\r' {
            for _ in 0..ch.len_utf8() {
                masked.push(' ');
            }
        } else {
            masked.push(ch);
        }
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_script_and_style() {
        let text = "<script>\nstate a = 1\n</script>\n<div></div>\n<style>p { color: red }</style>";
        let blocks = find_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Script);
        assert_eq!(blocks[0].content(text), "\nstate a = 1\n");
        assert_eq!(blocks[1].kind, BlockKind::Style);
        assert_eq!(blocks[1].content(text), "p { color: red }");
    }

    #[test]
    fn test_script_with_attributes() {
        let text = "<script lang=\"ts\">let x = 1</script>";
        let block = script_block(text).unwrap();
        assert_eq!(block.content(text), "let x = 1");
        assert_eq!(block.outer, 0..text.len());
    }

    #[test]
    fn test_unterminated_script_runs_to_end() {
        let text = "<script>\nstate a = 1\n";
        let block = script_block(text).unwrap();
        assert_eq!(block.content(text), "\nstate a = 1\n");
    }

    #[test]
    fn test_similar_tag_names_are_not_blocks() {
        assert!(script_block("<scripts>x</scripts>").is_none());
        assert!(find_blocks("<styled-box></styled-box>").is_empty());
    }

    #[test]
    fn test_mask_many_and_nested_ranges() {
        let mut text = String::from("<script>\n<!-- inside -->\nconst a = 1\n</script>\n");
        for i in 0..200 {
            text.push_str(&format!("<!-- note {} --><Item{} />\n", i, i));
        }
        let masked = mask_non_template(&text);

        assert_eq!(masked.len(), text.len());
        assert!(!masked.contains("const"));
        assert!(!masked.contains("note"));
        assert_eq!(masked.matches("<Item").count(), 200);
        assert_eq!(masked.find("<Item199 />"), text.find("<Item199 />"));
    }

    #[test]
    fn test_mask_preserves_offsets() {
        let text = "<script>let é = 1</script>\n<Foo />\n<!-- <Bar /> -->";
        let masked = mask_non_template(text);
        assert_eq!(masked.len(), text.len());
        assert!(masked.contains("<Foo />"));
        assert!(!masked.contains("script"));
        assert!(!masked.contains("Bar"));
        assert_eq!(masked.find("<Foo"), text.find("<Foo"));
    }
}
