use std::ops::Range as ByteRange;

use ropey::Rope;

use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent, Url};

pub use crate::lsp::models::{LspDocument, LspDocumentState};

/// Converts an LSP position (UTF-16 code units) to a byte offset in the Rope.
///
/// Lines past the end map to the end of the text; columns past the end of a
/// line map to the end of that line.
pub fn position_to_byte_offset(position: &Position, text: &Rope) -> usize {
    let line = position.line as usize;
    if line >= text.len_lines() {
        return text.len_bytes();
    }
    let line_start = text.line_to_char(line);
    let line_text = text.line(line);
    let mut line_len = line_text.len_chars();
    // Exclude the line break
    while line_len > 0 && matches!(line_text.char(line_len - 1), '\n' | '\r') {
        line_len -= 1;
    }
    let line_end = line_start + line_len;
    let start_cu = text.char_to_utf16_cu(line_start);
    let end_cu = text.char_to_utf16_cu(line_end);
    let target_cu = (start_cu + position.character as usize).min(end_cu);
    text.char_to_byte(text.utf16_cu_to_char(target_cu))
}

/// Converts a byte offset to an LSP position (UTF-16 code units).
pub fn byte_offset_to_position(offset: usize, text: &Rope) -> Position {
    let char_idx = text.byte_to_char(offset.min(text.len_bytes()));
    let line = text.char_to_line(char_idx);
    let line_start = text.line_to_char(line);
    let character = text.char_to_utf16_cu(char_idx) - text.char_to_utf16_cu(line_start);
    Position {
        line: line as u32,
        character: character as u32,
    }
}

pub fn byte_range_to_range(range: &ByteRange<usize>, text: &Rope) -> Range {
    Range {
        start: byte_offset_to_position(range.start, text),
        end: byte_offset_to_position(range.end, text),
    }
}

impl LspDocumentState {
    pub fn new(uri: Url, text: &str, version: i32) -> Self {
        Self {
            uri,
            text: Rope::from_str(text),
            version,
        }
    }

    /// Applies a list of content changes to the document state.
    /// Returns the updated text if the version is newer, otherwise an error.
    pub fn apply(&mut self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) -> Result<String, String> {
        if version <= self.version {
            return Err(format!("Version {} not newer than {}", version, self.version));
        }
        for change in &changes {
            if let Some(range) = change.range {
                let start = self.text.byte_to_char(position_to_byte_offset(&range.start, &self.text));
                let end = self.text.byte_to_char(position_to_byte_offset(&range.end, &self.text));
                self.text.remove(start..end.max(start));
                self.text.insert(start, &change.text);
            } else {
                self.text = Rope::from_str(&change.text);
            }
        }
        self.version = version;
        Ok(self.text.to_string())
    }

    pub fn offset_at(&self, position: &Position) -> usize {
        position_to_byte_offset(position, &self.text)
    }

    pub fn range_of(&self, range: &ByteRange<usize>) -> Range {
        byte_range_to_range(range, &self.text)
    }
}

impl LspDocument {
    pub fn new(id: u32, uri: Url, text: &str, version: i32) -> Self {
        Self {
            id,
            state: tokio::sync::RwLock::new(LspDocumentState::new(uri, text, version)),
        }
    }

    /// Returns the URI of the document.
    pub async fn uri(&self) -> Url {
        self.state.read().await.uri.clone()
    }

    /// Returns the current text of the document as a string.
    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    /// Returns the current version of the document.
    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    /// Applies changes to the document, returning the new text.
    pub async fn apply(&self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) -> Option<String> {
        let mut state = self.state.write().await;
        state.apply(changes, version).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn create_test_document(uri: &str, text: &str) -> Arc<LspDocument> {
        Arc::new(LspDocument::new(1, Url::parse(uri).unwrap(), text, 0))
    }

    fn ranged(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position { line: start.0, character: start.1 },
                end: Position { line: end.0, character: end.1 },
            }),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_apply_full_change() {
        let doc = create_test_document("file:///test.zen", "initial text");
        let changes = vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new text".to_string(),
        }];

        assert_eq!(doc.apply(changes, 1).await.as_deref(), Some("new text"));
        assert_eq!(doc.version().await, 1);
    }

    #[tokio::test]
    async fn test_apply_multiple_incremental() {
        let doc = create_test_document("file:///test.zen", "hello world");
        let changes = vec![ranged((0, 6), (0, 11), "rust"), ranged((0, 0), (0, 5), "hi")];

        assert_eq!(doc.apply(changes, 1).await.as_deref(), Some("hi rust"));
    }

    #[tokio::test]
    async fn test_apply_outdated_version() {
        let doc = create_test_document("file:///test.zen", "initial text");
        let change = || vec![ranged((0, 0), (0, 7), "old")];

        assert!(doc.apply(change(), 1).await.is_some());
        assert!(doc.apply(change(), 1).await.is_none(), "Same version must be rejected");
        assert_eq!(doc.text().await, "old text");
        assert_eq!(doc.version().await, 1);
    }

    #[test]
    fn test_utf16_positions() {
        // `é` is one UTF-16 unit and two bytes; `😀` is two units and four bytes
        let rope = Rope::from_str("é😀x\nab");
        let x = Position { line: 0, character: 3 };
        assert_eq!(position_to_byte_offset(&x, &rope), 6);
        assert_eq!(byte_offset_to_position(6, &rope), x);

        let b = Position { line: 1, character: 1 };
        assert_eq!(position_to_byte_offset(&b, &rope), 9);
        assert_eq!(byte_offset_to_position(9, &rope), b);
    }

    #[test]
    fn test_positions_are_clamped() {
        let rope = Rope::from_str("ab\ncd");
        let past_line_end = Position { line: 0, character: 40 };
        assert_eq!(position_to_byte_offset(&past_line_end, &rope), 2);
        let past_end = Position { line: 9, character: 0 };
        assert_eq!(position_to_byte_offset(&past_end, &rope), 5);
        assert_eq!(byte_offset_to_position(99, &rope), Position { line: 1, character: 2 });
    }

    #[test]
    fn test_range_of_span() {
        let state = LspDocumentState::new(Url::parse("file:///a.zen").unwrap(), "<p>\n<Foo />", 0);
        let range = state.range_of(&(5..8));
        assert_eq!(range.start, Position { line: 1, character: 1 });
        assert_eq!(range.end, Position { line: 1, character: 4 });
    }
}
