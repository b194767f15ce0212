//! Line/column positions over UTF-8 source text.

/// A zero-based line and character (byte column) position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Byte offsets of every line start in a text.
///
/// `\r\n`, `\n` and lone `\r` end a line. LS/PS do not, since editors and
/// diagnostics count physical lines.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(text: &str) -> LineMap {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while let Some(offset) = memchr::memchr2(b'\n', b'\r', &bytes[i..]) {
            let at = i + offset;
            i = if bytes[at] == b'\r' && bytes.get(at + 1) == Some(&b'\n') {
                at + 2
            } else {
                at + 1
            };
            line_starts.push(i as u32);
        }
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[u32] {
        &self.line_starts
    }

    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Line index containing `offset`.
    pub fn line_of(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = self.line_of(offset);
        Position {
            line: line as u32,
            character: offset - self.line_starts[line],
        }
    }

    /// End of the line content, before its line terminator.
    pub fn line_content_end(&self, text: &str, line: usize) -> u32 {
        let Some(&start) = self.line_starts.get(line) else {
            return text.len() as u32;
        };
        let next = self
            .line_starts
            .get(line + 1)
            .map_or(text.len(), |&s| s as usize);
        let content = &text.as_bytes()[start as usize..next];
        let terminator = if content.ends_with(b"\r\n") {
            2
        } else if content.ends_with(b"\n") || content.ends_with(b"\r") {
            1
        } else {
            0
        };
        (next - terminator) as u32
    }
}
