use crate::error::LintError;

/// A 1-based line and column together with the byte offset they point at.
///
/// Columns count bytes from the start of the line, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// A single line of a [`Text`], without its terminating newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the first character of the line.
    pub from: usize,
    /// Byte offset just past the last character of the line.
    pub to: usize,
}

/// Line-indexed view of the text being linted.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    content: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> Text<'a> {
    pub fn new(content: &'a str) -> Self {
        let line_starts = core::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            line_starts,
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.content
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of lines. An empty document has one (empty) line.
    pub fn lines(&self) -> usize {
        self.line_starts.len()
    }

    /// Look up a line by its 1-based number.
    pub fn line(&self, number: usize) -> Option<Line> {
        let from = *self.line_starts.get(number.checked_sub(1)?)?;
        let to = self
            .line_starts
            .get(number)
            .map_or(self.content.len(), |next| next - 1);
        Some(Line { number, from, to })
    }

    /// Byte offset of `column` (0-based) on the 1-based `line`.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::LineOutOfRange`] if the document has fewer lines.
    pub fn document_position(&self, line: usize, column: usize) -> Result<usize, LintError> {
        let line = self.line(line).ok_or(LintError::LineOutOfRange {
            line,
            lines: self.lines(),
        })?;
        Ok(line.from + column)
    }

    /// The 1-based line and column of a byte offset. Offsets past the end are
    /// clamped to the end of the document.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        Position {
            line,
            column,
            offset,
        }
    }
}
