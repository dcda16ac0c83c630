use crate::*;

/// Character offset at which each line of `text` starts, followed by one
/// sentinel equal to the text length plus one.
///
/// Line breaks are taken from the token stream, so a newline inside a string,
/// comment or template starts a line exactly where the tokenizer says it does.
///
/// ```rust
/// use sqlscope::get_query_line_position;
///
/// assert_eq!(get_query_line_position("SELECT *\nFROM\n    table_a;"), vec![0, 9, 14, 27]);
/// ```
pub fn get_query_line_position(text: &str) -> Vec<usize> {
    let tokens = tokenize(text);
    let mut starts = vec![0];
    for token in &tokens {
        starts.extend(
            token
                .value
                .chars()
                .enumerate()
                .filter(|&(_, c)| c == '\n')
                .map(|(k, _)| token.start + k + 1),
        );
    }
    let len = tokens.last().map_or(0, |t| t.end);
    starts.push(len + 1);
    starts
}

/// Zero-based editor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{line}:{ch}")]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// Converts between flat character offsets and [`Position`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self {
            starts: get_query_line_position(text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Length of the indexed text in characters.
    pub fn len(&self) -> usize {
        self.sentinel() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sentinel(&self) -> usize {
        self.starts.last().copied().unwrap_or(1)
    }

    /// Offset of `position`. A column may point just past the end of its line.
    pub fn offset_of(&self, position: Position) -> Result<usize> {
        let Position { line, ch } = position;
        let lines = self.line_count();
        if line >= lines {
            return Err(Error::LineOutOfRange { line, lines });
        }
        let start = self.starts[line];
        let len = self.starts[line + 1] - 1 - start;
        if ch > len {
            return Err(Error::ColumnOutOfRange { line, ch, len });
        }
        Ok(start + ch)
    }

    /// Position of `offset`; the offset just past the last character is valid.
    pub fn position_of(&self, offset: usize) -> Result<Position> {
        let len = self.len();
        if offset > len {
            return Err(Error::OffsetOutOfRange { offset, len });
        }
        let line = self.starts.partition_point(|&s| s <= offset) - 1;
        Ok(Position::new(line, offset - self.starts[line]))
    }
}
