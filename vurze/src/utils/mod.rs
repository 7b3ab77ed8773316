//! Utilities module for vurze.
//!
//! This module provides various utility functions used across the codebase.

mod paths;

pub use paths::{collect_python_files_gitignore, is_excluded, normalize_display_path};

use ruff_text_size::TextSize;

/// Byte offsets where each line starts.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`, the same rule the Python
/// tokenizer applies. The first line always starts at 0, and the text after
/// the last terminator counts as a (possibly empty) final line.
fn line_starts(source: &str) -> Vec<usize> {
    let bytes = source.as_bytes();
    let mut starts = vec![0];
    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'\n' => starts.push(i + 1),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
            _ => {}
        }
    }
    starts
}

/// Splits `source` into lines, each keeping its own terminator.
///
/// The last element has no terminator and is empty when `source` ends with one.
/// Concatenating the result gives back `source`.
#[must_use]
pub fn split_lines_keep_ends(source: &str) -> Vec<&str> {
    let starts = line_starts(source);
    starts
        .iter()
        .zip(starts.iter().skip(1).chain(std::iter::once(&source.len())))
        .map(|(&start, &end)| &source[start..end])
        .collect()
}

/// Length in bytes of the line terminator `line` ends with.
#[must_use]
pub fn terminator_len(line: &str) -> usize {
    if line.ends_with("\r\n") {
        2
    } else if line.ends_with('\n') || line.ends_with('\r') {
        1
    } else {
        0
    }
}

/// A utility struct to convert byte offsets to line numbers.
///
/// The parser works with byte offsets, while line removal works on the
/// line array from [`split_lines_keep_ends`], so both share this one notion
/// of a line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for line terminators.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            line_starts: line_starts(source),
        }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = offset.to_usize();
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a `TextSize` to a 1-indexed `(line, column)` pair.
    /// The column counts bytes from the start of the line.
    #[must_use]
    pub fn line_column(&self, offset: TextSize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.line_starts.get(line - 1).copied().unwrap_or(0);
        (line, offset.to_usize().saturating_sub(start) + 1)
    }

    /// Number of lines, counting the (possibly empty) text after the last newline.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a = 1\n\nb = 2\n");
        assert_eq!(index.line_index(TextSize::from(0)), 1);
        assert_eq!(index.line_index(TextSize::from(4)), 1);
        assert_eq!(index.line_index(TextSize::from(6)), 2);
        assert_eq!(index.line_index(TextSize::from(7)), 3);
        assert_eq!(index.line_count(), 4);
    }

    #[test]
    fn test_line_column() {
        let index = LineIndex::new("def f():\n    pass\n");
        assert_eq!(index.line_column(TextSize::from(0)), (1, 1));
        assert_eq!(index.line_column(TextSize::from(13)), (2, 5));
    }

    #[test]
    fn test_line_index_lone_carriage_return() {
        let index = LineIndex::new("x = 1\r@vurze.sign\r\ndef f():\n");
        assert_eq!(index.line_index(TextSize::from(7)), 2);
        assert_eq!(index.line_index(TextSize::from(20)), 3);
        assert_eq!(index.line_count(), 4);
    }

    #[test]
    fn test_split_lines_keep_ends() {
        assert_eq!(
            split_lines_keep_ends("a\rb\r\nc\nd"),
            vec!["a\r", "b\r\n", "c\n", "d"]
        );
        assert_eq!(split_lines_keep_ends("a\n"), vec!["a\n", ""]);
        assert_eq!(split_lines_keep_ends(""), vec![""]);
    }

    #[test]
    fn test_terminator_len() {
        assert_eq!(terminator_len("a\r\n"), 2);
        assert_eq!(terminator_len("a\r"), 1);
        assert_eq!(terminator_len("a\n"), 1);
        assert_eq!(terminator_len("a"), 0);
    }
}
