//! Text position utilities: byte offsets to 1-indexed line/column.
//!
//! Lines and columns are **1-indexed** (matching editor and compiler
//! conventions); byte offsets are **0-indexed**. Columns count bytes, which
//! is exact for ASCII source and stable for anything else — the engine only
//! ever reports positions, it never converts user-facing columns back.

use memchr::memchr_iter;

/// Convert a byte offset to a 1-indexed `(line, column)` pair.
///
/// If `offset` exceeds the content length, the position of the end of the
/// content is returned.
pub fn byte_offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    LineMap::new(content).line_col(offset)
}

/// Precomputed table of line start offsets for one source text.
///
/// Building the map is a single `memchr` scan; lookups are binary searches.
/// A [`LineMap`] is owned by each compilation unit and shared by every
/// position resolution for that unit.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the first character of each line. `line_starts[0]` is
    /// always 0, even for empty content.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    /// Build a line map for the given content.
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr_iter(b'\n', content.as_bytes()).map(|pos| pos + 1));
        LineMap {
            line_starts,
            len: content.len(),
        }
    }

    /// Number of lines (a trailing newline does not start a new line unless
    /// followed by content; an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a 1-indexed `(line, column)` pair.
    ///
    /// Offsets past the end of the content are clamped to the end.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line_index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line_index];
        (line_index as u32 + 1, col as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_zero_is_line_one_col_one() {
        assert_eq!(byte_offset_to_position("abc", 0), (1, 1));
    }

    #[test]
    fn offsets_within_first_line() {
        assert_eq!(byte_offset_to_position("abc\ndef", 2), (1, 3));
    }

    #[test]
    fn offset_at_newline_belongs_to_current_line() {
        assert_eq!(byte_offset_to_position("abc\ndef", 3), (1, 4));
    }

    #[test]
    fn offset_after_newline_starts_next_line() {
        assert_eq!(byte_offset_to_position("abc\ndef", 4), (2, 1));
        assert_eq!(byte_offset_to_position("abc\ndef", 6), (2, 3));
    }

    #[test]
    fn offset_past_end_clamps() {
        assert_eq!(byte_offset_to_position("abc", 100), (1, 4));
    }

    #[test]
    fn empty_content() {
        let map = LineMap::new("");
        assert_eq!(map.line_count(), 1);
        assert_eq!(map.line_col(0), (1, 1));
    }

    #[test]
    fn line_map_matches_free_function() {
        let content = "line one\nline two\n\nline four";
        let map = LineMap::new(content);
        for offset in 0..=content.len() {
            assert_eq!(
                map.line_col(offset),
                byte_offset_to_position(content, offset),
                "offset {}",
                offset
            );
        }
    }

    #[test]
    fn line_count_counts_trailing_newline_start() {
        // "a\nb\n" has starts at 0, 2, 4 - the empty final line counts.
        assert_eq!(LineMap::new("a\nb\n").line_count(), 3);
    }
}
