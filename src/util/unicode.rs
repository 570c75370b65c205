//! Cell widths and cursor movement for task text.
//!
//! Byte offsets passed in must sit on char boundaries; every offset handed
//! back sits on a grapheme boundary.

use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

fn cell_width(grapheme: &str) -> usize {
    UnicodeWidthStr::width(grapheme)
}

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cell_width).sum()
}

/// Fit `s` into `max_cells`, ending in `…` when something had to go.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }

    let budget = max_cells - 1;
    let mut used = 0;
    let mut out: String = s
        .graphemes(true)
        .take_while(|g| {
            used += cell_width(g);
            used <= budget
        })
        .collect();
    out.push(ELLIPSIS);
    out
}

/// Boundary after the grapheme at `byte_offset`, or `None` at the end
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    GraphemeCursor::new(byte_offset, s.len(), true)
        .next_boundary(s, 0)
        .ok()
        .flatten()
}

/// Boundary before `byte_offset`, or `None` at the start
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    GraphemeCursor::new(byte_offset.min(s.len()), s.len(), true)
        .prev_boundary(s, 0)
        .ok()
        .flatten()
}

pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Byte offset of the grapheme covering `target_col`. A column in the
/// middle of a wide grapheme maps to its start; past the end maps to
/// `s.len()`.
pub fn display_col_to_byte_offset(s: &str, target_col: usize) -> usize {
    let mut col = 0;
    for (i, g) in s.grapheme_indices(true) {
        col += cell_width(g);
        if col > target_col {
            return i;
        }
    }
    s.len()
}

/// Start of the word left of `byte_offset` (words are whitespace-separated)
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let before = s[..byte_offset.min(s.len())].trim_end();
    before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8())
}

/// Start of the next word right of `byte_offset`, or the end of `s`
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    if byte_offset >= s.len() {
        return s.len();
    }
    let rest = s[byte_offset..]
        .trim_start_matches(|c: char| !c.is_whitespace())
        .trim_start();
    s.len() - rest.len()
}
