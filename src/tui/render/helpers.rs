use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Left spans, padding, then right spans flush with the edge. The right
/// side is dropped when both don't fit.
pub(super) fn split_line<'a>(
    mut left: Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    width: usize,
    fill: Style,
) -> Line<'a> {
    let left_w = spans_width(&left);
    let right_w = spans_width(&right);
    if left_w + right_w < width {
        left.push(Span::styled(" ".repeat(width - left_w - right_w), fill));
        left.extend(right);
    }
    Line::from(left)
}

/// Slice of an edit buffer that keeps the cursor inside `avail` cells,
/// plus the cursor's column within that slice.
pub(super) fn edit_window(buffer: &str, cursor: usize, avail: usize) -> (&str, usize) {
    let cursor_col = unicode::byte_offset_to_display_col(buffer, cursor);
    if avail == 0 || cursor_col < avail {
        return (buffer, cursor_col);
    }
    let skip = cursor_col + 1 - avail;
    let start = unicode::display_col_to_byte_offset(buffer, skip);
    let shown_before = unicode::display_width(&buffer[start..cursor.min(buffer.len())]);
    (&buffer[start..], shown_before)
}
