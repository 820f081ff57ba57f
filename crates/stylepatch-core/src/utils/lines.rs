//! Character-indexed helpers for editing lines.
//!
//! Violation columns count characters, not bytes, so every edit goes through
//! these helpers to stay on `char` boundaries.

use crate::formatter::FormatError;
use crate::types::Violation;

/// Returns the line a violation points to.
///
/// # Errors
///
/// Returns [`FormatError::LineOutOfRange`] if the line does not exist.
pub fn reported_line<'a>(lines: &'a [String], violation: &Violation) -> Result<&'a str, FormatError> {
    if violation.line == 0 {
        return Err(FormatError::LineOutOfRange {
            line: violation.line,
            len: lines.len(),
        });
    }
    lines
        .get(violation.line_index())
        .map(String::as_str)
        .ok_or(FormatError::LineOutOfRange {
            line: violation.line,
            len: lines.len(),
        })
}

/// Builds the out-of-range error for a column on the reported line.
#[must_use]
pub fn column_error(violation: &Violation, line: &str) -> FormatError {
    FormatError::ColumnOutOfRange {
        line: violation.line,
        column: violation.column,
        len: line.chars().count(),
    }
}

/// Byte offset of the character at `column`; the line length for `column == chars`.
#[must_use]
pub fn byte_offset(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(line.len()))
        .nth(column)
}

/// The character at `column`, if any.
#[must_use]
pub fn char_at(line: &str, column: usize) -> Option<char> {
    line.chars().nth(column)
}

/// Inserts `text` before the character at `column`.
#[must_use]
pub fn insert_at(line: &str, column: usize, text: &str) -> Option<String> {
    let offset = byte_offset(line, column)?;
    let mut result = String::with_capacity(line.len() + text.len());
    result.push_str(&line[..offset]);
    result.push_str(text);
    result.push_str(&line[offset..]);
    Some(result)
}

/// Removes the character at `column`.
#[must_use]
pub fn remove_at(line: &str, column: usize) -> Option<String> {
    let offset = byte_offset(line, column)?;
    let c = line[offset..].chars().next()?;
    let mut result = String::with_capacity(line.len());
    result.push_str(&line[..offset]);
    result.push_str(&line[offset + c.len_utf8()..]);
    Some(result)
}

/// Characters `from..to` of `line` (clamped to the line).
#[must_use]
pub fn char_slice(line: &str, from: usize, to: usize) -> &str {
    let start = byte_offset(line, from).unwrap_or(line.len());
    let end = byte_offset(line, to).unwrap_or(line.len()).max(start);
    &line[start..end]
}

/// Copies `lines` with line `index` replaced.
#[must_use]
pub fn with_line(lines: &[String], index: usize, line: String) -> Vec<String> {
    let mut result = lines.to_vec();
    result[index] = line;
    result
}

/// Splits file content into lines.
///
/// `\r\n`, `\n` and a lone `\r` all end a line. A terminator at the very end
/// does not start another line.
#[must_use]
pub fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;
    while let Some(end) = rest.find(['\r', '\n']) {
        lines.push(rest[..end].to_string());
        let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + width..];
    }
    if !rest.is_empty() {
        lines.push(rest.to_string());
    }
    lines
}
