//! Comment Ranges
//!
//! Comments are trivia: they never become nodes, so consumers locate them by
//! byte offset relative to the tokens around them.
//!
//! Two views exist over the same trivia run:
//! - *leading* comments of a position are those after the first line break
//!   that follows it (or all of them at the start of a file);
//! - *trailing* comments of a position are those on the same line, up to the
//!   first line break.
//!
//! A comment that sits on the same line as the previous token is therefore
//! trailing for that token and never leading for the next one.

use serde::Serialize;

use crate::char_codes::{char_at, is_line_break, is_white_space_single_line};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a `/* */` comment
    pub is_multi_line: bool,
    /// Whether a line break follows the comment before any other comment
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }

    /// Whether the comment body itself contains a line break.
    pub fn spans_lines(&self, source: &str) -> bool {
        self.is_multi_line && self.get_text(source).chars().any(is_line_break)
    }
}

/// Leading comments of `pos`.
pub fn get_leading_comment_ranges(text: &str, pos: usize) -> Vec<CommentRange> {
    collect_comment_ranges(text, pos, false)
}

/// Trailing comments of `pos`.
pub fn get_trailing_comment_ranges(text: &str, pos: usize) -> Vec<CommentRange> {
    collect_comment_ranges(text, pos, true)
}

/// Every comment between `pos` and `end`, regardless of line breaks.
///
/// The range is expected to hold trivia only.
pub fn get_comment_ranges_between(text: &str, pos: usize, end: usize) -> Vec<CommentRange> {
    let end = end.min(text.len());
    let mut comments: Vec<CommentRange> = Vec::new();
    let mut i = pos;
    while i < end {
        let next = skip_line_break(text, skip_spaces(text, i));
        if next != i {
            if let Some(last) = comments.last_mut()
                && text[last.end as usize..next].chars().any(is_line_break)
            {
                last.has_trailing_new_line = true;
            }
            i = next;
            continue;
        }
        let found = collect_comment_ranges(text, i, true);
        let Some(first) = found.into_iter().next() else {
            break;
        };
        i = first.end as usize;
        comments.push(first);
    }
    comments
}

/// Skip whitespace and comments starting at `pos`.
pub fn skip_trivia(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i += 2;
                while let Some(ch) = char_at(text, i) {
                    if is_line_break(ch) {
                        break;
                    }
                    i += ch.len_utf8();
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = match memchr::memmem::find(&bytes[i + 2..], b"*/") {
                    Some(offset) => i + 2 + offset + 2,
                    None => bytes.len(),
                };
            }
            _ => match char_at(text, i) {
                Some(ch) if is_white_space_single_line(ch) || is_line_break(ch) => {
                    i += ch.len_utf8();
                }
                _ => break,
            },
        }
    }
    i
}

/// Check if a comment is a JSDoc-style documentation comment.
pub fn is_jsdoc_comment(comment: &CommentRange, source: &str) -> bool {
    let text = comment.get_text(source);
    text.starts_with("/**") && !text.starts_with("/***") && text != "/**/"
}

fn skip_spaces(text: &str, mut pos: usize) -> usize {
    while let Some(ch) = char_at(text, pos) {
        if !is_white_space_single_line(ch) {
            break;
        }
        pos += ch.len_utf8();
    }
    pos
}

fn skip_line_break(text: &str, pos: usize) -> usize {
    match char_at(text, pos) {
        Some('\r') if text.as_bytes().get(pos + 1) == Some(&b'\n') => pos + 2,
        Some(ch) if is_line_break(ch) => pos + ch.len_utf8(),
        _ => pos,
    }
}

fn collect_comment_ranges(text: &str, pos: usize, trailing: bool) -> Vec<CommentRange> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut comments = Vec::new();
    let mut collecting = trailing || pos == 0;
    let mut i = pos;

    // A shebang line is trivia only at the very start of a file.
    if i == 0 && bytes.starts_with(b"#!") {
        while let Some(ch) = char_at(text, i) {
            if is_line_break(ch) {
                break;
            }
            i += ch.len_utf8();
        }
    }

    let mut pending: Option<CommentRange> = None;
    while i < len {
        let Some(ch) = char_at(text, i) else {
            break;
        };

        if is_line_break(ch) {
            i = skip_line_break(text, i);
            if trailing {
                break;
            }
            collecting = true;
            if let Some(p) = pending.as_mut() {
                p.has_trailing_new_line = true;
            }
            continue;
        }

        if is_white_space_single_line(ch) {
            i += ch.len_utf8();
            continue;
        }

        if ch != '/' {
            break;
        }
        let is_multi_line = match bytes.get(i + 1) {
            Some(b'/') => false,
            Some(b'*') => true,
            _ => break,
        };

        let start = i;
        i += 2;
        if is_multi_line {
            i = match memchr::memmem::find(&bytes[i..], b"*/") {
                Some(offset) => i + offset + 2,
                None => len,
            };
        } else {
            while let Some(c) = char_at(text, i) {
                if is_line_break(c) {
                    break;
                }
                i += c.len_utf8();
            }
        }

        if collecting {
            if let Some(p) = pending.take() {
                comments.push(p);
            }
            let ends_line = !is_multi_line && char_at(text, i).is_some_and(is_line_break);
            pending = Some(CommentRange::new(
                start as u32,
                i as u32,
                is_multi_line,
                ends_line,
            ));
        }
    }

    if let Some(p) = pending {
        comments.push(p);
    }
    comments
}
