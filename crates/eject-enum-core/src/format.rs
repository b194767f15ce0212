//! Canonical re-indentation of a rewritten file.
//!
//! The formatter only touches leading and trailing whitespace. Every line
//! that starts with a token or a comment is indented by bracket structure:
//! one level inside `{`, `(`, `[` and template substitutions, relative to the
//! line holding the opener; closers align with that line. `case` and
//! `default` sit one level inside a switch body and their statements two.
//! A line continuing an expression, or the single-statement body of
//! `if`/`for`/`while`/`else`/`do`, gets one extra level. A line starting
//! with an operator right after a continuation line keeps that line's level,
//! except a `?` under its condition, which goes one deeper.
//!
//! Lines inside string and template literals are never changed. Lines inside
//! block comments and JSX elements move by the same amount as the line the
//! comment or element starts on. Output is stable: formatting formatted text
//! changes nothing.

use std::fmt;

use eject_enum_common::CommentRange;
use eject_enum_common::comments::get_comment_ranges_between;
use eject_enum_common::position::LineMap;
use eject_enum_scanner::{
    LanguageVariant, ScannerState, SyntaxKind, Token, binary_operator_precedence,
    is_assignment_operator,
};
use tracing::trace;

use crate::options::IndentStyle;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewLine {
    Lf,
    CrLf,
}

impl NewLine {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLine::Lf => "\n",
            NewLine::CrLf => "\r\n",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatSettings {
    pub indent: IndentStyle,
    pub new_line: NewLine,
    pub variant: LanguageVariant,
}

impl FormatSettings {
    /// Settings matching the existing layout of `text`.
    ///
    /// Only lines that start with a token or a comment are measured, so the
    /// interiors of literals, block comments and JSX do not count.
    /// Indentation is tabs when most measured lines use tabs, otherwise the
    /// smallest space indentation found, 2 when there is none. The newline
    /// is CRLF when the first line ends with one.
    pub fn detect(text: &str, file_name: &str) -> FormatSettings {
        let variant = LanguageVariant::from_file_name(file_name);
        let body = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let mut scanner = ScannerState::new(body, variant);
        let tokens = scanner.scan_all();
        let layout = Layout::new(body, &tokens);

        let mut tab_lines = 0usize;
        let mut space_lines = 0usize;
        let mut smallest: Option<usize> = None;
        for line in 0..layout.line_map.line_count() {
            let start = layout.line_start(line);
            let content_end = layout.line_map.line_content_end(body, line) as usize;
            if !matches!(
                layout.classify(start, content_end),
                LineClass::Code(_) | LineClass::Comment(_)
            ) {
                continue;
            }
            let content = &body[start..content_end];
            let width = content.len() - content.trim_start_matches([' ', '\t']).len();
            if width == 0 {
                continue;
            }
            if content.starts_with('\t') {
                tab_lines += 1;
            } else if content.as_bytes()[..width].iter().all(|&b| b == b' ') {
                space_lines += 1;
                smallest = Some(smallest.map_or(width, |s| s.min(width)));
            }
        }
        let indent = if tab_lines > space_lines {
            IndentStyle::Tabs
        } else {
            match smallest {
                Some(width) => IndentStyle::Spaces(width.clamp(1, 8) as u8),
                None => IndentStyle::default(),
            }
        };

        let new_line = match memchr::memchr(b'\n', text.as_bytes()) {
            Some(index) if index > 0 && text.as_bytes()[index - 1] == b'\r' => NewLine::CrLf,
            _ => NewLine::Lf,
        };

        FormatSettings {
            indent,
            new_line,
            variant,
        }
    }

    pub fn with_indent(mut self, indent: Option<IndentStyle>) -> FormatSettings {
        if let Some(indent) = indent {
            self.indent = indent;
        }
        self
    }

    pub fn indent_unit(&self) -> String {
        self.indent.unit()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatError {
    pub message: String,
    pub offset: usize,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.offset)
    }
}

impl std::error::Error for FormatError {}

/// Re-indent `text`.
pub fn format_text(text: &str, settings: &FormatSettings) -> Result<String, FormatError> {
    let (bom, body) = match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut scanner = ScannerState::new(body, settings.variant);
    let tokens = scanner.scan_all();
    if let Some(diagnostic) = scanner.get_scanner_diagnostics().first() {
        return Err(FormatError {
            message: diagnostic.message.to_string(),
            offset: diagnostic.pos,
        });
    }

    let layout = Layout::new(body, &tokens);
    let levels = compute_levels(&tokens, &layout.line_map);
    let unit = settings.indent_unit();

    let mut out = String::with_capacity(text.len() + text.len() / 16);
    if bom {
        out.push(BYTE_ORDER_MARK);
    }
    // (old, new) indentation of every line, for shifting interiors.
    let mut indents: Vec<(usize, String)> = Vec::with_capacity(layout.line_map.line_count());

    for line in 0..layout.line_map.line_count() {
        let start = layout.line_start(line);
        let content_end = layout.line_map.line_content_end(body, line) as usize;
        let next_start = layout.line_start(line + 1).min(body.len());
        let content = &body[start..content_end];
        let terminator = &body[content_end..next_start];
        let old_width = content.len() - content.trim_start_matches([' ', '\t']).len();

        let new_content = match layout.classify(start, content_end) {
            LineClass::Code(token) => reindent(content, &unit, levels.code[token], &layout, start),
            LineClass::Comment(next) => {
                reindent(content, &unit, levels.comment[next], &layout, start)
            }
            LineClass::InsideToken(token) if tokens[token].kind == SyntaxKind::JsxElement => {
                let origin = layout.line_map.line_of(tokens[token].start);
                shift(content, indents.get(origin))
            }
            LineClass::InsideComment(comment_start) => {
                let origin = layout.line_map.line_of(comment_start);
                trim_end(&shift(content, indents.get(origin))).to_string()
            }
            LineClass::InsideToken(_) | LineClass::Other => content.to_string(),
            LineClass::Blank => String::new(),
        };

        let new_width = new_content.len() - new_content.trim_start_matches([' ', '\t']).len();
        indents.push((old_width, new_content[..new_width].to_string()));
        out.push_str(&new_content);
        out.push_str(terminator);
    }

    trace!(lines = indents.len(), "formatted file");
    Ok(out)
}

fn reindent(content: &str, unit: &str, level: u32, layout: &Layout<'_>, start: usize) -> String {
    let trimmed = content.trim_start_matches([' ', '\t']);
    let mut out = unit.repeat(level as usize);
    // Trailing whitespace inside a literal or element is content.
    let end_inside_token = trimmed.len() != trim_end(trimmed).len()
        && layout.is_inside_token(start + content.len() - 1);
    if end_inside_token {
        out.push_str(trimmed);
    } else {
        out.push_str(trim_end(trimmed));
    }
    out
}

/// Move `content` by the indentation change of its origin line.
fn shift(content: &str, origin: Option<&(usize, String)>) -> String {
    let Some((old_width, new_indent)) = origin else {
        return content.to_string();
    };
    let width = content.len() - content.trim_start_matches([' ', '\t']).len();
    if *old_width == new_indent.len() || width < *old_width {
        return content.to_string();
    }
    format!("{new_indent}{}", &content[*old_width..])
}

fn trim_end(content: &str) -> &str {
    content.trim_end_matches([' ', '\t'])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineClass {
    /// Starts with the token at this index.
    Code(usize),
    /// Starts with a comment; the index is the token after it.
    Comment(usize),
    /// Starts inside a multi-line token.
    InsideToken(usize),
    /// Starts inside a block comment beginning at this offset.
    InsideComment(u32),
    Blank,
    Other,
}

struct Layout<'a> {
    text: &'a str,
    tokens: &'a [Token],
    comments: Vec<CommentRange>,
    line_map: LineMap,
}

impl<'a> Layout<'a> {
    fn new(text: &'a str, tokens: &'a [Token]) -> Layout<'a> {
        let comments = tokens
            .iter()
            .flat_map(|token| {
                get_comment_ranges_between(text, token.pos as usize, token.start as usize)
            })
            .collect();
        Layout {
            text,
            tokens,
            comments,
            line_map: LineMap::build(text),
        }
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_map
            .line_start(line)
            .map_or(self.text.len(), |start| start as usize)
    }

    /// Index of the last token starting at or before `offset`.
    fn token_at(&self, offset: usize) -> Option<usize> {
        let after = self
            .tokens
            .partition_point(|token| token.start as usize <= offset);
        after.checked_sub(1)
    }

    /// Whether `offset` lies strictly after the start of a token and before
    /// its end.
    fn is_inside_token(&self, offset: usize) -> bool {
        self.token_at(offset).is_some_and(|index| {
            let token = &self.tokens[index];
            (token.start as usize) < offset && offset < token.end as usize
        })
    }

    fn comment_at(&self, offset: usize) -> Option<&CommentRange> {
        let after = self
            .comments
            .partition_point(|comment| comment.pos as usize <= offset);
        let comment = self.comments.get(after.checked_sub(1)?)?;
        (offset < comment.end as usize).then_some(comment)
    }

    fn classify(&self, start: usize, content_end: usize) -> LineClass {
        if let Some(index) = self.token_at(start) {
            let token = &self.tokens[index];
            if (token.start as usize) < start && start < token.end as usize {
                return LineClass::InsideToken(index);
            }
        }
        if let Some(comment) = self.comment_at(start)
            && (comment.pos as usize) < start
        {
            return LineClass::InsideComment(comment.pos);
        }

        let first = start
            + self.text[start..content_end].len()
            - self.text[start..content_end]
                .trim_start_matches([' ', '\t'])
                .len();
        if first == content_end {
            return LineClass::Blank;
        }
        if let Some(index) = self.token_at(first)
            && self.tokens[index].start as usize == first
            && self.tokens[index].kind != SyntaxKind::EndOfFileToken
        {
            return LineClass::Code(index);
        }
        if let Some(comment) = self.comment_at(first)
            && comment.pos as usize == first
        {
            let next = self
                .tokens
                .partition_point(|token| token.start as usize <= first);
            return LineClass::Comment(next.min(self.tokens.len() - 1));
        }
        LineClass::Other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameKind {
    Brace,
    Paren,
    Bracket,
    Template,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    kind: FrameKind,
    /// Level of the line holding the opener.
    line_level: u32,
    switch_body: bool,
    in_case: bool,
    /// Parenthesized header of `if`, `for`, `while` or `with`.
    control_header: bool,
    /// Parenthesized discriminant of `switch`.
    switch_header: bool,
}

struct Levels {
    /// Level of a line starting with each token.
    code: Vec<u32>,
    /// Level of a comment line directly before each token.
    comment: Vec<u32>,
}

fn compute_levels(tokens: &[Token], line_map: &LineMap) -> Levels {
    let mut code = Vec::with_capacity(tokens.len());
    let mut comment = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Frame> = Vec::new();
    // Per bracket depth: level and first token of the last line started
    // there, when that line continued an expression.
    let mut continued: Vec<Option<(u32, SyntaxKind)>> = vec![None];
    // Depths of `do` statements still waiting for their `while`.
    let mut open_do: Vec<usize> = Vec::new();
    let mut while_ends_do = false;
    let mut line_level = 0u32;
    let mut previous: Option<(usize, SyntaxKind)> = None;
    let mut previous_end_line: Option<usize> = None;
    let mut body_follows: Option<usize> = None;
    let mut switch_body_follows = false;

    for (index, token) in tokens.iter().enumerate() {
        let kind = token.kind;
        let previous_kind = previous.map(|(_, kind)| kind);
        let top = stack.last().copied();
        let inner = top.map_or(0, |frame| frame.line_level + 1);
        let in_case = top.is_some_and(|frame| frame.switch_body && frame.in_case);
        let is_case_label = matches!(kind, SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword)
            && top.is_some_and(|frame| frame.switch_body)
            && previous_kind != Some(SyntaxKind::DotToken);
        let line = line_map.line_of(token.start);
        let starts_line = previous_end_line != Some(line);

        let (code_level, comment_level) = match top {
            Some(frame) if is_closer(kind) => (frame.line_level, inner + u32::from(in_case)),
            _ => {
                let mut level = inner;
                if in_case && !is_case_label {
                    level += 1;
                }
                let body_line = body_follows.is_some()
                    && body_follows == previous.map(|(i, _)| i)
                    && kind != SyntaxKind::OpenBraceToken;
                // `| b` under `| a`, and `? x` one level under its condition.
                let carried = match continued.last().copied().flatten() {
                    Some((at, first)) if starts_line && starts_with_operator(kind) => {
                        let nested = kind == SyntaxKind::QuestionToken
                            && !matches!(first, SyntaxKind::QuestionToken | SyntaxKind::ColonToken);
                        Some(at + u32::from(nested))
                    }
                    _ => None,
                };
                let continuation = !body_line
                    && (carried.is_some() || continues_expression(previous_kind, kind));
                if body_line {
                    level += 1;
                } else if let Some(at) = carried {
                    level = at;
                } else if continuation {
                    level += 1;
                }
                if starts_line && let Some(slot) = continued.last_mut() {
                    *slot = continuation.then_some((level, kind));
                }
                (level, level)
            }
        };
        code.push(code_level);
        comment.push(comment_level);

        if starts_line {
            line_level = code_level;
        }

        match kind {
            SyntaxKind::OpenBraceToken => {
                stack.push(Frame {
                    kind: FrameKind::Brace,
                    line_level,
                    switch_body: switch_body_follows,
                    in_case: false,
                    control_header: false,
                    switch_header: false,
                });
                continued.push(None);
                switch_body_follows = false;
            }
            SyntaxKind::OpenParenToken => {
                let control_header = match previous_kind {
                    Some(SyntaxKind::WhileKeyword) => !while_ends_do,
                    Some(SyntaxKind::IfKeyword | SyntaxKind::ForKeyword | SyntaxKind::WithKeyword) => {
                        true
                    }
                    Some(SyntaxKind::AwaitKeyword) => {
                        index >= 2 && tokens[index - 2].kind == SyntaxKind::ForKeyword
                    }
                    _ => false,
                };
                stack.push(Frame {
                    kind: FrameKind::Paren,
                    line_level,
                    switch_body: false,
                    in_case: false,
                    control_header,
                    switch_header: previous_kind == Some(SyntaxKind::SwitchKeyword),
                });
                continued.push(None);
            }
            SyntaxKind::OpenBracketToken | SyntaxKind::TemplateHead => {
                stack.push(Frame {
                    kind: if kind == SyntaxKind::TemplateHead {
                        FrameKind::Template
                    } else {
                        FrameKind::Bracket
                    },
                    line_level,
                    switch_body: false,
                    in_case: false,
                    control_header: false,
                    switch_header: false,
                });
                continued.push(None);
            }
            SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::TemplateTail => {
                if let Some(frame) = stack.pop() {
                    continued.pop();
                    open_do.retain(|&depth| depth <= stack.len());
                    if frame.kind == FrameKind::Paren && frame.control_header {
                        body_follows = Some(index);
                    }
                    if frame.kind == FrameKind::Paren && frame.switch_header {
                        switch_body_follows = true;
                    }
                }
            }
            SyntaxKind::SemicolonToken => {
                if let Some(slot) = continued.last_mut() {
                    *slot = None;
                }
            }
            SyntaxKind::DoKeyword => {
                body_follows = Some(index);
                open_do.push(stack.len());
            }
            SyntaxKind::WhileKeyword => {
                while_ends_do = matches!(
                    previous_kind,
                    Some(SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken)
                ) && open_do.last() == Some(&stack.len());
                if while_ends_do {
                    open_do.pop();
                }
            }
            SyntaxKind::ElseKeyword => body_follows = Some(index),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword if is_case_label => {
                if let Some(frame) = stack.last_mut() {
                    frame.in_case = true;
                }
            }
            _ => {}
        }

        previous = Some((index, kind));
        previous_end_line = Some(line_map.line_of(token.end));
    }
    Levels { code, comment }
}

fn is_closer(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail
    )
}

/// Whether a line starting with `kind` continues the expression before it.
fn continues_expression(previous: Option<SyntaxKind>, kind: SyntaxKind) -> bool {
    let Some(previous) = previous else {
        return false;
    };
    // A union or intersection type starting under its property name.
    if previous == SyntaxKind::ColonToken
        && matches!(kind, SyntaxKind::BarToken | SyntaxKind::AmpersandToken)
    {
        return true;
    }
    if matches!(
        previous,
        SyntaxKind::SemicolonToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::CommaToken
            | SyntaxKind::ColonToken
            | SyntaxKind::TemplateHead
            | SyntaxKind::TemplateMiddle
    ) {
        return false;
    }
    ends_with_operator(previous) || starts_with_operator(kind)
}

fn ends_with_operator(kind: SyntaxKind) -> bool {
    is_assignment_operator(kind)
        || binary_operator_precedence(kind).is_some()
        || matches!(
            kind,
            SyntaxKind::EqualsGreaterThanToken | SyntaxKind::QuestionToken
        )
}

fn starts_with_operator(kind: SyntaxKind) -> bool {
    binary_operator_precedence(kind).is_some()
        || matches!(
            kind,
            SyntaxKind::DotToken
                | SyntaxKind::QuestionDotToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::ColonToken
                | SyntaxKind::AsKeyword
                | SyntaxKind::SatisfiesKeyword
        )
}
