//! Scanner state.
//!
//! The scanner tokenizes a whole file up front. Every token records its full
//! start (`pos`, including leading trivia), its own `start` and its `end`, so
//! the parser can slice the original text without a second pass.
//!
//! The context-sensitive decisions a TypeScript scanner normally takes from
//! the parser are made here from the previous significant token:
//! - `/` starts a regular expression unless the previous token can end an
//!   expression;
//! - `}` continues a template literal when the matching `{` was a `${`;
//! - in JSX files, `<` in expression position starts an element that is
//!   scanned to its closing tag as one token.

use std::sync::Arc;

use bitflags::bitflags;
use eject_enum_common::char_codes::{
    char_at, is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use eject_enum_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use eject_enum_common::limits::MAX_JSX_DEPTH;

use crate::syntax_kind::{SyntaxKind, can_end_expression, text_to_keyword};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u8 {
        const PRECEDED_BY_LINE_BREAK = 1 << 0;
        const UNTERMINATED = 1 << 1;
        const UNICODE_ESCAPE = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Full start, including leading trivia.
    pub pos: u32,
    pub start: u32,
    pub end: u32,
    pub flags: TokenFlags,
}

impl Token {
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDED_BY_LINE_BREAK)
    }

    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start as usize..self.end as usize]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LanguageVariant {
    #[default]
    Standard,
    Jsx,
}

impl LanguageVariant {
    pub fn from_file_name(file_name: &str) -> LanguageVariant {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".tsx") || lower.ends_with(".jsx") {
            LanguageVariant::Jsx
        } else {
            LanguageVariant::Standard
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BraceKind {
    Block,
    TemplateSubstitution,
}

pub struct ScannerState {
    text: Arc<str>,
    variant: LanguageVariant,
    pos: usize,
    brace_stack: Vec<BraceKind>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>, variant: LanguageVariant) -> ScannerState {
        ScannerState {
            text: text.into(),
            variant,
            pos: 0,
            brace_stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    /// Tokenize the whole text. The last token is always `EndOfFileToken`.
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::with_capacity(self.text.len() / 4 + 1);
        let mut previous: Option<SyntaxKind> = None;
        loop {
            let token = self.scan(previous);
            tokens.push(token);
            if token.kind == SyntaxKind::EndOfFileToken {
                break;
            }
            previous = Some(token.kind);
        }
        tracing::trace!(
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            "scanned source"
        );
        tokens
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    #[inline]
    fn byte(&self, at: usize) -> Option<u8> {
        self.text.as_bytes().get(at).copied()
    }

    fn scan(&mut self, previous: Option<SyntaxKind>) -> Token {
        let full_start = self.pos;
        let mut flags = self.skip_trivia();
        let start = self.pos;

        let Some(ch) = char_at(&self.text, start) else {
            return Token {
                kind: SyntaxKind::EndOfFileToken,
                pos: full_start as u32,
                start: start as u32,
                end: start as u32,
                flags,
            };
        };

        let kind = self.scan_token_kind(ch, previous, &mut flags);
        Token {
            kind,
            pos: full_start as u32,
            start: start as u32,
            end: self.pos as u32,
            flags,
        }
    }

    fn skip_trivia(&mut self) -> TokenFlags {
        let mut flags = TokenFlags::empty();
        if self.pos == 0 && self.text.starts_with("#!") {
            self.skip_to_line_end();
        }
        let len = self.text.len();
        while self.pos < len {
            let Some(ch) = char_at(&self.text, self.pos) else {
                break;
            };
            if is_line_break(ch) {
                flags |= TokenFlags::PRECEDED_BY_LINE_BREAK;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
                continue;
            }
            if ch == '/' && self.byte(self.pos + 1) == Some(b'/') {
                self.skip_to_line_end();
                continue;
            }
            if ch == '/' && self.byte(self.pos + 1) == Some(b'*') {
                let body = &self.text.as_bytes()[self.pos + 2..];
                match memchr::memmem::find(body, b"*/") {
                    Some(offset) => {
                        let end = self.pos + 2 + offset + 2;
                        if self.text[self.pos..end].chars().any(is_line_break) {
                            flags |= TokenFlags::PRECEDED_BY_LINE_BREAK;
                        }
                        self.pos = end;
                    }
                    None => {
                        self.error(
                            len,
                            0,
                            diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                            diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                        );
                        self.pos = len;
                    }
                }
                continue;
            }
            break;
        }
        flags
    }

    fn skip_to_line_end(&mut self) {
        while let Some(ch) = char_at(&self.text, self.pos) {
            if is_line_break(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_token_kind(
        &mut self,
        ch: char,
        previous: Option<SyntaxKind>,
        flags: &mut TokenFlags,
    ) -> SyntaxKind {
        let start = self.pos;
        let expression_start = previous.is_none_or(|kind| !can_end_expression(kind));
        let next = self.byte(start + 1);
        let next2 = self.byte(start + 2);
        let next3 = self.byte(start + 3);

        let (kind, width) = match ch {
            '{' => {
                self.brace_stack.push(BraceKind::Block);
                (SyntaxKind::OpenBraceToken, 1)
            }
            '}' => {
                if self.brace_stack.pop() == Some(BraceKind::TemplateSubstitution) {
                    self.pos += 1;
                    return self.scan_template(start, false, flags);
                }
                (SyntaxKind::CloseBraceToken, 1)
            }
            '(' => (SyntaxKind::OpenParenToken, 1),
            ')' => (SyntaxKind::CloseParenToken, 1),
            '[' => (SyntaxKind::OpenBracketToken, 1),
            ']' => (SyntaxKind::CloseBracketToken, 1),
            ';' => (SyntaxKind::SemicolonToken, 1),
            ',' => (SyntaxKind::CommaToken, 1),
            '~' => (SyntaxKind::TildeToken, 1),
            '@' => (SyntaxKind::AtToken, 1),
            ':' => (SyntaxKind::ColonToken, 1),
            '.' => {
                if next.is_some_and(|b| b.is_ascii_digit()) {
                    return self.scan_number();
                }
                if next == Some(b'.') && next2 == Some(b'.') {
                    (SyntaxKind::DotDotDotToken, 3)
                } else {
                    (SyntaxKind::DotToken, 1)
                }
            }
            '?' => match (next, next2) {
                (Some(b'?'), Some(b'=')) => (SyntaxKind::QuestionQuestionEqualsToken, 3),
                (Some(b'?'), _) => (SyntaxKind::QuestionQuestionToken, 2),
                (Some(b'.'), after) if !after.is_some_and(|b| b.is_ascii_digit()) => {
                    (SyntaxKind::QuestionDotToken, 2)
                }
                _ => (SyntaxKind::QuestionToken, 1),
            },
            '<' => {
                if self.variant == LanguageVariant::Jsx
                    && expression_start
                    && self.looks_like_jsx_element(start)
                {
                    return self.scan_jsx(start, flags);
                }
                match (next, next2) {
                    (Some(b'<'), Some(b'=')) => (SyntaxKind::LessThanLessThanEqualsToken, 3),
                    (Some(b'<'), _) => (SyntaxKind::LessThanLessThanToken, 2),
                    (Some(b'='), _) => (SyntaxKind::LessThanEqualsToken, 2),
                    _ => (SyntaxKind::LessThanToken, 1),
                }
            }
            '>' => match (next, next2, next3) {
                (Some(b'>'), Some(b'>'), Some(b'=')) => {
                    (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4)
                }
                (Some(b'>'), Some(b'>'), _) => {
                    (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3)
                }
                (Some(b'>'), Some(b'='), _) => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3),
                (Some(b'>'), _, _) => (SyntaxKind::GreaterThanGreaterThanToken, 2),
                (Some(b'='), _, _) => (SyntaxKind::GreaterThanEqualsToken, 2),
                _ => (SyntaxKind::GreaterThanToken, 1),
            },
            '=' => match (next, next2) {
                (Some(b'='), Some(b'=')) => (SyntaxKind::EqualsEqualsEqualsToken, 3),
                (Some(b'='), _) => (SyntaxKind::EqualsEqualsToken, 2),
                (Some(b'>'), _) => (SyntaxKind::EqualsGreaterThanToken, 2),
                _ => (SyntaxKind::EqualsToken, 1),
            },
            '!' => match (next, next2) {
                (Some(b'='), Some(b'=')) => (SyntaxKind::ExclamationEqualsEqualsToken, 3),
                (Some(b'='), _) => (SyntaxKind::ExclamationEqualsToken, 2),
                _ => (SyntaxKind::ExclamationToken, 1),
            },
            '+' => match next {
                Some(b'+') => (SyntaxKind::PlusPlusToken, 2),
                Some(b'=') => (SyntaxKind::PlusEqualsToken, 2),
                _ => (SyntaxKind::PlusToken, 1),
            },
            '-' => match next {
                Some(b'-') => (SyntaxKind::MinusMinusToken, 2),
                Some(b'=') => (SyntaxKind::MinusEqualsToken, 2),
                _ => (SyntaxKind::MinusToken, 1),
            },
            '*' => match (next, next2) {
                (Some(b'*'), Some(b'=')) => (SyntaxKind::AsteriskAsteriskEqualsToken, 3),
                (Some(b'*'), _) => (SyntaxKind::AsteriskAsteriskToken, 2),
                (Some(b'='), _) => (SyntaxKind::AsteriskEqualsToken, 2),
                _ => (SyntaxKind::AsteriskToken, 1),
            },
            '/' => {
                if expression_start && let Some(end) = self.regex_end(start) {
                    self.pos = end;
                    return SyntaxKind::RegularExpressionLiteral;
                }
                match next {
                    Some(b'=') => (SyntaxKind::SlashEqualsToken, 2),
                    _ => (SyntaxKind::SlashToken, 1),
                }
            }
            '%' => match next {
                Some(b'=') => (SyntaxKind::PercentEqualsToken, 2),
                _ => (SyntaxKind::PercentToken, 1),
            },
            '&' => match (next, next2) {
                (Some(b'&'), Some(b'=')) => (SyntaxKind::AmpersandAmpersandEqualsToken, 3),
                (Some(b'&'), _) => (SyntaxKind::AmpersandAmpersandToken, 2),
                (Some(b'='), _) => (SyntaxKind::AmpersandEqualsToken, 2),
                _ => (SyntaxKind::AmpersandToken, 1),
            },
            '|' => match (next, next2) {
                (Some(b'|'), Some(b'=')) => (SyntaxKind::BarBarEqualsToken, 3),
                (Some(b'|'), _) => (SyntaxKind::BarBarToken, 2),
                (Some(b'='), _) => (SyntaxKind::BarEqualsToken, 2),
                _ => (SyntaxKind::BarToken, 1),
            },
            '^' => match next {
                Some(b'=') => (SyntaxKind::CaretEqualsToken, 2),
                _ => (SyntaxKind::CaretToken, 1),
            },
            '"' | '\'' => return self.scan_string(ch, flags),
            '`' => {
                self.pos += 1;
                return self.scan_template(start, true, flags);
            }
            '0'..='9' => return self.scan_number(),
            '#' => {
                if char_at(&self.text, start + 1).is_some_and(is_identifier_start) {
                    self.pos += 1;
                    self.scan_identifier_rest(flags);
                    return SyntaxKind::PrivateIdentifier;
                }
                return self.invalid_character(ch);
            }
            _ if is_identifier_start(ch) || ch == '\\' => return self.scan_identifier(flags),
            _ => return self.invalid_character(ch),
        };

        self.pos += width;
        kind
    }

    fn invalid_character(&mut self, ch: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += ch.len_utf8();
        self.error(
            start,
            ch.len_utf8(),
            diagnostic_messages::INVALID_CHARACTER,
            diagnostic_codes::INVALID_CHARACTER,
        );
        SyntaxKind::Unknown
    }

    fn scan_identifier(&mut self, flags: &mut TokenFlags) -> SyntaxKind {
        let start = self.pos;
        self.scan_identifier_rest(flags);
        if self.pos == start {
            return self.invalid_character('\\');
        }
        if flags.contains(TokenFlags::UNICODE_ESCAPE) {
            return SyntaxKind::Identifier;
        }
        text_to_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_identifier_rest(&mut self, flags: &mut TokenFlags) {
        while let Some(ch) = char_at(&self.text, self.pos) {
            if is_identifier_part(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '\\' && self.byte(self.pos + 1) == Some(b'u') {
                *flags |= TokenFlags::UNICODE_ESCAPE;
                self.pos += 2;
                if self.byte(self.pos) == Some(b'{') {
                    while let Some(b) = self.byte(self.pos) {
                        self.pos += 1;
                        if b == b'}' {
                            break;
                        }
                    }
                } else {
                    let digits = self.text.as_bytes()[self.pos..]
                        .iter()
                        .take(4)
                        .take_while(|b| b.is_ascii_hexdigit())
                        .count();
                    self.pos += digits;
                }
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        let mut i = start;
        let radix_prefix = bytes.get(i) == Some(&b'0')
            && matches!(
                bytes.get(i + 1),
                Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')
            );
        if radix_prefix {
            i += 2;
            while i < bytes.len() && (bytes[i].is_ascii_hexdigit() || bytes[i] == b'_') {
                i += 1;
            }
        } else {
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
                i += 1;
            }
            if bytes.get(i) == Some(&b'.') {
                i += 1;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
                    i += 1;
                }
            }
            if matches!(bytes.get(i), Some(b'e' | b'E')) {
                let mut j = i + 1;
                if matches!(bytes.get(j), Some(b'+' | b'-')) {
                    j += 1;
                }
                if bytes.get(j).is_some_and(|b| b.is_ascii_digit()) {
                    i = j;
                    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
                        i += 1;
                    }
                }
            }
        }
        if bytes.get(i) == Some(&b'n') {
            self.pos = i + 1;
            return SyntaxKind::BigIntLiteral;
        }
        self.pos = i;
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self, quote: char, flags: &mut TokenFlags) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        loop {
            let Some(ch) = char_at(&self.text, self.pos) else {
                self.unterminated_string(start, flags);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                match char_at(&self.text, self.pos) {
                    Some('\r') if self.byte(self.pos + 1) == Some(b'\n') => self.pos += 2,
                    Some(escaped) => self.pos += escaped.len_utf8(),
                    None => {}
                }
                continue;
            }
            if ch == '\n' || ch == '\r' {
                self.unterminated_string(start, flags);
                break;
            }
            self.pos += ch.len_utf8();
        }
        SyntaxKind::StringLiteral
    }

    fn unterminated_string(&mut self, start: usize, flags: &mut TokenFlags) {
        *flags |= TokenFlags::UNTERMINATED;
        self.error(
            start,
            self.pos - start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    /// Scan a template piece. `self.pos` is just past the opening `` ` `` or
    /// the `}` closing a substitution.
    fn scan_template(&mut self, start: usize, is_head: bool, flags: &mut TokenFlags) -> SyntaxKind {
        loop {
            let Some(b) = self.byte(self.pos) else {
                *flags |= TokenFlags::UNTERMINATED;
                self.error(
                    start,
                    self.pos - start,
                    diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                    diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                );
                return if is_head {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match b {
                b'`' => {
                    self.pos += 1;
                    return if is_head {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                b'$' if self.byte(self.pos + 1) == Some(b'{') => {
                    self.pos += 2;
                    self.brace_stack.push(BraceKind::TemplateSubstitution);
                    return if is_head {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                b'\\' => {
                    self.pos += 1;
                    if let Some(escaped) = char_at(&self.text, self.pos) {
                        self.pos += escaped.len_utf8();
                    }
                }
                _ => {
                    let width = char_at(&self.text, self.pos).map_or(1, char::len_utf8);
                    self.pos += width;
                }
            }
        }
    }

    /// End offset of a regular expression starting at `start`, or `None` when
    /// the slash cannot start one on this line.
    fn regex_end(&self, start: usize) -> Option<usize> {
        let mut i = start + 1;
        let mut in_class = false;
        // `//` and `/*` are comments and never reach here.
        loop {
            let ch = char_at(&self.text, i)?;
            if is_line_break(ch) {
                return None;
            }
            match ch {
                '\\' => {
                    i += 1;
                    let escaped = char_at(&self.text, i)?;
                    if is_line_break(escaped) {
                        return None;
                    }
                    i += escaped.len_utf8();
                    continue;
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    i += 1;
                    break;
                }
                _ => {}
            }
            i += ch.len_utf8();
        }
        while let Some(ch) = char_at(&self.text, i) {
            if !is_identifier_part(ch) {
                break;
            }
            i += ch.len_utf8();
        }
        Some(i)
    }

    /// `<Name`, `<>` or `<ns:name`, excluding generic arrow parameter lists
    /// such as `<T,>` and `<T extends U>`.
    fn looks_like_jsx_element(&self, start: usize) -> bool {
        let bytes = self.text.as_bytes();
        match bytes.get(start + 1) {
            Some(b'>') => return true,
            Some(_) => {}
            None => return false,
        }
        let Some(first) = char_at(&self.text, start + 1) else {
            return false;
        };
        if !is_identifier_start(first) {
            return false;
        }
        let mut i = start + 1;
        while let Some(ch) = char_at(&self.text, i) {
            if !(is_identifier_part(ch) || ch == '-' || ch == '.' || ch == ':') {
                break;
            }
            i += ch.len_utf8();
        }
        while let Some(ch) = char_at(&self.text, i) {
            if !(is_white_space_single_line(ch) || is_line_break(ch)) {
                break;
            }
            i += ch.len_utf8();
        }
        let rest = &self.text[i..];
        if rest.starts_with(',') || rest.starts_with('=') {
            return false;
        }
        !(rest.starts_with("extends")
            && rest[7..]
                .chars()
                .next()
                .is_some_and(|ch| !is_identifier_part(ch)))
    }

    fn scan_jsx(&mut self, start: usize, flags: &mut TokenFlags) -> SyntaxKind {
        match scan_jsx_element(&self.text, start, 0) {
            Some(end) => self.pos = end,
            None => {
                *flags |= TokenFlags::UNTERMINATED;
                self.error(
                    start,
                    self.text.len() - start,
                    diagnostic_messages::JSX_ELEMENT_HAS_NO_CLOSING_TAG,
                    diagnostic_codes::JSX_ELEMENT_HAS_NO_CLOSING_TAG,
                );
                self.pos = self.text.len();
            }
        }
        SyntaxKind::JsxElement
    }
}

/// Scan one JSX element (or fragment) starting at the `<` at `start`.
/// Returns the offset just past its closing tag.
fn scan_jsx_element(text: &str, start: usize, depth: u32) -> Option<usize> {
    if depth > MAX_JSX_DEPTH {
        return None;
    }
    let bytes = text.as_bytes();
    let mut open_tags: u32 = 0;
    let mut i = start;
    loop {
        match *bytes.get(i)? {
            b'<' if bytes.get(i + 1) == Some(&b'/') => {
                i += memchr::memchr(b'>', &bytes[i..])? + 1;
                open_tags = open_tags.checked_sub(1)?;
                if open_tags == 0 {
                    return Some(i);
                }
            }
            b'<' => {
                i += 1;
                let self_closing = loop {
                    match *bytes.get(i)? {
                        quote @ (b'"' | b'\'') => {
                            i += memchr::memchr(quote, &bytes[i + 1..])? + 2;
                        }
                        b'{' => i = skip_jsx_expression(text, i, depth)?,
                        b'/' if bytes.get(i + 1) == Some(&b'>') => {
                            i += 2;
                            break true;
                        }
                        b'>' => {
                            i += 1;
                            break false;
                        }
                        _ => i += 1,
                    }
                };
                if self_closing {
                    if open_tags == 0 {
                        return Some(i);
                    }
                } else {
                    open_tags += 1;
                }
            }
            b'{' => i = skip_jsx_expression(text, i, depth)?,
            _ => i += 1,
        }
    }
}

/// Skip a `{ ... }` JavaScript region inside JSX, returning the offset past
/// the matching `}`.
fn skip_jsx_expression(text: &str, start: usize, depth: u32) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut braces: u32 = 0;
    let mut i = start;
    let mut last_significant: u8 = b'{';
    loop {
        let b = *bytes.get(i)?;
        match b {
            b'{' => {
                braces += 1;
                i += 1;
            }
            b'}' => {
                braces -= 1;
                i += 1;
                if braces == 0 {
                    return Some(i);
                }
            }
            b'"' | b'\'' | b'`' => {
                i += 1;
                loop {
                    let c = *bytes.get(i)?;
                    if c == b'\\' {
                        i += 2;
                        continue;
                    }
                    i += 1;
                    if c == b {
                        break;
                    }
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i += memchr::memchr(b'\n', &bytes[i..]).unwrap_or(bytes.len() - i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2 + memchr::memmem::find(&bytes[i + 2..], b"*/")? + 2;
                continue;
            }
            b'<' if matches!(
                last_significant,
                b'(' | b',' | b'=' | b':' | b'?' | b'{' | b'[' | b'!' | b'&' | b'|' | b'>'
            ) && bytes
                .get(i + 1)
                .is_some_and(|n| *n == b'>' || n.is_ascii_alphabetic()) =>
            {
                i = scan_jsx_element(text, i, depth + 1)?;
                last_significant = b')';
                continue;
            }
            _ => i += 1,
        }
        if !b.is_ascii_whitespace() {
            last_significant = b;
        }
    }
}
