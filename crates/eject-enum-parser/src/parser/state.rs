//! Parser state: token cursor, statement frames, scope stack and diagnostics.
//!
//! The whole file is tokenized up front, so lookahead is plain indexing.
//! Parsing is tolerant: on unexpected input the parser records a diagnostic
//! and keeps going, always consuming at least one token per loop iteration.

use std::sync::Arc;

use eject_enum_common::diagnostics::{diagnostic_codes, format_message, get_message_template};
use eject_enum_common::limits::MAX_NESTING_DEPTH;
use eject_enum_scanner::{LanguageVariant, ScannerState, SyntaxKind, Token};
use smallvec::SmallVec;

use super::base::NodeIndex;
use super::node::{DeclarationKind, DeclaredName, Holes, Node, ScopeData, ScopeKind, SourceFileData};
use super::node_arena::NodeArena;

pub const CONTEXT_FLAG_AMBIENT: u32 = 1 << 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Holes and declared names collected while parsing one statement.
#[derive(Default)]
pub(crate) struct StatementFrame {
    pub(crate) holes: Holes,
    pub(crate) declarations: SmallVec<[DeclaredName; 1]>,
}

pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) source: Arc<str>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) cursor: usize,
    pub(crate) arena: NodeArena,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) context_flags: u32,
    pub(crate) frames: Vec<StatementFrame>,
    pub(crate) scope_stack: Vec<NodeIndex>,
    pub(crate) recursion_depth: u32,
    pub(crate) nesting_exceeded: bool,
    pub(crate) enums: Vec<NodeIndex>,
    pub(crate) type_sites: Vec<NodeIndex>,
    pub(crate) language_variant: LanguageVariant,
    pub(crate) is_declaration_file: bool,
    scanner_diagnostics: Vec<ParseDiagnostic>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let language_variant = LanguageVariant::from_file_name(&file_name);
        let mut scanner = ScannerState::new(source_text, language_variant);
        let tokens = scanner.scan_all();
        let scanner_diagnostics = scanner
            .get_scanner_diagnostics()
            .iter()
            .map(|diag| ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            })
            .collect();
        let is_declaration_file = is_declaration_file_name(&file_name);
        let context_flags = if is_declaration_file {
            CONTEXT_FLAG_AMBIENT
        } else {
            0
        };

        ParserState {
            file_name,
            source: scanner.source_text_arc(),
            arena: NodeArena::with_capacity(tokens.len() / 8 + 16),
            tokens,
            cursor: 0,
            parse_diagnostics: Vec::new(),
            context_flags,
            frames: Vec::new(),
            scope_stack: Vec::new(),
            recursion_depth: 0,
            nesting_exceeded: false,
            enums: Vec::new(),
            type_sites: Vec::new(),
            language_variant,
            is_declaration_file,
            scanner_diagnostics,
        }
    }

    /// Parse the whole file and return the `SourceFile` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let end = self.source.len() as u32;
        let scope = self.arena.add(Node::Scope(ScopeData {
            kind: ScopeKind::SourceFile,
            pos: 0,
            end,
            parent: NodeIndex::NONE,
            statements: Vec::new(),
            is_ambient: self.in_ambient_context(),
        }));
        self.scope_stack.push(scope);
        let statements = self.parse_statement_list(ListTerminator::EndOfFile);
        self.scope_stack.pop();
        if let Some(data) = self.arena.get_scope_mut(scope) {
            data.statements = statements;
        }

        let mut scanned = std::mem::take(&mut self.scanner_diagnostics);
        self.parse_diagnostics.append(&mut scanned);
        self.parse_diagnostics.sort_by_key(|d| d.start);

        tracing::debug!(
            file = %self.file_name,
            enums = self.enums.len(),
            type_sites = self.type_sites.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );

        self.arena.add(Node::SourceFile(SourceFileData {
            file_name: self.file_name.clone(),
            text: Arc::clone(&self.source),
            scope,
            language_variant: self.language_variant,
            is_declaration_file: self.is_declaration_file,
            enums: std::mem::take(&mut self.enums),
            type_sites: std::mem::take(&mut self.type_sites),
        }))
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> Token {
        self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    #[inline]
    pub(crate) fn token_kind(&self) -> SyntaxKind {
        self.token().kind
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token_kind() == kind
    }

    /// Kind of the token `offset` positions ahead of the current one.
    pub(crate) fn peek_kind(&self, offset: usize) -> SyntaxKind {
        self.tokens
            .get(self.cursor + offset)
            .map_or(SyntaxKind::EndOfFileToken, |t| t.kind)
    }

    pub(crate) fn peek_token(&self, offset: usize) -> Option<Token> {
        self.tokens.get(self.cursor + offset).copied()
    }

    /// Kind of the last consumed token.
    pub(crate) fn previous_kind(&self) -> Option<SyntaxKind> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.kind)
    }

    pub(crate) fn next_token(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.token().pos
    }

    #[inline]
    pub(crate) fn token_start(&self) -> u32 {
        self.token().start
    }

    /// End of the last consumed token, or 0 at the start of the file.
    pub(crate) fn previous_token_end(&self) -> u32 {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.end)
    }

    pub(crate) fn token_text(&self) -> &str {
        let token = self.token();
        &self.source[token.start as usize..token.end as usize]
    }

    pub(crate) fn text_of(&self, token: Token) -> &str {
        &self.source[token.start as usize..token.end as usize]
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.token().has_preceding_line_break()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.is_token(SyntaxKind::EndOfFileToken)
    }

    /// Consume `kind`, or report `'{text}' expected.` at the current token.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind, text: &str) -> bool {
        if self.is_token(kind) {
            self.next_token();
            return true;
        }
        self.error_at_current_token(diagnostic_codes::EXPECTED, &[text]);
        false
    }

    /// Accept an explicit `;` or an automatically inserted one.
    pub(crate) fn parse_semicolon(&mut self) {
        if self.is_token(SyntaxKind::SemicolonToken) {
            self.next_token();
        }
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token_kind(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at_current_token(&mut self, code: u32, args: &[&str]) {
        let token = self.token();
        self.error_at(token.start, token.end - token.start, code, args);
    }

    pub(crate) fn error_at(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        // One diagnostic per position keeps cascading recovery quiet.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        let template = get_message_template(code).unwrap_or("Unexpected token.");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: format_message(template, args),
            code,
        });
    }

    // =========================================================================
    // Nesting guard
    // =========================================================================

    /// Enter one level of nesting. When the limit is exceeded, reports once
    /// and skips to the end of the file so every caller unwinds.
    pub(crate) fn enter_nesting(&mut self) -> bool {
        if self.nesting_exceeded {
            return false;
        }
        if self.recursion_depth >= MAX_NESTING_DEPTH {
            self.nesting_exceeded = true;
            let limit = MAX_NESTING_DEPTH.to_string();
            self.error_at_current_token(diagnostic_codes::NESTING_TOO_DEEP, &[&limit]);
            self.cursor = self.tokens.len() - 1;
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Frames and scopes
    // =========================================================================

    pub(crate) fn begin_frame(&mut self) {
        self.frames.push(StatementFrame::default());
    }

    pub(crate) fn end_frame(&mut self) -> StatementFrame {
        self.frames.pop().unwrap_or_default()
    }

    pub(crate) fn add_hole(&mut self, node: NodeIndex) {
        if let Some(frame) = self.frames.last_mut() {
            frame.holes.push(node);
        }
    }

    pub(crate) fn declare(&mut self, name: &str, kind: DeclarationKind) {
        if let Some(frame) = self.frames.last_mut() {
            frame.declarations.push(DeclaredName {
                name: name.to_string(),
                kind,
            });
        }
    }

    pub(crate) fn current_scope(&self) -> NodeIndex {
        self.scope_stack.last().copied().unwrap_or(NodeIndex::NONE)
    }

    pub(crate) fn in_ambient_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_AMBIENT != 0
    }
}

/// Where a statement list stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListTerminator {
    EndOfFile,
    CloseBrace,
    CaseClause,
}

fn is_declaration_file_name(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    [".d.ts", ".d.mts", ".d.cts"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
        || (lower.contains(".d.") && lower.ends_with(".ts"))
}
