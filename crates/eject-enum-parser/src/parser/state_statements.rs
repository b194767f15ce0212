//! Parser state - statement and declaration parsing methods

use eject_enum_common::diagnostics::diagnostic_codes;
use eject_enum_scanner::literals::{decode_string_literal, decode_template_text};
use eject_enum_scanner::{SyntaxKind, is_identifier_like, is_identifier_or_keyword};

use super::base::NodeIndex;
use super::node::{
    DeclarationKind, EnumData, EnumMemberData, MemberName, ModifierFlags, Node, ScopeData,
    ScopeKind, StatementData, StatementKind,
};
use super::state::{CONTEXT_FLAG_AMBIENT, ListTerminator, ParserState};
use super::state_expressions::ExpressionStop;
use super::state_members::MemberListKind;
use super::state_types::TypeContext;

impl ParserState {
    // =========================================================================
    // Statement lists and blocks
    // =========================================================================

    pub(crate) fn parse_statement_list(&mut self, terminator: ListTerminator) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        loop {
            match self.token_kind() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if terminator != ListTerminator::EndOfFile => break,
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
                    if terminator == ListTerminator::CaseClause =>
                {
                    break;
                }
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    self.error_at_current_token(
                        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                        &[],
                    );
                    self.next_token();
                }
                _ => statements.push(self.parse_statement()),
            }
        }
        statements
    }

    /// Parse a `{ ... }` statement block as a child scope of the current one.
    pub(crate) fn parse_block(&mut self, kind: ScopeKind) -> NodeIndex {
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_expected(SyntaxKind::OpenBraceToken, "{");
            return NodeIndex::NONE;
        }
        if !self.enter_nesting() {
            return NodeIndex::NONE;
        }
        self.next_token();
        let pos = self.previous_token_end();
        let scope = self.arena.add(Node::Scope(ScopeData {
            kind,
            pos,
            end: pos,
            parent: self.current_scope(),
            statements: Vec::new(),
            is_ambient: self.in_ambient_context(),
        }));

        self.scope_stack.push(scope);
        let statements = self.parse_statement_list(ListTerminator::CloseBrace);
        self.scope_stack.pop();

        let end = self.token_start().max(pos);
        if let Some(data) = self.arena.get_scope_mut(scope) {
            data.statements = statements;
            data.end = end;
        }
        self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        self.add_hole(scope);
        self.leave_nesting();
        scope
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if self.is_start_of_enum_declaration() {
            return self.parse_enum_declaration();
        }

        let pos = self.token_pos();
        let start_cursor = self.cursor;
        self.begin_frame();
        let kind = self.parse_statement_worker();
        if self.cursor == start_cursor && !self.is_at_end() {
            self.error_at_current_token(diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
            self.next_token();
        }
        let frame = self.end_frame();
        let end = self.previous_token_end().max(pos);

        self.arena.add(Node::Statement(StatementData {
            kind,
            pos,
            end,
            holes: frame.holes,
            declarations: frame.declarations,
        }))
    }

    /// Parse one statement into the current frame and return its kind.
    pub(crate) fn parse_statement_worker(&mut self) -> StatementKind {
        match self.token_kind() {
            SyntaxKind::OpenBraceToken => {
                self.parse_block(ScopeKind::Block);
                StatementKind::Block
            }
            SyntaxKind::SemicolonToken => {
                self.next_token();
                StatementKind::Empty
            }
            SyntaxKind::AtToken => {
                self.parse_decorators();
                self.parse_statement_worker()
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.next_is_binding_start() => {
                self.parse_variable_statement()
            }
            SyntaxKind::UsingKeyword
                if is_identifier_like(self.peek_kind(1)) && self.next_is_on_same_line(1) =>
            {
                self.parse_variable_statement()
            }
            SyntaxKind::AwaitKeyword
                if self.peek_kind(1) == SyntaxKind::UsingKeyword
                    && is_identifier_like(self.peek_kind(2))
                    && self.next_is_on_same_line(2) =>
            {
                self.next_token();
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::AsyncKeyword
                if self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && self.next_is_on_same_line(1) =>
            {
                self.next_token();
                self.parse_function_declaration()
            }
            SyntaxKind::ClassKeyword => {
                self.parse_class_like(true);
                StatementKind::Class
            }
            SyntaxKind::AbstractKeyword
                if self.peek_kind(1) == SyntaxKind::ClassKeyword
                    && self.next_is_on_same_line(1) =>
            {
                self.next_token();
                self.parse_class_like(true);
                StatementKind::Class
            }
            SyntaxKind::InterfaceKeyword
                if is_identifier_like(self.peek_kind(1)) && self.next_is_on_same_line(1) =>
            {
                self.parse_interface_declaration()
            }
            SyntaxKind::TypeKeyword
                if is_identifier_like(self.peek_kind(1)) && self.next_is_on_same_line(1) =>
            {
                self.parse_type_alias_declaration()
            }
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword
                if (is_identifier_like(self.peek_kind(1))
                    || self.peek_kind(1) == SyntaxKind::StringLiteral)
                    && self.next_is_on_same_line(1) =>
            {
                self.parse_module_declaration()
            }
            SyntaxKind::GlobalKeyword if self.peek_kind(1) == SyntaxKind::OpenBraceToken => {
                self.next_token();
                self.parse_block(ScopeKind::ModuleBlock);
                StatementKind::Module
            }
            SyntaxKind::DeclareKeyword if self.next_starts_declaration() => {
                self.parse_ambient_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::ImportKeyword
                if !matches!(
                    self.peek_kind(1),
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                ) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword | SyntaxKind::WithKeyword => {
                self.next_token();
                self.skim_parenthesized();
                self.parse_embedded_statement();
                StatementKind::Loop
            }
            SyntaxKind::ForKeyword => {
                self.next_token();
                if self.is_token(SyntaxKind::AwaitKeyword) {
                    self.next_token();
                }
                self.skim_parenthesized();
                self.parse_embedded_statement();
                StatementKind::Loop
            }
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::ReturnKeyword | SyntaxKind::ThrowKeyword => {
                self.next_token();
                if !self.can_parse_semicolon() {
                    self.skim_expression(ExpressionStop::ASI);
                }
                self.parse_semicolon();
                StatementKind::Jump
            }
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.next_token();
                if is_identifier_like(self.token_kind()) && !self.has_preceding_line_break() {
                    self.next_token();
                }
                self.parse_semicolon();
                StatementKind::Jump
            }
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                StatementKind::Debugger
            }
            kind if is_identifier_like(kind) && self.peek_kind(1) == SyntaxKind::ColonToken => {
                self.next_token();
                self.next_token();
                self.parse_embedded_statement();
                StatementKind::Labeled
            }
            _ => {
                self.skim_expression(ExpressionStop::ASI);
                self.parse_semicolon();
                StatementKind::Expression
            }
        }
    }

    /// The body of `if`, loops and labels. Its holes belong to the
    /// enclosing statement.
    fn parse_embedded_statement(&mut self) {
        if !self.enter_nesting() {
            return;
        }
        let before = self.cursor;
        self.parse_statement_worker();
        if self.cursor == before && !self.is_at_end() {
            self.error_at_current_token(diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
            self.next_token();
        }
        self.leave_nesting();
    }

    pub(crate) fn skim_parenthesized(&mut self) {
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skim_group();
        } else {
            self.parse_expected(SyntaxKind::OpenParenToken, "(");
        }
    }

    // =========================================================================
    // Lookahead helpers
    // =========================================================================

    pub(crate) fn next_is_on_same_line(&self, offset: usize) -> bool {
        self.peek_token(offset)
            .is_some_and(|token| !token.has_preceding_line_break())
    }

    fn next_is_binding_start(&self) -> bool {
        let next = self.peek_kind(1);
        is_identifier_like(next)
            || matches!(
                next,
                SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
            )
    }

    fn next_starts_declaration(&self) -> bool {
        self.next_is_on_same_line(1)
            && matches!(
                self.peek_kind(1),
                SyntaxKind::VarKeyword
                    | SyntaxKind::LetKeyword
                    | SyntaxKind::ConstKeyword
                    | SyntaxKind::UsingKeyword
                    | SyntaxKind::FunctionKeyword
                    | SyntaxKind::AsyncKeyword
                    | SyntaxKind::ClassKeyword
                    | SyntaxKind::AbstractKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::TypeKeyword
                    | SyntaxKind::NamespaceKeyword
                    | SyntaxKind::ModuleKeyword
                    | SyntaxKind::GlobalKeyword
                    | SyntaxKind::EnumKeyword
            )
    }

    /// `[export] [declare] [const] enum Name`
    fn is_start_of_enum_declaration(&self) -> bool {
        let mut offset = 0;
        loop {
            match self.peek_kind(offset) {
                SyntaxKind::ExportKeyword | SyntaxKind::ConstKeyword => offset += 1,
                SyntaxKind::DeclareKeyword => {
                    if !self.next_is_on_same_line(offset + 1) {
                        return false;
                    }
                    offset += 1;
                }
                SyntaxKind::EnumKeyword => return is_identifier_like(self.peek_kind(offset + 1)),
                _ => return false,
            }
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_variable_statement(&mut self) -> StatementKind {
        // var, let, const or using
        self.next_token();
        loop {
            match self.token_kind() {
                SyntaxKind::OpenBraceToken => self.parse_member_list(MemberListKind::ObjectLiteral),
                SyntaxKind::OpenBracketToken => self.skim_group(),
                kind if is_identifier_like(kind) => {
                    let name = self.token_text().to_string();
                    self.declare(&name, DeclarationKind::Variable);
                    self.next_token();
                }
                _ => break,
            }
            if self.is_token(SyntaxKind::ExclamationToken) {
                self.next_token();
            }
            if self.is_token(SyntaxKind::ColonToken) {
                self.next_token();
                self.parse_type(TypeContext::Variable);
            }
            if self.is_token(SyntaxKind::EqualsToken) {
                self.next_token();
                self.skim_expression(ExpressionStop::COMMA | ExpressionStop::ASI);
            }
            if !self.is_token(SyntaxKind::CommaToken) {
                break;
            }
            self.next_token();
        }
        self.parse_semicolon();
        StatementKind::Variable
    }

    fn parse_function_declaration(&mut self) -> StatementKind {
        // function
        self.next_token();
        if self.is_token(SyntaxKind::AsteriskToken) {
            self.next_token();
        }
        if is_identifier_like(self.token_kind()) {
            let name = self.token_text().to_string();
            self.declare(&name, DeclarationKind::Function);
            self.next_token();
        }
        self.parse_signature();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block(ScopeKind::FunctionBody);
        } else {
            self.parse_semicolon();
        }
        StatementKind::Function
    }

    fn parse_interface_declaration(&mut self) -> StatementKind {
        // interface
        self.next_token();
        let name = self.token_text().to_string();
        self.declare(&name, DeclarationKind::Interface);
        self.next_token();
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_parameters();
        }
        self.skim_heritage_clauses();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_member_list(MemberListKind::TypeMembers);
        } else {
            self.parse_expected(SyntaxKind::OpenBraceToken, "{");
        }
        StatementKind::Interface
    }

    fn parse_type_alias_declaration(&mut self) -> StatementKind {
        // type
        self.next_token();
        let name = self.token_text().to_string();
        self.declare(&name, DeclarationKind::TypeAlias);
        self.next_token();
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_parameters();
        }
        if self.parse_expected(SyntaxKind::EqualsToken, "=") {
            self.parse_type(TypeContext::Alias);
        }
        self.parse_semicolon();
        StatementKind::TypeAlias
    }

    fn parse_module_declaration(&mut self) -> StatementKind {
        // namespace or module
        self.next_token();
        if self.is_token(SyntaxKind::StringLiteral) {
            self.next_token();
        } else {
            let name = self.token_text().to_string();
            self.declare(&name, DeclarationKind::Namespace);
            self.next_token();
            while self.is_token(SyntaxKind::DotToken) {
                self.next_token();
                if is_identifier_or_keyword(self.token_kind()) {
                    self.next_token();
                }
            }
        }
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block(ScopeKind::ModuleBlock);
        } else {
            self.parse_semicolon();
        }
        StatementKind::Module
    }

    fn parse_ambient_declaration(&mut self) -> StatementKind {
        // declare
        self.next_token();
        let saved = self.context_flags;
        self.context_flags |= CONTEXT_FLAG_AMBIENT;
        let kind = self.parse_statement_worker();
        self.context_flags = saved;
        kind
    }

    fn parse_export_declaration(&mut self) -> StatementKind {
        // export
        self.next_token();
        match self.token_kind() {
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                match self.token_kind() {
                    SyntaxKind::FunctionKeyword => {
                        self.parse_function_declaration();
                    }
                    SyntaxKind::AsyncKeyword
                        if self.peek_kind(1) == SyntaxKind::FunctionKeyword =>
                    {
                        self.next_token();
                        self.parse_function_declaration();
                    }
                    SyntaxKind::ClassKeyword => self.parse_class_like(true),
                    SyntaxKind::AbstractKeyword
                        if self.peek_kind(1) == SyntaxKind::ClassKeyword =>
                    {
                        self.next_token();
                        self.parse_class_like(true);
                    }
                    SyntaxKind::InterfaceKeyword if is_identifier_like(self.peek_kind(1)) => {
                        self.parse_interface_declaration();
                    }
                    _ => {
                        self.skim_expression(ExpressionStop::ASI);
                        self.parse_semicolon();
                    }
                }
                StatementKind::Export
            }
            SyntaxKind::EqualsToken | SyntaxKind::AsKeyword => {
                self.next_token();
                self.skim_expression(ExpressionStop::ASI);
                self.parse_semicolon();
                StatementKind::Export
            }
            SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken => {
                self.skim_expression(ExpressionStop::ASI);
                self.parse_semicolon();
                StatementKind::Export
            }
            SyntaxKind::TypeKeyword
                if matches!(
                    self.peek_kind(1),
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                ) =>
            {
                self.next_token();
                self.skim_expression(ExpressionStop::ASI);
                self.parse_semicolon();
                StatementKind::Export
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration(),
            _ => self.parse_statement_worker(),
        }
    }

    fn parse_import_declaration(&mut self) -> StatementKind {
        // import
        self.next_token();
        if self.is_token(SyntaxKind::StringLiteral) {
            self.next_token();
            self.skim_import_tail();
            return StatementKind::Import;
        }

        if self.is_token(SyntaxKind::TypeKeyword) {
            let next = self.peek_kind(1);
            let next_is_from = next == SyntaxKind::Identifier
                && self
                    .peek_token(1)
                    .is_some_and(|token| self.text_of(token) == "from");
            if matches!(next, SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken)
                || (is_identifier_like(next) && !next_is_from)
            {
                self.next_token();
            }
        }

        if is_identifier_like(self.token_kind())
            && !(self.token_text() == "from" && self.peek_kind(1) == SyntaxKind::StringLiteral)
        {
            let name = self.token_text().to_string();
            self.declare(&name, DeclarationKind::Import);
            self.next_token();
            if self.is_token(SyntaxKind::EqualsToken) {
                // import X = require("x") / import X = A.B
                self.next_token();
                self.skim_expression(ExpressionStop::ASI);
                self.parse_semicolon();
                return StatementKind::Import;
            }
            if self.is_token(SyntaxKind::CommaToken) {
                self.next_token();
            }
        }

        if self.is_token(SyntaxKind::AsteriskToken) {
            self.next_token();
            if self.is_token(SyntaxKind::AsKeyword) {
                self.next_token();
            }
            if is_identifier_like(self.token_kind()) {
                let name = self.token_text().to_string();
                self.declare(&name, DeclarationKind::Import);
                self.next_token();
            }
        } else if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_import_specifiers();
        }

        self.skim_import_tail();
        StatementKind::Import
    }

    fn parse_import_specifiers(&mut self) {
        if !self.enter_nesting() {
            return;
        }
        // {
        self.next_token();
        loop {
            match self.token_kind() {
                SyntaxKind::CloseBraceToken => {
                    self.next_token();
                    break;
                }
                SyntaxKind::EndOfFileToken => {
                    self.parse_expected(SyntaxKind::CloseBraceToken, "}");
                    break;
                }
                SyntaxKind::CommaToken => {
                    self.next_token();
                    continue;
                }
                _ => {}
            }
            let before = self.cursor;
            if self.is_token(SyntaxKind::TypeKeyword)
                && !matches!(
                    self.peek_kind(1),
                    SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken | SyntaxKind::AsKeyword
                )
            {
                self.next_token();
            }
            if is_identifier_or_keyword(self.token_kind())
                || self.is_token(SyntaxKind::StringLiteral)
            {
                let mut local = self.token_text().to_string();
                self.next_token();
                if self.is_token(SyntaxKind::AsKeyword) {
                    self.next_token();
                    local = self.token_text().to_string();
                    self.next_token();
                }
                self.declare(&local, DeclarationKind::Import);
            }
            if self.cursor == before {
                self.error_at_current_token(diagnostic_codes::EXPECTED, &["}"]);
                self.next_token();
            }
        }
        self.leave_nesting();
    }

    /// `from "x"` and import attributes.
    fn skim_import_tail(&mut self) {
        self.skim_expression(ExpressionStop::ASI);
        self.parse_semicolon();
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> StatementKind {
        // if
        self.next_token();
        self.skim_parenthesized();
        self.parse_embedded_statement();
        if self.is_token(SyntaxKind::ElseKeyword) {
            self.next_token();
            self.parse_embedded_statement();
        }
        StatementKind::If
    }

    fn parse_do_statement(&mut self) -> StatementKind {
        // do
        self.next_token();
        self.parse_embedded_statement();
        if self.parse_expected(SyntaxKind::WhileKeyword, "while") {
            self.skim_parenthesized();
        }
        self.parse_semicolon();
        StatementKind::Loop
    }

    fn parse_switch_statement(&mut self) -> StatementKind {
        // switch
        self.next_token();
        self.skim_parenthesized();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_expected(SyntaxKind::OpenBraceToken, "{");
            return StatementKind::Switch;
        }
        if !self.enter_nesting() {
            return StatementKind::Switch;
        }
        self.next_token();
        loop {
            match self.token_kind() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    self.skim_expression(ExpressionStop::COLON);
                    self.parse_expected(SyntaxKind::ColonToken, ":");
                    self.parse_case_clause(ScopeKind::CaseClause);
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    self.parse_expected(SyntaxKind::ColonToken, ":");
                    self.parse_case_clause(ScopeKind::DefaultClause);
                }
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                _ => {
                    self.error_at_current_token(diagnostic_codes::EXPECTED, &["case"]);
                    self.next_token();
                }
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        self.leave_nesting();
        StatementKind::Switch
    }

    /// Statements of one `case`/`default` clause, from after the `:` to the
    /// end of the last statement.
    fn parse_case_clause(&mut self, kind: ScopeKind) {
        if !self.enter_nesting() {
            return;
        }
        let pos = self.previous_token_end();
        let scope = self.arena.add(Node::Scope(ScopeData {
            kind,
            pos,
            end: pos,
            parent: self.current_scope(),
            statements: Vec::new(),
            is_ambient: self.in_ambient_context(),
        }));
        self.scope_stack.push(scope);
        let statements = self.parse_statement_list(ListTerminator::CaseClause);
        self.scope_stack.pop();

        let end = if statements.is_empty() {
            pos
        } else {
            self.previous_token_end()
        };
        if let Some(data) = self.arena.get_scope_mut(scope) {
            data.statements = statements;
            data.end = end;
        }
        self.add_hole(scope);
        self.leave_nesting();
    }

    fn parse_try_statement(&mut self) -> StatementKind {
        // try
        self.next_token();
        self.parse_block(ScopeKind::Block);
        if self.is_token(SyntaxKind::CatchKeyword) {
            self.next_token();
            if self.is_token(SyntaxKind::OpenParenToken) {
                self.skim_group();
            }
            self.parse_block(ScopeKind::Block);
        }
        if self.is_token(SyntaxKind::FinallyKeyword) {
            self.next_token();
            self.parse_block(ScopeKind::Block);
        }
        StatementKind::Try
    }

    // =========================================================================
    // Enums
    // =========================================================================

    pub(crate) fn parse_enum_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let start = self.token_start();
        let mut modifiers = ModifierFlags::empty();
        loop {
            let flag = match self.token_kind() {
                SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
                SyntaxKind::DeclareKeyword => ModifierFlags::DECLARE,
                SyntaxKind::ConstKeyword => ModifierFlags::CONST,
                _ => break,
            };
            modifiers |= flag;
            self.next_token();
        }
        if self.in_ambient_context() {
            modifiers |= ModifierFlags::AMBIENT;
        }

        // enum
        self.next_token();
        let name_start = self.token_start();
        let name = self.token_text().to_string();
        self.next_token();

        self.begin_frame();
        let mut members = Vec::new();
        let open_brace_end;
        let close_brace_start;
        if self.parse_expected(SyntaxKind::OpenBraceToken, "{") {
            open_brace_end = self.previous_token_end();
            self.parse_enum_members(&mut members);
            close_brace_start = self.token_start();
            self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        } else {
            open_brace_end = self.previous_token_end();
            close_brace_start = open_brace_end;
        }
        let frame = self.end_frame();
        let end = self.previous_token_end();

        let index = self.arena.add(Node::Enum(EnumData {
            pos,
            start,
            end,
            name,
            name_start,
            modifiers,
            members,
            open_brace_end,
            close_brace_start,
            holes: frame.holes,
            scope: self.current_scope(),
        }));
        self.enums.push(index);
        index
    }

    fn parse_enum_members(&mut self, members: &mut Vec<NodeIndex>) {
        if !self.enter_nesting() {
            return;
        }
        loop {
            match self.token_kind() {
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken => {
                    self.error_at_current_token(diagnostic_codes::EXPECTED, &["identifier"]);
                    self.next_token();
                    continue;
                }
                _ => {}
            }
            let member = self.parse_enum_member();
            members.push(member);
            if self.is_token(SyntaxKind::CommaToken) {
                self.next_token();
                let separator_end = self.previous_token_end();
                if let Some(Node::EnumMember(data)) = self.arena.get_mut(member) {
                    data.separator_end = Some(separator_end);
                }
            } else if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.error_at_current_token(diagnostic_codes::EXPECTED, &[","]);
                break;
            }
        }
        self.leave_nesting();
    }

    fn parse_enum_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let start = self.token_start();
        let name = match self.token_kind() {
            SyntaxKind::StringLiteral => {
                let cooked = decode_string_literal(self.token_text());
                self.next_token();
                cooked.map_or(MemberName::Computed, MemberName::String)
            }
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                let cooked = decode_template_text(self.token_text());
                self.next_token();
                cooked.map_or(MemberName::Computed, MemberName::String)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let text = self.token_text().to_string();
                self.next_token();
                MemberName::Numeric(text)
            }
            SyntaxKind::OpenBracketToken => {
                self.skim_group();
                MemberName::Computed
            }
            kind if is_identifier_or_keyword(kind) && kind != SyntaxKind::PrivateIdentifier => {
                let text = self.token_text().to_string();
                self.next_token();
                MemberName::Identifier(text)
            }
            _ => {
                self.error_at_current_token(diagnostic_codes::EXPECTED, &["identifier"]);
                if !matches!(
                    self.token_kind(),
                    SyntaxKind::EqualsToken | SyntaxKind::EndOfFileToken
                ) {
                    self.next_token();
                }
                MemberName::Computed
            }
        };
        let name_end = self.previous_token_end().max(start);
        let name_text = self.source[start as usize..name_end as usize].to_string();

        let initializer = if self.is_token(SyntaxKind::EqualsToken) {
            self.next_token();
            self.parse_enum_initializer()
        } else {
            NodeIndex::NONE
        };
        let end = self.previous_token_end().max(start);

        self.arena.add(Node::EnumMember(EnumMemberData {
            pos,
            start,
            end,
            name,
            name_text,
            initializer,
            separator_end: None,
        }))
    }
}
