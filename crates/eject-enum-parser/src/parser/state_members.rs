//! Parser state - member lists, signatures, parameters and decorators.
//!
//! Object literals, class bodies and type literals share one member list
//! parser. Class fields, interface properties and constructor parameter
//! properties whose type is exactly `Name.Member` are recorded as type
//! sites.

use eject_enum_common::diagnostics::diagnostic_codes;
use eject_enum_scanner::{SyntaxKind, is_identifier_like, is_identifier_or_keyword};

use super::node::{DeclarationKind, Node, ScopeKind, TypeSiteData};
use super::state::ParserState;
use super::state_expressions::ExpressionStop;
use super::state_types::TypeContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MemberListKind {
    ObjectLiteral,
    Class,
    /// Interface bodies and type literals.
    TypeMembers,
}

impl ParserState {
    /// Parse `{ member, ... }` including both braces.
    pub(crate) fn parse_member_list(&mut self, list: MemberListKind) {
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
                SyntaxKind::SemicolonToken | SyntaxKind::CommaToken => {
                    self.next_token();
                    continue;
                }
                SyntaxKind::EndOfFileToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::TemplateMiddle
                | SyntaxKind::TemplateTail => {
                    self.parse_expected(SyntaxKind::CloseBraceToken, "}");
                    break;
                }
                _ => {}
            }
            let before = self.cursor;
            self.parse_member(list);
            if self.cursor == before {
                self.next_token();
            }
        }
        self.leave_nesting();
    }

    fn parse_member(&mut self, list: MemberListKind) {
        while self.is_token(SyntaxKind::AtToken) {
            self.parse_decorator();
        }

        if list == MemberListKind::ObjectLiteral && self.is_token(SyntaxKind::DotDotDotToken) {
            self.next_token();
            self.skim_expression(ExpressionStop::COMMA);
            return;
        }

        if list == MemberListKind::Class
            && self.is_token(SyntaxKind::StaticKeyword)
            && self.peek_kind(1) == SyntaxKind::OpenBraceToken
        {
            self.next_token();
            self.parse_block(ScopeKind::ClassStaticBlock);
            return;
        }

        while is_member_modifier(self.token_kind(), list) && self.next_can_follow_modifier() {
            self.next_token();
        }
        if self.is_token(SyntaxKind::AsteriskToken) {
            self.next_token();
        }

        let mut is_named_property = true;
        match self.token_kind() {
            SyntaxKind::OpenBracketToken => {
                // Computed name or index signature.
                is_named_property = false;
                self.skim_group();
            }
            SyntaxKind::NewKeyword
                if list == MemberListKind::TypeMembers
                    && matches!(
                        self.peek_kind(1),
                        SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                    ) =>
            {
                is_named_property = false;
                self.next_token();
            }
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                is_named_property = false;
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.next_token(),
            kind if is_identifier_or_keyword(kind) => self.next_token(),
            _ => {
                self.skim_expression(ExpressionStop::COMMA | ExpressionStop::ASI);
                return;
            }
        }

        if self.is_token(SyntaxKind::QuestionToken) {
            self.next_token();
        }
        if self.is_token(SyntaxKind::ExclamationToken) {
            self.next_token();
        }

        match self.token_kind() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                self.parse_signature();
                if list != MemberListKind::TypeMembers && self.is_token(SyntaxKind::OpenBraceToken)
                {
                    self.parse_block(ScopeKind::FunctionBody);
                }
            }
            SyntaxKind::ColonToken if list == MemberListKind::ObjectLiteral => {
                self.next_token();
                self.skim_expression(ExpressionStop::COMMA);
            }
            SyntaxKind::ColonToken => {
                self.next_token();
                let range = self.parse_type(TypeContext::Member);
                if is_named_property {
                    self.record_type_site(range);
                }
                if self.is_token(SyntaxKind::EqualsToken) {
                    self.next_token();
                    self.skim_expression(ExpressionStop::ASI);
                }
            }
            SyntaxKind::EqualsToken => {
                self.next_token();
                let stop = if list == MemberListKind::ObjectLiteral {
                    ExpressionStop::COMMA
                } else {
                    ExpressionStop::ASI
                };
                self.skim_expression(stop);
            }
            _ => {}
        }
    }

    fn next_can_follow_modifier(&self) -> bool {
        self.next_is_on_same_line(1)
            && (is_identifier_or_keyword(self.peek_kind(1))
                || matches!(
                    self.peek_kind(1),
                    SyntaxKind::StringLiteral
                        | SyntaxKind::NumericLiteral
                        | SyntaxKind::BigIntLiteral
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::AsteriskToken
                ))
    }

    /// Record a just-parsed type of exactly `Qualifier.Member` as a type site.
    pub(crate) fn record_type_site(&mut self, (first, end): (usize, usize)) {
        if end != first + 3 {
            return;
        }
        let qualifier = self.tokens[first];
        let dot = self.tokens[first + 1];
        let member = self.tokens[first + 2];
        if !is_identifier_like(qualifier.kind)
            || dot.kind != SyntaxKind::DotToken
            || !is_identifier_or_keyword(member.kind)
            || member.kind == SyntaxKind::PrivateIdentifier
        {
            return;
        }
        let site = TypeSiteData {
            pos: qualifier.start,
            end: member.end,
            scope: self.current_scope(),
            qualifier: self.text_of(qualifier).to_string(),
            member: self.text_of(member).to_string(),
        };
        let index = self.arena.add(Node::TypeReference(site));
        self.add_hole(index);
        self.type_sites.push(index);
    }

    // =========================================================================
    // Signatures and parameters
    // =========================================================================

    /// `<T>(params): ReturnType`, each part optional.
    pub(crate) fn parse_signature(&mut self) {
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_parameters();
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameter_list();
        }
        if self.is_token(SyntaxKind::ColonToken) {
            self.next_token();
            self.parse_type(TypeContext::ReturnType);
        }
    }

    fn parse_parameter_list(&mut self) {
        if !self.enter_nesting() {
            return;
        }
        // (
        self.next_token();
        loop {
            match self.token_kind() {
                SyntaxKind::CloseParenToken => {
                    self.next_token();
                    break;
                }
                SyntaxKind::CommaToken => {
                    self.next_token();
                    continue;
                }
                SyntaxKind::EndOfFileToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseBracketToken => {
                    self.parse_expected(SyntaxKind::CloseParenToken, ")");
                    break;
                }
                _ => {}
            }
            let before = self.cursor;
            while self.is_token(SyntaxKind::AtToken) {
                self.parse_decorator();
            }
            let mut is_property = false;
            while is_parameter_modifier(self.token_kind())
                && (is_identifier_like(self.peek_kind(1))
                    || matches!(
                        self.peek_kind(1),
                        SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
                    ))
            {
                is_property = true;
                self.next_token();
            }
            if self.is_token(SyntaxKind::DotDotDotToken) {
                self.next_token();
            }
            match self.token_kind() {
                SyntaxKind::OpenBraceToken => self.parse_member_list(MemberListKind::ObjectLiteral),
                SyntaxKind::OpenBracketToken => self.skim_group(),
                kind if is_identifier_or_keyword(kind) => self.next_token(),
                _ => {}
            }
            if self.is_token(SyntaxKind::QuestionToken) {
                self.next_token();
            }
            if self.is_token(SyntaxKind::ColonToken) {
                self.next_token();
                let range = self.parse_type(TypeContext::Parameter);
                if is_property {
                    self.record_type_site(range);
                }
            }
            if self.is_token(SyntaxKind::EqualsToken) {
                self.next_token();
                self.skim_expression(ExpressionStop::COMMA);
            }
            if self.cursor == before {
                self.error_at_current_token(diagnostic_codes::EXPECTED, &[")"]);
                self.next_token();
            }
        }
        self.leave_nesting();
    }

    // =========================================================================
    // Classes and decorators
    // =========================================================================

    /// `class [Name] [<T>] [extends ...] [implements ...] { ... }`, as a
    /// declaration or an expression.
    pub(crate) fn parse_class_like(&mut self, is_declaration: bool) {
        // class
        self.next_token();
        let kind = self.token_kind();
        if is_identifier_like(kind) && kind != SyntaxKind::ImplementsKeyword {
            if is_declaration {
                let name = self.token_text().to_string();
                self.declare(&name, DeclarationKind::Class);
            }
            self.next_token();
        }
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_parameters();
        }
        self.skim_heritage_clauses();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_member_list(MemberListKind::Class);
        } else {
            self.parse_expected(SyntaxKind::OpenBraceToken, "{");
        }
    }

    pub(crate) fn parse_decorators(&mut self) {
        while self.is_token(SyntaxKind::AtToken) {
            self.parse_decorator();
        }
    }

    /// `@name`, `@a.b.c`, `@a(args)` or `@(expression)`.
    fn parse_decorator(&mut self) {
        // @
        self.next_token();
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skim_group();
            return;
        }
        if is_identifier_or_keyword(self.token_kind()) {
            self.next_token();
        }
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            if is_identifier_or_keyword(self.token_kind()) {
                self.next_token();
            }
        }
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_parameters();
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skim_group();
        }
    }
}

fn is_member_modifier(kind: SyntaxKind, list: MemberListKind) -> bool {
    match list {
        MemberListKind::ObjectLiteral => matches!(
            kind,
            SyntaxKind::GetKeyword | SyntaxKind::SetKeyword | SyntaxKind::AsyncKeyword
        ),
        MemberListKind::Class => matches!(
            kind,
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::GetKeyword
                | SyntaxKind::SetKeyword
                | SyntaxKind::AsyncKeyword
        ),
        MemberListKind::TypeMembers => matches!(
            kind,
            SyntaxKind::ReadonlyKeyword | SyntaxKind::GetKeyword | SyntaxKind::SetKeyword
        ),
    }
}

fn is_parameter_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::OverrideKeyword
    )
}
