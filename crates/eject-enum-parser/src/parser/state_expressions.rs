//! Parser state - expression skimming and constant expression parsing.
//!
//! General expressions are skimmed: the parser walks their tokens only to
//! find where they end and which function bodies, class bodies and object
//! literals they contain. Enum initializers are additionally parsed into an
//! expression tree when they use only the operators a constant can use.

use bitflags::bitflags;
use eject_enum_common::diagnostics::diagnostic_codes;
use eject_enum_common::limits::MAX_CONSTANT_EXPRESSION_DEPTH;
use eject_enum_scanner::literals::{decode_string_literal, decode_template_text, parse_numeric_literal};
use eject_enum_scanner::{
    SyntaxKind, binary_operator_precedence, can_end_expression, is_assignment_operator,
    is_identifier_like, is_identifier_or_keyword, is_template_continuation,
};

use super::base::NodeIndex;
use super::node::{
    AccessExprData, BinaryExprData, ElementAccessData, IdentifierData, LiteralData, Node,
    ParenthesizedData, ScopeKind, SpanData, TemplateData, TemplateSpanData, UnaryExprData,
};
use super::state::ParserState;
use super::state_members::MemberListKind;

bitflags! {
    /// Extra tokens that end a skimmed expression. `;`, closing brackets,
    /// template continuations and the end of file always end one.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct ExpressionStop: u8 {
        const COMMA = 1 << 0;
        /// A `:` not paired with a `?`, as after a `case` label.
        const COLON = 1 << 1;
        /// A line break where automatic semicolon insertion applies.
        const ASI = 1 << 2;
    }
}

impl ParserState {
    pub(crate) fn skim_expression(&mut self, stop: ExpressionStop) {
        let mut open_conditionals = 0u32;
        let start_cursor = self.cursor;
        loop {
            let token = self.token();
            let kind = token.kind;
            if stop.contains(ExpressionStop::ASI)
                && self.cursor > start_cursor
                && token.has_preceding_line_break()
                && self.previous_kind().is_some_and(can_end_expression)
                && !continues_expression(kind)
            {
                break;
            }
            match kind {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::TemplateMiddle
                | SyntaxKind::TemplateTail => break,
                SyntaxKind::CommaToken if stop.contains(ExpressionStop::COMMA) => break,
                SyntaxKind::ColonToken
                    if stop.contains(ExpressionStop::COLON) && open_conditionals == 0 =>
                {
                    break;
                }
                SyntaxKind::QuestionToken => {
                    open_conditionals += 1;
                    self.next_token();
                }
                SyntaxKind::ColonToken => {
                    open_conditionals = open_conditionals.saturating_sub(1);
                    self.next_token();
                }
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => self.skim_group(),
                SyntaxKind::OpenBraceToken => {
                    if self.previous_kind() == Some(SyntaxKind::EqualsGreaterThanToken) {
                        self.parse_block(ScopeKind::FunctionBody);
                    } else {
                        self.parse_member_list(MemberListKind::ObjectLiteral);
                    }
                }
                SyntaxKind::TemplateHead => self.skim_template(),
                SyntaxKind::FunctionKeyword if !self.after_member_access() => {
                    self.parse_function_expression();
                }
                SyntaxKind::ClassKeyword if !self.after_member_access() => {
                    self.parse_class_like(false);
                }
                _ => self.next_token(),
            }
        }
    }

    fn after_member_access(&self) -> bool {
        matches!(
            self.previous_kind(),
            Some(SyntaxKind::DotToken | SyntaxKind::QuestionDotToken)
        )
    }

    /// Skim a `( ... )` or `[ ... ]` group, including its closing token.
    pub(crate) fn skim_group(&mut self) {
        let (close, close_text) = if self.is_token(SyntaxKind::OpenBracketToken) {
            (SyntaxKind::CloseBracketToken, "]")
        } else {
            (SyntaxKind::CloseParenToken, ")")
        };
        if !self.enter_nesting() {
            return;
        }
        self.next_token();
        loop {
            self.skim_expression(ExpressionStop::empty());
            match self.token_kind() {
                kind if kind == close => {
                    self.next_token();
                    break;
                }
                SyntaxKind::CommaToken | SyntaxKind::SemicolonToken => self.next_token(),
                _ => {
                    self.parse_expected(close, close_text);
                    break;
                }
            }
        }
        self.leave_nesting();
    }

    /// Skim a template expression from its head through its tail.
    pub(crate) fn skim_template(&mut self) {
        if !self.enter_nesting() {
            return;
        }
        // template head
        self.next_token();
        loop {
            self.skim_expression(ExpressionStop::empty());
            match self.token_kind() {
                SyntaxKind::TemplateMiddle => self.next_token(),
                SyntaxKind::TemplateTail => {
                    self.next_token();
                    break;
                }
                _ => {
                    self.error_at_current_token(
                        diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                        &[],
                    );
                    break;
                }
            }
        }
        self.leave_nesting();
    }

    fn parse_function_expression(&mut self) {
        // function
        self.next_token();
        if self.is_token(SyntaxKind::AsteriskToken) {
            self.next_token();
        }
        if is_identifier_like(self.token_kind()) {
            self.next_token();
        }
        self.parse_signature();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block(ScopeKind::FunctionBody);
        }
    }

    // =========================================================================
    // Enum initializers
    // =========================================================================

    /// Skim an initializer up to the member separator, then parse that token
    /// range as a constant expression. Ranges the constant grammar does not
    /// cover become an `UnsupportedExpression` spanning the same text.
    pub(crate) fn parse_enum_initializer(&mut self) -> NodeIndex {
        let first = self.cursor;
        self.skim_expression(ExpressionStop::COMMA);
        let limit = self.cursor;
        if limit == first {
            self.error_at_current_token(diagnostic_codes::EXPECTED, &["expression"]);
            let at = self.token_start();
            return self
                .arena
                .add(Node::UnsupportedExpression(SpanData { pos: at, end: at }));
        }

        self.cursor = first;
        let parsed = self.parse_constant_binary(limit, 0, 0);
        let complete = self.cursor == limit;
        self.cursor = limit;

        match parsed {
            Some(expression) if complete => expression,
            _ => {
                let pos = self.tokens[first].start;
                let end = self.tokens[limit - 1].end;
                self.arena
                    .add(Node::UnsupportedExpression(SpanData { pos, end }))
            }
        }
    }

    fn kind_before(&self, limit: usize) -> SyntaxKind {
        if self.cursor < limit {
            self.token_kind()
        } else {
            SyntaxKind::EndOfFileToken
        }
    }

    fn parse_constant_binary(&mut self, limit: usize, min_precedence: u8, depth: u32) -> Option<NodeIndex> {
        if depth > MAX_CONSTANT_EXPRESSION_DEPTH {
            return None;
        }
        let mut left = self.parse_constant_unary(limit, depth + 1)?;
        loop {
            let operator = self.kind_before(limit);
            let Some(precedence) = binary_operator_precedence(operator) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            // `**` is right-associative.
            let next_min = if operator == SyntaxKind::AsteriskAsteriskToken {
                precedence
            } else {
                precedence + 1
            };
            self.next_token();
            let right = self.parse_constant_binary(limit, next_min, depth + 1)?;
            let pos = self.arena.get(left)?.pos();
            let end = self.arena.get(right)?.end();
            left = self.arena.add(Node::BinaryExpression(BinaryExprData {
                pos,
                end,
                left,
                operator,
                right,
            }));
        }
        Some(left)
    }

    fn parse_constant_unary(&mut self, limit: usize, depth: u32) -> Option<NodeIndex> {
        if depth > MAX_CONSTANT_EXPRESSION_DEPTH {
            return None;
        }
        let operator = self.kind_before(limit);
        if matches!(
            operator,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
        ) {
            let pos = self.token_start();
            self.next_token();
            let operand = self.parse_constant_unary(limit, depth + 1)?;
            let end = self.arena.get(operand)?.end();
            return Some(self.arena.add(Node::PrefixUnaryExpression(UnaryExprData {
                pos,
                end,
                operator,
                operand,
            })));
        }
        self.parse_constant_postfix(limit, depth + 1)
    }

    fn parse_constant_postfix(&mut self, limit: usize, depth: u32) -> Option<NodeIndex> {
        let mut expression = self.parse_constant_primary(limit, depth)?;
        loop {
            match self.kind_before(limit) {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let kind = self.kind_before(limit);
                    if !is_identifier_or_keyword(kind) || kind == SyntaxKind::PrivateIdentifier {
                        return None;
                    }
                    let name = self.token_text().to_string();
                    let end = self.token().end;
                    self.next_token();
                    let pos = self.arena.get(expression)?.pos();
                    expression = self.arena.add(Node::PropertyAccessExpression(AccessExprData {
                        pos,
                        end,
                        expression,
                        name,
                    }));
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument = self.parse_constant_binary(limit, 0, depth + 1)?;
                    if self.kind_before(limit) != SyntaxKind::CloseBracketToken {
                        return None;
                    }
                    let end = self.token().end;
                    self.next_token();
                    let pos = self.arena.get(expression)?.pos();
                    expression = self.arena.add(Node::ElementAccessExpression(ElementAccessData {
                        pos,
                        end,
                        expression,
                        argument,
                    }));
                }
                _ => break,
            }
        }
        Some(expression)
    }

    fn parse_constant_primary(&mut self, limit: usize, depth: u32) -> Option<NodeIndex> {
        let token = self.token();
        let (pos, end) = (token.start, token.end);
        let node = match self.kind_before(limit) {
            SyntaxKind::NumericLiteral => {
                let text = self.token_text().to_string();
                let value = Some(parse_numeric_literal(&text)?);
                self.next_token();
                Node::NumericLiteral(LiteralData {
                    pos,
                    end,
                    text,
                    value,
                })
            }
            SyntaxKind::StringLiteral => {
                let text = decode_string_literal(self.token_text())?;
                self.next_token();
                Node::StringLiteral(LiteralData {
                    pos,
                    end,
                    text,
                    value: None,
                })
            }
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                let text = decode_template_text(self.token_text())?;
                self.next_token();
                Node::NoSubstitutionTemplateLiteral(LiteralData {
                    pos,
                    end,
                    text,
                    value: None,
                })
            }
            SyntaxKind::TemplateHead => {
                let head = decode_template_text(self.token_text())?;
                self.next_token();
                let mut spans = Vec::new();
                let end = loop {
                    let expression = self.parse_constant_binary(limit, 0, depth + 1)?;
                    let kind = self.kind_before(limit);
                    if !is_template_continuation(kind) {
                        return None;
                    }
                    let literal = decode_template_text(self.token_text())?;
                    let piece_end = self.token().end;
                    self.next_token();
                    spans.push(TemplateSpanData {
                        expression,
                        literal,
                    });
                    if kind == SyntaxKind::TemplateTail {
                        break piece_end;
                    }
                };
                Node::TemplateExpression(TemplateData {
                    pos,
                    end,
                    head,
                    spans,
                })
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_constant_binary(limit, 0, depth + 1)?;
                if self.kind_before(limit) != SyntaxKind::CloseParenToken {
                    return None;
                }
                let end = self.token().end;
                self.next_token();
                Node::ParenthesizedExpression(ParenthesizedData {
                    pos,
                    end,
                    expression,
                })
            }
            kind if is_identifier_like(kind) => {
                let escaped_text = self.token_text().to_string();
                self.next_token();
                Node::Identifier(IdentifierData {
                    pos,
                    end,
                    escaped_text,
                })
            }
            _ => return None,
        };
        Some(self.arena.add(node))
    }
}

/// Tokens that, at the start of a new line, continue the expression on the
/// previous line instead of starting a statement.
fn continues_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::DotToken
            | SyntaxKind::QuestionDotToken
            | SyntaxKind::TemplateHead
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::CommaToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::AsKeyword
            | SyntaxKind::SatisfiesKeyword
    ) || binary_operator_precedence(kind).is_some()
        || is_assignment_operator(kind)
}
