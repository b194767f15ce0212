//! Parser state - type skimming.
//!
//! Types are skimmed like expressions: the parser finds where a type ends
//! and descends into type literals so their property types can be recorded.

use eject_enum_scanner::{SyntaxKind, can_end_expression, is_keyword};

use super::state::ParserState;
use super::state_members::MemberListKind;

/// Where a type annotation appears, which decides what ends it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TypeContext {
    /// Class field or type member: `=` starts an initializer.
    Member,
    /// Parameter: `=` starts a default value.
    Parameter,
    /// Variable declaration: `=` starts an initializer.
    Variable,
    /// Function return type: a `{` after a complete type starts the body.
    ReturnType,
    /// Right-hand side of a type alias.
    Alias,
}

impl ParserState {
    /// Skim one type and return its token range `[first, end)`.
    pub(crate) fn parse_type(&mut self, context: TypeContext) -> (usize, usize) {
        let first = self.cursor;
        let mut angle_depth = 0u32;
        loop {
            let token = self.token();
            let kind = token.kind;
            if self.cursor > first
                && angle_depth == 0
                && token.has_preceding_line_break()
                && self.previous_kind().is_some_and(can_end_type)
                && !continues_type(kind)
            {
                break;
            }
            match kind {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::TemplateMiddle
                | SyntaxKind::TemplateTail => break,
                SyntaxKind::CommaToken if angle_depth == 0 => break,
                SyntaxKind::EqualsToken if angle_depth == 0 && context != TypeContext::Alias => {
                    break;
                }
                SyntaxKind::OpenBraceToken => {
                    if context == TypeContext::ReturnType
                        && angle_depth == 0
                        && self.cursor > first
                        && self.previous_kind().is_some_and(can_end_type)
                    {
                        break;
                    }
                    self.parse_member_list(MemberListKind::TypeMembers);
                }
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => self.skim_group(),
                SyntaxKind::TemplateHead => self.skim_template(),
                SyntaxKind::LessThanToken => {
                    angle_depth += 1;
                    self.next_token();
                }
                SyntaxKind::GreaterThanToken => {
                    angle_depth = angle_depth.saturating_sub(1);
                    self.next_token();
                }
                SyntaxKind::GreaterThanGreaterThanToken => {
                    angle_depth = angle_depth.saturating_sub(2);
                    self.next_token();
                }
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
                    angle_depth = angle_depth.saturating_sub(3);
                    self.next_token();
                }
                _ => self.next_token(),
            }
        }
        (first, self.cursor)
    }

    /// Skip `<T extends U = V, ...>` including both angle brackets.
    pub(crate) fn skip_type_parameters(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token_kind() {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken => break,
                SyntaxKind::LessThanToken => {
                    depth += 1;
                    self.next_token();
                }
                SyntaxKind::GreaterThanToken => {
                    depth = depth.saturating_sub(1);
                    self.next_token();
                }
                SyntaxKind::GreaterThanGreaterThanToken => {
                    depth = depth.saturating_sub(2);
                    self.next_token();
                }
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
                    depth = depth.saturating_sub(3);
                    self.next_token();
                }
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => self.skim_group(),
                SyntaxKind::OpenBraceToken => self.parse_member_list(MemberListKind::TypeMembers),
                SyntaxKind::TemplateHead => self.skim_template(),
                _ => self.next_token(),
            }
            if depth == 0 {
                break;
            }
        }
    }

    /// Skip `extends` and `implements` clauses up to a class or interface body.
    pub(crate) fn skim_heritage_clauses(&mut self) {
        let mut angle_depth = 0u32;
        loop {
            match self.token_kind() {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => break,
                SyntaxKind::OpenBraceToken if angle_depth == 0 => break,
                SyntaxKind::OpenBraceToken => self.parse_member_list(MemberListKind::TypeMembers),
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => self.skim_group(),
                SyntaxKind::LessThanToken => {
                    angle_depth += 1;
                    self.next_token();
                }
                SyntaxKind::GreaterThanToken => {
                    angle_depth = angle_depth.saturating_sub(1);
                    self.next_token();
                }
                SyntaxKind::GreaterThanGreaterThanToken => {
                    angle_depth = angle_depth.saturating_sub(2);
                    self.next_token();
                }
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
                    angle_depth = angle_depth.saturating_sub(3);
                    self.next_token();
                }
                _ => self.next_token(),
            }
        }
    }
}

/// Tokens a complete type can end with.
fn can_end_type(kind: SyntaxKind) -> bool {
    match kind {
        SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => true,
        SyntaxKind::ExtendsKeyword
        | SyntaxKind::KeyOfKeyword
        | SyntaxKind::TypeOfKeyword
        | SyntaxKind::InferKeyword
        | SyntaxKind::IsKeyword
        | SyntaxKind::AssertsKeyword
        | SyntaxKind::ReadonlyKeyword
        | SyntaxKind::UniqueKeyword
        | SyntaxKind::NewKeyword
        | SyntaxKind::InKeyword => false,
        _ => can_end_expression(kind) || is_keyword(kind),
    }
}

/// Tokens that continue a type on a new line.
fn continues_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::DotToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::ExtendsKeyword
            | SyntaxKind::IsKeyword
    )
}
