//! Node data structures.
//!
//! Nodes cover the structure the enum rewrite needs. Statements that are
//! not enums keep only their span and the nested scopes or type sites
//! ("holes") found inside them. Everything else in a statement prints
//! verbatim from the source text.

use std::sync::Arc;

use bitflags::bitflags;
use eject_enum_scanner::{LanguageVariant, SyntaxKind};
use smallvec::SmallVec;

use super::base::{NodeIndex, TextSpan};

/// Nested nodes of a statement or enum, in source order.
pub type Holes = SmallVec<[NodeIndex; 2]>;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ModifierFlags: u8 {
        const EXPORT = 1 << 0;
        const DECLARE = 1 << 1;
        const CONST = 1 << 2;
        /// Declared inside an ambient context (`declare namespace`, `.d.ts`).
        const AMBIENT = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    SourceFile,
    Block,
    FunctionBody,
    ModuleBlock,
    CaseClause,
    DefaultClause,
    ClassStaticBlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Block,
    Empty,
    Variable,
    Function,
    Class,
    Interface,
    TypeAlias,
    Module,
    If,
    Loop,
    Switch,
    Try,
    Labeled,
    Jump,
    Import,
    Export,
    Expression,
    Debugger,
}

/// What a declared name binds, as far as qualified type name lookup cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationKind {
    Enum,
    Namespace,
    Class,
    Function,
    Variable,
    Import,
    Interface,
    TypeAlias,
}

impl DeclarationKind {
    /// Whether the name can qualify a type (`Name.Member`). Only these
    /// declarations hide an outer enum of the same name in type position.
    pub fn has_namespace_meaning(self) -> bool {
        matches!(
            self,
            DeclarationKind::Enum | DeclarationKind::Namespace | DeclarationKind::Import
        )
    }

    /// Whether the name can be read as a value, so it hides an outer enum
    /// in an expression.
    pub fn has_value_meaning(self) -> bool {
        !matches!(
            self,
            DeclarationKind::Interface | DeclarationKind::TypeAlias
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredName {
    pub name: String,
    pub kind: DeclarationKind,
}

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub file_name: String,
    pub text: Arc<str>,
    pub scope: NodeIndex,
    pub language_variant: LanguageVariant,
    pub is_declaration_file: bool,
    /// Every enum declaration, in source order.
    pub enums: Vec<NodeIndex>,
    /// Every `Name.Member` property type annotation, in source order.
    pub type_sites: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ScopeData {
    pub kind: ScopeKind,
    pub pos: u32,
    pub end: u32,
    pub parent: NodeIndex,
    pub statements: Vec<NodeIndex>,
    pub is_ambient: bool,
}

#[derive(Clone, Debug)]
pub struct StatementData {
    pub kind: StatementKind,
    pub pos: u32,
    pub end: u32,
    pub holes: Holes,
    pub declarations: SmallVec<[DeclaredName; 1]>,
}

#[derive(Clone, Debug)]
pub struct EnumData {
    /// Full start, including leading trivia.
    pub pos: u32,
    /// Start of the first modifier or of the `enum` keyword.
    pub start: u32,
    pub end: u32,
    pub name: String,
    pub name_start: u32,
    pub modifiers: ModifierFlags,
    pub members: Vec<NodeIndex>,
    /// End of the `{` token.
    pub open_brace_end: u32,
    /// Start of the `}` token.
    pub close_brace_start: u32,
    pub holes: Holes,
    /// Scope holding the declaration.
    pub scope: NodeIndex,
}

impl EnumData {
    pub fn is_exported(&self) -> bool {
        self.modifiers.contains(ModifierFlags::EXPORT)
    }

    pub fn is_ambient(&self) -> bool {
        self.modifiers
            .intersects(ModifierFlags::DECLARE | ModifierFlags::AMBIENT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberName {
    Identifier(String),
    /// Cooked value of a string literal name.
    String(String),
    Numeric(String),
    Computed,
}

impl MemberName {
    /// The property key this name denotes, when it has a static one.
    pub fn key(&self) -> Option<&str> {
        match self {
            MemberName::Identifier(text) | MemberName::String(text) | MemberName::Numeric(text) => {
                Some(text)
            }
            MemberName::Computed => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnumMemberData {
    pub pos: u32,
    pub start: u32,
    pub end: u32,
    pub name: MemberName,
    /// Name exactly as written, quotes included.
    pub name_text: String,
    pub initializer: NodeIndex,
    /// End of the `,` following the member, if any.
    pub separator_end: Option<u32>,
}

/// A property type annotation written exactly as `Qualifier.Member`.
#[derive(Clone, Debug)]
pub struct TypeSiteData {
    pub pos: u32,
    pub end: u32,
    pub scope: NodeIndex,
    pub qualifier: String,
    pub member: String,
}

/// Replacement text for a span of the source.
///
/// Printing emits the `detached` and `carried` source spans first, then
/// `leading` and `text`.
#[derive(Clone, Debug)]
pub struct SynthesizedData {
    pub pos: u32,
    pub end: u32,
    pub detached: TextSpan,
    pub carried: TextSpan,
    pub leading: String,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    pub pos: u32,
    pub end: u32,
    /// Cooked text for strings and templates, source text for numbers.
    pub text: String,
    pub value: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub pos: u32,
    pub end: u32,
    pub escaped_text: String,
}

#[derive(Clone, Debug)]
pub struct TemplateSpanData {
    pub expression: NodeIndex,
    pub literal: String,
}

#[derive(Clone, Debug)]
pub struct TemplateData {
    pub pos: u32,
    pub end: u32,
    pub head: String,
    pub spans: Vec<TemplateSpanData>,
}

#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub pos: u32,
    pub end: u32,
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub pos: u32,
    pub end: u32,
    pub left: NodeIndex,
    pub operator: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParenthesizedData {
    pub pos: u32,
    pub end: u32,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub pos: u32,
    pub end: u32,
    pub expression: NodeIndex,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct ElementAccessData {
    pub pos: u32,
    pub end: u32,
    pub expression: NodeIndex,
    pub argument: NodeIndex,
}

/// Source span of an initializer the constant parser does not model.
#[derive(Clone, Debug)]
pub struct SpanData {
    pub pos: u32,
    pub end: u32,
}

#[derive(Clone, Debug)]
pub enum Node {
    SourceFile(SourceFileData),
    Scope(ScopeData),
    Statement(StatementData),
    Enum(EnumData),
    EnumMember(EnumMemberData),
    TypeReference(TypeSiteData),
    Synthesized(SynthesizedData),
    NumericLiteral(LiteralData),
    StringLiteral(LiteralData),
    NoSubstitutionTemplateLiteral(LiteralData),
    TemplateExpression(TemplateData),
    Identifier(IdentifierData),
    PrefixUnaryExpression(UnaryExprData),
    BinaryExpression(BinaryExprData),
    ParenthesizedExpression(ParenthesizedData),
    PropertyAccessExpression(AccessExprData),
    ElementAccessExpression(ElementAccessData),
    UnsupportedExpression(SpanData),
}

impl Node {
    /// Start of the node. Statements, scopes and enums include leading
    /// trivia; expressions and type sites start at their first token.
    pub fn pos(&self) -> u32 {
        match self {
            Node::SourceFile(_) => 0,
            Node::Scope(data) => data.pos,
            Node::Statement(data) => data.pos,
            Node::Enum(data) => data.pos,
            Node::EnumMember(data) => data.pos,
            Node::TypeReference(data) => data.pos,
            Node::Synthesized(data) => data.pos,
            Node::NumericLiteral(data)
            | Node::StringLiteral(data)
            | Node::NoSubstitutionTemplateLiteral(data) => data.pos,
            Node::TemplateExpression(data) => data.pos,
            Node::Identifier(data) => data.pos,
            Node::PrefixUnaryExpression(data) => data.pos,
            Node::BinaryExpression(data) => data.pos,
            Node::ParenthesizedExpression(data) => data.pos,
            Node::PropertyAccessExpression(data) => data.pos,
            Node::ElementAccessExpression(data) => data.pos,
            Node::UnsupportedExpression(data) => data.pos,
        }
    }

    pub fn end(&self) -> u32 {
        match self {
            Node::SourceFile(data) => data.text.len() as u32,
            Node::Scope(data) => data.end,
            Node::Statement(data) => data.end,
            Node::Enum(data) => data.end,
            Node::EnumMember(data) => data.end,
            Node::TypeReference(data) => data.end,
            Node::Synthesized(data) => data.end,
            Node::NumericLiteral(data)
            | Node::StringLiteral(data)
            | Node::NoSubstitutionTemplateLiteral(data) => data.end,
            Node::TemplateExpression(data) => data.end,
            Node::Identifier(data) => data.end,
            Node::PrefixUnaryExpression(data) => data.end,
            Node::BinaryExpression(data) => data.end,
            Node::ParenthesizedExpression(data) => data.end,
            Node::PropertyAccessExpression(data) => data.end,
            Node::ElementAccessExpression(data) => data.end,
            Node::UnsupportedExpression(data) => data.end,
        }
    }

    /// Nested scopes and type sites, for statements and enums.
    pub fn holes(&self) -> &[NodeIndex] {
        match self {
            Node::Statement(data) => data.holes.as_slice(),
            Node::Enum(data) => data.holes.as_slice(),
            _ => &[],
        }
    }
}
