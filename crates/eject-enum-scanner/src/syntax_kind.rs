//! Token kinds produced by the scanner.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,
    /// A complete JSX element or fragment, scanned as one opaque token.
    JsxElement,

    // Names
    Identifier,
    PrivateIdentifier,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AssertsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    DeclareKeyword,
    GetKeyword,
    GlobalKeyword,
    ImplementsKeyword,
    InferKeyword,
    InterfaceKeyword,
    IsKeyword,
    KeyOfKeyword,
    LetKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    OfKeyword,
    OverrideKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    RequireKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StaticKeyword,
    TypeKeyword,
    UniqueKeyword,
    UsingKeyword,
    YieldKeyword,
}

static TEXT_TO_KEYWORD: Lazy<FxHashMap<&'static str, SyntaxKind>> = Lazy::new(|| {
    use SyntaxKind::*;
    [
        ("break", BreakKeyword),
        ("case", CaseKeyword),
        ("catch", CatchKeyword),
        ("class", ClassKeyword),
        ("const", ConstKeyword),
        ("continue", ContinueKeyword),
        ("debugger", DebuggerKeyword),
        ("default", DefaultKeyword),
        ("delete", DeleteKeyword),
        ("do", DoKeyword),
        ("else", ElseKeyword),
        ("enum", EnumKeyword),
        ("export", ExportKeyword),
        ("extends", ExtendsKeyword),
        ("false", FalseKeyword),
        ("finally", FinallyKeyword),
        ("for", ForKeyword),
        ("function", FunctionKeyword),
        ("if", IfKeyword),
        ("import", ImportKeyword),
        ("in", InKeyword),
        ("instanceof", InstanceOfKeyword),
        ("new", NewKeyword),
        ("null", NullKeyword),
        ("return", ReturnKeyword),
        ("super", SuperKeyword),
        ("switch", SwitchKeyword),
        ("this", ThisKeyword),
        ("throw", ThrowKeyword),
        ("true", TrueKeyword),
        ("try", TryKeyword),
        ("typeof", TypeOfKeyword),
        ("var", VarKeyword),
        ("void", VoidKeyword),
        ("while", WhileKeyword),
        ("with", WithKeyword),
        ("abstract", AbstractKeyword),
        ("accessor", AccessorKeyword),
        ("as", AsKeyword),
        ("asserts", AssertsKeyword),
        ("async", AsyncKeyword),
        ("await", AwaitKeyword),
        ("declare", DeclareKeyword),
        ("get", GetKeyword),
        ("global", GlobalKeyword),
        ("implements", ImplementsKeyword),
        ("infer", InferKeyword),
        ("interface", InterfaceKeyword),
        ("is", IsKeyword),
        ("keyof", KeyOfKeyword),
        ("let", LetKeyword),
        ("module", ModuleKeyword),
        ("namespace", NamespaceKeyword),
        ("of", OfKeyword),
        ("override", OverrideKeyword),
        ("package", PackageKeyword),
        ("private", PrivateKeyword),
        ("protected", ProtectedKeyword),
        ("public", PublicKeyword),
        ("readonly", ReadonlyKeyword),
        ("require", RequireKeyword),
        ("satisfies", SatisfiesKeyword),
        ("set", SetKeyword),
        ("static", StaticKeyword),
        ("type", TypeKeyword),
        ("unique", UniqueKeyword),
        ("using", UsingKeyword),
        ("yield", YieldKeyword),
    ]
    .into_iter()
    .collect()
});

pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    TEXT_TO_KEYWORD.get(text).copied()
}

pub fn is_keyword(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::BreakKeyword as u16)
}

/// Reserved words can never be used as identifiers in expressions.
pub fn is_reserved_word(kind: SyntaxKind) -> bool {
    let value = kind as u16;
    value >= SyntaxKind::BreakKeyword as u16 && value <= SyntaxKind::WithKeyword as u16
}

pub fn is_contextual_keyword(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::AbstractKeyword as u16)
}

/// Identifier, or a contextual keyword used as one.
pub fn is_identifier_like(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || is_contextual_keyword(kind)
}

/// Anything usable as a property name after `.` or in a member list.
pub fn is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || kind == SyntaxKind::PrivateIdentifier || is_keyword(kind)
}

pub fn is_assignment_operator(kind: SyntaxKind) -> bool {
    let value = kind as u16;
    value >= SyntaxKind::EqualsToken as u16
        && value <= SyntaxKind::QuestionQuestionEqualsToken as u16
}

pub fn is_template_continuation(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail)
}

/// Binary operator precedence, higher binds tighter. `None` for tokens that
/// are not binary operators.
pub fn binary_operator_precedence(kind: SyntaxKind) -> Option<u8> {
    use SyntaxKind::*;
    let precedence = match kind {
        QuestionQuestionToken => 1,
        BarBarToken => 2,
        AmpersandAmpersandToken => 3,
        BarToken => 4,
        CaretToken => 5,
        AmpersandToken => 6,
        EqualsEqualsToken
        | ExclamationEqualsToken
        | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => 7,
        LessThanToken
        | GreaterThanToken
        | LessThanEqualsToken
        | GreaterThanEqualsToken
        | InstanceOfKeyword
        | InKeyword => 8,
        LessThanLessThanToken
        | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 9,
        PlusToken | MinusToken => 10,
        AsteriskToken | SlashToken | PercentToken => 11,
        AsteriskAsteriskToken => 12,
        _ => return None,
    };
    Some(precedence)
}

/// Tokens after which a `/` starts a division rather than a regular
/// expression, and a `<` cannot start a JSX element.
pub fn can_end_expression(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    match kind {
        Identifier
        | PrivateIdentifier
        | NumericLiteral
        | BigIntLiteral
        | StringLiteral
        | RegularExpressionLiteral
        | NoSubstitutionTemplateLiteral
        | TemplateTail
        | JsxElement
        | CloseParenToken
        | CloseBracketToken
        | CloseBraceToken
        | PlusPlusToken
        | MinusMinusToken
        | ThisKeyword
        | SuperKeyword
        | TrueKeyword
        | FalseKeyword
        | NullKeyword => true,
        AwaitKeyword | YieldKeyword | OfKeyword => false,
        _ => is_contextual_keyword(kind),
    }
}
