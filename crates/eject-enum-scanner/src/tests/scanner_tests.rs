use crate::scanner::{LanguageVariant, ScannerState, Token};
use crate::syntax_kind::SyntaxKind;

fn scan(source: &str) -> (Vec<Token>, usize) {
    let mut scanner = ScannerState::new(source, LanguageVariant::Standard);
    let tokens = scanner.scan_all();
    let errors = scanner.get_scanner_diagnostics().len();
    (tokens, errors)
}

fn kinds(source: &str) -> Vec<SyntaxKind> {
    scan(source).0.into_iter().map(|t| t.kind).collect()
}

#[test]
fn scans_enum_declaration_tokens() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("export const enum E { A = 1 << 2, B }"),
        vec![
            ExportKeyword,
            ConstKeyword,
            EnumKeyword,
            Identifier,
            OpenBraceToken,
            Identifier,
            EqualsToken,
            NumericLiteral,
            LessThanLessThanToken,
            NumericLiteral,
            CommaToken,
            Identifier,
            CloseBraceToken,
            EndOfFileToken,
        ]
    );
}

#[test]
fn token_positions_include_leading_trivia() {
    let source = "a /* c */\n  b";
    let (tokens, _) = scan(source);
    assert_eq!((tokens[1].pos, tokens[1].start, tokens[1].end), (1, 12, 13));
    assert!(tokens[1].has_preceding_line_break());
    assert!(!tokens[0].has_preceding_line_break());
    assert_eq!(tokens[1].text(source), "b");
}

#[test]
fn multi_line_comment_sets_line_break_flag() {
    let (tokens, _) = scan("a /* x\n y */ b");
    assert!(tokens[1].has_preceding_line_break());
}

#[test]
fn longest_match_for_shift_operators() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("a >>> b >> c >>>= d"),
        vec![
            Identifier,
            GreaterThanGreaterThanGreaterThanToken,
            Identifier,
            GreaterThanGreaterThanToken,
            Identifier,
            GreaterThanGreaterThanGreaterThanEqualsToken,
            Identifier,
            EndOfFileToken,
        ]
    );
}

#[test]
fn slash_after_operand_is_division() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("x = a / b / c"),
        vec![
            Identifier,
            EqualsToken,
            Identifier,
            SlashToken,
            Identifier,
            SlashToken,
            Identifier,
            EndOfFileToken,
        ]
    );
}

#[test]
fn slash_in_expression_position_is_regex() {
    let (tokens, errors) = scan("const re = /[/}]+/g;");
    assert_eq!(errors, 0);
    assert_eq!(tokens[3].kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(tokens[4].kind, SyntaxKind::SemicolonToken);
}

#[test]
fn template_with_nested_braces() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("`a${ {b: 1}.b }c${d}e`"),
        vec![
            TemplateHead,
            OpenBraceToken,
            Identifier,
            ColonToken,
            NumericLiteral,
            CloseBraceToken,
            DotToken,
            Identifier,
            TemplateMiddle,
            Identifier,
            TemplateTail,
            EndOfFileToken,
        ]
    );
}

#[test]
fn braces_inside_strings_do_not_count() {
    let (tokens, errors) = scan("f('{', \"}\")");
    assert_eq!(errors, 0);
    assert_eq!(tokens.len(), 7);
}

#[test]
fn unterminated_string_is_reported() {
    let (_, errors) = scan("const s = 'abc\nnext;");
    assert_eq!(errors, 1);
}

#[test]
fn unterminated_template_is_reported() {
    let (_, errors) = scan("const s = `abc");
    assert_eq!(errors, 1);
}

#[test]
fn unterminated_block_comment_is_reported() {
    let (tokens, errors) = scan("a /* never closed");
    assert_eq!(errors, 1);
    assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::EndOfFileToken));
}

#[test]
fn contextual_keywords_are_distinct_kinds() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("declare namespace N {}"),
        vec![
            DeclareKeyword,
            NamespaceKeyword,
            Identifier,
            OpenBraceToken,
            CloseBraceToken,
            EndOfFileToken,
        ]
    );
}

#[test]
fn numeric_forms_scan_as_single_tokens() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("0xFF 1_000 1.5e-3 .5 10n"),
        vec![
            NumericLiteral,
            NumericLiteral,
            NumericLiteral,
            NumericLiteral,
            BigIntLiteral,
            EndOfFileToken,
        ]
    );
}

#[test]
fn optional_chaining_is_not_confused_with_conditional() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("a?.b ? .5 : c"),
        vec![
            Identifier,
            QuestionDotToken,
            Identifier,
            QuestionToken,
            NumericLiteral,
            ColonToken,
            Identifier,
            EndOfFileToken,
        ]
    );
}

#[test]
fn jsx_element_is_one_token_in_tsx() {
    let source = "const el = <div className=\"a\">{items.map(i => <li key={i}>it's {i}</li>)}</div>;";
    let mut scanner = ScannerState::new(source, LanguageVariant::Jsx);
    let tokens = scanner.scan_all();
    assert!(scanner.get_scanner_diagnostics().is_empty());
    let kinds: Vec<SyntaxKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::JsxElement,
            SyntaxKind::SemicolonToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn generic_arrow_in_tsx_is_not_jsx() {
    let mut scanner = ScannerState::new("const f = <T,>(x: T) => x;", LanguageVariant::Jsx);
    let tokens = scanner.scan_all();
    assert_eq!(tokens[3].kind, SyntaxKind::LessThanToken);
}

#[test]
fn less_than_is_comparison_outside_jsx_files() {
    let tokens = scan("a < b").0;
    assert_eq!(tokens[1].kind, SyntaxKind::LessThanToken);
}

#[test]
fn private_identifier_scans_with_hash() {
    let source = "this.#count";
    let tokens = scan(source).0;
    assert_eq!(tokens[2].kind, SyntaxKind::PrivateIdentifier);
    assert_eq!(tokens[2].text(source), "#count");
}
