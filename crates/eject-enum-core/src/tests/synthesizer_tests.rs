use crate::comment_carrier::reindent_comment;
use crate::synthesizer::{compact_whitespace, line_indent, quote_string};

#[test]
fn strings_are_double_quoted_and_escaped() {
    assert_eq!(quote_string("adenine"), "\"adenine\"");
    assert_eq!(quote_string("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(quote_string("a\\b"), "\"a\\\\b\"");
    assert_eq!(quote_string("line\nbreak\ttab"), "\"line\\nbreak\\ttab\"");
    assert_eq!(quote_string("\u{0}\u{1b}"), "\"\\u0000\\u001b\"");
    assert_eq!(quote_string("\u{2028}\u{2029}"), "\"\\u2028\\u2029\"");
    assert_eq!(quote_string("it's ünïcode"), "\"it's ünïcode\"");
}

#[test]
fn initializers_compact_to_one_line() {
    assert_eq!(compact_whitespace("1 + 2"), "1 + 2");
    assert_eq!(compact_whitespace("Add +\n    Sub +\n    Mul"), "Add + Sub + Mul");
    assert_eq!(compact_whitespace("(\r\n  A |\r\n\r\n  B\r\n)"), "( A | B )");
}

#[test]
fn declaration_indent_is_the_line_indent() {
    let text = "namespace N {\n    export enum E { A }\n}\n";
    let offset = text.find("export").unwrap() as u32;
    assert_eq!(line_indent(text, offset), "    ");
    assert_eq!(line_indent(text, 0), "");

    let text = "\tcase 1: enum E { A }";
    let offset = text.find("enum").unwrap() as u32;
    assert_eq!(line_indent(text, offset), "\t");
}

#[test]
fn comment_continuation_lines_are_realigned() {
    let comment = "/**\n       * Yes\n       */";
    assert_eq!(reindent_comment(comment, "  ", "\n"), "/**\n   * Yes\n   */");
    assert_eq!(reindent_comment("// one line", "    ", "\n"), "// one line");
    assert_eq!(
        reindent_comment("/* a\r\n\r\n   b */", "  ", "\r\n"),
        "/* a\r\n\r\n   b */"
    );
}
