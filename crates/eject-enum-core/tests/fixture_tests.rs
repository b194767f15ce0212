//! Input/output pairs under `tests/cases`.
//!
//! Each case holds `input.ts` and the expected `output.ts`. A case whose
//! output equals its input must come back unchanged (`text: None`).

use std::fs;
use std::path::{Path, PathBuf};

use eject_enum_core::{EjectOptions, SilentLogger, eject_enums_from_source};

fn case_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cases")
        .join(name)
}

fn check_with(name: &str, options: &EjectOptions, expected_file: &str) {
    let dir = case_dir(name);
    let input = fs::read_to_string(dir.join("input.ts")).unwrap();
    let expected = fs::read_to_string(dir.join(expected_file)).unwrap();

    let outcome = eject_enums_from_source("input.ts", &input, options, &mut SilentLogger)
        .unwrap_or_else(|err| panic!("{name}: {err}"));
    if expected == input {
        assert_eq!(outcome.text, None, "{name}: expected no change");
        return;
    }
    let actual = outcome
        .text
        .unwrap_or_else(|| panic!("{name}: expected a rewrite"));
    assert_eq!(actual, expected, "{name}: output differs from {expected_file}");
}

fn check(name: &str) {
    check_with(name, &EjectOptions::default(), "output.ts");
}

#[test]
fn number_simple() {
    check("number_simple");
}

#[test]
fn number_omit_initializer() {
    check("number_omit_initializer");
}

#[test]
fn number_skipping_initializer() {
    check("number_skipping_initializer");
}

#[test]
fn string_simple() {
    check("string_simple");
}

#[test]
fn unexported() {
    check("unexported");
}

#[test]
fn comments() {
    check("comments");
}

#[test]
fn const_expr() {
    check("const_expr");
}

#[test]
fn const_expr_without_annotations() {
    let options = EjectOptions {
        preserve_expr: false,
        ..EjectOptions::default()
    };
    check_with("const_expr", &options, "output_no_preserve_expr.ts");
}

#[test]
fn cross_enum_references() {
    check("cross_enum_references");
}

#[test]
fn mixed_values() {
    check("mixed_values");
}

#[test]
fn enum_member_as_type() {
    check("enum_member_as_type");
}

#[test]
fn member_types_in_scopes() {
    check("member_types_in_scopes");
}

#[test]
fn nested_in_functions() {
    check("nested_in_functions");
}

#[test]
fn nested_in_namespaces() {
    check("nested_in_namespaces");
}

#[test]
fn nested_in_blocks() {
    check("nested_in_blocks");
}

#[test]
fn untouched() {
    check("untouched");
}

#[test]
fn every_case_directory_is_checked() {
    let mut names: Vec<String> = fs::read_dir(case_dir(""))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "comments",
            "const_expr",
            "cross_enum_references",
            "enum_member_as_type",
            "member_types_in_scopes",
            "mixed_values",
            "nested_in_blocks",
            "nested_in_functions",
            "nested_in_namespaces",
            "number_omit_initializer",
            "number_simple",
            "number_skipping_initializer",
            "string_simple",
            "unexported",
            "untouched",
        ]
    );
}
