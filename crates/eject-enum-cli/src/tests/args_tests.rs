use crate::args::CliArgs;
use clap::Parser;
use eject_enum_core::IndentStyle;
use std::path::PathBuf;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("eject-enum").chain(args.iter().copied())).unwrap()
}

#[test]
fn collects_repeated_flags_and_positionals() {
    let args = parse(&[
        "-p",
        "a/tsconfig.json",
        "--project",
        "b",
        "-i",
        "src",
        "--include",
        "lib/**/*.ts",
        "-e",
        "src/gen",
        "extra.ts",
    ]);
    assert_eq!(
        args.project,
        vec![PathBuf::from("a/tsconfig.json"), PathBuf::from("b")]
    );
    assert_eq!(args.include, vec!["src", "lib/**/*.ts"]);
    assert_eq!(args.exclude, vec!["src/gen"]);
    assert_eq!(args.targets, vec!["extra.ts"]);
    assert!(!args.silent);
    assert!(!args.check);
}

#[test]
fn preserve_expr_defaults_to_true() {
    assert!(parse(&["src"]).preserve_expr);
    assert!(parse(&["src", "--preserve-expr"]).preserve_expr);
    assert!(parse(&["src", "--preserve-expr=true"]).preserve_expr);
    assert!(!parse(&["src", "--preserve-expr=false"]).preserve_expr);
    assert!(!parse(&["--preserve-expr", "false", "src"]).preserve_expr);
}

#[test]
fn preserve_expr_rejects_non_booleans() {
    assert!(CliArgs::try_parse_from(["eject-enum", "--preserve-expr=maybe", "src"]).is_err());
}

#[test]
fn indent_size_is_range_checked() {
    assert_eq!(parse(&["src"]).indent_size, None);
    assert_eq!(parse(&["--indent-size", "4", "src"]).indent_size, Some(4));
    assert!(CliArgs::try_parse_from(["eject-enum", "--indent-size", "0", "src"]).is_err());
    assert!(CliArgs::try_parse_from(["eject-enum", "--indent-size", "9", "src"]).is_err());
}

#[test]
fn eject_options_follow_flags() {
    let options = parse(&["--preserve-expr=false", "--indent-size", "4", "src"]).eject_options();
    assert!(!options.preserve_expr);
    assert_eq!(options.indent, Some(IndentStyle::Spaces(4)));

    let options = parse(&["src"]).eject_options();
    assert!(options.preserve_expr);
    assert_eq!(options.indent, None);
}

#[test]
fn no_arguments_still_parse() {
    let args = parse(&[]);
    assert!(args.targets.is_empty());
    assert!(args.project.is_empty());
    assert!(args.include.is_empty());
}

#[test]
fn command_definition_is_consistent() {
    use clap::CommandFactory;
    CliArgs::command().debug_assert();
}
