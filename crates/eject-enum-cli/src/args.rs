use clap::{ArgAction, Parser};
use eject_enum_core::{EjectOptions, IndentStyle};
use std::path::PathBuf;

/// CLI arguments for the eject-enum binary.
#[derive(Parser, Debug)]
#[command(
    name = "eject-enum",
    version,
    about = "Rewrite TypeScript enums into const objects and type aliases",
    override_usage = "eject-enum [--project path/to/tsconfig.json] [--include path/to/include [--exclude path/to/exclude]]"
)]
pub struct CliArgs {
    /// tsconfig files (`*.json`) or paths to include.
    #[arg(value_name = "TARGETS")]
    pub targets: Vec<String>,

    /// Paths to TS config files.
    #[arg(short = 'p', long = "project", value_name = "PATH")]
    pub project: Vec<PathBuf>,

    /// Paths to include in the conversion target. Files, directories and
    /// globs are accepted.
    #[arg(short = 'i', long = "include", value_name = "PATH")]
    pub include: Vec<String>,

    /// Paths to exclude from the conversion target. Files listed by a
    /// tsconfig given with --project can't be excluded this way.
    #[arg(short = 'e', long = "exclude", value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Suppress outputs.
    #[arg(long)]
    pub silent: bool,

    /// Preserve the expression of each member's initializer as a trailing
    /// comment.
    #[arg(
        long = "preserve-expr",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub preserve_expr: bool,

    /// Indent width in spaces. Detected from each file when omitted.
    #[arg(long = "indent-size", value_name = "N", value_parser = clap::value_parser!(u8).range(1..=8))]
    pub indent_size: Option<u8>,

    /// Report what would change without writing. Exits with 2 when any file
    /// would change.
    #[arg(long)]
    pub check: bool,
}

impl CliArgs {
    pub fn eject_options(&self) -> EjectOptions {
        EjectOptions {
            preserve_expr: self.preserve_expr,
            indent: self.indent_size.map(IndentStyle::Spaces),
        }
    }
}
