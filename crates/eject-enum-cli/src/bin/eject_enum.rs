#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use eject_enum_cli::args::CliArgs;
use eject_enum_cli::reporter::ConsoleLogger;
use eject_enum_cli::run::{RunMode, RunSummary, run_target};
use eject_enum_cli::target::{EjectTarget, target_from_args};
use eject_enum_core::{ProgressLogger, SilentLogger};
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;
const EXIT_CHECK_CHANGED: u8 = 2;

fn main() -> ExitCode {
    // EJECT_ENUM_LOG / RUST_LOG turn diagnostic tracing on.
    eject_enum_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let target = match target_from_args(&args) {
        Ok(target) => target,
        Err(err) => {
            eprintln!("{err}\n");
            eprintln!("{}", CliArgs::command().render_help());
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match run(&args, &target) {
        Ok(summary) if args.check && summary.changed > 0 => ExitCode::from(EXIT_CHECK_CHANGED),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &CliArgs, target: &EjectTarget) -> Result<RunSummary> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let mode = if args.check {
        RunMode::Check
    } else {
        RunMode::Write
    };
    let mut console;
    let mut silent = SilentLogger;
    let logger: &mut dyn ProgressLogger = if args.silent {
        &mut silent
    } else {
        console = ConsoleLogger::stdio();
        &mut console
    };
    run_target(target, &args.eject_options(), mode, &cwd, logger)
}
