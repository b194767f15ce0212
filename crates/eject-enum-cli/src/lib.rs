//! Command-line driver for the enum ejection engine.
//!
//! Resolves the files to process from tsconfig projects or include/exclude
//! paths, runs the engine over each, and writes changed files back once
//! every file has been processed.

pub mod args;
pub mod config;
pub mod fs;
pub mod reporter;
pub mod run;
pub mod target;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/fs_tests.rs"]
mod fs_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
#[cfg(test)]
#[path = "tests/target_tests.rs"]
mod target_tests;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
