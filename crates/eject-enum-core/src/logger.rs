//! Progress reporting seam.
//!
//! The engine reports user-facing lines through `ProgressLogger`; diagnostic
//! events go through `tracing` instead.

pub trait ProgressLogger {
    /// Called once before the first file with the number of files to process.
    fn start(&mut self, file_count: usize);
    /// Called exactly once per processed file, whatever its outcome.
    fn finish_file(&mut self);
    /// One line of output: a skipped declaration or a per-file summary.
    fn log(&mut self, line: &str);
    /// Called once after the last file.
    fn finish(&mut self);
}

/// Logger that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentLogger;

impl ProgressLogger for SilentLogger {
    fn start(&mut self, _file_count: usize) {}

    fn finish_file(&mut self) {}

    fn log(&mut self, _line: &str) {}

    fn finish(&mut self) {}
}
