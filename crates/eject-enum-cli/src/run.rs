//! One ejection run over a resolved target.

use anyhow::Result;
use eject_enum_core::{EjectOptions, ProgressLogger, eject_enums_from_source};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::fs::{read_text, write_atomic};
use crate::target::{EjectTarget, normalize_path, resolve_target_files};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Write,
    /// Compute every result but leave files alone.
    Check,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    /// Files whose text changed (or would change, in check mode).
    pub changed: usize,
    pub ejected: usize,
    pub skipped: usize,
}

/// Eject every file of `target`.
///
/// All files are transformed in memory before anything is written, so an
/// error in any file leaves every file untouched.
pub fn run_target(
    target: &EjectTarget,
    options: &EjectOptions,
    mode: RunMode,
    cwd: &Path,
    logger: &mut dyn ProgressLogger,
) -> Result<RunSummary> {
    let cwd = normalize_path(cwd);
    let files = resolve_target_files(target, &cwd)?;
    logger.start(files.len());

    let mut summary = RunSummary {
        files: files.len(),
        ..RunSummary::default()
    };
    let mut pending: Vec<(PathBuf, String)> = Vec::new();
    for path in files {
        let name = display_name(&path, &cwd);
        let text = match read_text(&path) {
            Ok(text) => text,
            Err(err) => {
                logger.finish_file();
                return Err(err);
            }
        };
        let outcome = eject_enums_from_source(&name, &text, options, logger)?;
        summary.ejected += outcome.ejected;
        summary.skipped += outcome.skipped;
        if let Some(output) = outcome.text {
            pending.push((path, output));
        }
    }
    summary.changed = pending.len();

    match mode {
        RunMode::Write => {
            for (path, output) in &pending {
                write_atomic(path, output)?;
                debug!(path = %path.display(), "wrote file");
            }
        }
        RunMode::Check => {
            debug!(changed = pending.len(), "check mode, nothing written");
        }
    }

    logger.finish();
    info!(
        files = summary.files,
        changed = summary.changed,
        ejected = summary.ejected,
        skipped = summary.skipped,
        "run finished"
    );
    Ok(summary)
}

/// The path as shown in log lines: relative to `cwd` when inside it.
fn display_name(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
