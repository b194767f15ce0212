//! Reading sources and writing results back.

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Outcome of reading one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReadResult {
    Text(String),
    /// UTF-16, invalid UTF-8, or content that looks like a binary blob.
    Binary,
    /// The file could not be read.
    Error(String),
}

pub fn read_source_file(path: &Path) -> FileReadResult {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => return FileReadResult::Error(err.to_string()),
    };
    if bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]) {
        return FileReadResult::Binary;
    }
    if is_binary_file(&bytes) {
        return FileReadResult::Binary;
    }
    match String::from_utf8(bytes) {
        Ok(text) => FileReadResult::Text(text),
        Err(_) => FileReadResult::Binary,
    }
}

/// Read `path` as UTF-8 source text. A leading BOM is kept in the result.
pub fn read_text(path: &Path) -> Result<String> {
    match read_source_file(path) {
        FileReadResult::Text(text) => Ok(text),
        FileReadResult::Binary => bail!("{} is not a UTF-8 text file", path.display()),
        FileReadResult::Error(message) => {
            bail!("failed to read {}: {message}", path.display())
        }
    }
}

/// Heuristics for content no TypeScript source would contain: runs of NUL
/// bytes and control characters other than whitespace.
pub(crate) fn is_binary_file(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    if head.iter().filter(|&&byte| byte == 0).count() > 10 {
        return true;
    }

    let mut consecutive_nulls = 0;
    for &byte in head.iter().take(512) {
        if byte == 0 {
            consecutive_nulls += 1;
            if consecutive_nulls >= 4 {
                return true;
            }
        } else {
            consecutive_nulls = 0;
        }
    }

    head.iter()
        .filter(|&&byte| byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r' | 0x0B | 0x0C))
        .count()
        >= 4
}

/// Replace `path` with `contents` through a temporary file in the same
/// directory, keeping the original permissions.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("failed to copy permissions of {}", path.display()))?;
    }
    temp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
