//! Which files a run processes.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::args::CliArgs;
use crate::config::load_tsconfig;

/// Extensions of files the engine accepts. `.d.ts` and friends are included
/// and treated as ambient.
const SOURCE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "mts", "cts"];

/// Directory names never entered while expanding directories and globs.
const SKIPPED_DIRECTORIES: [&str; 3] = ["node_modules", "bower_components", "jspm_packages"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EjectTarget {
    /// tsconfig files, or directories holding a `tsconfig.json`.
    Projects(Vec<PathBuf>),
    /// Files, directories or globs to process, minus the excluded ones.
    Paths {
        include: Vec<String>,
        exclude: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoTargetSpecified;

impl fmt::Display for NoTargetSpecified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("No targets are specified")
    }
}

impl std::error::Error for NoTargetSpecified {}

/// Decide the target from the command line.
///
/// Positional `.json` arguments are tsconfigs. When any project is given,
/// include and exclude paths are ignored.
pub fn target_from_args(args: &CliArgs) -> Result<EjectTarget, NoTargetSpecified> {
    let (jsons, others): (Vec<&String>, Vec<&String>) = args
        .targets
        .iter()
        .partition(|target| Path::new(target.as_str()).extension().is_some_and(|ext| ext == "json"));

    let mut projects = args.project.clone();
    projects.extend(jsons.into_iter().map(PathBuf::from));
    if !projects.is_empty() {
        return Ok(EjectTarget::Projects(projects));
    }

    let mut include = args.include.clone();
    include.extend(others.into_iter().cloned());
    if include.is_empty() {
        return Err(NoTargetSpecified);
    }
    Ok(EjectTarget::Paths {
        include,
        exclude: args.exclude.clone(),
    })
}

/// The sorted, deduplicated source files of `target`. Relative paths resolve
/// against `cwd`.
pub fn resolve_target_files(target: &EjectTarget, cwd: &Path) -> Result<Vec<PathBuf>> {
    let cwd = normalize_path(cwd);
    let mut files = BTreeSet::new();
    match target {
        EjectTarget::Projects(projects) => {
            for project in projects {
                files.extend(project_files(&cwd.join(project))?);
            }
        }
        EjectTarget::Paths { include, exclude } => {
            let absolute = |entries: &[String]| -> Vec<String> {
                entries
                    .iter()
                    .map(|entry| {
                        normalize_path(&cwd.join(entry))
                            .to_string_lossy()
                            .into_owned()
                    })
                    .collect()
            };
            files.extend(collect_matching(&absolute(include), &absolute(exclude))?);
        }
    }
    debug!(files = files.len(), "resolved target files");
    Ok(files.into_iter().collect())
}

/// Files of one tsconfig project: its `files` plus whatever `include`
/// matches and `exclude` does not.
fn project_files(project: &Path) -> Result<BTreeSet<PathBuf>> {
    let tsconfig = if project.is_dir() {
        project.join("tsconfig.json")
    } else {
        project.to_path_buf()
    };
    let config = load_tsconfig(&tsconfig)?;
    let base_dir = normalize_path(tsconfig.parent().unwrap_or(Path::new(".")));

    let mut files = BTreeSet::new();
    for file in config.files.iter().flatten() {
        let path = PathBuf::from(file);
        if path.is_file() && is_source_file(&path) {
            files.insert(path);
        }
    }

    let include = match (&config.include, &config.files) {
        (Some(include), _) => include.clone(),
        (None, Some(_)) => Vec::new(),
        (None, None) => vec![base_dir.join("**/*").to_string_lossy().into_owned()],
    };
    let exclude = match &config.exclude {
        Some(exclude) => exclude.clone(),
        None => SKIPPED_DIRECTORIES
            .iter()
            .map(|name| base_dir.join(name).to_string_lossy().into_owned())
            .chain(config.out_dir().map(str::to_string))
            .collect(),
    };
    files.extend(
        collect_matching(&include, &exclude)
            .with_context(|| format!("failed to list files of {}", tsconfig.display()))?,
    );
    Ok(files)
}

/// Expand absolute include entries into source files. An entry is an
/// existing file, a directory (walked), or a glob (walked from its literal
/// prefix).
fn collect_matching(include: &[String], exclude: &[String]) -> Result<BTreeSet<PathBuf>> {
    let excluded = build_exclude_set(exclude)?;
    let mut files = BTreeSet::new();
    for entry in include {
        let path = Path::new(entry);
        if path.is_file() {
            if is_source_file(path) && !excluded.is_match(path) {
                files.insert(path.to_path_buf());
            }
        } else if path.is_dir() {
            walk_sources(path, None, &excluded, &mut files);
        } else if has_glob_meta(entry) {
            let glob = GlobBuilder::new(entry)
                .literal_separator(true)
                .build()
                .with_context(|| format!("invalid include pattern: {entry}"))?
                .compile_matcher();
            walk_sources(&literal_prefix(path), Some(&glob), &excluded, &mut files);
        } else {
            debug!(path = %entry, "include path does not exist");
        }
    }
    Ok(files)
}

fn walk_sources(
    root: &Path,
    glob: Option<&GlobMatcher>,
    excluded: &GlobSet,
    files: &mut BTreeSet<PathBuf>,
) {
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name))
    });
    for entry in walker.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_source_file(path) || excluded.is_match(path) {
            continue;
        }
        if glob.is_none_or(|glob| glob.is_match(path)) {
            files.insert(path.to_path_buf());
        }
    }
}

/// Excludes naming a path without wildcards also cover everything below it.
fn build_exclude_set(exclude: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for entry in exclude {
        let mut patterns = vec![entry.clone()];
        if !has_glob_meta(entry) {
            patterns.push(format!("{}/**", entry.trim_end_matches('/')));
        }
        for pattern in patterns {
            let glob = GlobBuilder::new(&pattern)
                .literal_separator(true)
                .build()
                .with_context(|| format!("invalid exclude pattern: {entry}"))?;
            builder.add(glob);
        }
    }
    Ok(builder.build()?)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// The leading components of a glob that contain no wildcard.
fn literal_prefix(pattern: &Path) -> PathBuf {
    pattern
        .components()
        .take_while(|component| !has_glob_meta(&component.as_os_str().to_string_lossy()))
        .collect()
}

/// Remove `.` components and fold `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
