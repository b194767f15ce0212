//! tsconfig loading.
//!
//! Only the fields that decide which files belong to a project are read.
//! Relative `files`, `include`, `exclude` and `outDir` entries are made
//! absolute against the directory of the config that declares them, so they
//! keep their meaning after an `extends` chain is merged.

use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::target::normalize_path;

fn deserialize_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    /// Base configs, applied in order before this one.
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub extends: Vec<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub out_dir: Option<String>,
}

impl TsConfig {
    pub fn out_dir(&self) -> Option<&str> {
        self.compiler_options.as_ref()?.out_dir.as_deref()
    }
}

/// Parse tsconfig text. Comments and trailing commas are accepted.
pub fn parse_tsconfig(source: &str) -> Result<TsConfig> {
    serde_json::from_str(&jsonc_to_json(source)).context("tsconfig is not valid JSON")
}

/// Load `path` and everything it extends.
pub fn load_tsconfig(path: &Path) -> Result<TsConfig> {
    let mut visited = FxHashSet::default();
    load_tsconfig_inner(path, &mut visited)
}

fn load_tsconfig_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<TsConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("tsconfig extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tsconfig: {}", path.display()))?;
    let mut config = parse_tsconfig(&source)
        .with_context(|| format!("failed to parse tsconfig: {}", path.display()))?;
    let dir = config_dir(path)?;
    absolutize(&mut config, &dir);

    let mut merged = TsConfig::default();
    for extends in std::mem::take(&mut config.extends) {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_tsconfig_inner(&base_path, visited)?;
        merged = merge_configs(merged, base);
    }
    let merged = merge_configs(merged, config);

    visited.remove(&canonical);
    Ok(merged)
}

fn config_dir(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("tsconfig has no parent directory: {}", path.display()))?;
    Ok(normalize_path(parent))
}

fn absolutize(config: &mut TsConfig, dir: &Path) {
    let join = |entry: &mut String| {
        *entry = normalize_path(&dir.join(entry.as_str()))
            .to_string_lossy()
            .into_owned();
    };
    for list in [&mut config.files, &mut config.include, &mut config.exclude] {
        list.iter_mut().flatten().for_each(join);
    }
    if let Some(out_dir) = config
        .compiler_options
        .as_mut()
        .and_then(|options| options.out_dir.as_mut())
    {
        join(out_dir);
    }
}

/// Relative paths resolve against the extending config. Bare names are
/// looked up in `node_modules` of it and its ancestors.
fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = config_dir(current_path)?;
    let candidate = Path::new(extends);
    if candidate.is_absolute() || extends.starts_with('.') {
        return Ok(with_json_extension(base_dir.join(candidate)));
    }

    for dir in base_dir.ancestors() {
        let package = dir.join("node_modules").join(candidate);
        if package.is_dir() {
            return Ok(package.join("tsconfig.json"));
        }
        let file = with_json_extension(package);
        if file.is_file() {
            return Ok(file);
        }
    }
    bail!(
        "cannot find base tsconfig '{extends}' extended by {}",
        current_path.display()
    )
}

fn with_json_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("json");
    }
    path
}

fn merge_configs(base: TsConfig, child: TsConfig) -> TsConfig {
    let compiler_options = match (base.compiler_options, child.compiler_options) {
        (Some(base_options), Some(child_options)) => Some(CompilerOptions {
            out_dir: child_options.out_dir.or(base_options.out_dir),
        }),
        (base_options, child_options) => child_options.or(base_options),
    };

    TsConfig {
        extends: Vec::new(),
        compiler_options,
        files: child.files.or(base.files),
        include: child.include.or(base.include),
        exclude: child.exclude.or(base.exclude),
    }
}

/// Rewrite JSONC as strict JSON in one pass: comments are dropped (their
/// newlines kept, so serde positions stay on the right line) and a comma
/// directly before `}` or `]` is discarded.
fn jsonc_to_json(input: &str) -> String {
    let mut json = String::with_capacity(input.len());
    let mut held_comma = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut star = false;
                for next in chars.by_ref() {
                    if star && next == '/' {
                        break;
                    }
                    star = next == '*';
                    if next == '\n' {
                        json.push('\n');
                    }
                }
            }
            ',' => {
                if held_comma {
                    json.push(',');
                }
                held_comma = true;
            }
            c if c.is_whitespace() => json.push(c),
            _ => {
                if std::mem::take(&mut held_comma) && !matches!(ch, '}' | ']') {
                    json.push(',');
                }
                json.push(ch);
                if ch == '"' {
                    copy_string_tail(&mut chars, &mut json);
                }
            }
        }
    }
    if held_comma {
        json.push(',');
    }
    json
}

/// Copy the rest of a string literal whose opening quote was already copied.
fn copy_string_tail(chars: &mut impl Iterator<Item = char>, json: &mut String) {
    let mut escaped = false;
    for c in chars {
        json.push(c);
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return,
            _ => {}
        }
    }
}
