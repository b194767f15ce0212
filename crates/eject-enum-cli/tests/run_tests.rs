use eject_enum_cli::run::{RunMode, RunSummary, run_target};
use eject_enum_cli::target::EjectTarget;
use eject_enum_core::{EjectOptions, ProgressLogger, SilentLogger};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct RecordingLogger {
    events: Vec<String>,
}

impl ProgressLogger for RecordingLogger {
    fn start(&mut self, file_count: usize) {
        self.events.push(format!("start {file_count}"));
    }

    fn finish_file(&mut self) {
        self.events.push("file".to_string());
    }

    fn log(&mut self, line: &str) {
        self.events.push(line.to_string());
    }

    fn finish(&mut self) {
        self.events.push("finish".to_string());
    }
}

const GENDER: &str = "export enum Gender {\n  Male = 1,\n  Female,\n}\n";
const GENDER_EJECTED: &str = "export const Gender = {\n  Male: 1,\n  Female: 2,\n} as const;\n\nexport type Gender = (typeof Gender)[keyof typeof Gender];\n";
const DYNAMIC: &str = "enum Dynamic {\n  Now = Date.now(),\n}\n";
const PLAIN: &str = "export const answer = 42;\n";

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/gender.ts"), GENDER).unwrap();
    fs::write(dir.path().join("src/dynamic.ts"), DYNAMIC).unwrap();
    fs::write(dir.path().join("src/plain.ts"), PLAIN).unwrap();
    dir
}

fn include(paths: &[&str]) -> EjectTarget {
    EjectTarget::Paths {
        include: paths.iter().map(|path| path.to_string()).collect(),
        exclude: Vec::new(),
    }
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn write_mode_rewrites_changed_files_only() {
    let dir = project();
    let mut logger = RecordingLogger::default();
    let summary = run_target(
        &include(&["src"]),
        &EjectOptions::default(),
        RunMode::Write,
        dir.path(),
        &mut logger,
    )
    .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            files: 3,
            changed: 1,
            ejected: 1,
            skipped: 1,
        }
    );
    assert_eq!(read(dir.path(), "src/gender.ts"), GENDER_EJECTED);
    assert_eq!(read(dir.path(), "src/dynamic.ts"), DYNAMIC);
    assert_eq!(read(dir.path(), "src/plain.ts"), PLAIN);
    assert_eq!(
        logger.events,
        vec![
            "start 3",
            "src/dynamic.ts > Dynamic: it has a member whose value can't be known at compile-time. skipped.",
            "file",
            "src/gender.ts: ejected 1 enum.",
            "file",
            "file",
            "finish",
        ]
    );
}

#[test]
fn check_mode_leaves_files_alone() {
    let dir = project();
    let summary = run_target(
        &include(&["src/*.ts"]),
        &EjectOptions::default(),
        RunMode::Check,
        dir.path(),
        &mut SilentLogger,
    )
    .unwrap();

    assert_eq!(summary.changed, 1);
    assert_eq!(read(dir.path(), "src/gender.ts"), GENDER);
}

#[test]
fn second_run_changes_nothing() {
    let dir = project();
    let target = include(&["src"]);
    let options = EjectOptions::default();
    run_target(&target, &options, RunMode::Write, dir.path(), &mut SilentLogger).unwrap();
    let summary =
        run_target(&target, &options, RunMode::Write, dir.path(), &mut SilentLogger).unwrap();

    assert_eq!(summary.changed, 0);
    assert_eq!(summary.ejected, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(read(dir.path(), "src/gender.ts"), GENDER_EJECTED);
}

#[test]
fn syntax_error_aborts_before_any_write() {
    let dir = project();
    fs::write(dir.path().join("src/zz_broken.ts"), "enum Broken {\n  A B\n}\n").unwrap();

    let err = run_target(
        &include(&["src"]),
        &EjectOptions::default(),
        RunMode::Write,
        dir.path(),
        &mut SilentLogger,
    )
    .unwrap_err();

    assert!(
        err.to_string()
            .starts_with("failed to parse src/zz_broken.ts\n  src/zz_broken.ts:2:5 - error TS1005")
    );
    assert_eq!(read(dir.path(), "src/gender.ts"), GENDER);
}

#[test]
fn binary_file_aborts_the_run() {
    let dir = project();
    fs::write(dir.path().join("src/blob.ts"), [0u8; 16]).unwrap();

    let err = run_target(
        &include(&["src"]),
        &EjectOptions::default(),
        RunMode::Write,
        dir.path(),
        &mut SilentLogger,
    )
    .unwrap_err();

    assert!(err.to_string().contains("is not a UTF-8 text file"));
    assert_eq!(read(dir.path(), "src/gender.ts"), GENDER);
}

#[test]
fn project_target_uses_tsconfig_files() {
    let dir = project();
    fs::write(
        dir.path().join("tsconfig.json"),
        r#"{ "include": ["src"], "exclude": ["src/dynamic.ts"] }"#,
    )
    .unwrap();

    let mut logger = RecordingLogger::default();
    let summary = run_target(
        &EjectTarget::Projects(vec![PathBuf::from("tsconfig.json")]),
        &EjectOptions::default(),
        RunMode::Write,
        dir.path(),
        &mut logger,
    )
    .unwrap();

    assert_eq!(summary.files, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(read(dir.path(), "src/gender.ts"), GENDER_EJECTED);
    assert_eq!(logger.events.first().map(String::as_str), Some("start 2"));
}

#[test]
fn empty_target_still_finishes() {
    let dir = tempfile::tempdir().unwrap();
    let mut logger = RecordingLogger::default();
    let summary = run_target(
        &include(&["missing"]),
        &EjectOptions::default(),
        RunMode::Write,
        dir.path(),
        &mut logger,
    )
    .unwrap();

    assert_eq!(summary, RunSummary::default());
    assert_eq!(logger.events, vec!["start 0", "finish"]);
}
