use crate::reporter::{ConsoleLogger, progress_text};
use eject_enum_core::ProgressLogger;

fn logger(interactive: bool) -> ConsoleLogger<Vec<u8>, Vec<u8>> {
    ConsoleLogger::new(Vec::new(), Vec::new(), interactive, false)
}

fn outputs(logger: ConsoleLogger<Vec<u8>, Vec<u8>>) -> (String, String) {
    let (progress, lines) = logger.into_inner();
    (
        String::from_utf8(progress).unwrap(),
        String::from_utf8(lines).unwrap(),
    )
}

#[test]
fn progress_text_reports_percentage() {
    assert_eq!(progress_text(0, 4), "Ejecting... 0/4 (0%)");
    assert_eq!(progress_text(1, 3), "Ejecting... 1/3 (33%)");
    assert_eq!(progress_text(4, 4), "Ejecting... 4/4 (100%)");
}

#[test]
fn empty_run_is_complete() {
    assert_eq!(progress_text(0, 0), "Ejecting... 0/0 (100%)");
}

#[test]
fn non_interactive_prints_lines_and_finish_only() {
    let mut logger = logger(false);
    logger.start(2);
    logger.log("a.ts: ejected 1 enum.");
    logger.finish_file();
    logger.finish_file();
    logger.finish();

    let (progress, lines) = outputs(logger);
    assert_eq!(progress, "✔ Ejection finished\n");
    assert_eq!(lines, "a.ts: ejected 1 enum.\n");
}

#[test]
fn interactive_redraws_progress_around_lines() {
    let mut logger = logger(true);
    logger.start(2);
    logger.finish_file();
    logger.log("b.ts > E: skipped.");
    logger.finish_file();
    logger.finish();

    let (progress, lines) = outputs(logger);
    assert_eq!(
        progress,
        concat!(
            "\r\x1b[2KEjecting... 0/2 (0%)",
            "\r\x1b[2KEjecting... 1/2 (50%)",
            "\r\x1b[2K",
            "\r\x1b[2KEjecting... 1/2 (50%)",
            "\r\x1b[2KEjecting... 2/2 (100%)",
            "\r\x1b[2K✔ Ejection finished\n",
        )
    );
    assert_eq!(lines, "b.ts > E: skipped.\n");
}

#[test]
fn start_resets_the_counter() {
    let mut logger = logger(true);
    logger.start(1);
    logger.finish_file();
    logger.start(3);

    let (progress, _) = outputs(logger);
    assert!(progress.ends_with("\r\x1b[2KEjecting... 0/3 (0%)"));
}
