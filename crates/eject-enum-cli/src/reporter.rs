use colored::Colorize;
use eject_enum_core::ProgressLogger;
use std::io::{self, IsTerminal, Stderr, Stdout, Write};

/// Clears the current terminal line and returns the cursor to its start.
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Progress on one stream, log lines on another.
///
/// On a terminal the progress line is redrawn in place and log lines are
/// printed above it. Otherwise only the final line is written.
pub struct ConsoleLogger<P: Write, L: Write> {
    progress: P,
    lines: L,
    interactive: bool,
    color: bool,
    total: usize,
    done: usize,
}

impl ConsoleLogger<Stderr, Stdout> {
    pub fn stdio() -> Self {
        let interactive = io::stderr().is_terminal();
        ConsoleLogger::new(io::stderr(), io::stdout(), interactive, interactive)
    }
}

impl<P: Write, L: Write> ConsoleLogger<P, L> {
    pub fn new(progress: P, lines: L, interactive: bool, color: bool) -> Self {
        ConsoleLogger {
            progress,
            lines,
            interactive,
            color,
            total: 0,
            done: 0,
        }
    }

    pub fn into_inner(self) -> (P, L) {
        (self.progress, self.lines)
    }

    fn redraw(&mut self) {
        if !self.interactive {
            return;
        }
        let text = progress_text(self.done, self.total);
        let text = if self.color {
            text.dimmed().to_string()
        } else {
            text
        };
        let _ = write!(self.progress, "{CLEAR_LINE}{text}");
        let _ = self.progress.flush();
    }

    fn clear(&mut self) {
        if self.interactive {
            let _ = write!(self.progress, "{CLEAR_LINE}");
            let _ = self.progress.flush();
        }
    }
}

impl<P: Write, L: Write> ProgressLogger for ConsoleLogger<P, L> {
    fn start(&mut self, file_count: usize) {
        self.total = file_count;
        self.done = 0;
        self.redraw();
    }

    fn finish_file(&mut self) {
        self.done += 1;
        self.redraw();
    }

    fn log(&mut self, line: &str) {
        self.clear();
        let _ = writeln!(self.lines, "{line}");
        let _ = self.lines.flush();
        self.redraw();
    }

    fn finish(&mut self) {
        self.clear();
        let text = "✔ Ejection finished";
        if self.color {
            let _ = writeln!(self.progress, "{}", text.green());
        } else {
            let _ = writeln!(self.progress, "{text}");
        }
        let _ = self.progress.flush();
    }
}

/// `Ejecting... 3/4 (75%)`. An empty run counts as complete.
pub fn progress_text(done: usize, total: usize) -> String {
    let percent = if total == 0 { 100 } else { done * 100 / total };
    format!("Ejecting... {done}/{total} ({percent}%)")
}
