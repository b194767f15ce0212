//! Ejection of one source file.

use eject_enum_parser::{ParserState, print_source_file};
use tracing::{debug, info, info_span};

use crate::binder::FileBinder;
use crate::convertibility::ConvertibilityCache;
use crate::error::EjectError;
use crate::format::{FormatSettings, format_text};
use crate::logger::ProgressLogger;
use crate::member_refs::rewrite_enum_member_types;
use crate::options::EjectOptions;
use crate::synthesizer::SynthesisStyle;
use crate::walker::ScopeWalker;

/// Per-file state shared by the walk and the synthesizer.
pub struct EjectionContext<'a> {
    pub file_name: &'a str,
    pub options: &'a EjectOptions,
    pub settings: FormatSettings,
    indent_unit: String,
    pub ejected: usize,
    pub skipped: usize,
}

impl<'a> EjectionContext<'a> {
    pub fn new(
        file_name: &'a str,
        options: &'a EjectOptions,
        settings: FormatSettings,
    ) -> EjectionContext<'a> {
        EjectionContext {
            file_name,
            options,
            indent_unit: settings.indent_unit(),
            settings,
            ejected: 0,
            skipped: 0,
        }
    }

    pub fn style(&self) -> SynthesisStyle<'_> {
        SynthesisStyle {
            indent_unit: &self.indent_unit,
            newline: self.settings.new_line.as_str(),
            preserve_expr: self.options.preserve_expr,
        }
    }
}

/// Result of processing one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// The rewritten text, or `None` when nothing was ejected and the file
    /// must stay byte-for-byte as it was.
    pub text: Option<String>,
    pub ejected: usize,
    pub skipped: usize,
}

impl FileOutcome {
    pub fn is_changed(&self) -> bool {
        self.text.is_some()
    }
}

/// Eject every convertible enum in `text`.
///
/// `logger.finish_file()` is called exactly once, whether or not the file
/// could be processed.
pub fn eject_enums_from_source(
    file_name: &str,
    text: &str,
    options: &EjectOptions,
    logger: &mut dyn ProgressLogger,
) -> Result<FileOutcome, EjectError> {
    let span = info_span!("eject_file", file = file_name);
    let _guard = span.enter();
    let outcome = eject_file(file_name, text, options, logger);
    logger.finish_file();
    outcome
}

fn eject_file(
    file_name: &str,
    text: &str,
    options: &EjectOptions,
    logger: &mut dyn ProgressLogger,
) -> Result<FileOutcome, EjectError> {
    let mut parser = ParserState::new(file_name.to_string(), text.to_string());
    let root = parser.parse_source_file();
    if !parser.get_diagnostics().is_empty() {
        return Err(EjectError::syntax(file_name, text, parser.get_diagnostics()));
    }
    let mut arena = parser.into_arena();

    let Some(file) = arena.get_source_file(root) else {
        return Ok(FileOutcome::default());
    };
    if file.enums.is_empty() {
        debug!("no enum declarations");
        return Ok(FileOutcome::default());
    }
    let root_scope = file.scope;
    let enums = file.enums.clone();
    let type_sites = file.type_sites.clone();

    let binder = FileBinder::bind(&arena, root);
    let analysis = ConvertibilityCache::analyze(&arena, &binder, &enums);
    let settings = FormatSettings::detect(text, file_name).with_indent(options.indent);
    let mut ctx = EjectionContext::new(file_name, options, settings);

    // References must be rewritten while their enums are still in the tree.
    let rewritten = rewrite_enum_member_types(&mut arena, text, &type_sites, &binder, &analysis);
    ScopeWalker::new(text, &analysis).walk(&mut arena, root_scope, &mut ctx, logger)?;

    if ctx.ejected == 0 {
        return Ok(FileOutcome {
            text: None,
            ejected: 0,
            skipped: ctx.skipped,
        });
    }

    let printed = print_source_file(&arena, root);
    let formatted = format_text(&printed, &ctx.settings).map_err(|err| EjectError::Format {
        file: file_name.to_string(),
        message: err.to_string(),
    })?;

    let n = ctx.ejected;
    logger.log(&format!(
        "{file_name}: ejected {n} enum{}.",
        if n >= 2 { "s" } else { "" }
    ));
    info!(
        ejected = n,
        skipped = ctx.skipped,
        references = rewritten,
        "file ejected"
    );
    Ok(FileOutcome {
        text: Some(formatted),
        ejected: n,
        skipped: ctx.skipped,
    })
}
