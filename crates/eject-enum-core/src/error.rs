//! Errors that abort processing of a file.
//!
//! Declarations that cannot be converted are not errors; they are reported
//! through the progress logger and left untouched.

use std::fmt;

use eject_enum_common::position::LineMap;
use eject_enum_parser::ParseDiagnostic;

/// A parse diagnostic located by 1-based line and column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub line: u32,
    pub column: u32,
    pub code: u32,
    pub message: String,
}

impl fmt::Display for SyntaxDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - error TS{}: {}",
            self.line, self.column, self.code, self.message
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EjectError {
    /// The file could not be parsed structurally.
    Syntax {
        file: String,
        diagnostics: Vec<SyntaxDiagnostic>,
    },
    /// Reformatting the rewritten file produced text that no longer scans.
    Format { file: String, message: String },
    /// A resolved member value has no literal form.
    UnsupportedValue {
        file: String,
        enum_name: String,
        member: String,
    },
}

impl EjectError {
    pub(crate) fn syntax(file: &str, text: &str, diagnostics: &[ParseDiagnostic]) -> EjectError {
        let line_map = LineMap::build(text);
        let diagnostics = diagnostics
            .iter()
            .map(|diagnostic| {
                let position = line_map.offset_to_position(diagnostic.start);
                SyntaxDiagnostic {
                    line: position.line + 1,
                    column: position.character + 1,
                    code: diagnostic.code,
                    message: diagnostic.message.clone(),
                }
            })
            .collect();
        EjectError::Syntax {
            file: file.to_string(),
            diagnostics,
        }
    }

    pub fn file(&self) -> &str {
        match self {
            EjectError::Syntax { file, .. }
            | EjectError::Format { file, .. }
            | EjectError::UnsupportedValue { file, .. } => file,
        }
    }
}

impl fmt::Display for EjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EjectError::Syntax { file, diagnostics } => {
                write!(f, "failed to parse {file}")?;
                for diagnostic in diagnostics {
                    write!(f, "\n  {file}:{diagnostic}")?;
                }
                Ok(())
            }
            EjectError::Format { file, message } => {
                write!(f, "failed to format {file}: {message}")
            }
            EjectError::UnsupportedValue {
                file,
                enum_name,
                member,
            } => write!(
                f,
                "{file} > {enum_name}: member {member} has a value with no literal form"
            ),
        }
    }
}

impl std::error::Error for EjectError {}
