use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        };
        f.write_str(label)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Codes shared with TypeScript where an equivalent exists. Codes from 90000
/// upward are specific to this tool.
pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1161;
    pub const JSX_ELEMENT_HAS_NO_CLOSING_TAG: u32 = 17008;
    pub const NESTING_TOO_DEEP: u32 = 90001;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: &str =
        "Unterminated regular expression literal.";
    pub const JSX_ELEMENT_HAS_NO_CLOSING_TAG: &str =
        "JSX element has no corresponding closing tag.";
    pub const NESTING_TOO_DEEP: &str = "Source nesting exceeds the supported depth of {0}.";
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ASTERISK_SLASH_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ASTERISK_SLASH_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CHARACTER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::JSX_ELEMENT_HAS_NO_CLOSING_TAG,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::JSX_ELEMENT_HAS_NO_CLOSING_TAG,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NESTING_TOO_DEEP,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
        }
    }

    /// Build an error from a registered code, filling `{n}` placeholders.
    pub fn from_code(file: impl Into<String>, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        let template = get_message_template(code).unwrap_or("Unknown error.");
        Self::error(file, start, length, format_message(template, args), code)
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
