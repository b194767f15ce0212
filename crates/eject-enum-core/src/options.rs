//! Options controlling one ejection run.

/// Indentation used for synthesized code and by the formatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(u8),
    Tabs,
}

impl IndentStyle {
    /// The text of one indentation level.
    pub fn unit(self) -> String {
        match self {
            IndentStyle::Spaces(width) => " ".repeat(width.max(1) as usize),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(2)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EjectOptions {
    /// Annotate members initialized with a constant expression with the
    /// original expression as a trailing `//` comment.
    pub preserve_expr: bool,
    /// Overrides the indentation detected from each file.
    pub indent: Option<IndentStyle>,
}

impl Default for EjectOptions {
    fn default() -> Self {
        EjectOptions {
            preserve_expr: true,
            indent: None,
        }
    }
}
