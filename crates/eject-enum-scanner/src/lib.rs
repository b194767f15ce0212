//! TypeScript scanner/tokenizer for the eject-enum engine.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Whole-file tokenizer producing positioned `Token`s
//! - `literals` - Numeric and string literal decoding

pub mod syntax_kind;
pub use syntax_kind::*;

pub mod scanner;
pub use scanner::{LanguageVariant, ScannerDiagnostic, ScannerState, Token, TokenFlags};

pub mod literals;

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;

#[cfg(test)]
#[path = "tests/literals_tests.rs"]
mod literals_tests;
