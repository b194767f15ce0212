//! Common types and utilities for the eject-enum workspace.
//!
//! This crate provides the foundations shared by the scanner, parser and
//! rewriting engine:
//! - Character classification (`char_codes`)
//! - Comment range extraction (`comments`)
//! - Diagnostics with stable codes (`diagnostics`)
//! - Line/column mapping (`position`)
//! - Centralized limits (`limits`)

pub mod char_codes;

// Comment parsing utilities
pub mod comments;
pub use comments::CommentRange;

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

#[cfg(test)]
#[path = "tests/comments_tests.rs"]
mod comments_tests;

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
