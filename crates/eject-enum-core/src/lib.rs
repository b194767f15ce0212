//! Enum ejection engine.
//!
//! Rewrites every TypeScript `enum` whose members are compile-time constants
//! into a `const` object and a type alias over its values:
//!
//! ```text
//! enum YesNo { No, Yes }
//! ```
//!
//! becomes
//!
//! ```text
//! const YesNo = {
//!   No: 0,
//!   Yes: 1,
//! } as const;
//!
//! type YesNo = (typeof YesNo)[keyof typeof YesNo];
//! ```
//!
//! Property types naming one member (`kind: YesNo.Yes`) become
//! `typeof YesNo.Yes`. Files with nothing to convert are returned unchanged.

pub mod binder;
pub mod comment_carrier;
pub mod convertibility;
pub mod driver;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod logger;
pub mod member_refs;
pub mod number_text;
pub mod options;
pub mod synthesizer;
pub mod walker;

pub use convertibility::{Convertibility, SkipReason};
pub use driver::{EjectionContext, FileOutcome, eject_enums_from_source};
pub use error::{EjectError, SyntaxDiagnostic};
pub use evaluator::{EnumValue, ResolvedValue};
pub use format::{FormatSettings, NewLine, format_text};
pub use logger::{ProgressLogger, SilentLogger};
pub use member_refs::MemberLiteralTypes;
pub use options::{EjectOptions, IndentStyle};

#[cfg(test)]
#[path = "tests/evaluator_tests.rs"]
mod evaluator_tests;

#[cfg(test)]
#[path = "tests/number_text_tests.rs"]
mod number_text_tests;

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod format_tests;

#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod binder_tests;

#[cfg(test)]
#[path = "tests/synthesizer_tests.rs"]
mod synthesizer_tests;
