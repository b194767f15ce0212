//! Text-preserving TypeScript parser for the eject-enum engine.
//!
//! The parser builds just enough structure to rewrite enums in place:
//! - every statement-holding scope, with its ordered statements;
//! - enum declarations and their members, with initializer expression trees;
//! - property type annotations of the exact form `Name.Member`.
//!
//! Everything else is kept as source text. `printer::print_source_file`
//! reassembles the file from the original text plus whatever nodes were
//! replaced, so an untouched tree prints byte-for-byte.

pub mod parser;
pub use parser::{
    DeclarationKind, DeclaredName, EnumData, EnumMemberData, MemberName, ModifierFlags, Node,
    NodeArena, NodeIndex, ParseDiagnostic, ParserState, ScopeData, ScopeKind, StatementKind,
    SynthesizedData, TextSpan, TypeSiteData,
};

pub mod printer;
pub use printer::print_source_file;
