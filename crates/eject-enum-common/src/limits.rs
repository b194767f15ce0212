//! Centralized limits and thresholds.
//!
//! The parser and the scope walker recurse once per nested block, member list
//! or bracket group. These limits turn pathological nesting into a
//! diagnostic instead of a stack overflow.

/// Maximum nesting of blocks, member lists and bracket groups.
///
/// Each level costs a handful of parser frames, so this stays well inside the
/// 2 MiB stack of spawned test threads.
pub const MAX_NESTING_DEPTH: u32 = 256;

/// Maximum nesting of JSX elements scanned as one opaque token.
pub const MAX_JSX_DEPTH: u32 = 512;

/// Maximum operand depth for enum initializer expressions.
pub const MAX_CONSTANT_EXPRESSION_DEPTH: u32 = 128;
