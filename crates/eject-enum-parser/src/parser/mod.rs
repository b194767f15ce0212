pub mod base;
pub use base::{NodeIndex, TextSpan};

pub mod node;
pub use node::*;

mod node_arena;
pub use node_arena::NodeArena;

pub mod state;
pub use state::{ParseDiagnostic, ParserState};

mod state_expressions;
mod state_members;
mod state_statements;
mod state_types;
