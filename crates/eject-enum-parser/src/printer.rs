//! Source printer.
//!
//! Reassembles a file from its original text. Scopes print the text between
//! their statements verbatim; statements and enums print their own span with
//! nested holes printed recursively; synthesized nodes print their
//! replacement text. A tree with no replacements prints the original file
//! byte for byte.

use crate::parser::{Node, NodeArena, NodeIndex};

/// Print the source file rooted at `source_file`.
pub fn print_source_file(arena: &NodeArena, source_file: NodeIndex) -> String {
    let Some(file) = arena.get_source_file(source_file) else {
        return String::new();
    };
    let mut printer = Printer {
        arena,
        text: &file.text,
        out: String::with_capacity(file.text.len() + file.text.len() / 8),
    };
    printer.print_node(file.scope);
    printer.out
}

struct Printer<'a> {
    arena: &'a NodeArena,
    text: &'a str,
    out: String,
}

impl Printer<'_> {
    fn copy(&mut self, pos: u32, end: u32) {
        if end > pos {
            self.out.push_str(&self.text[pos as usize..end as usize]);
        }
    }

    fn print_node(&mut self, index: NodeIndex) {
        let Some(node) = self.arena.get(index) else {
            return;
        };
        match node {
            Node::Scope(scope) => {
                let mut cursor = scope.pos;
                for &statement in &scope.statements {
                    let Some(child) = self.arena.get(statement) else {
                        continue;
                    };
                    let pos = child.pos();
                    if pos > cursor {
                        self.copy(cursor, pos);
                    }
                    self.print_node(statement);
                    cursor = cursor.max(child.end());
                }
                self.copy(cursor, scope.end);
            }
            Node::Statement(_) | Node::Enum(_) => {
                let mut cursor = node.pos();
                for &hole in node.holes() {
                    let Some(child) = self.arena.get(hole) else {
                        continue;
                    };
                    self.copy(cursor, child.pos());
                    self.print_node(hole);
                    cursor = cursor.max(child.end());
                }
                self.copy(cursor, node.end());
            }
            Node::Synthesized(data) => {
                self.copy(data.detached.pos, data.detached.end);
                self.copy(data.carried.pos, data.carried.end);
                self.out.push_str(&data.leading);
                self.out.push_str(&data.text);
            }
            Node::SourceFile(file) => self.print_node(file.scope),
            _ => self.copy(node.pos(), node.end()),
        }
    }
}
