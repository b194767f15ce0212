//! Per-scope declaration tables.
//!
//! The binder records, for every scope of a file, which names its statements
//! declare and what kind of declaration each one is. Qualified type names
//! (`E.M`) and enum qualifiers in member initializers are resolved against
//! these tables lexically, walking up the scope chain.

use eject_enum_parser::{DeclarationKind, Node, NodeArena, NodeIndex};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

/// One declaration of a name in a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeSymbol {
    pub kind: DeclarationKind,
    /// The declaring statement or enum.
    pub node: NodeIndex,
}

type SymbolTable = FxHashMap<String, SmallVec<[ScopeSymbol; 1]>>;

#[derive(Debug, Default)]
pub struct FileBinder {
    scopes: FxHashMap<NodeIndex, SymbolTable>,
    parents: FxHashMap<NodeIndex, NodeIndex>,
}

impl FileBinder {
    /// Bind every scope reachable from the file scope of `source_file`.
    pub fn bind(arena: &NodeArena, source_file: NodeIndex) -> FileBinder {
        let mut binder = FileBinder::default();
        let Some(file) = arena.get_source_file(source_file) else {
            return binder;
        };

        let mut pending = vec![file.scope];
        while let Some(scope) = pending.pop() {
            let Some(data) = arena.get_scope(scope) else {
                continue;
            };
            binder.parents.insert(scope, data.parent);
            let table = binder.scopes.entry(scope).or_default();
            for &statement in &data.statements {
                match arena.get(statement) {
                    Some(Node::Enum(decl)) => {
                        table
                            .entry(decl.name.clone())
                            .or_default()
                            .push(ScopeSymbol {
                                kind: DeclarationKind::Enum,
                                node: statement,
                            });
                    }
                    Some(Node::Statement(stmt)) => {
                        for declared in &stmt.declarations {
                            table
                                .entry(declared.name.clone())
                                .or_default()
                                .push(ScopeSymbol {
                                    kind: declared.kind,
                                    node: statement,
                                });
                        }
                    }
                    _ => {}
                }
                pending.extend(arena.child_scopes(statement));
            }
        }
        trace!(scopes = binder.scopes.len(), "bound file scopes");
        binder
    }

    /// Declarations of `name` made directly in `scope`.
    pub fn declarations(&self, scope: NodeIndex, name: &str) -> &[ScopeSymbol] {
        self.scopes
            .get(&scope)
            .and_then(|table| table.get(name))
            .map_or(&[][..], |symbols| symbols.as_slice())
    }

    /// Resolve `name` as the qualifier of a type name, starting at `scope`.
    ///
    /// Returns the enum the name denotes, or `None` when the nearest
    /// declaration with namespace meaning is not an enum.
    pub fn resolve_enum(&self, scope: NodeIndex, name: &str) -> Option<NodeIndex> {
        let mut current = scope;
        while current.is_some() {
            let symbols = self.declarations(current, name);
            if let Some(symbol) = symbols.iter().find(|s| s.kind == DeclarationKind::Enum) {
                return Some(symbol.node);
            }
            if symbols.iter().any(|s| s.kind.has_namespace_meaning()) {
                return None;
            }
            current = self
                .parents
                .get(&current)
                .copied()
                .unwrap_or(NodeIndex::NONE);
        }
        None
    }

    /// Declarations of the value `name` as seen from `scope`: those of the
    /// nearest enclosing scope that declares it with a value meaning.
    pub fn resolve_value(&self, scope: NodeIndex, name: &str) -> &[ScopeSymbol] {
        let mut current = scope;
        while current.is_some() {
            let symbols = self.declarations(current, name);
            if symbols.iter().any(|s| s.kind.has_value_meaning()) {
                return symbols;
            }
            current = self
                .parents
                .get(&current)
                .copied()
                .unwrap_or(NodeIndex::NONE);
        }
        &[]
    }

    /// Whether `name` is declared more than once as an enum or namespace in
    /// `scope`, so the declarations merge.
    pub fn is_merged(&self, scope: NodeIndex, name: &str) -> bool {
        self.declarations(scope, name)
            .iter()
            .filter(|s| matches!(s.kind, DeclarationKind::Enum | DeclarationKind::Namespace))
            .count()
            > 1
    }
}
