//! Node storage.
//!
//! Nodes are appended and addressed by `NodeIndex`. Rewrites never remove
//! nodes; they `replace` a node in place or splice new indices into a scope's
//! statement list, so indices held elsewhere stay valid.

use super::base::NodeIndex;
use super::node::{
    EnumData, EnumMemberData, Node, ScopeData, SourceFileData, StatementData, TypeSiteData,
};

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 1_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(Self::MAX_NODE_PREALLOC)),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get_mut(index.0 as usize)
    }

    /// Replace the node at `index`, returning the previous node.
    pub fn replace(&mut self, index: NodeIndex, node: Node) -> Option<Node> {
        let slot = self.get_mut(index)?;
        Some(std::mem::replace(slot, node))
    }

    pub fn get_source_file(&self, index: NodeIndex) -> Option<&SourceFileData> {
        match self.get(index)? {
            Node::SourceFile(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_scope(&self, index: NodeIndex) -> Option<&ScopeData> {
        match self.get(index)? {
            Node::Scope(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_scope_mut(&mut self, index: NodeIndex) -> Option<&mut ScopeData> {
        match self.get_mut(index)? {
            Node::Scope(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_statement(&self, index: NodeIndex) -> Option<&StatementData> {
        match self.get(index)? {
            Node::Statement(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_enum(&self, index: NodeIndex) -> Option<&EnumData> {
        match self.get(index)? {
            Node::Enum(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_enum_member(&self, index: NodeIndex) -> Option<&EnumMemberData> {
        match self.get(index)? {
            Node::EnumMember(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_type_site(&self, index: NodeIndex) -> Option<&TypeSiteData> {
        match self.get(index)? {
            Node::TypeReference(data) => Some(data),
            _ => None,
        }
    }

    /// Scopes nested directly inside a statement or enum.
    pub fn child_scopes(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.get(index)
            .map(Node::holes)
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(|&hole| self.get_scope(hole).is_some())
    }

    /// Replace `remove` statements of `scope` starting at `at` with `insert`.
    /// Returns false when `scope` is not a scope or the range is out of bounds.
    pub fn splice_statements(
        &mut self,
        scope: NodeIndex,
        at: usize,
        remove: usize,
        insert: &[NodeIndex],
    ) -> bool {
        let Some(data) = self.get_scope_mut(scope) else {
            return false;
        };
        if at + remove > data.statements.len() {
            return false;
        }
        data.statements
            .splice(at..at + remove, insert.iter().copied());
        true
    }
}
