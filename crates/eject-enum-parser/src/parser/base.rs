//! Shared base types for the node arena.

/// Index of a node in a `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != NodeIndex::NONE
    }
}

/// A half-open byte range `[pos, end)` of the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextSpan {
    pub pos: u32,
    pub end: u32,
}

impl TextSpan {
    pub fn new(pos: u32, end: u32) -> TextSpan {
        TextSpan { pos, end }
    }

    pub fn empty_at(pos: u32) -> TextSpan {
        TextSpan { pos, end: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.pos
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }
}
