//! Flat index-based storage for parsed documents
//!
//! A parse produces no per-node allocations: nodes, container children and
//! object members live in growable tables, and all string data (unescaped
//! strings, raw number tokens) lives in one shared text arena. Clearing the
//! tables keeps their capacity, which is what makes parser reuse through the
//! pool worthwhile.

/// Index of a node in [`TreeBuf::nodes`]
pub(crate) type NodeId = u32;

/// Byte range into the shared text arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: u32,
    pub end: u32,
}

/// Index range into [`TreeBuf::elems`] or [`TreeBuf::members`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListRange {
    pub start: u32,
    pub end: u32,
}

impl ListRange {
    pub(crate) fn len(self) -> usize {
        (self.end - self.start) as usize
    }
}

/// One object member: interned key plus value node
#[derive(Debug, Clone, Copy)]
pub(crate) struct Member {
    pub key: Span,
    pub value: NodeId,
}

/// Payload of a single parsed node
///
/// Numbers keep their raw token text so coercion can pick the width later:
/// `as_i64` and `as_bigint` parse the exact literal instead of going through
/// a lossy double conversion.
#[derive(Debug, Clone, Copy)]
pub(crate) enum NodeData {
    Null,
    Bool(bool),
    Number(Span),
    String(Span),
    Array(ListRange),
    Object(ListRange),
}

/// Reusable backing storage for one parsed document
#[derive(Debug, Default)]
pub(crate) struct TreeBuf {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) elems: Vec<NodeId>,
    pub(crate) members: Vec<Member>,
    pub(crate) text: String,
    pub(crate) root: NodeId,
}

impl TreeBuf {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drop contents but keep allocated capacity for the next parse
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.elems.clear();
        self.members.clear();
        self.text.clear();
        self.root = 0;
    }

    pub(crate) fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(data);
        id
    }

    /// Copy `s` into the text arena and return its span
    pub(crate) fn intern(&mut self, s: &str) -> Span {
        let start = self.text.len() as u32;
        self.text.push_str(s);
        Span {
            start,
            end: self.text.len() as u32,
        }
    }

    /// Append a finished array's children and return their range
    pub(crate) fn push_elems(&mut self, children: &[NodeId]) -> ListRange {
        let start = self.elems.len() as u32;
        self.elems.extend_from_slice(children);
        ListRange {
            start,
            end: self.elems.len() as u32,
        }
    }

    /// Append a finished object's members and return their range
    pub(crate) fn push_members(&mut self, members: &[Member]) -> ListRange {
        let start = self.members.len() as u32;
        self.members.extend_from_slice(members);
        ListRange {
            start,
            end: self.members.len() as u32,
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> NodeData {
        self.nodes[id as usize]
    }

    pub(crate) fn str_at(&self, span: Span) -> &str {
        &self.text[span.start as usize..span.end as usize]
    }

    pub(crate) fn elems_at(&self, range: ListRange) -> &[NodeId] {
        &self.elems[range.start as usize..range.end as usize]
    }

    pub(crate) fn members_at(&self, range: ListRange) -> &[Member] {
        &self.members[range.start as usize..range.end as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_read_back() {
        let mut tree = TreeBuf::new();
        let a = tree.intern("hello");
        let b = tree.intern("world");
        assert_eq!(tree.str_at(a), "hello");
        assert_eq!(tree.str_at(b), "world");
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut tree = TreeBuf::new();
        tree.intern("some text that forces an allocation");
        tree.push_node(NodeData::Null);
        let text_cap = tree.text.capacity();
        let node_cap = tree.nodes.capacity();

        tree.clear();
        assert!(tree.nodes.is_empty());
        assert!(tree.text.is_empty());
        assert_eq!(tree.text.capacity(), text_cap);
        assert_eq!(tree.nodes.capacity(), node_cap);
    }

    #[test]
    fn test_child_ranges_are_contiguous() {
        let mut tree = TreeBuf::new();
        let a = tree.push_node(NodeData::Null);
        let b = tree.push_node(NodeData::Bool(true));
        let range = tree.push_elems(&[a, b]);
        assert_eq!(range.len(), 2);
        assert_eq!(tree.elems_at(range), &[a, b]);
    }
}
