use std::fmt;

/// The structural kind of a record.
///
/// Also used to partition the name dictionary: a name interned for
/// [NodeKind::Element] and the same string interned for
/// [NodeKind::Attribute] yield independent keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    DocumentRoot,
    Element,
    Attribute,
    Namespace,
    Text,
    Comment,
    ProcessingInstruction,
    Array,
    PathNode,
}

impl NodeKind {
    /// Kinds that carry sibling and child links.
    pub fn is_structural(self) -> bool {
        !matches!(self, NodeKind::Attribute | NodeKind::Namespace)
    }

    /// Kinds whose identity includes a qualified name.
    pub fn is_named(self) -> bool {
        matches!(
            self,
            NodeKind::Element
                | NodeKind::Attribute
                | NodeKind::Namespace
                | NodeKind::ProcessingInstruction
                | NodeKind::PathNode
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::DocumentRoot => "document-root",
            NodeKind::Element => "element",
            NodeKind::Attribute => "attribute",
            NodeKind::Namespace => "namespace",
            NodeKind::Text => "text",
            NodeKind::Comment => "comment",
            NodeKind::ProcessingInstruction => "processing-instruction",
            NodeKind::Array => "array",
            NodeKind::PathNode => "path-node",
        };
        f.write_str(s)
    }
}

/// Which key space (and which page subtree) a record is stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Document nodes, keyed by the resource's node key counter.
    Record,
    /// Path summary nodes, keyed by the path summary's own counter.
    PathSummary,
}
