use crate::delegates::{NameNodeDelegate, NodeDelegate, StructNodeDelegate};
use crate::{NodeKind, QName};

/// An entry of the path summary.
///
/// Each distinct root-to-node label path of the document has exactly one
/// path node. `references` counts the document nodes collapsing onto it,
/// `level` is its depth in the summary tree (the summary root is level 0).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub(super) node: NodeDelegate,
    pub(super) structure: StructNodeDelegate,
    pub(super) name: NameNodeDelegate,
    qname: QName,
    path_kind: NodeKind,
    references: u64,
    level: u32,
}

impl PathNode {
    pub fn new(
        node: NodeDelegate,
        structure: StructNodeDelegate,
        name: NameNodeDelegate,
        qname: QName,
        path_kind: NodeKind,
        references: u64,
        level: u32,
    ) -> Self {
        Self {
            node,
            structure,
            name,
            qname,
            path_kind,
            references,
            level,
        }
    }

    pub fn name(&self) -> &QName {
        &self.qname
    }

    /// Kind of the document nodes this path describes.
    pub fn path_kind(&self) -> NodeKind {
        self.path_kind
    }

    pub fn references(&self) -> u64 {
        self.references
    }

    pub fn increment_references(&mut self) {
        self.references += 1;
    }

    pub fn decrement_references(&mut self) {
        self.references = self.references.saturating_sub(1);
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}
