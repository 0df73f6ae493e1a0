use crate::delegates::{NameNodeDelegate, NodeDelegate, StructNodeDelegate, ValueNodeDelegate};
use crate::{NodeKey, QName};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    pub(super) node: NodeDelegate,
    pub(super) structure: StructNodeDelegate,
    pub(super) value: ValueNodeDelegate,
}

impl TextNode {
    pub fn new(node: NodeDelegate, structure: StructNodeDelegate, value: ValueNodeDelegate) -> Self {
        Self {
            node,
            structure,
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentNode {
    pub(super) node: NodeDelegate,
    pub(super) structure: StructNodeDelegate,
    pub(super) value: ValueNodeDelegate,
}

impl CommentNode {
    pub fn new(node: NodeDelegate, structure: StructNodeDelegate, value: ValueNodeDelegate) -> Self {
        Self {
            node,
            structure,
            value,
        }
    }
}

/// A processing instruction. The target is the name, the content the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PINode {
    pub(super) node: NodeDelegate,
    pub(super) structure: StructNodeDelegate,
    pub(super) name: NameNodeDelegate,
    pub(super) value: ValueNodeDelegate,
    target: QName,
}

impl PINode {
    pub fn new(
        node: NodeDelegate,
        structure: StructNodeDelegate,
        name: NameNodeDelegate,
        value: ValueNodeDelegate,
        target: QName,
    ) -> Self {
        Self {
            node,
            structure,
            name,
            value,
            target,
        }
    }

    pub fn target(&self) -> &QName {
        &self.target
    }
}

/// A JSON array. Arrays are unnamed, but still hang off a path summary entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayNode {
    pub(super) node: NodeDelegate,
    pub(super) structure: StructNodeDelegate,
    path_node_key: NodeKey,
}

impl ArrayNode {
    pub fn new(node: NodeDelegate, structure: StructNodeDelegate, path_node_key: NodeKey) -> Self {
        Self {
            node,
            structure,
            path_node_key,
        }
    }

    pub fn path_node_key(&self) -> NodeKey {
        self.path_node_key
    }
}

/// The root every document hangs off. Created with the resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRootNode {
    pub(super) node: NodeDelegate,
    pub(super) structure: StructNodeDelegate,
}

impl DocumentRootNode {
    pub fn new(node: NodeDelegate, structure: StructNodeDelegate) -> Self {
        Self { node, structure }
    }
}
