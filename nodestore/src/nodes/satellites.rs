use crate::delegates::{NameNodeDelegate, NodeDelegate, ValueNodeDelegate};
use crate::QName;

/// An attribute of an element. Not part of the child/sibling structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeNode {
    pub(super) node: NodeDelegate,
    pub(super) name: NameNodeDelegate,
    pub(super) value: ValueNodeDelegate,
    qname: QName,
}

impl AttributeNode {
    pub fn new(
        node: NodeDelegate,
        name: NameNodeDelegate,
        value: ValueNodeDelegate,
        qname: QName,
    ) -> Self {
        Self {
            node,
            name,
            value,
            qname,
        }
    }

    pub fn name(&self) -> &QName {
        &self.qname
    }
}

/// A namespace declaration on an element. Not part of the child/sibling
/// structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceNode {
    pub(super) node: NodeDelegate,
    pub(super) name: NameNodeDelegate,
    qname: QName,
}

impl NamespaceNode {
    pub fn new(node: NodeDelegate, name: NameNodeDelegate, qname: QName) -> Self {
        Self { node, name, qname }
    }

    pub fn name(&self) -> &QName {
        &self.qname
    }
}
