//! This holds the record types of all node kinds.
//!
//! Every kind is a plain aggregate of the delegates it needs:
//!
//! | kind                   | structure | name | value |
//! |------------------------|-----------|------|-------|
//! | element                | x         | x    |       |
//! | attribute              |           | x    | x     |
//! | namespace              |           | x    |       |
//! | text, comment          | x         |      | x     |
//! | processing instruction | x         | x    | x     |
//! | array                  | x         |      |       |
//! | path node              | x         | x    |       |
//! | document root          | x         |      |       |
mod element;
mod leaves;
mod path;
mod satellites;

pub use element::ElementNode;
pub use leaves::{ArrayNode, CommentNode, DocumentRootNode, PINode, TextNode};
pub use path::PathNode;
pub use satellites::{AttributeNode, NamespaceNode};

use crate::delegates::{
    NameNode, NameNodeDelegate, Node, NodeDelegate, StructNode, StructNodeDelegate, ValueNode,
    ValueNodeDelegate,
};
use crate::{Error, NodeKind};

macro_rules! impl_node {
    ($ty:ty, $kind:expr) => {
        impl Node for $ty {
            fn kind(&self) -> NodeKind {
                $kind
            }

            fn node_delegate(&self) -> &NodeDelegate {
                &self.node
            }

            fn node_delegate_mut(&mut self) -> &mut NodeDelegate {
                &mut self.node
            }
        }
    };
}

macro_rules! impl_struct_node {
    ($ty:ty) => {
        impl StructNode for $ty {
            fn struct_delegate(&self) -> &StructNodeDelegate {
                &self.structure
            }

            fn struct_delegate_mut(&mut self) -> &mut StructNodeDelegate {
                &mut self.structure
            }
        }
    };
}

macro_rules! impl_name_node {
    ($ty:ty) => {
        impl NameNode for $ty {
            fn name_delegate(&self) -> &NameNodeDelegate {
                &self.name
            }
        }
    };
}

macro_rules! impl_value_node {
    ($ty:ty) => {
        impl ValueNode for $ty {
            fn value_delegate(&self) -> &ValueNodeDelegate {
                &self.value
            }
        }
    };
}

impl_node!(DocumentRootNode, NodeKind::DocumentRoot);
impl_node!(ElementNode, NodeKind::Element);
impl_node!(AttributeNode, NodeKind::Attribute);
impl_node!(NamespaceNode, NodeKind::Namespace);
impl_node!(TextNode, NodeKind::Text);
impl_node!(CommentNode, NodeKind::Comment);
impl_node!(PINode, NodeKind::ProcessingInstruction);
impl_node!(ArrayNode, NodeKind::Array);
impl_node!(PathNode, NodeKind::PathNode);

impl_struct_node!(DocumentRootNode);
impl_struct_node!(ElementNode);
impl_struct_node!(TextNode);
impl_struct_node!(CommentNode);
impl_struct_node!(PINode);
impl_struct_node!(ArrayNode);
impl_struct_node!(PathNode);

impl_name_node!(ElementNode);
impl_name_node!(AttributeNode);
impl_name_node!(NamespaceNode);
impl_name_node!(PINode);
impl_name_node!(PathNode);

impl_value_node!(AttributeNode);
impl_value_node!(TextNode);
impl_value_node!(CommentNode);
impl_value_node!(PINode);

/// A stored record of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    DocumentRoot(DocumentRootNode),
    Element(ElementNode),
    Attribute(AttributeNode),
    Namespace(NamespaceNode),
    Text(TextNode),
    Comment(CommentNode),
    ProcessingInstruction(PINode),
    Array(ArrayNode),
    Path(PathNode),
}

impl Record {
    pub fn as_node(&self) -> &dyn Node {
        match self {
            Record::DocumentRoot(n) => n,
            Record::Element(n) => n,
            Record::Attribute(n) => n,
            Record::Namespace(n) => n,
            Record::Text(n) => n,
            Record::Comment(n) => n,
            Record::ProcessingInstruction(n) => n,
            Record::Array(n) => n,
            Record::Path(n) => n,
        }
    }

    pub fn as_node_mut(&mut self) -> &mut dyn Node {
        match self {
            Record::DocumentRoot(n) => n,
            Record::Element(n) => n,
            Record::Attribute(n) => n,
            Record::Namespace(n) => n,
            Record::Text(n) => n,
            Record::Comment(n) => n,
            Record::ProcessingInstruction(n) => n,
            Record::Array(n) => n,
            Record::Path(n) => n,
        }
    }

    /// The structural view, unless this is an attribute or namespace.
    pub fn as_struct(&self) -> Option<&dyn StructNode> {
        match self {
            Record::DocumentRoot(n) => Some(n),
            Record::Element(n) => Some(n),
            Record::Text(n) => Some(n),
            Record::Comment(n) => Some(n),
            Record::ProcessingInstruction(n) => Some(n),
            Record::Array(n) => Some(n),
            Record::Path(n) => Some(n),
            Record::Attribute(_) | Record::Namespace(_) => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut dyn StructNode> {
        match self {
            Record::DocumentRoot(n) => Some(n),
            Record::Element(n) => Some(n),
            Record::Text(n) => Some(n),
            Record::Comment(n) => Some(n),
            Record::ProcessingInstruction(n) => Some(n),
            Record::Array(n) => Some(n),
            Record::Path(n) => Some(n),
            Record::Attribute(_) | Record::Namespace(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&dyn NameNode> {
        match self {
            Record::Element(n) => Some(n),
            Record::Attribute(n) => Some(n),
            Record::Namespace(n) => Some(n),
            Record::ProcessingInstruction(n) => Some(n),
            Record::Path(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&dyn ValueNode> {
        match self {
            Record::Attribute(n) => Some(n),
            Record::Text(n) => Some(n),
            Record::Comment(n) => Some(n),
            Record::ProcessingInstruction(n) => Some(n),
            _ => None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.as_node().kind()
    }
}

macro_rules! impl_record_conversions {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Record {
            fn from(value: $ty) -> Self {
                Record::$variant(value)
            }
        }

        impl TryFrom<Record> for $ty {
            type Error = Error;

            fn try_from(value: Record) -> Result<Self, Self::Error> {
                match value {
                    Record::$variant(n) => Ok(n),
                    other => Err(Error::StorageError(format!(
                        "expected {} record, got {}",
                        stringify!($variant),
                        other.kind()
                    ))),
                }
            }
        }
    };
}

impl_record_conversions!(DocumentRoot, DocumentRootNode);
impl_record_conversions!(Element, ElementNode);
impl_record_conversions!(Attribute, AttributeNode);
impl_record_conversions!(Namespace, NamespaceNode);
impl_record_conversions!(Text, TextNode);
impl_record_conversions!(Comment, CommentNode);
impl_record_conversions!(ProcessingInstruction, PINode);
impl_record_conversions!(Array, ArrayNode);
impl_record_conversions!(Path, PathNode);

#[cfg(test)]
mod tests {
    use super::{Record, TextNode};
    use crate::config::HashType;
    use crate::delegates::{NodeDelegate, StructNodeDelegate, ValueNodeDelegate};
    use crate::nodes::ElementNode;
    use crate::{NameKey, NodeKey, NodeKind, Revision};

    fn text() -> TextNode {
        TextNode::new(
            NodeDelegate::new(
                NodeKey::new(4),
                NodeKey::new(1),
                HashType::None,
                NameKey::ABSENT,
                Revision::FIRST,
                None,
            ),
            StructNodeDelegate::leaf(NodeKey::NULL, NodeKey::NULL),
            ValueNodeDelegate::new(bytes::Bytes::from_static(b"hi"), false),
        )
    }

    #[test]
    fn capability_views() {
        let record = Record::from(text());

        assert_eq!(NodeKind::Text, record.kind());
        assert_eq!(NodeKey::new(4), record.as_node().node_key());
        assert!(record.as_struct().is_some());
        assert!(record.as_name().is_none());
        assert_eq!(
            b"hi".as_slice(),
            &record.as_value().unwrap().raw_value().unwrap()[..]
        );
    }

    #[test]
    fn conversion_checks_kind() {
        let record = Record::from(text());
        assert!(ElementNode::try_from(record.clone()).is_err());
        assert_eq!(text(), TextNode::try_from(record).unwrap());
    }
}
