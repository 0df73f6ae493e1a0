use std::collections::HashMap;

use crate::delegates::{NameNodeDelegate, NodeDelegate, StructNodeDelegate};
use crate::{NameKey, NodeKey, QName};

/// An element: a named structural node owning attribute and namespace
/// satellites.
///
/// Attribute and namespace keys are unordered. Attributes can additionally be
/// looked up by the local-name key they were interned under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementNode {
    pub(super) node: NodeDelegate,
    pub(super) structure: StructNodeDelegate,
    pub(super) name: NameNodeDelegate,
    attribute_keys: Vec<NodeKey>,
    namespace_keys: Vec<NodeKey>,
    attributes_by_name: HashMap<NameKey, NodeKey>,
    qname: QName,
}

impl ElementNode {
    pub fn new(
        node: NodeDelegate,
        structure: StructNodeDelegate,
        name: NameNodeDelegate,
        qname: QName,
    ) -> Self {
        Self {
            node,
            structure,
            name,
            attribute_keys: vec![],
            namespace_keys: vec![],
            attributes_by_name: HashMap::new(),
            qname,
        }
    }

    pub fn name(&self) -> &QName {
        &self.qname
    }

    pub fn attribute_keys(&self) -> &[NodeKey] {
        &self.attribute_keys
    }

    pub fn attribute_count(&self) -> usize {
        self.attribute_keys.len()
    }

    /// Registers an attribute, replacing any attribute of the same name.
    pub fn insert_attribute(&mut self, attribute_key: NodeKey, name_key: NameKey) {
        if let Some(previous) = self.attributes_by_name.insert(name_key, attribute_key) {
            self.attribute_keys.retain(|k| *k != previous);
        }
        self.attribute_keys.push(attribute_key);
    }

    pub fn remove_attribute(&mut self, attribute_key: NodeKey) {
        self.attribute_keys.retain(|k| *k != attribute_key);
        self.attributes_by_name.retain(|_, k| *k != attribute_key);
    }

    pub fn attribute_key_by_name(&self, name_key: NameKey) -> Option<NodeKey> {
        self.attributes_by_name.get(&name_key).copied()
    }

    pub fn namespace_keys(&self) -> &[NodeKey] {
        &self.namespace_keys
    }

    pub fn namespace_count(&self) -> usize {
        self.namespace_keys.len()
    }

    pub fn insert_namespace(&mut self, namespace_key: NodeKey) {
        if !self.namespace_keys.contains(&namespace_key) {
            self.namespace_keys.push(namespace_key);
        }
    }

    pub fn remove_namespace(&mut self, namespace_key: NodeKey) {
        self.namespace_keys.retain(|k| *k != namespace_key);
    }
}

#[cfg(test)]
mod tests {
    use super::ElementNode;
    use crate::config::HashType;
    use crate::delegates::{NameNodeDelegate, NodeDelegate, StructNodeDelegate};
    use crate::{NameKey, NodeKey, QName, Revision};

    fn element() -> ElementNode {
        ElementNode::new(
            NodeDelegate::new(
                NodeKey::new(1),
                NodeKey::ROOT,
                HashType::None,
                NameKey::ABSENT,
                Revision::FIRST,
                None,
            ),
            StructNodeDelegate::leaf(NodeKey::NULL, NodeKey::NULL),
            NameNodeDelegate::new(NameKey::ABSENT, NameKey::ABSENT, NameKey::new(1), NodeKey::new(1)),
            QName::local("a"),
        )
    }

    #[test]
    fn attribute_lookup() {
        let mut e = element();
        e.insert_attribute(NodeKey::new(2), NameKey::new(4));
        e.insert_attribute(NodeKey::new(3), NameKey::new(5));

        assert_eq!(Some(NodeKey::new(3)), e.attribute_key_by_name(NameKey::new(5)));
        assert_eq!(2, e.attribute_count());

        e.remove_attribute(NodeKey::new(2));
        assert_eq!(None, e.attribute_key_by_name(NameKey::new(4)));
        assert_eq!(&[NodeKey::new(3)], e.attribute_keys());
    }

    #[test]
    fn same_name_replaces_attribute() {
        let mut e = element();
        e.insert_attribute(NodeKey::new(2), NameKey::new(4));
        e.insert_attribute(NodeKey::new(6), NameKey::new(4));

        assert_eq!(&[NodeKey::new(6)], e.attribute_keys());
        assert_eq!(Some(NodeKey::new(6)), e.attribute_key_by_name(NameKey::new(4)));
    }

    #[test]
    fn namespaces_are_deduplicated() {
        let mut e = element();
        e.insert_namespace(NodeKey::new(9));
        e.insert_namespace(NodeKey::new(9));
        assert_eq!(1, e.namespace_count());

        e.remove_namespace(NodeKey::new(9));
        assert!(e.namespace_keys().is_empty());
    }
}
