use crate::config::HashType;
use crate::dewey::DeweyId;
use crate::{B3Digest, NameKey, NodeKey, Revision};

/// Attributes every record has, regardless of its kind.
///
/// `node_key` and `revision` are fixed at construction. `revision` is the
/// revision this version of the node was written in, not the revision a
/// reader happens to look at it from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDelegate {
    node_key: NodeKey,
    parent_key: NodeKey,
    hash_type: HashType,
    hash: Option<B3Digest>,
    type_key: NameKey,
    revision: Revision,
    dewey_id: Option<DeweyId>,
}

impl NodeDelegate {
    pub fn new(
        node_key: NodeKey,
        parent_key: NodeKey,
        hash_type: HashType,
        type_key: NameKey,
        revision: Revision,
        dewey_id: Option<DeweyId>,
    ) -> Self {
        Self {
            node_key,
            parent_key,
            hash_type,
            hash: None,
            type_key,
            revision,
            dewey_id,
        }
    }

    pub fn node_key(&self) -> NodeKey {
        self.node_key
    }

    pub fn parent_key(&self) -> NodeKey {
        self.parent_key
    }

    pub fn set_parent_key(&mut self, parent_key: NodeKey) {
        self.parent_key = parent_key;
    }

    pub fn has_parent(&self) -> bool {
        !self.parent_key.is_null()
    }

    /// The hash function configured for the resource this node lives in.
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    pub fn hash(&self) -> Option<&B3Digest> {
        self.hash.as_ref()
    }

    pub fn set_hash(&mut self, hash: Option<B3Digest>) {
        self.hash = hash;
    }

    pub fn type_key(&self) -> NameKey {
        self.type_key
    }

    pub fn set_type_key(&mut self, type_key: NameKey) {
        self.type_key = type_key;
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn dewey_id(&self) -> Option<&DeweyId> {
        self.dewey_id.as_ref()
    }

    /// Detached copy of this delegate.
    ///
    /// Mutating the copy never affects the record it was taken from.
    pub fn snapshot(&self) -> NodeDelegate {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::NodeDelegate;
    use crate::config::HashType;
    use crate::{B3Digest, NameKey, NodeKey, Revision};

    fn delegate() -> NodeDelegate {
        NodeDelegate::new(
            NodeKey::new(7),
            NodeKey::new(3),
            HashType::Rolling,
            NameKey::ABSENT,
            Revision::new(2),
            None,
        )
    }

    #[test]
    fn snapshot_does_not_alias() {
        let mut live = delegate();
        let snapshot = live.snapshot();

        live.set_parent_key(NodeKey::new(4));
        live.set_hash(Some(B3Digest::of(b"content")));

        assert_eq!(NodeKey::new(3), snapshot.parent_key());
        assert_eq!(None, snapshot.hash());
        assert_eq!(NodeKey::new(7), snapshot.node_key());
        assert_eq!(Revision::new(2), snapshot.revision());
    }

    #[test]
    fn null_parent() {
        let mut d = delegate();
        assert!(d.has_parent());
        d.set_parent_key(NodeKey::NULL);
        assert!(!d.has_parent());
    }
}
