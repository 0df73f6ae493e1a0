//! The capability records node kinds are composed of.
//!
//! A record embeds a [NodeDelegate] and whichever of [StructNodeDelegate],
//! [NameNodeDelegate] and [ValueNodeDelegate] its kind needs. The traits in
//! this module expose the delegates and offer thin accessors on top, so code
//! can be written against a capability instead of a concrete kind.
mod name;
mod node;
mod structural;
mod value;

pub use name::NameNodeDelegate;
pub use node::NodeDelegate;
pub use structural::StructNodeDelegate;
pub use value::ValueNodeDelegate;

use bytes::Bytes;

use crate::dewey::DeweyId;
use crate::{B3Digest, Error, NameKey, NodeKey, NodeKind, Revision};

/// Implemented by every record.
pub trait Node {
    fn kind(&self) -> NodeKind;

    fn node_delegate(&self) -> &NodeDelegate;

    fn node_delegate_mut(&mut self) -> &mut NodeDelegate;

    fn node_key(&self) -> NodeKey {
        self.node_delegate().node_key()
    }

    fn parent_key(&self) -> NodeKey {
        self.node_delegate().parent_key()
    }

    fn set_parent_key(&mut self, parent_key: NodeKey) {
        self.node_delegate_mut().set_parent_key(parent_key)
    }

    fn hash(&self) -> Option<&B3Digest> {
        self.node_delegate().hash()
    }

    fn set_hash(&mut self, hash: Option<B3Digest>) {
        self.node_delegate_mut().set_hash(hash)
    }

    fn type_key(&self) -> NameKey {
        self.node_delegate().type_key()
    }

    fn revision(&self) -> Revision {
        self.node_delegate().revision()
    }

    fn dewey_id(&self) -> Option<&DeweyId> {
        self.node_delegate().dewey_id()
    }
}

/// Records that take part in the tree structure.
pub trait StructNode: Node {
    fn struct_delegate(&self) -> &StructNodeDelegate;

    fn struct_delegate_mut(&mut self) -> &mut StructNodeDelegate;

    fn first_child_key(&self) -> NodeKey {
        self.struct_delegate().first_child_key()
    }

    fn left_sibling_key(&self) -> NodeKey {
        self.struct_delegate().left_sibling_key()
    }

    fn right_sibling_key(&self) -> NodeKey {
        self.struct_delegate().right_sibling_key()
    }

    fn child_count(&self) -> u64 {
        self.struct_delegate().child_count()
    }

    fn descendant_count(&self) -> u64 {
        self.struct_delegate().descendant_count()
    }
}

/// Records identified by a qualified name.
pub trait NameNode: Node {
    fn name_delegate(&self) -> &NameNodeDelegate;

    fn uri_key(&self) -> NameKey {
        self.name_delegate().uri_key()
    }

    fn prefix_key(&self) -> NameKey {
        self.name_delegate().prefix_key()
    }

    fn local_name_key(&self) -> NameKey {
        self.name_delegate().local_name_key()
    }

    fn path_node_key(&self) -> NodeKey {
        self.name_delegate().path_node_key()
    }
}

/// Records carrying a byte payload.
pub trait ValueNode: Node {
    fn value_delegate(&self) -> &ValueNodeDelegate;

    fn is_compressed(&self) -> bool {
        self.value_delegate().is_compressed()
    }

    /// The uncompressed payload.
    fn raw_value(&self) -> Result<Bytes, Error> {
        self.value_delegate().raw_value()
    }
}
