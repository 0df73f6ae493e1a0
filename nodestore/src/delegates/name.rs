use crate::{NameKey, NodeKey};

/// Interned name components plus the link into the path summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameNodeDelegate {
    uri_key: NameKey,
    prefix_key: NameKey,
    local_name_key: NameKey,
    path_node_key: NodeKey,
}

impl NameNodeDelegate {
    pub fn new(
        uri_key: NameKey,
        prefix_key: NameKey,
        local_name_key: NameKey,
        path_node_key: NodeKey,
    ) -> Self {
        Self {
            uri_key,
            prefix_key,
            local_name_key,
            path_node_key,
        }
    }

    pub fn uri_key(&self) -> NameKey {
        self.uri_key
    }

    pub fn prefix_key(&self) -> NameKey {
        self.prefix_key
    }

    pub fn local_name_key(&self) -> NameKey {
        self.local_name_key
    }

    pub fn path_node_key(&self) -> NodeKey {
        self.path_node_key
    }
}
