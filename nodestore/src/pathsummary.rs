//! Maintenance of the path summary.
//!
//! The path summary is a tree holding one [PathNode] per distinct
//! root-to-node label path of the document. Its root is the path node with
//! key 0, created together with the resource. Document nodes point at their
//! path node through `path_node_key`.
use tracing::{debug, trace};

use crate::delegates::{Node, StructNode, StructNodeDelegate};
use crate::dewey::DeweyId;
use crate::factory::{require_local_name, NodeFactory};
use crate::nodes::{ArrayNode, AttributeNode, ElementNode, PathNode, Record};
use crate::pagetrx::PageTrx;
use crate::{Error, NodeKey, NodeKind, PageKind, QName};

/// Label of path nodes standing for arrays, which have no name of their own.
pub const ARRAY_PATH_LABEL: &str = "__array__";

impl<T: PageTrx> NodeFactory<T> {
    /// Looks up the child of `parent_path_key` labelled `name` describing
    /// nodes of `kind`.
    pub fn find_path_child(
        &self,
        parent_path_key: NodeKey,
        name: &QName,
        kind: NodeKind,
    ) -> Result<Option<NodeKey>, Error> {
        let parent = self.path_node(parent_path_key)?;
        let page = self.trx.actual_revision_root_page()?.path_summary_page();

        let mut current = parent.first_child_key();
        while !current.is_null() {
            let child = match page.get(current) {
                Some(Record::Path(child)) => child,
                _ => {
                    return Err(Error::StorageError(format!(
                        "path node {} links to missing child {}",
                        parent_path_key, current
                    )))
                }
            };
            if child.path_kind() == kind && same_label(child.name(), name) {
                return Ok(Some(current));
            }
            current = child.right_sibling_key();
        }
        Ok(None)
    }

    /// Returns the path node for `name` below `parent_path_key`, creating it
    /// if this label path is new.
    ///
    /// Reusing a path node adds a reference to it. A new path node becomes
    /// the first child of its parent, and every ancestor's descendant count
    /// grows by one.
    pub fn get_or_create_path_node(
        &mut self,
        parent_path_key: NodeKey,
        name: &QName,
        kind: NodeKind,
    ) -> Result<NodeKey, Error> {
        if let Some(existing) = self.find_path_child(parent_path_key, name, kind)? {
            if let Record::Path(path) = self
                .trx
                .prepare_entry_for_modification(existing, PageKind::PathSummary)?
            {
                path.increment_references();
                trace!(path_node_key = %existing, references = path.references(), "reusing path node");
            }
            return Ok(existing);
        }

        let parent = self.path_node(parent_path_key)?;
        let level = parent.level() + 1;
        let right_sibling_key = parent.first_child_key();

        let created = self.create_path_node(
            parent_path_key,
            NodeKey::NULL,
            right_sibling_key,
            name,
            kind,
            level,
        )?;
        let key = created.node_key();

        if !right_sibling_key.is_null() {
            self.modify_path_structure(right_sibling_key, |s| s.set_left_sibling_key(key))?;
        }
        self.modify_path_structure(parent_path_key, |s| {
            s.set_first_child_key(key);
            s.increment_child_count();
        })?;

        let mut ancestor = parent_path_key;
        while !ancestor.is_null() {
            ancestor = self.modify_path_structure(ancestor, |s| s.increment_descendant_count())?;
        }

        debug!(path_node_key = %key, %name, level, "created path node");
        Ok(key)
    }

    /// Creates an element together with its path summary entry.
    pub fn create_element_at_path(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        name: &QName,
        parent_path_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<ElementNode, Error> {
        require_local_name(name, NodeKind::Element)?;
        let path_node_key = self.get_or_create_path_node(parent_path_key, name, NodeKind::Element)?;
        self.create_element(
            parent_key,
            left_sibling_key,
            right_sibling_key,
            name,
            path_node_key,
            dewey_id,
        )
    }

    /// Creates an attribute together with its path summary entry.
    pub fn create_attribute_at_path(
        &mut self,
        parent_key: NodeKey,
        name: &QName,
        value: &[u8],
        parent_path_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<AttributeNode, Error> {
        require_local_name(name, NodeKind::Attribute)?;
        let path_node_key =
            self.get_or_create_path_node(parent_path_key, name, NodeKind::Attribute)?;
        self.create_attribute(parent_key, name, value, path_node_key, dewey_id)
    }

    /// Creates an array together with its path summary entry.
    pub fn create_array_at_path(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        parent_path_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<ArrayNode, Error> {
        let path_node_key = self.get_or_create_path_node(
            parent_path_key,
            &QName::local(ARRAY_PATH_LABEL),
            NodeKind::Array,
        )?;
        self.create_array(
            parent_key,
            left_sibling_key,
            right_sibling_key,
            path_node_key,
            dewey_id,
        )
    }

    fn path_node(&self, key: NodeKey) -> Result<&PathNode, Error> {
        match self.trx.record(key, PageKind::PathSummary)? {
            Some(Record::Path(path)) => Ok(path),
            Some(other) => Err(Error::StorageError(format!(
                "path summary entry {} is a {}",
                key,
                other.kind()
            ))),
            None => Err(Error::InvalidRequest(format!(
                "path node {} does not exist",
                key
            ))),
        }
    }

    /// Applies `f` to the links of a path node and returns its parent key.
    fn modify_path_structure<F>(&mut self, key: NodeKey, f: F) -> Result<NodeKey, Error>
    where
        F: FnOnce(&mut StructNodeDelegate),
    {
        let record = self
            .trx
            .prepare_entry_for_modification(key, PageKind::PathSummary)?;
        let parent_key = record.as_node().parent_key();
        match record.as_struct_mut() {
            Some(structure) => f(structure.struct_delegate_mut()),
            None => {
                return Err(Error::StorageError(format!(
                    "path summary entry {} has no links",
                    key
                )))
            }
        }
        Ok(parent_key)
    }
}

/// Prefixes are only aliases for the namespace URI and do not tell paths apart.
fn same_label(a: &QName, b: &QName) -> bool {
    a.namespace_uri() == b.namespace_uri() && a.local_name() == b.local_name()
}
