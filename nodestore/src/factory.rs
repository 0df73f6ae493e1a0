use bytes::Bytes;
use tracing::{debug, instrument, warn};

use crate::compression::maybe_compress;
use crate::config::ResourceConfig;
use crate::delegates::{NameNodeDelegate, NodeDelegate, StructNodeDelegate, ValueNodeDelegate};
use crate::dewey::DeweyId;
use crate::nodes::{
    ArrayNode, AttributeNode, CommentNode, ElementNode, NamespaceNode, PINode, PathNode, Record,
    TextNode,
};
use crate::pagetrx::PageTrx;
use crate::{Error, NameKey, NodeKey, NodeKind, PageKind, QName};

/// Type annotation of every node created by the factory.
pub const UNTYPED: &str = "xs:untyped";

/// Creates node records and stores them through a [PageTrx].
///
/// Every call allocates the next key of the record's key space and may add
/// names to the dictionary. A call either stores one complete record or
/// fails before touching the transaction.
pub struct NodeFactory<T> {
    pub(crate) trx: T,
    config: ResourceConfig,
    type_key: NameKey,
}

impl<T: PageTrx> NodeFactory<T> {
    /// Creates a factory writing through `trx`. Records are stamped with the
    /// settings of the resource `trx` belongs to.
    pub fn new(mut trx: T) -> Result<Self, Error> {
        let config = trx.resource_config().clone();

        trx.create_name_key(UNTYPED, NodeKind::Attribute)?;
        trx.create_name_key(UNTYPED, NodeKind::Namespace)?;
        trx.create_name_key(UNTYPED, NodeKind::ProcessingInstruction)?;
        let type_key = trx.create_name_key(UNTYPED, NodeKind::Element)?;

        Ok(Self {
            trx,
            config,
            type_key,
        })
    }

    pub fn trx(&self) -> &T {
        &self.trx
    }

    pub fn trx_mut(&mut self) -> &mut T {
        &mut self.trx
    }

    pub fn into_inner(self) -> T {
        self.trx
    }

    #[instrument(skip_all, fields(%parent_key, %name))]
    pub fn create_element(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        name: &QName,
        path_node_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<ElementNode, Error> {
        require_local_name(name, NodeKind::Element)?;
        let node_key = self.next_node_key()?;

        let uri_key = self.name_key(name.namespace_uri(), NodeKind::Namespace)?;
        let prefix_key = self.name_key(name.prefix(), NodeKind::Element)?;
        let local_name_key = self.name_key(name.local_name(), NodeKind::Element)?;

        let node = self.identity(node_key, parent_key, dewey_id);
        let structure = StructNodeDelegate::leaf(left_sibling_key, right_sibling_key);
        let name_delegate =
            NameNodeDelegate::new(uri_key, prefix_key, local_name_key, path_node_key);

        self.store(
            ElementNode::new(node, structure, name_delegate, name.clone()).into(),
            PageKind::Record,
            -1,
        )
    }

    #[instrument(skip_all, fields(%parent_key, %name))]
    pub fn create_attribute(
        &mut self,
        parent_key: NodeKey,
        name: &QName,
        value: &[u8],
        path_node_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<AttributeNode, Error> {
        require_local_name(name, NodeKind::Attribute)?;
        let node_key = self.next_node_key()?;

        let uri_key = self.name_key(name.namespace_uri(), NodeKind::Namespace)?;
        let prefix_key = self.name_key(name.prefix(), NodeKind::Attribute)?;
        let local_name_key = self.name_key(name.local_name(), NodeKind::Attribute)?;

        let node = self.identity(node_key, parent_key, dewey_id);
        let name_delegate =
            NameNodeDelegate::new(uri_key, prefix_key, local_name_key, path_node_key);
        let value = ValueNodeDelegate::new(Bytes::copy_from_slice(value), false);

        self.store(
            AttributeNode::new(node, name_delegate, value, name.clone()).into(),
            PageKind::Record,
            -1,
        )
    }

    /// Namespace declarations have no local name; an empty URI and prefix
    /// (undeclaring the default namespace) is valid.
    #[instrument(skip_all, fields(%parent_key, %name))]
    pub fn create_namespace(
        &mut self,
        parent_key: NodeKey,
        name: &QName,
        path_node_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<NamespaceNode, Error> {
        let node_key = self.next_node_key()?;

        let uri_key = self.name_key(name.namespace_uri(), NodeKind::Namespace)?;
        let prefix_key = self.name_key(name.prefix(), NodeKind::Namespace)?;

        let node = self.identity(node_key, parent_key, dewey_id);
        let name_delegate =
            NameNodeDelegate::new(uri_key, prefix_key, NameKey::ABSENT, path_node_key);

        self.store(
            NamespaceNode::new(node, name_delegate, name.clone()).into(),
            PageKind::Record,
            -1,
        )
    }

    #[instrument(skip(self, value, dewey_id), fields(value.len = value.len()))]
    pub fn create_text(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        value: &[u8],
        compress: bool,
        dewey_id: Option<DeweyId>,
    ) -> Result<TextNode, Error> {
        let node_key = self.next_node_key()?;
        let (stored, compressed) = maybe_compress(value, compress)?;

        let node = self.identity(node_key, parent_key, dewey_id);
        let structure = StructNodeDelegate::leaf(left_sibling_key, right_sibling_key);
        let value = ValueNodeDelegate::new(stored, compressed);

        self.store(
            TextNode::new(node, structure, value).into(),
            PageKind::Record,
            -1,
        )
    }

    #[instrument(skip(self, value, dewey_id), fields(value.len = value.len()))]
    pub fn create_comment(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        value: &[u8],
        compress: bool,
        dewey_id: Option<DeweyId>,
    ) -> Result<CommentNode, Error> {
        let node_key = self.next_node_key()?;
        let (stored, compressed) = maybe_compress(value, compress)?;

        let node = self.identity(node_key, parent_key, dewey_id);
        let structure = StructNodeDelegate::leaf(left_sibling_key, right_sibling_key);
        let value = ValueNodeDelegate::new(stored, compressed);

        self.store(
            CommentNode::new(node, structure, value).into(),
            PageKind::Record,
            -1,
        )
    }

    /// The content of a processing instruction is always stored verbatim;
    /// `_compress` is accepted for symmetry with text and comments.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(%parent_key, %target))]
    pub fn create_pi(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        target: &QName,
        content: &[u8],
        _compress: bool,
        path_node_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<PINode, Error> {
        require_local_name(target, NodeKind::ProcessingInstruction)?;
        let node_key = self.next_node_key()?;

        let prefix_key = self.name_key(target.prefix(), NodeKind::ProcessingInstruction)?;
        let local_name_key =
            self.name_key(target.local_name(), NodeKind::ProcessingInstruction)?;
        let uri_key = self.name_key(target.namespace_uri(), NodeKind::Namespace)?;

        let node = self.identity(node_key, parent_key, dewey_id);
        let structure = StructNodeDelegate::leaf(left_sibling_key, right_sibling_key);
        let name_delegate =
            NameNodeDelegate::new(uri_key, prefix_key, local_name_key, path_node_key);
        let value = ValueNodeDelegate::new(Bytes::copy_from_slice(content), false);

        self.store(
            PINode::new(node, structure, name_delegate, value, target.clone()).into(),
            PageKind::Record,
            -1,
        )
    }

    #[instrument(skip(self, dewey_id))]
    pub fn create_array(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        path_node_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> Result<ArrayNode, Error> {
        let node_key = self.next_node_key()?;

        let node = self.identity(node_key, parent_key, dewey_id);
        let structure = StructNodeDelegate::leaf(left_sibling_key, right_sibling_key);

        self.store(
            ArrayNode::new(node, structure, path_node_key).into(),
            PageKind::Record,
            -1,
        )
    }

    /// Creates an entry of the path summary.
    ///
    /// Path nodes are keyed by the path summary's own counter. `level` is the
    /// depth of the path and is taken as given.
    #[instrument(skip_all, fields(%parent_key, %name, %kind))]
    pub fn create_path_node(
        &mut self,
        parent_key: NodeKey,
        left_sibling_key: NodeKey,
        right_sibling_key: NodeKey,
        name: &QName,
        kind: NodeKind,
        level: u32,
    ) -> Result<PathNode, Error> {
        if kind.is_named() && kind != NodeKind::Namespace {
            require_local_name(name, kind)?;
        }
        let node_key = self
            .trx
            .actual_revision_root_page()?
            .path_summary_page()
            .max_node_key()
            .successor();

        let uri_key = self.name_key(name.namespace_uri(), NodeKind::Namespace)?;
        let prefix_key = self.name_key(name.prefix(), kind)?;
        let local_name_key = self.name_key(name.local_name(), kind)?;

        let node = self.identity(node_key, parent_key, None);
        let structure = StructNodeDelegate::leaf(left_sibling_key, right_sibling_key);
        let name_delegate = NameNodeDelegate::new(uri_key, prefix_key, local_name_key, node_key);

        self.store(
            PathNode::new(node, structure, name_delegate, name.clone(), kind, 1, level).into(),
            PageKind::PathSummary,
            0,
        )
    }

    /// The key the next document node will be stored under.
    fn next_node_key(&self) -> Result<NodeKey, Error> {
        Ok(self
            .trx
            .actual_revision_root_page()?
            .max_node_key()
            .successor())
    }

    fn name_key(&mut self, component: &str, kind: NodeKind) -> Result<NameKey, Error> {
        if component.is_empty() {
            Ok(NameKey::ABSENT)
        } else {
            self.trx.create_name_key(component, kind)
        }
    }

    fn identity(
        &self,
        node_key: NodeKey,
        parent_key: NodeKey,
        dewey_id: Option<DeweyId>,
    ) -> NodeDelegate {
        NodeDelegate::new(
            node_key,
            parent_key,
            self.config.hash_type,
            self.type_key,
            self.trx.revision_number(),
            dewey_id.filter(|_| self.config.store_dewey_ids),
        )
    }

    fn store<N>(&mut self, record: Record, page: PageKind, index: i32) -> Result<N, Error>
    where
        N: TryFrom<Record, Error = Error>,
    {
        let node_key = record.as_node().node_key();
        let kind = record.kind();
        let stored = self.trx.create_entry(node_key, record, page, index)?;
        debug!(%node_key, %kind, "created node");

        N::try_from(stored)
    }
}

pub(crate) fn require_local_name(name: &QName, kind: NodeKind) -> Result<(), Error> {
    if name.local_name().is_empty() {
        warn!(%kind, "refusing to create node without local name");
        return Err(Error::InvalidRequest(format!(
            "{} nodes require a non-empty local name",
            kind
        )));
    }
    Ok(())
}
