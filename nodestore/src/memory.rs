//! An in-memory, copy-on-write implementation of the page store contract.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, instrument, trace, warn};

use crate::config::ResourceConfig;
use crate::delegates::{NameNodeDelegate, NodeDelegate, StructNodeDelegate};
use crate::names::NamePage;
use crate::nodes::{DocumentRootNode, PathNode, Record};
use crate::pagetrx::{NodeReadOnlyTrx, PageTrx, RecordPage, ResourceManager, RevisionRootPage};
use crate::{Error, NameKey, NodeKey, NodeKind, PageKind, QName, Revision};

struct Inner {
    config: ResourceConfig,
    revisions: RwLock<Vec<Arc<RevisionRootPage>>>,
    writer_active: AtomicBool,
}

/// A resource whose revisions live in memory.
///
/// Clones share the same revision history.
#[derive(Clone)]
pub struct MemoryResource {
    inner: Arc<Inner>,
}

impl Default for MemoryResource {
    fn default() -> Self {
        Self::new(ResourceConfig::default())
    }
}

impl MemoryResource {
    /// Creates a resource holding only the bootstrap revision.
    pub fn new(config: ResourceConfig) -> Self {
        let bootstrap = bootstrap_revision(&config);
        Self {
            inner: Arc::new(Inner {
                config,
                revisions: RwLock::new(vec![Arc::new(bootstrap)]),
                writer_active: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.inner.config
    }

    /// Opens the write transaction of this resource.
    ///
    /// Fails with [Error::WriterActive] while another one is still alive.
    #[instrument(skip_all)]
    pub fn begin_page_trx(&self) -> Result<MemoryPageTrx, Error> {
        if self
            .inner
            .writer_active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("write transaction requested while another one is active");
            return Err(Error::WriterActive);
        }

        let working = self.latest().successor();
        debug!(revision = %working.revision(), "began page transaction");

        Ok(MemoryPageTrx {
            resource: self.clone(),
            root: Some(working),
        })
    }

    fn latest(&self) -> Arc<RevisionRootPage> {
        let revisions = self.inner.revisions.read();
        // there's always at least the bootstrap revision
        revisions[revisions.len() - 1].clone()
    }

    fn revision_root(&self, revision: Revision) -> Option<Arc<RevisionRootPage>> {
        let index = usize::try_from(revision.get()).ok()?;
        self.inner.revisions.read().get(index).cloned()
    }

    fn publish(&self, root: RevisionRootPage) -> Result<Revision, Error> {
        let mut revisions = self.inner.revisions.write();
        let revision = root.revision();
        if revision.get() != revisions.len() as u64 {
            return Err(Error::StorageError(format!(
                "revision {} does not follow revision {}",
                revision,
                revisions.len() - 1
            )));
        }
        revisions.push(Arc::new(root));
        Ok(revision)
    }
}

impl ResourceManager for MemoryResource {
    type ReadTrx = MemoryNodeReadOnlyTrx;

    fn most_recent_revision_number(&self) -> Revision {
        let revisions = self.inner.revisions.read();
        Revision::new(revisions.len() as u64 - 1)
    }

    fn begin_node_read_only_trx(&self, revision: Revision) -> Result<MemoryNodeReadOnlyTrx, Error> {
        let root = self
            .revision_root(revision)
            .ok_or(Error::RevisionNotFound(revision))?;
        let current = root
            .record_page()
            .get_arc(NodeKey::ROOT)
            .ok_or_else(|| Error::StorageError(format!("revision {} has no root", revision)))?;

        Ok(MemoryNodeReadOnlyTrx {
            resource: self.clone(),
            root,
            current,
        })
    }
}

/// The bootstrap revision: a document root and a path summary root, both at
/// key 0 of their key spaces.
fn bootstrap_revision(config: &ResourceConfig) -> RevisionRootPage {
    let identity = |parent_key| {
        NodeDelegate::new(
            NodeKey::ROOT,
            parent_key,
            config.hash_type,
            NameKey::ABSENT,
            Revision::BOOTSTRAP,
            None,
        )
    };

    let document_root = DocumentRootNode::new(
        identity(NodeKey::NULL),
        StructNodeDelegate::leaf(NodeKey::NULL, NodeKey::NULL),
    );
    let path_root = PathNode::new(
        identity(NodeKey::NULL),
        StructNodeDelegate::leaf(NodeKey::NULL, NodeKey::NULL),
        NameNodeDelegate::new(NameKey::ABSENT, NameKey::ABSENT, NameKey::ABSENT, NodeKey::NULL),
        QName::default(),
        NodeKind::DocumentRoot,
        1,
        0,
    );

    RevisionRootPage::new(
        Revision::BOOTSTRAP,
        RecordPage::with_root(Record::DocumentRoot(document_root)),
        RecordPage::with_root(Record::Path(path_root)),
        NamePage::default(),
    )
}

/// The write transaction of a [MemoryResource].
///
/// Changes accumulate in a working copy of the latest revision and become
/// visible to readers on [MemoryPageTrx::commit].
pub struct MemoryPageTrx {
    resource: MemoryResource,
    root: Option<RevisionRootPage>,
}

impl MemoryPageTrx {
    /// Publishes the working revision and starts the next one.
    #[instrument(skip(self))]
    pub fn commit(&mut self) -> Result<Revision, Error> {
        let root = self.root.take().ok_or(Error::NoRevisionRoot)?;
        let next = root.successor();
        let revision = self.resource.publish(root)?;
        self.root = Some(next);

        debug!(%revision, "committed revision");
        Ok(revision)
    }

    /// Discards uncommitted changes. Later calls fail with
    /// [Error::NoRevisionRoot].
    pub fn close(&mut self) {
        if let Some(root) = self.root.take() {
            debug!(revision = %root.revision(), "closed page transaction");
        }
    }

    pub fn resource(&self) -> &MemoryResource {
        &self.resource
    }

    fn root_mut(&mut self) -> Result<&mut RevisionRootPage, Error> {
        self.root.as_mut().ok_or(Error::NoRevisionRoot)
    }
}

impl Drop for MemoryPageTrx {
    fn drop(&mut self) {
        self.resource
            .inner
            .writer_active
            .store(false, Ordering::Release);
    }
}

impl PageTrx for MemoryPageTrx {
    fn create_name_key(&mut self, name: &str, kind: NodeKind) -> Result<NameKey, Error> {
        Ok(self.root_mut()?.names_mut().create_name_key(name, kind))
    }

    fn create_entry(
        &mut self,
        key: NodeKey,
        record: Record,
        page: PageKind,
        index: i32,
    ) -> Result<Record, Error> {
        trace!(%key, ?page, index, kind = %record.kind(), "storing record");
        let stored = self.root_mut()?.page_mut(page).insert_next(key, record)?;
        Ok(stored.clone())
    }

    fn revision_number(&self) -> Revision {
        match &self.root {
            Some(root) => root.revision(),
            None => self.resource.most_recent_revision_number().next(),
        }
    }

    fn resource_config(&self) -> &ResourceConfig {
        self.resource.config()
    }

    fn actual_revision_root_page(&self) -> Result<&RevisionRootPage, Error> {
        self.root.as_ref().ok_or(Error::NoRevisionRoot)
    }

    fn prepare_entry_for_modification(
        &mut self,
        key: NodeKey,
        page: PageKind,
    ) -> Result<&mut Record, Error> {
        self.root_mut()?
            .page_mut(page)
            .get_mut(key)
            .ok_or_else(|| Error::StorageError(format!("no record with key {} ({:?})", key, page)))
    }

    fn remove_entry(&mut self, key: NodeKey, page: PageKind) -> Result<(), Error> {
        if key == NodeKey::ROOT {
            return Err(Error::InvalidRequest("the root can not be removed".into()));
        }
        self.root_mut()?
            .page_mut(page)
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::StorageError(format!("no record with key {} ({:?})", key, page)))
    }
}

/// A cursor over one committed revision of a [MemoryResource].
pub struct MemoryNodeReadOnlyTrx {
    resource: MemoryResource,
    root: Arc<RevisionRootPage>,
    current: Arc<Record>,
}

impl MemoryNodeReadOnlyTrx {
    pub fn revision_root(&self) -> &RevisionRootPage {
        &self.root
    }
}

impl NodeReadOnlyTrx for MemoryNodeReadOnlyTrx {
    type ResourceManager = MemoryResource;

    fn move_to(&mut self, key: NodeKey) -> bool {
        match self.root.record_page().get_arc(key) {
            Some(record) => {
                self.current = record;
                true
            }
            None => false,
        }
    }

    fn node_key(&self) -> NodeKey {
        self.current.as_node().node_key()
    }

    fn record(&self) -> &Record {
        &self.current
    }

    fn revision_number(&self) -> Revision {
        self.root.revision()
    }

    fn resource_manager(&self) -> &MemoryResource {
        &self.resource
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::MemoryResource;
    use crate::config::HashType;
    use crate::delegates::{NodeDelegate, StructNodeDelegate, ValueNodeDelegate};
    use crate::nodes::{CommentNode, Record};
    use crate::pagetrx::{NodeReadOnlyTrx, PageTrx, ResourceManager};
    use crate::{Error, NameKey, NodeKey, NodeKind, PageKind, Revision};

    #[test]
    fn bootstrap_revision() {
        let resource = MemoryResource::default();
        assert_eq!(Revision::BOOTSTRAP, resource.most_recent_revision_number());

        let rtx = resource
            .begin_node_read_only_trx(Revision::BOOTSTRAP)
            .expect("must open");
        assert_eq!(NodeKey::ROOT, rtx.node_key());
        assert_eq!(NodeKind::DocumentRoot, rtx.kind());
        assert_eq!(
            NodeKey::ROOT,
            rtx.revision_root().path_summary_page().max_node_key()
        );
    }

    #[test]
    fn single_writer() {
        let resource = MemoryResource::default();
        let wtx = resource.begin_page_trx().expect("must open");
        assert!(matches!(resource.begin_page_trx(), Err(Error::WriterActive)));

        drop(wtx);
        resource.begin_page_trx().expect("must open after drop");
    }

    #[test]
    fn commit_publishes_revision() {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();
        assert_eq!(Revision::FIRST, wtx.revision_number());

        assert_eq!(Revision::FIRST, wtx.commit().unwrap());
        assert_eq!(Revision::new(2), wtx.revision_number());
        assert_eq!(Revision::FIRST, resource.most_recent_revision_number());

        assert_eq!(
            Err(Error::RevisionNotFound(Revision::new(2))),
            resource
                .begin_node_read_only_trx(Revision::new(2))
                .map(|_| ())
        );
    }

    #[test]
    fn closed_trx_has_no_root() {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();
        wtx.close();

        assert!(matches!(
            wtx.actual_revision_root_page(),
            Err(Error::NoRevisionRoot)
        ));
        assert_eq!(Err(Error::NoRevisionRoot), wtx.commit());
    }

    #[test]
    fn modifications_do_not_leak_into_committed_revisions() {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();

        wtx.prepare_entry_for_modification(NodeKey::ROOT, PageKind::Record)
            .unwrap()
            .as_struct_mut()
            .unwrap()
            .struct_delegate_mut()
            .increment_child_count();
        wtx.commit().unwrap();

        let bootstrap = resource
            .begin_node_read_only_trx(Revision::BOOTSTRAP)
            .unwrap();
        let first = resource.begin_node_read_only_trx(Revision::FIRST).unwrap();
        assert_eq!(0, bootstrap.child_count());
        assert_eq!(1, first.child_count());
        assert_eq!(
            1,
            first.record().as_struct().map(|s| s.child_count()).unwrap()
        );
    }

    #[test]
    fn root_can_not_be_removed() {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();
        assert!(wtx.remove_entry(NodeKey::ROOT, PageKind::Record).is_err());
    }

    #[test]
    fn move_to_missing_key_keeps_cursor() {
        let resource = MemoryResource::default();
        let mut rtx = resource
            .begin_node_read_only_trx(Revision::BOOTSTRAP)
            .unwrap();

        assert!(!rtx.move_to(NodeKey::new(42)));
        assert_eq!(NodeKey::ROOT, rtx.node_key());
        assert!(rtx.move_to(NodeKey::ROOT));
    }

    #[test]
    fn empty_names_are_never_interned() {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();

        assert_eq!(
            Ok(NameKey::ABSENT),
            wtx.create_name_key("", NodeKind::Element)
        );
        let names = wtx.actual_revision_root_page().unwrap().names();
        assert_eq!(None, names.name_key("", NodeKind::Element));

        // the first real name still gets the first key of its partition
        assert_eq!(
            Ok(NameKey::new(0)),
            wtx.create_name_key("a", NodeKind::Element)
        );
    }

    fn comment(key: u64) -> Record {
        CommentNode::new(
            NodeDelegate::new(
                NodeKey::new(key),
                NodeKey::ROOT,
                HashType::None,
                NameKey::ABSENT,
                Revision::FIRST,
                None,
            ),
            StructNodeDelegate::leaf(NodeKey::NULL, NodeKey::NULL),
            ValueNodeDelegate::new(Bytes::from_static(b"c"), false),
        )
        .into()
    }

    #[test]
    fn create_entry_returns_stored_record() {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();

        let stored = wtx
            .create_entry(NodeKey::new(1), comment(1), PageKind::Record, -1)
            .expect("next key must be accepted");
        assert_eq!(comment(1), stored);
        assert_eq!(
            Some(&comment(1)),
            wtx.record(NodeKey::new(1), PageKind::Record).unwrap()
        );

        assert!(matches!(
            wtx.create_entry(NodeKey::new(3), comment(3), PageKind::Record, -1),
            Err(Error::StorageError(_))
        ));
        assert_eq!(
            NodeKey::new(1),
            wtx.actual_revision_root_page().unwrap().max_node_key()
        );
    }
}
