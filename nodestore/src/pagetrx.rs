//! The contract between the node layer and the transactional page store.
//!
//! Writers go through a [PageTrx], of which the store allows only one per
//! resource at a time. Readers open a [NodeReadOnlyTrx] bound to a single
//! committed revision through the [ResourceManager]; any number of those may
//! exist at once, each with its own cursor.
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ResourceConfig;
use crate::names::NamePage;
use crate::nodes::Record;
use crate::{Error, NameKey, NodeKey, NodeKind, PageKind, Revision};

/// One key space of records together with its key counter.
#[derive(Clone, Debug)]
pub struct RecordPage {
    max_node_key: NodeKey,
    records: HashMap<NodeKey, Arc<Record>>,
}

impl RecordPage {
    pub(crate) fn with_root(root: Record) -> Self {
        let mut records = HashMap::new();
        records.insert(NodeKey::ROOT, Arc::new(root));
        Self {
            max_node_key: NodeKey::ROOT,
            records,
        }
    }

    /// Highest key ever allocated in this key space. Removing records does
    /// not lower it.
    pub fn max_node_key(&self) -> NodeKey {
        self.max_node_key
    }

    pub fn get(&self, key: NodeKey) -> Option<&Record> {
        self.records.get(&key).map(|r| r.as_ref())
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.records.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn get_arc(&self, key: NodeKey) -> Option<Arc<Record>> {
        self.records.get(&key).cloned()
    }

    /// Stores a record under the next free key.
    pub(crate) fn insert_next(&mut self, key: NodeKey, record: Record) -> Result<&Record, Error> {
        if key != self.max_node_key.successor() {
            return Err(Error::StorageError(format!(
                "expected key {} to be allocated next, got {}",
                self.max_node_key.successor(),
                key
            )));
        }
        self.max_node_key = key;
        let stored = self.records.entry(key).or_insert(Arc::new(record));
        Ok(&**stored)
    }

    /// Copy-on-write access to a record. Records shared with committed
    /// revisions are cloned first.
    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Record> {
        self.records.get_mut(&key).map(Arc::make_mut)
    }

    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<Arc<Record>> {
        self.records.remove(&key)
    }
}

/// The root of one revision: its document records, its path summary and
/// its name dictionary.
#[derive(Clone, Debug)]
pub struct RevisionRootPage {
    revision: Revision,
    records: RecordPage,
    path_summary: RecordPage,
    names: NamePage,
}

impl RevisionRootPage {
    pub(crate) fn new(
        revision: Revision,
        records: RecordPage,
        path_summary: RecordPage,
        names: NamePage,
    ) -> Self {
        Self {
            revision,
            records,
            path_summary,
            names,
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Highest document node key allocated so far.
    pub fn max_node_key(&self) -> NodeKey {
        self.records.max_node_key()
    }

    pub fn record_page(&self) -> &RecordPage {
        &self.records
    }

    pub fn path_summary_page(&self) -> &RecordPage {
        &self.path_summary
    }

    pub fn names(&self) -> &NamePage {
        &self.names
    }

    pub fn page(&self, page: PageKind) -> &RecordPage {
        match page {
            PageKind::Record => &self.records,
            PageKind::PathSummary => &self.path_summary,
        }
    }

    pub(crate) fn page_mut(&mut self, page: PageKind) -> &mut RecordPage {
        match page {
            PageKind::Record => &mut self.records,
            PageKind::PathSummary => &mut self.path_summary,
        }
    }

    pub(crate) fn names_mut(&mut self) -> &mut NamePage {
        &mut self.names
    }

    /// Starts the working copy of the revision following this one.
    pub(crate) fn successor(&self) -> Self {
        Self {
            revision: self.revision.next(),
            ..self.clone()
        }
    }
}

/// Write access to the revision under construction.
pub trait PageTrx {
    /// Interns a name in the partition of `kind`.
    fn create_name_key(&mut self, name: &str, kind: NodeKind) -> Result<NameKey, Error>;

    /// Stores a freshly composed record under `key` and returns the stored
    /// record. `index` is a placement hint for the store; `-1` picks the default.
    fn create_entry(
        &mut self,
        key: NodeKey,
        record: Record,
        page: PageKind,
        index: i32,
    ) -> Result<Record, Error>;

    /// Number of the revision being written.
    fn revision_number(&self) -> Revision;

    /// Settings of the resource this transaction writes to.
    fn resource_config(&self) -> &ResourceConfig;

    fn actual_revision_root_page(&self) -> Result<&RevisionRootPage, Error>;

    /// Writable copy of a record of the revision under construction.
    fn prepare_entry_for_modification(
        &mut self,
        key: NodeKey,
        page: PageKind,
    ) -> Result<&mut Record, Error>;

    /// Removes a record from the revision under construction. Its key is
    /// never handed out again.
    fn remove_entry(&mut self, key: NodeKey, page: PageKind) -> Result<(), Error>;

    fn record(&self, key: NodeKey, page: PageKind) -> Result<Option<&Record>, Error> {
        Ok(self.actual_revision_root_page()?.page(page).get(key))
    }
}

impl<T> PageTrx for &mut T
where
    T: PageTrx + ?Sized,
{
    fn create_name_key(&mut self, name: &str, kind: NodeKind) -> Result<NameKey, Error> {
        (**self).create_name_key(name, kind)
    }

    fn create_entry(
        &mut self,
        key: NodeKey,
        record: Record,
        page: PageKind,
        index: i32,
    ) -> Result<Record, Error> {
        (**self).create_entry(key, record, page, index)
    }

    fn revision_number(&self) -> Revision {
        (**self).revision_number()
    }

    fn resource_config(&self) -> &ResourceConfig {
        (**self).resource_config()
    }

    fn actual_revision_root_page(&self) -> Result<&RevisionRootPage, Error> {
        (**self).actual_revision_root_page()
    }

    fn prepare_entry_for_modification(
        &mut self,
        key: NodeKey,
        page: PageKind,
    ) -> Result<&mut Record, Error> {
        (**self).prepare_entry_for_modification(key, page)
    }

    fn remove_entry(&mut self, key: NodeKey, page: PageKind) -> Result<(), Error> {
        (**self).remove_entry(key, page)
    }
}

/// A cursor over the records of one committed revision.
///
/// Moving the cursor only changes the transaction's own state. A transaction
/// must not be shared between callers that navigate independently.
pub trait NodeReadOnlyTrx: Sized {
    type ResourceManager: ResourceManager<ReadTrx = Self>;

    /// Moves to `key`. Returns false, leaving the cursor where it was, if the
    /// key does not exist in this revision.
    fn move_to(&mut self, key: NodeKey) -> bool;

    fn node_key(&self) -> NodeKey;

    /// The record under the cursor.
    fn record(&self) -> &Record;

    fn kind(&self) -> NodeKind {
        self.record().kind()
    }

    fn child_count(&self) -> u64 {
        self.record()
            .as_struct()
            .map(|s| s.child_count())
            .unwrap_or(0)
    }

    fn revision_number(&self) -> Revision;

    fn resource_manager(&self) -> &Self::ResourceManager;
}

/// Access to the revision history of one resource.
pub trait ResourceManager: Clone {
    type ReadTrx: NodeReadOnlyTrx<ResourceManager = Self>;

    fn most_recent_revision_number(&self) -> Revision;

    /// Opens a read-only transaction bound to `revision`.
    fn begin_node_read_only_trx(&self, revision: Revision) -> Result<Self::ReadTrx, Error>;
}
