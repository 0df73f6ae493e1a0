use std::fmt;

use parking_lot::Mutex;

use super::axis::{IncludeSelf, TemporalAxis};
use crate::nodes::Record;
use crate::pagetrx::{NodeReadOnlyTrx, ResourceManager};
use crate::{Error, NodeKey, NodeKind, Revision};

/// A node as seen in one revision, navigable through the revision history.
///
/// The handle owns a read-only transaction and remembers the key it was
/// created for. Since the transaction is a cursor which may have been
/// moved, every query first moves it back onto that key.
pub struct TemporalNode<R: ResourceManager> {
    trx: Mutex<R::ReadTrx>,
    node_key: NodeKey,
    kind: NodeKind,
    revision: Revision,
}

impl<R: ResourceManager> TemporalNode<R> {
    /// Wraps a transaction positioned on the node of interest.
    pub fn new(trx: R::ReadTrx) -> Self {
        Self {
            node_key: trx.node_key(),
            kind: trx.kind(),
            revision: trx.revision_number(),
            trx: Mutex::new(trx),
        }
    }

    /// Opens the node `node_key` in `revision`, if it exists there.
    pub fn open(resource: &R, revision: Revision, node_key: NodeKey) -> Result<Option<Self>, Error> {
        let mut trx = resource.begin_node_read_only_trx(revision)?;
        if !trx.move_to(node_key) {
            return Ok(None);
        }
        Ok(Some(Self::new(trx)))
    }

    fn with_trx<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R::ReadTrx) -> T,
    {
        let mut trx = self.trx.lock();
        // the key existed when the handle was made and the revision is immutable
        trx.move_to(self.node_key);
        f(&*trx)
    }

    pub fn node_key(&self) -> NodeKey {
        self.with_trx(|trx| trx.node_key())
    }

    pub fn child_count(&self) -> u64 {
        self.with_trx(|trx| trx.child_count())
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// A copy of the node's record in this handle's revision.
    pub fn record(&self) -> Record {
        self.with_trx(|trx| trx.record().clone())
    }

    fn axis<F>(&self, make: F) -> TemporalAxis<R>
    where
        F: FnOnce(&R::ReadTrx) -> TemporalAxis<R>,
    {
        self.with_trx(make)
    }

    fn single(mut axis: TemporalAxis<R>) -> Result<Option<Self>, Error> {
        axis.next().transpose().map(|trx| trx.map(Self::new))
    }

    /// The node in the revision directly following this one.
    pub fn next(&self) -> Result<Option<Self>, Error> {
        Self::single(self.axis(TemporalAxis::next_revision))
    }

    /// The node in the revision directly preceding this one.
    pub fn previous(&self) -> Result<Option<Self>, Error> {
        Self::single(self.axis(TemporalAxis::previous_revision))
    }

    /// The node in the earliest revision it exists in.
    pub fn first(&self) -> Result<Option<Self>, Error> {
        Self::single(self.axis(TemporalAxis::first_revision))
    }

    /// The node in the most recent revision it exists in.
    pub fn last(&self) -> Result<Option<Self>, Error> {
        Self::single(self.axis(TemporalAxis::last_revision))
    }

    /// The node in all later revisions, oldest first.
    pub fn future(
        &self,
        include_self: IncludeSelf,
    ) -> impl Iterator<Item = Result<Self, Error>> {
        self.axis(|trx| TemporalAxis::future(trx, include_self))
            .map(|trx| trx.map(Self::new))
    }

    /// The node in all earlier revisions, nearest first.
    pub fn past(&self, include_self: IncludeSelf) -> impl Iterator<Item = Result<Self, Error>> {
        self.axis(|trx| TemporalAxis::past(trx, include_self))
            .map(|trx| trx.map(Self::new))
    }

    /// The node in every revision it exists in, oldest first.
    pub fn all_times(&self) -> impl Iterator<Item = Result<Self, Error>> {
        self.axis(TemporalAxis::all_time)
            .map(|trx| trx.map(Self::new))
    }

    /// Handles for different kinds of nodes never relate.
    fn comparable(&self, other: &Self) -> bool {
        self.kind == other.kind
    }

    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }

    /// True if this handle's revision immediately follows `other`'s.
    pub fn is_next_of(&self, other: &Self) -> bool {
        self.comparable(other) && self.revision == other.revision.next()
    }

    /// True if this handle's revision immediately precedes `other`'s.
    pub fn is_previous_of(&self, other: &Self) -> bool {
        self.comparable(other) && self.revision.next() == other.revision
    }

    pub fn is_future_of(&self, other: &Self) -> bool {
        self.comparable(other) && self.revision > other.revision
    }

    /// True for the handle itself, or if `other`'s revision lies at or after
    /// the one directly following this handle's revision.
    pub fn is_future_or_self_of(&self, other: &Self) -> bool {
        if self.is_same(other) {
            return true;
        }
        self.comparable(other)
            && other
                .revision
                .previous()
                .is_some_and(|previous| previous >= self.revision)
    }

    pub fn is_earlier_of(&self, other: &Self) -> bool {
        self.comparable(other) && self.revision < other.revision
    }

    pub fn is_earlier_or_self_of(&self, other: &Self) -> bool {
        if self.is_same(other) {
            return true;
        }
        self.comparable(other) && self.revision <= other.revision
    }

    /// True if `other` belongs to the most recent revision of its resource.
    pub fn is_last_of(&self, other: &Self) -> bool {
        self.comparable(other)
            && other.revision
                == other.with_trx(|trx| trx.resource_manager().most_recent_revision_number())
    }

    /// True if `other` belongs to the first revision.
    pub fn is_first_of(&self, other: &Self) -> bool {
        self.comparable(other) && other.revision == Revision::FIRST
    }
}

impl<R: ResourceManager> fmt::Debug for TemporalNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporalNode")
            .field("node_key", &self.node_key)
            .field("kind", &self.kind)
            .field("revision", &self.revision)
            .finish()
    }
}
