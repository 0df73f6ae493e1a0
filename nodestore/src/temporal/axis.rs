use tracing::{trace, warn};

use crate::pagetrx::{NodeReadOnlyTrx, ResourceManager};
use crate::{Error, NodeKey, Revision};

/// Whether an open-ended axis starts at the revision it was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncludeSelf {
    Yes,
    No,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

/// Visits the revisions in which one node key exists.
///
/// Every item is a fresh read-only transaction bound to the visited revision
/// and positioned on the node. Revisions in which the key does not exist are
/// skipped. The range of revisions is fixed when the axis is created, so
/// commits happening while iterating are not visited.
///
/// Cloning an axis that has not been advanced yet yields an axis that
/// visits the same revisions again.
#[derive(Clone)]
pub struct TemporalAxis<R: ResourceManager> {
    resource: R,
    node_key: NodeKey,
    direction: Direction,
    /// Next revision to visit, `None` once the range is exhausted.
    cursor: Option<Revision>,
    /// Last revision of the range, inclusive.
    end: Revision,
    /// Maximum number of items to yield.
    limit: Option<usize>,
    yielded: usize,
}

impl<R: ResourceManager> TemporalAxis<R> {
    fn new(
        rtx: &R::ReadTrx,
        direction: Direction,
        start: Option<Revision>,
        end: Revision,
        limit: Option<usize>,
    ) -> Self {
        let most_recent = rtx.resource_manager().most_recent_revision_number();
        // revision 0 only ever holds the bootstrap records
        let start = start.filter(|start| {
            *start >= Revision::FIRST
                && *start <= most_recent
                && match direction {
                    Direction::Ascending => *start <= end,
                    Direction::Descending => *start >= end,
                }
        });

        Self {
            resource: rtx.resource_manager().clone(),
            node_key: rtx.node_key(),
            direction,
            cursor: start,
            end,
            limit,
            yielded: 0,
        }
    }

    /// The node in the revision directly after the one of `rtx`.
    pub fn next_revision(rtx: &R::ReadTrx) -> Self {
        let revision = rtx.revision_number().next();
        Self::new(rtx, Direction::Ascending, Some(revision), revision, Some(1))
    }

    /// The node in the revision directly before the one of `rtx`.
    pub fn previous_revision(rtx: &R::ReadTrx) -> Self {
        let revision = rtx.revision_number().previous();
        Self::new(
            rtx,
            Direction::Descending,
            revision,
            revision.unwrap_or(Revision::BOOTSTRAP),
            Some(1),
        )
    }

    /// The node in the earliest revision it exists in.
    pub fn first_revision(rtx: &R::ReadTrx) -> Self {
        let most_recent = rtx.resource_manager().most_recent_revision_number();
        Self::new(
            rtx,
            Direction::Ascending,
            Some(Revision::FIRST),
            most_recent,
            Some(1),
        )
    }

    /// The node in the most recent revision it exists in.
    pub fn last_revision(rtx: &R::ReadTrx) -> Self {
        let most_recent = rtx.resource_manager().most_recent_revision_number();
        Self::new(
            rtx,
            Direction::Descending,
            Some(most_recent),
            Revision::FIRST,
            Some(1),
        )
    }

    /// The node in all later revisions, oldest first.
    pub fn future(rtx: &R::ReadTrx, include_self: IncludeSelf) -> Self {
        let most_recent = rtx.resource_manager().most_recent_revision_number();
        let start = match include_self {
            IncludeSelf::Yes => rtx.revision_number(),
            IncludeSelf::No => rtx.revision_number().next(),
        };
        Self::new(rtx, Direction::Ascending, Some(start), most_recent, None)
    }

    /// The node in all earlier revisions, nearest first.
    pub fn past(rtx: &R::ReadTrx, include_self: IncludeSelf) -> Self {
        let start = match include_self {
            IncludeSelf::Yes => Some(rtx.revision_number()),
            IncludeSelf::No => rtx.revision_number().previous(),
        };
        Self::new(rtx, Direction::Descending, start, Revision::FIRST, None)
    }

    /// The node in every revision it exists in, oldest first.
    pub fn all_time(rtx: &R::ReadTrx) -> Self {
        let most_recent = rtx.resource_manager().most_recent_revision_number();
        Self::new(
            rtx,
            Direction::Ascending,
            Some(Revision::FIRST),
            most_recent,
            None,
        )
    }

    pub fn node_key(&self) -> NodeKey {
        self.node_key
    }

    fn advance(&mut self, revision: Revision) {
        self.cursor = match self.direction {
            Direction::Ascending if revision < self.end => Some(revision.next()),
            Direction::Descending if revision > self.end => revision.previous(),
            _ => None,
        };
    }
}

impl<R: ResourceManager> Iterator for TemporalAxis<R> {
    type Item = Result<R::ReadTrx, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(revision) = self.cursor {
            if self.limit.is_some_and(|limit| self.yielded >= limit) {
                self.cursor = None;
                break;
            }
            self.advance(revision);

            let mut rtx = match self.resource.begin_node_read_only_trx(revision) {
                Ok(rtx) => rtx,
                Err(e) => {
                    warn!(%revision, err = %e, "unable to open revision");
                    self.cursor = None;
                    return Some(Err(e));
                }
            };

            if rtx.move_to(self.node_key) {
                self.yielded += 1;
                return Some(Ok(rtx));
            }
            trace!(%revision, node_key = %self.node_key, "node absent in revision");
        }
        None
    }
}
