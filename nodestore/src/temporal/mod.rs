//! Navigation of a single node through the revisions of its resource.
//!
//! [TemporalAxis] yields read-only transactions, one per visited revision.
//! [TemporalNode] wraps such a transaction into a handle which can be
//! compared with other handles of the same node by revision.
mod axis;
mod handle;

pub use axis::{IncludeSelf, TemporalAxis};
pub use handle::TemporalNode;

#[cfg(test)]
mod tests {
    use super::{IncludeSelf, TemporalAxis, TemporalNode};
    use crate::memory::MemoryResource;
    use crate::pagetrx::{NodeReadOnlyTrx, ResourceManager};
    use crate::{NodeKey, Revision};

    /// Commits `count` empty revisions.
    fn resource_with_revisions(count: usize) -> MemoryResource {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();
        for _ in 0..count {
            wtx.commit().unwrap();
        }
        resource
    }

    fn revisions(axis: TemporalAxis<MemoryResource>) -> Vec<u64> {
        axis.map(|rtx| rtx.unwrap().revision_number().get()).collect()
    }

    #[test]
    fn axes_over_root() {
        let resource = resource_with_revisions(4);
        let rtx = resource
            .begin_node_read_only_trx(Revision::new(2))
            .unwrap();

        assert_eq!(vec![3], revisions(TemporalAxis::next_revision(&rtx)));
        assert_eq!(vec![1], revisions(TemporalAxis::previous_revision(&rtx)));
        assert_eq!(vec![1], revisions(TemporalAxis::first_revision(&rtx)));
        assert_eq!(vec![4], revisions(TemporalAxis::last_revision(&rtx)));
        assert_eq!(
            vec![3, 4],
            revisions(TemporalAxis::future(&rtx, IncludeSelf::No))
        );
        assert_eq!(
            vec![2, 3, 4],
            revisions(TemporalAxis::future(&rtx, IncludeSelf::Yes))
        );
        assert_eq!(vec![1], revisions(TemporalAxis::past(&rtx, IncludeSelf::No)));
        assert_eq!(
            vec![2, 1],
            revisions(TemporalAxis::past(&rtx, IncludeSelf::Yes))
        );
        assert_eq!(
            vec![1, 2, 3, 4],
            revisions(TemporalAxis::all_time(&rtx))
        );
    }

    #[test]
    fn edges_of_history() {
        let resource = resource_with_revisions(2);
        let first = resource.begin_node_read_only_trx(Revision::FIRST).unwrap();
        let last = resource.begin_node_read_only_trx(Revision::new(2)).unwrap();

        assert!(revisions(TemporalAxis::previous_revision(&first)).is_empty());
        assert!(revisions(TemporalAxis::past(&first, IncludeSelf::No)).is_empty());
        assert!(revisions(TemporalAxis::next_revision(&last)).is_empty());
        assert!(revisions(TemporalAxis::future(&last, IncludeSelf::No)).is_empty());
    }

    #[test]
    fn bootstrap_revision_is_never_visited() {
        let resource = resource_with_revisions(0);
        let rtx = resource
            .begin_node_read_only_trx(Revision::BOOTSTRAP)
            .unwrap();

        assert!(revisions(TemporalAxis::all_time(&rtx)).is_empty());
        assert!(revisions(TemporalAxis::past(&rtx, IncludeSelf::Yes)).is_empty());
        assert!(revisions(TemporalAxis::first_revision(&rtx)).is_empty());
    }

    #[test]
    fn axis_can_be_restarted() {
        let resource = resource_with_revisions(3);
        let rtx = resource.begin_node_read_only_trx(Revision::FIRST).unwrap();

        let axis = TemporalAxis::all_time(&rtx);
        assert_eq!(revisions(axis.clone()), revisions(axis));
    }

    #[test]
    fn range_is_fixed_at_creation() {
        let resource = MemoryResource::default();
        let mut wtx = resource.begin_page_trx().unwrap();
        wtx.commit().unwrap();

        let rtx = resource.begin_node_read_only_trx(Revision::FIRST).unwrap();
        let axis = TemporalAxis::future(&rtx, IncludeSelf::Yes);
        wtx.commit().unwrap();

        assert_eq!(vec![1], revisions(axis));
    }

    #[test]
    fn handle_resyncs_moved_cursor() {
        let resource = resource_with_revisions(1);
        let handle = TemporalNode::<MemoryResource>::open(&resource, Revision::FIRST, NodeKey::ROOT)
            .unwrap()
            .expect("root exists");

        assert_eq!(NodeKey::ROOT, handle.node_key());
        assert_eq!(0, handle.child_count());
        assert!(
            TemporalNode::<MemoryResource>::open(&resource, Revision::FIRST, NodeKey::new(7))
                .unwrap()
                .is_none()
        );
    }
}
