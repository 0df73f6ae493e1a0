use bytes::Bytes;
use lazy_static::lazy_static;

use crate::delegates::Node;
use crate::factory::NodeFactory;
use crate::memory::MemoryResource;
use crate::pagetrx::PageTrx;
use crate::{NodeKey, PageKind, QName};

/// Exactly at the compression threshold.
pub const SHORT_VALUE: &[u8] = b"0123456789";
pub const LONG_VALUE: &[u8] = b"a text node value which is long enough to be compressed";

lazy_static! {
    pub static ref NAME_A: QName = QName::local("a");
    pub static ref NAME_B: QName = QName::local("b");
    pub static ref NAME_C: QName = QName::local("c");
    pub static ref NAME_EX: QName = QName::new("http://example.com/ns", "ex", "item");
    pub static ref NAME_ID: QName = QName::local("id");

    pub static ref LONG_BYTES: Bytes = Bytes::from_static(LONG_VALUE);
}

/// A resource in which the element returned alongside exists in revisions
/// 2 to 5 and is removed in revision 6.
pub fn element_in_revisions_2_to_5() -> (MemoryResource, NodeKey) {
    let resource = MemoryResource::default();
    let mut wtx = resource.begin_page_trx().expect("no other writer");
    wtx.commit().expect("commit revision 1");

    let mut factory = NodeFactory::new(&mut wtx).expect("factory");
    let element = factory
        .create_element_at_path(
            NodeKey::ROOT,
            NodeKey::NULL,
            NodeKey::NULL,
            &NAME_A,
            NodeKey::ROOT,
            None,
        )
        .expect("create element");
    let key = element.node_key();

    for _ in 2..=5 {
        wtx.commit().expect("commit");
    }
    wtx.remove_entry(key, PageKind::Record).expect("remove element");
    wtx.commit().expect("commit revision 6");

    (resource, key)
}
