//! Node construction and temporal navigation for a versioned, tree-structured
//! document store.
//!
//! Node records are composed from a fixed set of delegates (see [delegates])
//! by the [factory::NodeFactory], which allocates keys and interns names
//! through a [pagetrx::PageTrx]. Once committed, a node can be followed
//! through the revision history of its resource with the axes in [temporal].
mod digests;
mod errors;

pub mod compression;
pub mod config;
pub mod delegates;
pub mod dewey;
pub mod factory;
pub mod keys;
pub mod kind;
pub mod memory;
pub mod names;
pub mod nodes;
pub mod pagetrx;
pub mod pathsummary;
pub mod qname;
pub mod temporal;

pub use digests::{B3Digest, B3_LEN};
pub use errors::Error;
pub use keys::{NameKey, NodeKey, Revision};
pub use kind::{NodeKind, PageKind};
pub use qname::QName;

#[cfg(test)]
mod fixtures;
