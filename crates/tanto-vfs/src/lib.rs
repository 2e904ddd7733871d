//! Resource tree abstraction and reference filesystem adapter for tanto.
//!
//! Exposes a uniform, hierarchical resource model over heterogeneous
//! backing stores: capability traits for addressable nodes
//! ([`node::Node`], [`node::Collection`], [`node::File`]), advisory
//! locking over an injected registry ([`lock`]), a filesystem-backed
//! reference implementation ([`fs`]), and chained path resolution
//! ([`tree`]).

pub mod error;
pub mod fs;
pub mod lock;
pub mod node;
pub mod tree;
