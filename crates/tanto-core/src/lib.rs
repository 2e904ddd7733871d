//! Shared foundation for the tanto DAV resource tree.
//!
//! Holds the pieces every other crate leans on: configuration loading,
//! core error kinds, and path-segment utilities.

pub mod config;
pub mod error;
pub mod util;
