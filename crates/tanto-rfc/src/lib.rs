//! Calendar object model and search primitives for tanto.
//!
//! This crate owns the protocol-adjacent pieces that have no storage
//! dependencies: the iCalendar component model and parser (RFC 5545),
//! RFC 4790 collation text matching, and the structured calendar-search
//! filter evaluation consumed by calendar-home enumeration.

pub mod ical;
pub mod search;
pub mod text_match;
