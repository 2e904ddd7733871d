#![allow(dead_code)]
//! Test helpers for integration tests.
//!
//! Provides temp-directory roots for the filesystem adapter and
//! calendar fixtures for the search pipeline.

use tanto_rfc::search::FilterSpec;
use tanto_vfs::fs::FsDirectory;

/// Creates an empty adapter root in a fresh temp directory.
///
/// The `TempDir` guard must be kept alive for the duration of the test.
pub fn temp_root() -> (tempfile::TempDir, FsDirectory) {
    let dir = tempfile::tempdir().expect("temp dir should be creatable");
    let root = FsDirectory::new(dir.path().to_str().expect("temp path should be UTF-8"));
    (dir, root)
}

/// Wraps component bodies in a VCALENDAR envelope with CRLF endings.
pub fn calendar(body: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Tanto//Test//EN\r\n{body}END:VCALENDAR\r\n"
    )
}

/// A VEVENT whose SUMMARY is "Team Meeting".
pub fn team_meeting() -> String {
    calendar(
        "BEGIN:VEVENT\r\nUID:meeting-1@example.com\r\nDTSTAMP:20260123T120000Z\r\nSUMMARY:Team Meeting\r\nEND:VEVENT\r\n",
    )
}

/// A VTODO whose SUMMARY would match most test terms.
pub fn chores_todo() -> String {
    calendar(
        "BEGIN:VTODO\r\nUID:todo-1@example.com\r\nDTSTAMP:20260123T120000Z\r\nSUMMARY:Team Meeting prep\r\nEND:VTODO\r\n",
    )
}

/// A VEVENT with an attendee whose CN is "Alice Example" and a
/// non-matching summary.
pub fn attendee_event() -> String {
    calendar(
        "BEGIN:VEVENT\r\nUID:attendee-1@example.com\r\nDTSTAMP:20260123T120000Z\r\nSUMMARY:123\r\nATTENDEE;CN=Alice Example:mailto:alice@example.com\r\nEND:VEVENT\r\n",
    )
}

/// Builds a filter over VEVENT/SUMMARY with the given term.
pub fn summary_filter(term: &str) -> FilterSpec {
    FilterSpec {
        comps: ["VEVENT".to_string()].into_iter().collect(),
        props: ["SUMMARY".to_string()].into_iter().collect(),
        params: Vec::new(),
        search_term: term.to_string(),
        limit: None,
        offset: None,
    }
}
