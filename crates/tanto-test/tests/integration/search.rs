//! End-to-end calendar search over the filesystem adapter.
//!
//! Mirrors the calendar-home flow: candidate objects are fetched from
//! storage, parsed, and run through the filter engine; the caller keeps
//! the paths of the objects that matched.

use tanto_rfc::ical::{self, ICalendar};
use tanto_rfc::search::{FilterSpec, ParamSpec, validate};
use tanto_rfc::text_match::text_match;
use tanto_vfs::node::{Collection, File, Node};

use super::helpers::{attendee_event, chores_todo, summary_filter, team_meeting, temp_root};

/// Loads and parses every calendar object in the collection, returning
/// `(name, object)` pairs in listing order.
fn load_candidates(root: &dyn Collection) -> Vec<(String, ICalendar)> {
    let mut candidates = Vec::new();
    for node in root.children().unwrap() {
        let Some(file) = node.as_file() else {
            continue;
        };
        if file.content_type().as_deref() != Some("text/calendar") {
            continue;
        }
        let raw = file.get().unwrap();
        let parsed = ical::parse(std::str::from_utf8(&raw).unwrap()).unwrap();
        candidates.push((node.name().to_string(), parsed));
    }
    candidates
}

/// Runs the filter over all candidates and returns the matching names.
fn matching_names(root: &dyn Collection, filter: &FilterSpec) -> Vec<String> {
    load_candidates(root)
        .into_iter()
        .filter(|(_, object)| validate(object, filter))
        .map(|(name, _)| name)
        .collect()
}

#[test_log::test]
fn search_returns_paths_of_matching_objects() {
    let (_guard, root) = temp_root();
    root.create_file("meeting.ics", team_meeting().as_bytes())
        .unwrap();
    root.create_file("attendee.ics", attendee_event().as_bytes())
        .unwrap();
    root.create_file("notes.txt", b"SUMMARY:Team Meeting")
        .unwrap();

    let mut names = matching_names(&root, &summary_filter("Meeting"));
    names.sort();
    assert_eq!(names, vec!["meeting.ics"]);

    assert!(matching_names(&root, &summary_filter("Standup")).is_empty());
}

#[test_log::test]
fn disallowed_component_excludes_the_object() {
    let (_guard, root) = temp_root();
    root.create_file("todo.ics", chores_todo().as_bytes())
        .unwrap();

    // The VTODO summary contains the term, but VTODO is not allowed.
    assert!(matching_names(&root, &summary_filter("Meeting")).is_empty());
}

#[test_log::test]
fn parameter_only_match_is_found() {
    let (_guard, root) = temp_root();
    root.create_file("attendee.ics", attendee_event().as_bytes())
        .unwrap();

    let filter = FilterSpec {
        params: vec![ParamSpec {
            property: "ATTENDEE".to_string(),
            parameter: "CN".to_string(),
        }],
        ..summary_filter("Alice")
    };
    assert_eq!(matching_names(&root, &filter), vec!["attendee.ics"]);
}

#[test_log::test]
fn filter_spec_deserializes_from_the_wire_shape() {
    let (_guard, root) = temp_root();
    root.create_file("meeting.ics", team_meeting().as_bytes())
        .unwrap();

    let filter: FilterSpec = serde_json::from_str(
        r#"{
            "comps": ["VEVENT", "VTODO"],
            "props": ["SUMMARY", "LOCATION"],
            "search-term": "Team",
            "limit": 100,
            "offset": 0
        }"#,
    )
    .unwrap();

    assert_eq!(matching_names(&root, &filter), vec!["meeting.ics"]);
}

#[test_log::test]
fn validate_is_safe_to_run_concurrently() {
    let object = ical::parse(&team_meeting()).unwrap();
    let filter = summary_filter("Meeting");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| (0..100).all(|_| validate(&object, &filter))))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

#[test_log::test]
fn text_match_table() {
    // collation behavior
    assert!(text_match("ABC", "abc", "i;ascii-casemap", "equals").unwrap());
    assert!(!text_match("caffè", "CAFFÈ", "i;ascii-casemap", "equals").unwrap());
    assert!(text_match("caffè", "CAFFÈ", "i;unicode-casemap", "equals").unwrap());
    assert!(!text_match("ABC", "abc", "i;octet", "equals").unwrap());

    // match types
    assert!(text_match("hello world", "world", "i;octet", "ends-with").unwrap());
    assert!(!text_match("hello world", "worlds", "i;octet", "ends-with").unwrap());
    assert!(text_match("", "", "i;octet", "equals").unwrap());

    // unsupported identifiers fail regardless of operands
    assert!(text_match("x", "x", "i;nonsense", "equals").is_err());
    assert!(text_match("x", "x", "i;octet", "sounds-like").is_err());
}
