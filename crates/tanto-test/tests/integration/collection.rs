//! Filesystem adapter behavior through the capability traits.

use chrono::{DateTime, Utc};

use tanto_core::config::{LoggingConfig, Settings, StorageConfig};
use tanto_vfs::error::{TreeError, TreeResult};
use tanto_vfs::fs::{FsDirectory, generate_etag};
use tanto_vfs::node::{Collection, File, Node};
use tanto_vfs::tree::Tree;

use super::helpers::temp_root;

/// Wraps the filesystem adapter but keeps the provided linear-scan
/// `child` and lookup-based `child_exists`, so the defaults can be
/// compared against the adapter's indexed overrides on the same
/// backing state.
struct ScanDirectory(FsDirectory);

impl Node for ScanDirectory {
    fn name(&self) -> &str {
        self.0.name()
    }
    fn path(&self) -> &str {
        self.0.path()
    }
    fn set_name(&mut self, new_name: &str) -> TreeResult<()> {
        self.0.set_name(new_name)
    }
    fn last_modified(&self) -> TreeResult<DateTime<Utc>> {
        self.0.last_modified()
    }
    fn delete(&self) -> TreeResult<()> {
        Node::delete(&self.0)
    }
    fn as_collection(&self) -> Option<&dyn Collection> {
        Some(self)
    }
}

impl Collection for ScanDirectory {
    fn children(&self) -> TreeResult<Vec<Box<dyn Node>>> {
        self.0.children()
    }
}

#[test_log::test]
fn linear_scan_default_agrees_with_indexed_override() {
    let (_guard, root) = temp_root();
    root.create_directory("sub").unwrap();
    root.create_file("a.ics", b"x").unwrap();
    root.create_file("b.ics", b"y").unwrap();

    let scan = ScanDirectory(root.clone());

    for name in ["a.ics", "b.ics", "sub", "missing.ics", "z"] {
        let scanned = scan.child(name);
        let probed = root.child(name);
        assert_eq!(scanned.is_ok(), probed.is_ok(), "disagreement on {name}");
        if let (Ok(s), Ok(p)) = (scanned, probed) {
            assert_eq!(s.name(), p.name());
            assert_eq!(s.path(), p.path());
            assert_eq!(s.as_collection().is_some(), p.as_collection().is_some());
        }
        assert_eq!(scan.child_exists(name), root.child_exists(name));
    }
}

#[test_log::test]
fn child_exists_matches_child_success() {
    let (_guard, root) = temp_root();
    root.create_file("present.ics", b"x").unwrap();

    let scan = ScanDirectory(root.clone());
    for name in ["present.ics", "absent.ics"] {
        assert_eq!(scan.child_exists(name), scan.child(name).is_ok());
    }
}

#[test_log::test]
fn recursive_delete_clears_the_subtree() {
    let (_guard, root) = temp_root();
    root.create_directory("cal").unwrap();
    let cal = root.child("cal").unwrap();
    let col = cal.as_collection().unwrap();
    col.create_directory("events").unwrap();
    col.child("events")
        .unwrap()
        .as_collection()
        .unwrap()
        .create_file("one.ics", b"BEGIN:VCALENDAR")
        .unwrap();
    col.create_file("readme.txt", b"notes").unwrap();

    cal.delete().unwrap();

    assert!(!root.child_exists("cal"));
    assert!(matches!(root.child("cal"), Err(TreeError::NotFound(_))));
}

#[test_log::test]
fn rename_keeps_the_parent() {
    let (_guard, root) = temp_root();
    root.create_directory("a").unwrap();
    let a = root.child("a").unwrap();
    let a_col = a.as_collection().unwrap();
    a_col.create_directory("b").unwrap();
    let b = a_col.child("b").unwrap();
    b.as_collection()
        .unwrap()
        .create_file("old", b"payload")
        .unwrap();

    let mut node = Tree::new(root).node_for_path("a/b/old").unwrap();
    node.set_name("new").unwrap();

    assert_eq!(node.name(), "new");
    assert!(node.path().ends_with("a/b/new"));
    assert!(b.as_collection().unwrap().child_exists("new"));
    assert!(!b.as_collection().unwrap().child_exists("old"));
}

#[test_log::test]
fn etag_matches_a_subsequent_read() {
    let (_guard, root) = temp_root();
    let payload = b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";
    let etag = root.create_file("obj.ics", payload).unwrap().unwrap();

    let node = root.child("obj.ics").unwrap();
    let stored = node.as_file().unwrap().get().unwrap();
    assert_eq!(etag, generate_etag(&stored));
}

#[test_log::test]
fn quota_recomputes_fresh_totals() {
    let (_guard, root) = temp_root();
    let (used, free) = root.quota_info().unwrap();
    assert!(used.checked_add(free).is_some());

    // A second call re-queries the backing store rather than caching.
    let (used_again, _) = root.quota_info().unwrap();
    assert!(used_again.checked_add(free).is_some());
}

#[test_log::test]
fn adapter_opens_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        storage: StorageConfig {
            root: dir.path().join("store"),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    };

    let root = FsDirectory::from_settings(&settings).unwrap();
    root.create_file("seed.ics", b"BEGIN:VCALENDAR").unwrap();
    assert!(root.child_exists("seed.ics"));
}
