//! Lock decision logic against a shared in-memory registry.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use tanto_vfs::error::TreeError;
use tanto_vfs::lock::{
    LockDepth, LockInfo, LockRegistry, LockScope, Lockable, MemoryLockRegistry,
};

/// A node-side view of one lockable resource. Two views of the same
/// path share lock state through the injected registry.
struct LockView {
    registry: Arc<MemoryLockRegistry>,
    path: String,
}

impl Lockable for LockView {
    fn lock_registry(&self) -> &dyn LockRegistry {
        self.registry.as_ref()
    }
    fn lock_path(&self) -> &str {
        &self.path
    }
}

fn view(registry: &Arc<MemoryLockRegistry>, path: &str) -> LockView {
    LockView {
        registry: Arc::clone(registry),
        path: path.to_string(),
    }
}

#[test_log::test]
fn conflicts_are_visible_across_node_instances() {
    let registry = Arc::new(MemoryLockRegistry::new());
    let first = view(&registry, "calendars/work");
    let second = view(&registry, "calendars/work");

    first.lock(LockInfo::exclusive().with_owner("alice")).unwrap();
    assert!(matches!(
        second.lock(LockInfo::shared()),
        Err(TreeError::LockConflict(_))
    ));

    // A different resource path is unaffected.
    let other = view(&registry, "calendars/home");
    other.lock(LockInfo::exclusive()).unwrap();
}

#[test_log::test]
fn shared_locks_accumulate_until_exclusive_request() {
    let registry = Arc::new(MemoryLockRegistry::new());
    let node = view(&registry, "calendars/work");

    let first = LockInfo::shared().with_owner("alice");
    let second = LockInfo::shared().with_owner("bob");
    let first_token = first.token;
    node.lock(first).unwrap();
    node.lock(second).unwrap();

    let held = node.locks().unwrap();
    assert_eq!(held.len(), 2);
    assert!(matches!(
        node.lock(LockInfo::exclusive()),
        Err(TreeError::LockConflict(_))
    ));

    // Releasing one shared lock still leaves the other in the way.
    node.unlock(first_token).unwrap();
    assert!(matches!(
        node.lock(LockInfo::exclusive()),
        Err(TreeError::LockConflict(_))
    ));
}

#[test_log::test]
fn unlock_with_foreign_token_is_rejected() {
    let registry = Arc::new(MemoryLockRegistry::new());
    let node = view(&registry, "calendars/work");

    let lock = LockInfo::exclusive();
    let token = lock.token;
    node.lock(lock).unwrap();

    let err = node.unlock(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, TreeError::UnknownLockToken(_)));

    node.unlock(token).unwrap();
    node.lock(LockInfo::exclusive()).unwrap();
}

#[test_log::test]
fn descriptor_metadata_round_trips_through_the_registry() {
    let registry = Arc::new(MemoryLockRegistry::new());
    let node = view(&registry, "calendars/work");

    let lock = LockInfo::new(LockScope::Shared, LockDepth::Zero)
        .with_owner("alice")
        .with_timeout(Duration::from_secs(600));
    let token = lock.token;
    node.lock(lock).unwrap();

    let held = node.locks().unwrap();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].token, token);
    assert_eq!(held[0].scope, LockScope::Shared);
    assert_eq!(held[0].depth, LockDepth::Zero);
    assert_eq!(held[0].timeout, Some(Duration::from_secs(600)));
    assert_eq!(held[0].owner.as_deref(), Some("alice"));

    let (path, found) = registry.find_by_token(token).unwrap();
    assert_eq!(path, "calendars/work");
    assert_eq!(found, held[0]);
}
