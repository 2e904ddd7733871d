//! Advisory locking for resource tree nodes.
//!
//! Locking is snapshot-based: [`Lockable::lock`] decides accept/reject
//! against the lock set it reads from the registry at that moment. The
//! decision logic itself is a pure function; making check-then-insert
//! atomic across concurrent callers is the registry implementation's
//! responsibility, not this module's.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use crate::error::{TreeError, TreeResult};

/// Scope of a lock claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockScope {
    /// Multiple shared claims may coexist.
    Shared,
    /// An exclusive claim tolerates no other claim.
    Exclusive,
}

/// Depth of a lock claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockDepth {
    /// The resource itself only.
    Zero,
    /// The resource and all descendants.
    #[default]
    Infinity,
}

impl LockDepth {
    /// Returns the header value string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::Infinity => "infinity",
        }
    }
}

/// Descriptor of one active lock.
///
/// Tokens are unique per active lock. The timeout is carried as data for
/// the transport layer; expiry enforcement lives outside this core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockInfo {
    /// Opaque token identifying this lock.
    pub token: Uuid,
    /// Shared or exclusive.
    pub scope: LockScope,
    /// Zero or infinity.
    pub depth: LockDepth,
    /// Requested validity period, if any.
    pub timeout: Option<Duration>,
    /// Owner description supplied by the requester.
    pub owner: Option<String>,
}

impl LockInfo {
    /// Creates a lock descriptor with a fresh token.
    #[must_use]
    pub fn new(scope: LockScope, depth: LockDepth) -> Self {
        Self {
            token: Uuid::new_v4(),
            scope,
            depth,
            timeout: None,
            owner: None,
        }
    }

    /// Creates an exclusive, infinite-depth lock descriptor.
    #[must_use]
    pub fn exclusive() -> Self {
        Self::new(LockScope::Exclusive, LockDepth::Infinity)
    }

    /// Creates a shared, infinite-depth lock descriptor.
    #[must_use]
    pub fn shared() -> Self {
        Self::new(LockScope::Shared, LockDepth::Infinity)
    }

    /// Sets the owner description.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the requested timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// ## Summary
/// Decides whether a requested lock may coexist with the locks already
/// held on the same resource.
///
/// Any exclusive claim on either side conflicts with anything else:
/// coexistence requires every held lock and the request to be shared.
/// Pure over its inputs, so the decision can be tested against any
/// snapshot of a lock set.
#[must_use]
pub fn is_compatible(held: &[LockInfo], requested: &LockInfo) -> bool {
    held.iter()
        .all(|lock| lock.scope == LockScope::Shared && requested.scope == LockScope::Shared)
}

/// Injected store for active locks, keyed by resource path and token.
///
/// Implementations decide persistence and atomicity. A registry shared
/// by concurrent writers must make the check-then-insert in
/// [`Lockable::lock`] atomic (for example by serializing access) if it
/// wants to exclude races between competing lock requests.
pub trait LockRegistry: Send + Sync {
    /// Returns the locks currently held on a resource path.
    fn locks_for(&self, path: &str) -> Vec<LockInfo>;

    /// Records a lock on a resource path.
    fn put(&self, path: &str, lock: LockInfo);

    /// Removes the lock with the given token from a resource path.
    /// Returns whether a lock was removed.
    fn remove(&self, path: &str, token: Uuid) -> bool;

    /// Finds a lock anywhere in the registry by token.
    fn find_by_token(&self, token: Uuid) -> Option<(String, LockInfo)>;
}

/// In-memory lock registry.
///
/// Individual operations are serialized by a mutex, which also makes the
/// lock/unlock decision sequences atomic within a single process. Doubles
/// as the test fake for the decision logic.
#[derive(Default)]
pub struct MemoryLockRegistry {
    locks: Mutex<HashMap<String, Vec<LockInfo>>>,
}

impl MemoryLockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockRegistry for MemoryLockRegistry {
    fn locks_for(&self, path: &str) -> Vec<LockInfo> {
        let locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.get(path).cloned().unwrap_or_default()
    }

    fn put(&self, path: &str, lock: LockInfo) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(path.to_string()).or_default().push(lock);
    }

    fn remove(&self, path: &str, token: Uuid) -> bool {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(held) = locks.get_mut(path) else {
            return false;
        };
        let before = held.len();
        held.retain(|lock| lock.token != token);
        let removed = held.len() < before;
        if held.is_empty() {
            locks.remove(path);
        }
        removed
    }

    fn find_by_token(&self, token: Uuid) -> Option<(String, LockInfo)> {
        let locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        for (path, held) in locks.iter() {
            if let Some(lock) = held.iter().find(|l| l.token == token) {
                return Some((path.clone(), lock.clone()));
            }
        }
        None
    }
}

/// Capability for nodes that support advisory locking.
///
/// A node opts in by naming its registry and its lock path; the lock
/// verbs are provided on top of those.
pub trait Lockable {
    /// Returns the registry holding this node's locks.
    fn lock_registry(&self) -> &dyn LockRegistry;

    /// Returns the resource path locks are keyed by.
    fn lock_path(&self) -> &str;

    /// Returns the locks currently held on this node.
    ///
    /// ## Errors
    /// Fails if the registry cannot be queried.
    fn locks(&self) -> TreeResult<Vec<LockInfo>> {
        Ok(self.lock_registry().locks_for(self.lock_path()))
    }

    /// Acquires a lock on this node.
    ///
    /// ## Errors
    /// Fails with [`TreeError::LockConflict`] if an existing lock is
    /// scope-incompatible with the requested one.
    fn lock(&self, requested: LockInfo) -> TreeResult<()> {
        let held = self.lock_registry().locks_for(self.lock_path());
        if !is_compatible(&held, &requested) {
            return Err(TreeError::LockConflict(self.lock_path().to_string()));
        }
        tracing::debug!(path = self.lock_path(), token = %requested.token, "Lock acquired");
        self.lock_registry().put(self.lock_path(), requested);
        Ok(())
    }

    /// Releases the lock with the given token.
    ///
    /// ## Errors
    /// Fails with [`TreeError::UnknownLockToken`] if no lock with that
    /// token is registered on this node.
    fn unlock(&self, token: Uuid) -> TreeResult<()> {
        if self.lock_registry().remove(self.lock_path(), token) {
            tracing::debug!(path = self.lock_path(), token = %token, "Lock released");
            Ok(())
        } else {
            Err(TreeError::UnknownLockToken(token.to_string()))
        }
    }
}
