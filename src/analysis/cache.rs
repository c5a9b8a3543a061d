//! Per-run memoization of processed types.

use dashmap::DashSet;

use crate::metadata::identity::TypeId;

/// Memoizes which types have been fully processed within one analysis run.
///
/// A type added here is never reprocessed by any strategy in the same run; this is
/// what bounds interface-hierarchy and attribute-argument recursion to linear time
/// in the number of distinct types touched, and what terminates traversals that
/// revisit the same node from multiple inheritance paths.
///
/// # Scoping
///
/// One instance per analysis run, constructor-injected through
/// [`AnalysisContext`](crate::analysis::AnalysisContext). Sharing a cache across
/// independent runs would make the second run skip types it never visited - a
/// soundness bug - so no global instance exists anywhere in this crate.
///
/// # Interior Mutability
///
/// Backed by [`DashSet`] so strategies can share `&UsedTypeCache` without threading
/// `&mut` through every traversal. Entries are never invalidated within a run.
#[derive(Debug, Default)]
pub struct UsedTypeCache {
    visited: DashSet<TypeId>,
}

impl UsedTypeCache {
    /// Create an empty cache for a new analysis run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` has already been fully processed in this run.
    #[must_use]
    pub fn contains(&self, id: &TypeId) -> bool {
        self.visited.contains(id)
    }

    /// Mark `id` as processed. Idempotent; returns `true` on first insertion.
    pub fn add(&self, id: TypeId) -> bool {
        self.visited.insert(id)
    }

    /// Pre-mark a set of types as processed.
    ///
    /// Used by hosts that carry traversal state between passes over the same unit,
    /// and by tests exercising the cache-dependent fixture variants.
    pub fn seed(&self, ids: impl IntoIterator<Item = TypeId>) {
        for id in ids {
            self.visited.insert(id);
        }
    }

    /// Snapshot of every processed type identity.
    ///
    /// The dependent-assemblies pass matches candidate forwarder entries against
    /// this set.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TypeId> {
        self.visited.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of processed types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Whether no types have been processed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
