// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory catalog snapshot cache
//!
//! Holds exactly one current [`CatalogSnapshot`] behind an `RwLock<Arc<_>>`.
//! Readers clone the `Arc` (the lock is held only for the pointer copy) and
//! then read the immutable snapshot without any synchronization. A refresh
//! builds its snapshot privately and publishes it with a single pointer
//! swap, so readers never observe a torn state between two cycles.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::catalog::ContentFragment;

/// An immutable, point-in-time view of all cached catalog fragments
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub fragments: Vec<ContentFragment>,
    pub built_at: Instant,
    /// True only for the initial empty snapshot, before the first
    /// successful refresh
    pub cold: bool,
}

impl CatalogSnapshot {
    /// The empty snapshot a process starts with
    pub fn cold() -> Self {
        Self {
            fragments: Vec::new(),
            built_at: Instant::now(),
            cold: true,
        }
    }

    /// Build a snapshot from freshly extracted fragments
    pub fn new(fragments: Vec<ContentFragment>) -> Self {
        Self {
            fragments,
            built_at: Instant::now(),
            cold: false,
        }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Age of this snapshot in seconds
    pub fn age_secs(&self) -> u64 {
        self.built_at.elapsed().as_secs()
    }
}

/// Shared cache holding the current snapshot
pub struct SnapshotCache {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl SnapshotCache {
    /// Create a cache holding the cold empty snapshot
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogSnapshot::cold())),
        }
    }

    /// Get the current snapshot
    ///
    /// Never blocks on refresh activity and never fails: a poisoned lock
    /// still yields the last published pointer.
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Atomically publish a new snapshot
    ///
    /// Visible to all subsequent `current()` calls. The swap is a pointer
    /// replacement; fragment data is never mutated in place.
    pub fn replace(&self, snapshot: CatalogSnapshot) {
        let snapshot = Arc::new(snapshot);
        match self.current.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
