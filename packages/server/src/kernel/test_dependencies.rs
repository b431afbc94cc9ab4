// TestDependencies - deterministic implementations for testing
//
// Provides an in-memory store and a sequential ID generator that can be
// injected into ServerDeps for tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use super::{BaseIdGenerator, ServerDeps};
use crate::domains::reviews::store::InMemoryReviewStore;

// =============================================================================
// Sequential ID Generator
// =============================================================================

/// Hands out 1, 2, 3, ... so tests can predict IDs.
pub struct SequentialIdGenerator {
    next: AtomicI64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseIdGenerator for SequentialIdGenerator {
    fn generate(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of test doubles with handles kept for assertions.
pub struct TestDependencies {
    pub store: Arc<InMemoryReviewStore>,
    pub id_generator: Arc<SequentialIdGenerator>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryReviewStore::new()),
            id_generator: Arc::new(SequentialIdGenerator::new()),
        }
    }

    /// Build ServerDeps sharing this bundle's store and generator
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.store.clone(), self.id_generator.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
