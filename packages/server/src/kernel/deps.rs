//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by the review
//! actions. The store and the ID generator are trait objects so tests can
//! inject an in-memory store and a deterministic generator.

use std::sync::Arc;

use crate::domains::reviews::store::ReviewStore;
use crate::kernel::BaseIdGenerator;

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub review_store: Arc<dyn ReviewStore>,
    pub id_generator: Arc<dyn BaseIdGenerator>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(review_store: Arc<dyn ReviewStore>, id_generator: Arc<dyn BaseIdGenerator>) -> Self {
        Self {
            review_store,
            id_generator,
        }
    }
}
