//! Persistence boundary for reviews and replies.
//!
//! This module defines the `ReviewStore` trait that abstracts storage
//! operations for the review actions. `PostgresReviewStore` is the production
//! backend; `InMemoryReviewStore` backs unit tests and local runs.

mod memory;
mod postgres;

pub use memory::InMemoryReviewStore;
pub use postgres::PostgresReviewStore;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{Reply, Review, ReviewStatus, ReviewTransition};
use crate::common::{OrderId, ReviewId, UserId};

/// Errors surfaced by a review store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A uniqueness rule rejected the write (duplicate order review, second
    /// reply). Nothing was written.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A guarded transition found the row in a status it may not leave from.
    #[error("review is {0}")]
    StatusMismatch(ReviewStatus),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage operations needed by the review lifecycle.
///
/// Every method is a single unit of work: it either applies completely or
/// leaves the store unchanged.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert a review. Fails `Conflict` if the order already has one.
    async fn insert_review(&self, review: &Review) -> Result<Review, StoreError>;

    /// All reviews for an order.
    async fn find_reviews_by_order(&self, order_id: OrderId) -> Result<Vec<Review>, StoreError>;

    /// Fetch a review. Fails `NotFound` when absent.
    async fn find_review(&self, review_id: ReviewId) -> Result<Review, StoreError>;

    /// Insert a reply and set its review's `has_reply` flag atomically.
    ///
    /// Fails `NotFound` if the review is missing and `Conflict` if it
    /// already has a reply; in both cases nothing is written.
    async fn insert_reply(&self, reply: &Reply) -> Result<Reply, StoreError>;

    /// Fetch the reply for a review. Fails `NotFound` when none exists.
    async fn find_reply(&self, review_id: ReviewId) -> Result<Reply, StoreError>;

    /// Apply a guarded status transition.
    ///
    /// Fails `NotFound` if the review is missing and `StatusMismatch` with the
    /// current status if the transition is not legal from it.
    async fn transition(
        &self,
        review_id: ReviewId,
        transition: &ReviewTransition,
    ) -> Result<Review, StoreError>;

    /// One page of a user's reviews, newest first.
    async fn list_reviews_by_user(
        &self,
        user_id: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError>;

    /// Total number of a user's reviews.
    async fn count_reviews_by_user(&self, user_id: UserId) -> Result<i64, StoreError>;

    /// Cheap connectivity check for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;
}
