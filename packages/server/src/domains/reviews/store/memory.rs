//! In-memory implementation of `ReviewStore`.
//!
//! All rows live in one `MemoryState` behind a single `RwLock`, so every
//! compound write (reply + flag) happens under one write guard. Preconditions
//! are checked before anything is mutated, which gives the same
//! all-or-nothing behavior as the PostgreSQL transaction. State is lost on
//! drop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ReviewStore, StoreError};
use crate::common::{OrderId, ReviewId, UserId};
use crate::domains::reviews::models::{Reply, Review, ReviewTransition};

#[derive(Default)]
struct MemoryState {
    reviews: HashMap<ReviewId, Review>,
    /// Unique index on order_id
    reviews_by_order: HashMap<OrderId, ReviewId>,
    /// Unique index on review_id
    replies: HashMap<ReviewId, Reply>,
}

/// In-memory review store.
#[derive(Default)]
pub struct InMemoryReviewStore {
    state: RwLock<MemoryState>,
    /// When set, every call fails as if the database were unreachable
    unavailable: AtomicBool,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a database outage (tests the `DbFailed` paths).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored replies.
    pub async fn reply_count(&self) -> usize {
        self.state.read().await.replies.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn insert_review(&self, review: &Review) -> Result<Review, StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;

        if state.reviews_by_order.contains_key(&review.order_id) {
            return Err(StoreError::Conflict(
                "review for this order already exists".to_string(),
            ));
        }
        if state.reviews.contains_key(&review.review_id) {
            return Err(StoreError::Conflict("review id already exists".to_string()));
        }

        state
            .reviews_by_order
            .insert(review.order_id, review.review_id);
        state.reviews.insert(review.review_id, review.clone());
        Ok(review.clone())
    }

    async fn find_reviews_by_order(&self, order_id: OrderId) -> Result<Vec<Review>, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .reviews_by_order
            .get(&order_id)
            .and_then(|review_id| state.reviews.get(review_id))
            .cloned()
            .into_iter()
            .collect())
    }

    async fn find_review(&self, review_id: ReviewId) -> Result<Review, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;
        state
            .reviews
            .get(&review_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_reply(&self, reply: &Reply) -> Result<Reply, StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;

        let already_replied = match state.reviews.get(&reply.review_id) {
            None => return Err(StoreError::NotFound),
            Some(review) => review.has_reply || state.replies.contains_key(&reply.review_id),
        };
        if already_replied {
            return Err(StoreError::Conflict(
                "review already has a reply".to_string(),
            ));
        }

        // Both writes below are infallible once the checks pass
        if let Some(review) = state.reviews.get_mut(&reply.review_id) {
            review.has_reply = true;
            review.updated_at = Utc::now();
        }
        state.replies.insert(reply.review_id, reply.clone());
        Ok(reply.clone())
    }

    async fn find_reply(&self, review_id: ReviewId) -> Result<Reply, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;
        state
            .replies
            .get(&review_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn transition(
        &self,
        review_id: ReviewId,
        transition: &ReviewTransition,
    ) -> Result<Review, StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let review = state
            .reviews
            .get_mut(&review_id)
            .ok_or(StoreError::NotFound)?;

        if !review.status.allows(transition.action()) {
            return Err(StoreError::StatusMismatch(review.status));
        }

        transition.apply_to(review, Utc::now());
        Ok(review.clone())
    }

    async fn list_reviews_by_user(
        &self,
        user_id: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;

        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|review| review.user_id == user_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.review_id.cmp(&a.review_id))
        });

        Ok(reviews
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_reviews_by_user(&self, user_id: UserId) -> Result<i64, StoreError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .reviews
            .values()
            .filter(|review| review.user_id == user_id)
            .count() as i64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
