//! PostgreSQL implementation of `ReviewStore`.
//!
//! All SQL lives in the models; this adapter maps their results onto the
//! store contract and turns constraint violations into `StoreError::Conflict`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use super::{ReviewStore, StoreError};
use crate::common::{OrderId, ReviewId, UserId};
use crate::domains::reviews::models::{Reply, ReplyInsertOutcome, Review, ReviewTransition};

/// Review store backed by a sqlx connection pool.
#[derive(Clone)]
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a write error, reporting unique violations as conflicts.
fn conflict_or_database(e: sqlx::Error, what: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(format!("{} already exists", what))
        }
        _ => {
            error!(error = %e, "Failed to write {}", what);
            StoreError::Database(e)
        }
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    async fn insert_review(&self, review: &Review) -> Result<Review, StoreError> {
        review
            .insert(&self.pool)
            .await
            .map_err(|e| conflict_or_database(e, "review for this order"))
    }

    async fn find_reviews_by_order(&self, order_id: OrderId) -> Result<Vec<Review>, StoreError> {
        Ok(Review::find_by_order_id(order_id, &self.pool).await?)
    }

    async fn find_review(&self, review_id: ReviewId) -> Result<Review, StoreError> {
        Review::find_by_id(review_id, &self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn insert_reply(&self, reply: &Reply) -> Result<Reply, StoreError> {
        match reply
            .insert_and_mark_review(&self.pool)
            .await
            .map_err(|e| conflict_or_database(e, "reply for this review"))?
        {
            ReplyInsertOutcome::Inserted(reply) => Ok(reply),
            ReplyInsertOutcome::ReviewMissing => Err(StoreError::NotFound),
            ReplyInsertOutcome::AlreadyReplied => Err(StoreError::Conflict(
                "review already has a reply".to_string(),
            )),
        }
    }

    async fn find_reply(&self, review_id: ReviewId) -> Result<Reply, StoreError> {
        Reply::find_by_review_id(review_id, &self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn transition(
        &self,
        review_id: ReviewId,
        transition: &ReviewTransition,
    ) -> Result<Review, StoreError> {
        if let Some(updated) = Review::apply_transition(review_id, transition, &self.pool).await? {
            return Ok(updated);
        }

        // No row matched: tell a missing review apart from a stale status
        match Review::find_by_id(review_id, &self.pool).await? {
            Some(current) => Err(StoreError::StatusMismatch(current.status)),
            None => Err(StoreError::NotFound),
        }
    }

    async fn list_reviews_by_user(
        &self,
        user_id: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError> {
        Ok(Review::find_by_user_id(user_id, offset, limit, &self.pool).await?)
    }

    async fn count_reviews_by_user(&self, user_id: UserId) -> Result<i64, StoreError> {
        Ok(Review::count_by_user_id(user_id, &self.pool).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
