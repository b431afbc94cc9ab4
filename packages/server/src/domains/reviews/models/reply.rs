use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ReplyId, ReviewId, StoreId};

/// Reply - a merchant's single response to a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reply {
    pub reply_id: ReplyId,
    pub review_id: ReviewId,
    pub store_id: StoreId,
    pub content: String,
    pub pic_info: String,
    pub video_info: String,
    pub created_at: DateTime<Utc>,
}

/// Result of the reply transaction
#[derive(Debug)]
pub enum ReplyInsertOutcome {
    Inserted(Reply),
    /// The review row does not exist; nothing was written
    ReviewMissing,
    /// The review already has a reply; nothing was written
    AlreadyReplied,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Reply {
    /// Insert the reply and set `has_reply` on its review in one transaction.
    ///
    /// The flag update runs first and only matches an unreplied review, so it
    /// takes the row lock that serializes concurrent replies. Any error after
    /// `begin` drops the transaction, which rolls both writes back.
    pub async fn insert_and_mark_review(&self, pool: &PgPool) -> sqlx::Result<ReplyInsertOutcome> {
        let mut tx = pool.begin().await?;

        let flagged = sqlx::query(
            "UPDATE review_info
             SET has_reply = true, updated_at = NOW()
             WHERE review_id = $1 AND has_reply = false",
        )
        .bind(self.review_id)
        .execute(&mut *tx)
        .await?;

        if flagged.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM review_info WHERE review_id = $1)",
            )
            .bind(self.review_id)
            .fetch_one(&mut *tx)
            .await?;
            tx.rollback().await?;

            return Ok(if exists {
                ReplyInsertOutcome::AlreadyReplied
            } else {
                ReplyInsertOutcome::ReviewMissing
            });
        }

        let reply = sqlx::query_as::<_, Self>(
            "INSERT INTO review_reply_info (
                reply_id,
                review_id,
                store_id,
                content,
                pic_info,
                video_info,
                created_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(self.reply_id)
        .bind(self.review_id)
        .bind(self.store_id)
        .bind(&self.content)
        .bind(&self.pic_info)
        .bind(&self.video_info)
        .bind(self.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ReplyInsertOutcome::Inserted(reply))
    }

    /// Find the reply for a review
    pub async fn find_by_review_id(review_id: ReviewId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM review_reply_info WHERE review_id = $1")
            .bind(review_id)
            .fetch_optional(pool)
            .await
    }
}
