use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::status::{ReviewAction, ReviewStatus};
use crate::common::{OrderId, ReviewId, StoreId, UserId};
use crate::domains::reviews::params::NewReview;

/// Review - a user's evaluation of a completed order
///
/// Core fields (ids, scores, content, media) never change after insert.
/// Status, audit and appeal fields are only written through `ReviewTransition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub store_id: StoreId,

    // Scores (1-5)
    pub score: i16,
    pub service_score: i16,
    pub express_score: i16,

    pub content: String,
    pub pic_info: String,
    pub video_info: String,
    pub anonymous: bool,

    pub status: ReviewStatus,
    pub has_reply: bool,

    // Operator audit
    pub op_user: Option<String>,
    pub op_reason: Option<String>,
    pub op_remarks: Option<String>,

    // Merchant appeal
    pub appeal_reason: Option<String>,
    pub appeal_content: Option<String>,
    pub appeal_pic_info: Option<String>,
    pub appeal_video_info: Option<String>,
    pub appeal_created_at: Option<DateTime<Utc>>,
    pub appeal_audited_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An operator decision (audit or appeal audit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDecision {
    /// Approved or Rejected
    pub status: ReviewStatus,
    pub op_user: String,
    pub op_reason: String,
    pub op_remarks: String,
}

/// A merchant's appeal filing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppealFiling {
    pub reason: String,
    pub content: String,
    pub pic_info: String,
    pub video_info: String,
}

/// A guarded status change together with the fields it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewTransition {
    Audit(OperatorDecision),
    Appeal(AppealFiling),
    AuditAppeal(OperatorDecision),
}

impl ReviewTransition {
    pub fn action(&self) -> ReviewAction {
        match self {
            ReviewTransition::Audit(_) => ReviewAction::Audit,
            ReviewTransition::Appeal(_) => ReviewAction::Appeal,
            ReviewTransition::AuditAppeal(_) => ReviewAction::AuditAppeal,
        }
    }

    pub fn target_status(&self) -> ReviewStatus {
        match self {
            ReviewTransition::Audit(decision) | ReviewTransition::AuditAppeal(decision) => {
                decision.status
            }
            ReviewTransition::Appeal(_) => ReviewStatus::Appealed,
        }
    }

    /// Status codes the row must currently hold for the transition to apply.
    pub fn allowed_from_codes(&self) -> Vec<i16> {
        self.action()
            .allowed_from()
            .iter()
            .map(|status| status.code())
            .collect()
    }

    /// Write the transition's fields onto an in-memory review.
    ///
    /// Mirrors the UPDATE statements in `Review::apply_transition`.
    pub fn apply_to(&self, review: &mut Review, now: DateTime<Utc>) {
        review.status = self.target_status();
        review.updated_at = now;
        match self {
            ReviewTransition::Audit(decision) => {
                review.op_user = Some(decision.op_user.clone());
                review.op_reason = Some(decision.op_reason.clone());
                review.op_remarks = Some(decision.op_remarks.clone());
            }
            ReviewTransition::Appeal(appeal) => {
                review.appeal_reason = Some(appeal.reason.clone());
                review.appeal_content = Some(appeal.content.clone());
                review.appeal_pic_info = Some(appeal.pic_info.clone());
                review.appeal_video_info = Some(appeal.video_info.clone());
                review.appeal_created_at = Some(now);
                review.appeal_audited_at = None;
            }
            ReviewTransition::AuditAppeal(decision) => {
                review.op_user = Some(decision.op_user.clone());
                review.op_reason = Some(decision.op_reason.clone());
                review.op_remarks = Some(decision.op_remarks.clone());
                review.appeal_audited_at = Some(now);
            }
        }
    }
}

impl Review {
    /// Build a pending review from user input and a freshly generated ID
    pub fn from_new(review_id: ReviewId, input: NewReview, now: DateTime<Utc>) -> Self {
        Self {
            review_id,
            user_id: input.user_id,
            order_id: input.order_id,
            store_id: input.store_id,
            score: input.score,
            service_score: input.service_score,
            express_score: input.express_score,
            content: input.content,
            pic_info: input.pic_info,
            video_info: input.video_info,
            anonymous: input.anonymous,
            status: ReviewStatus::Pending,
            has_reply: false,
            op_user: None,
            op_reason: None,
            op_remarks: None,
            appeal_reason: None,
            appeal_content: None,
            appeal_pic_info: None,
            appeal_video_info: None,
            appeal_created_at: None,
            appeal_audited_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Review {
    /// Insert a new review. The UNIQUE constraint on order_id rejects a
    /// second review for the same order.
    pub async fn insert(&self, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO review_info (
                review_id,
                user_id,
                order_id,
                store_id,
                score,
                service_score,
                express_score,
                content,
                pic_info,
                video_info,
                anonymous,
                status,
                has_reply,
                created_at,
                updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
             RETURNING *",
        )
        .bind(self.review_id)
        .bind(self.user_id)
        .bind(self.order_id)
        .bind(self.store_id)
        .bind(self.score)
        .bind(self.service_score)
        .bind(self.express_score)
        .bind(&self.content)
        .bind(&self.pic_info)
        .bind(&self.video_info)
        .bind(self.anonymous)
        .bind(self.status)
        .bind(self.has_reply)
        .bind(self.created_at)
        .fetch_one(pool)
        .await
    }

    /// Find review by ID
    pub async fn find_by_id(review_id: ReviewId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM review_info WHERE review_id = $1")
            .bind(review_id)
            .fetch_optional(pool)
            .await
    }

    /// Find reviews for an order (at most one while the constraint holds)
    pub async fn find_by_order_id(order_id: OrderId, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM review_info WHERE order_id = $1")
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// One page of a user's reviews, newest first
    pub async fn find_by_user_id(
        user_id: UserId,
        offset: i64,
        limit: i64,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM review_info
             WHERE user_id = $1
             ORDER BY created_at DESC, review_id DESC
             OFFSET $2
             LIMIT $3",
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Count all of a user's reviews
    pub async fn count_by_user_id(user_id: UserId, pool: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM review_info WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Apply a transition if the row is still in one of the allowed statuses.
    ///
    /// Returns None when no row matched (missing review or wrong status).
    pub async fn apply_transition(
        review_id: ReviewId,
        transition: &ReviewTransition,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        let allowed_from = transition.allowed_from_codes();
        let target = transition.target_status();

        match transition {
            ReviewTransition::Audit(decision) => {
                sqlx::query_as::<_, Self>(
                    "UPDATE review_info
                     SET status = $3,
                         op_user = $4,
                         op_reason = $5,
                         op_remarks = $6,
                         updated_at = NOW()
                     WHERE review_id = $1 AND status = ANY($2)
                     RETURNING *",
                )
                .bind(review_id)
                .bind(allowed_from)
                .bind(target)
                .bind(&decision.op_user)
                .bind(&decision.op_reason)
                .bind(&decision.op_remarks)
                .fetch_optional(pool)
                .await
            }
            ReviewTransition::Appeal(appeal) => {
                sqlx::query_as::<_, Self>(
                    "UPDATE review_info
                     SET status = $3,
                         appeal_reason = $4,
                         appeal_content = $5,
                         appeal_pic_info = $6,
                         appeal_video_info = $7,
                         appeal_created_at = NOW(),
                         appeal_audited_at = NULL,
                         updated_at = NOW()
                     WHERE review_id = $1 AND status = ANY($2)
                     RETURNING *",
                )
                .bind(review_id)
                .bind(allowed_from)
                .bind(target)
                .bind(&appeal.reason)
                .bind(&appeal.content)
                .bind(&appeal.pic_info)
                .bind(&appeal.video_info)
                .fetch_optional(pool)
                .await
            }
            ReviewTransition::AuditAppeal(decision) => {
                sqlx::query_as::<_, Self>(
                    "UPDATE review_info
                     SET status = $3,
                         op_user = $4,
                         op_reason = $5,
                         op_remarks = $6,
                         appeal_audited_at = NOW(),
                         updated_at = NOW()
                     WHERE review_id = $1 AND status = ANY($2)
                     RETURNING *",
                )
                .bind(review_id)
                .bind(allowed_from)
                .bind(target)
                .bind(&decision.op_user)
                .bind(&decision.op_reason)
                .bind(&decision.op_remarks)
                .fetch_optional(pool)
                .await
            }
        }
    }
}
