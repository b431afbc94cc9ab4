//! Integration tests for the review lifecycle against PostgreSQL.
//!
//! These start a shared Postgres container and need Docker.

mod common;

use crate::common::TestHarness;
use review_core::common::{OrderId, PageArgs, ReviewId, StoreId, UserId};
use review_core::domains::reviews::actions::{
    appeal_review, audit_review, create_reply, create_review, get_review, get_review_reply,
    list_reviews_by_user,
};
use review_core::domains::reviews::errors::ReviewError;
use review_core::domains::reviews::models::{Reply, ReviewStatus};
use review_core::domains::reviews::params::{AppealParam, AuditParam, NewReview, ReplyParam};
use review_core::domains::reviews::store::StoreError;
use test_context::test_context;

const STORE: i64 = 10;

fn new_review(order_id: OrderId, user_id: UserId, score: i16) -> NewReview {
    NewReview {
        user_id,
        order_id,
        store_id: StoreId::from_raw(STORE),
        score,
        service_score: score,
        express_score: score,
        content: "integration review".to_string(),
        pic_info: String::new(),
        video_info: String::new(),
        anonymous: false,
    }
}

fn reply_param(review_id: ReviewId, store_id: i64, content: &str) -> ReplyParam {
    ReplyParam {
        review_id,
        store_id: StoreId::from_raw(store_id),
        content: content.to_string(),
        pic_info: String::new(),
        video_info: String::new(),
    }
}

fn audit_param(review_id: ReviewId, op_user: &str, status: i32) -> AuditParam {
    AuditParam {
        review_id,
        op_user: op_user.to_string(),
        op_reason: "integration".to_string(),
        op_remark: String::new(),
        status,
    }
}

async fn reply_rows(ctx: &TestHarness, review_id: ReviewId) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM review_reply_info WHERE review_id = $1")
        .bind(review_id)
        .fetch_one(&ctx.db_pool)
        .await
        .expect("Failed to count replies")
}

// =============================================================================
// Reviews
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_order_is_rejected(ctx: &TestHarness) {
    let order_id = ctx.fresh_order_id();

    let first = create_review(new_review(order_id, ctx.fresh_user_id(), 5), &ctx.deps)
        .await
        .expect("first review should be created");
    assert!(!first.review_id.is_zero());

    let err = create_review(new_review(order_id, ctx.fresh_user_id(), 1), &ctx.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::OrderAlreadyReviewed(id) if id == order_id));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unique_constraint_reports_conflict(ctx: &TestHarness) {
    let order_id = ctx.fresh_order_id();
    let review = create_review(new_review(order_id, ctx.fresh_user_id(), 4), &ctx.deps)
        .await
        .unwrap();

    // Bypass the action's pre-check and hit the constraint directly
    let mut duplicate = review.clone();
    duplicate.review_id = ReviewId::from_raw(review.review_id.into_raw() + 1);
    let err = ctx.deps.review_store.insert_review(&duplicate).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn second_page_is_newest_first_with_total(ctx: &TestHarness) {
    let user_id = ctx.fresh_user_id();
    let mut created = Vec::new();
    for _ in 0..25 {
        let review = create_review(new_review(ctx.fresh_order_id(), user_id, 3), &ctx.deps)
            .await
            .unwrap();
        created.push(review.review_id);
    }

    let page = list_reviews_by_user(user_id, PageArgs::new(2, 10), &ctx.deps)
        .await
        .unwrap();

    let newest_first: Vec<ReviewId> = created.iter().rev().copied().collect();
    let ids: Vec<ReviewId> = page.reviews.iter().map(|r| r.review_id).collect();
    assert_eq!(ids, newest_first[10..20].to_vec());
    assert_eq!(page.total, 25);
}

// =============================================================================
// Replies
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn reply_commits_row_and_flag_together(ctx: &TestHarness) {
    let review = create_review(new_review(ctx.fresh_order_id(), ctx.fresh_user_id(), 5), &ctx.deps)
        .await
        .unwrap();

    create_reply(reply_param(review.review_id, STORE, "thanks!"), &ctx.deps)
        .await
        .unwrap();

    assert!(get_review(review.review_id, &ctx.deps).await.unwrap().has_reply);
    assert_eq!(
        get_review_reply(review.review_id, &ctx.deps).await.unwrap().content,
        "thanks!"
    );

    let err = create_reply(reply_param(review.review_id, STORE, "again"), &ctx.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::AlreadyReplied(_)));
    assert_eq!(reply_rows(ctx, review.review_id).await, 1);
    assert_eq!(
        get_review_reply(review.review_id, &ctx.deps).await.unwrap().content,
        "thanks!"
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reply_from_other_store_writes_nothing(ctx: &TestHarness) {
    let review = create_review(new_review(ctx.fresh_order_id(), ctx.fresh_user_id(), 2), &ctx.deps)
        .await
        .unwrap();

    let err = create_reply(reply_param(review.review_id, STORE + 1, "hijack"), &ctx.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::PermissionDenied(_)));
    assert_eq!(reply_rows(ctx, review.review_id).await, 0);
    assert!(!get_review(review.review_id, &ctx.deps).await.unwrap().has_reply);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reply_to_missing_review_rolls_back(ctx: &TestHarness) {
    let missing = ReviewId::from_raw(ctx.fresh_order_id().into_raw());
    let reply = Reply {
        reply_id: review_core::common::ReplyId::from_raw(ctx.fresh_order_id().into_raw()),
        review_id: missing,
        store_id: StoreId::from_raw(STORE),
        content: "orphan".to_string(),
        pic_info: String::new(),
        video_info: String::new(),
        created_at: chrono::Utc::now(),
    };

    let err = ctx.deps.review_store.insert_reply(&reply).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
    assert_eq!(reply_rows(ctx, missing).await, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_replies_produce_exactly_one(ctx: &TestHarness) {
    let review = create_review(new_review(ctx.fresh_order_id(), ctx.fresh_user_id(), 5), &ctx.deps)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        create_reply(reply_param(review.review_id, STORE, "a"), &ctx.deps),
        create_reply(reply_param(review.review_id, STORE, "b"), &ctx.deps),
    );

    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
    assert_eq!(reply_rows(ctx, review.review_id).await, 1);
}

// =============================================================================
// Transitions
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_audits_apply_once(ctx: &TestHarness) {
    let review = create_review(new_review(ctx.fresh_order_id(), ctx.fresh_user_id(), 5), &ctx.deps)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        audit_review(audit_param(review.review_id, "ops-a", 1), &ctx.deps),
        audit_review(audit_param(review.review_id, "ops-b", 2), &ctx.deps),
    );

    let winner = match (a, b) {
        (Ok(winner), Err(ReviewError::InvalidTransition { .. })) => winner,
        (Err(ReviewError::InvalidTransition { .. }), Ok(winner)) => winner,
        other => panic!("expected exactly one audit to apply, got {:?}", other),
    };

    let stored = get_review(review.review_id, &ctx.deps).await.unwrap();
    assert_eq!(stored.status, winner.status);
    assert_eq!(stored.op_user, winner.op_user);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn illegal_transition_leaves_row_unchanged(ctx: &TestHarness) {
    let review = create_review(new_review(ctx.fresh_order_id(), ctx.fresh_user_id(), 1), &ctx.deps)
        .await
        .unwrap();

    let appeal = AppealParam {
        review_id: review.review_id,
        store_id: StoreId::from_raw(STORE),
        reason: "premature".to_string(),
        content: String::new(),
        pic_info: String::new(),
        video_info: String::new(),
    };
    let err = appeal_review(appeal.clone(), &ctx.deps).await.unwrap_err();
    assert!(matches!(
        err,
        ReviewError::InvalidTransition {
            from: ReviewStatus::Pending,
            ..
        }
    ));

    let stored = get_review(review.review_id, &ctx.deps).await.unwrap();
    assert_eq!(stored.status, ReviewStatus::Pending);
    assert!(stored.appeal_reason.is_none());

    audit_review(audit_param(review.review_id, "ops", 2), &ctx.deps)
        .await
        .unwrap();
    let appealed = appeal_review(appeal, &ctx.deps).await.unwrap();
    assert_eq!(appealed.status, ReviewStatus::Appealed);
    assert_eq!(appealed.appeal_reason.as_deref(), Some("premature"));
}
