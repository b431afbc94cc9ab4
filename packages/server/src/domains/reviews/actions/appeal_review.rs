//! Appeal review action - a merchant contests an audit outcome

use tracing::{info, warn};

use super::transition::apply_transition;
use crate::domains::reviews::errors::ReviewError;
use crate::domains::reviews::models::{AppealFiling, Review, ReviewTransition};
use crate::domains::reviews::params::AppealParam;
use crate::kernel::ServerDeps;

/// File an appeal against an approved or rejected review.
///
/// Only the store that owns the review may appeal it. On success the review
/// moves to `Appealed` and waits for `audit_appeal`.
pub async fn appeal_review(param: AppealParam, deps: &ServerDeps) -> Result<Review, ReviewError> {
    info!(
        review_id = %param.review_id,
        store_id = %param.store_id,
        "Filing appeal"
    );

    if param.reason.trim().is_empty() {
        return Err(ReviewError::InvalidArgument(
            "appeal reason must not be empty".to_string(),
        ));
    }

    let review = deps
        .review_store
        .find_review(param.review_id)
        .await
        .map_err(|e| ReviewError::from_store(e, "failed to query review"))?;

    if review.store_id != param.store_id {
        warn!(
            review_id = %review.review_id,
            owner_store_id = %review.store_id,
            caller_store_id = %param.store_id,
            "Store attempted to appeal a review it does not own"
        );
        return Err(ReviewError::PermissionDenied(
            "stores may only appeal their own reviews".to_string(),
        ));
    }

    let filing = AppealFiling {
        reason: param.reason,
        content: param.content,
        pic_info: param.pic_info,
        video_info: param.video_info,
    };
    apply_transition(review.review_id, ReviewTransition::Appeal(filing), deps).await
}
