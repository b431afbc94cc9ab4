//! Create reply action - a merchant's single reply to a review

use chrono::Utc;
use tracing::{info, warn};

use crate::common::ReplyId;
use crate::domains::reviews::errors::ReviewError;
use crate::domains::reviews::models::Reply;
use crate::domains::reviews::params::ReplyParam;
use crate::domains::reviews::store::StoreError;
use crate::kernel::ServerDeps;

/// Reply to a review on behalf of a store.
///
/// This action:
/// 1. Loads the review
/// 2. Rejects it if it already has a reply (`AlreadyReplied`)
/// 3. Rejects stores that do not own the review (`PermissionDenied`)
/// 4. Saves the reply and sets `has_reply` in one atomic store call
///
/// A concurrent reply that wins between steps 2 and 4 makes the store
/// roll back this one, which is also reported as `AlreadyReplied`.
pub async fn create_reply(param: ReplyParam, deps: &ServerDeps) -> Result<Reply, ReviewError> {
    info!(
        review_id = %param.review_id,
        store_id = %param.store_id,
        "Creating reply"
    );

    if param.content.trim().is_empty() {
        return Err(ReviewError::InvalidArgument(
            "reply content must not be empty".to_string(),
        ));
    }

    let review = deps
        .review_store
        .find_review(param.review_id)
        .await
        .map_err(|e| ReviewError::from_store(e, "failed to query review"))?;

    if review.has_reply {
        return Err(ReviewError::AlreadyReplied(review.review_id));
    }

    if review.store_id != param.store_id {
        warn!(
            review_id = %review.review_id,
            owner_store_id = %review.store_id,
            caller_store_id = %param.store_id,
            "Store attempted to reply to a review it does not own"
        );
        return Err(ReviewError::PermissionDenied(
            "stores may only reply to their own reviews".to_string(),
        ));
    }

    let reply = Reply {
        reply_id: ReplyId::from_raw(deps.id_generator.generate()),
        review_id: review.review_id,
        store_id: param.store_id,
        content: param.content,
        pic_info: param.pic_info,
        video_info: param.video_info,
        created_at: Utc::now(),
    };

    let saved = match deps.review_store.insert_reply(&reply).await {
        Ok(saved) => saved,
        Err(StoreError::Conflict(_)) => return Err(ReviewError::AlreadyReplied(review.review_id)),
        Err(e) => return Err(ReviewError::from_store(e, "failed to save reply")),
    };

    info!(reply_id = %saved.reply_id, review_id = %saved.review_id, "Reply created");
    Ok(saved)
}
