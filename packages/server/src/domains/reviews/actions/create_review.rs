//! Create review action - one review per order

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::common::ReviewId;
use crate::domains::reviews::errors::ReviewError;
use crate::domains::reviews::models::Review;
use crate::domains::reviews::params::NewReview;
use crate::domains::reviews::store::StoreError;
use crate::kernel::ServerDeps;

/// Create a review for an order.
///
/// This action:
/// 1. Validates the scores
/// 2. Rejects the order if it already has a review
/// 3. Generates a review ID and persists the review as pending
///
/// The lookup in step 2 only gives a friendly early answer. Two concurrent
/// calls can both pass it; the store's uniqueness constraint then rejects
/// the loser, which is reported the same way.
pub async fn create_review(input: NewReview, deps: &ServerDeps) -> Result<Review, ReviewError> {
    debug!(
        order_id = %input.order_id,
        user_id = %input.user_id,
        "Creating review"
    );

    input.validate().map_err(ReviewError::InvalidArgument)?;

    let order_id = input.order_id;
    let existing = deps
        .review_store
        .find_reviews_by_order(order_id)
        .await
        .map_err(|e| ReviewError::from_store(e, "failed to query reviews for order"))?;
    if !existing.is_empty() {
        info!(order_id = %order_id, "Order already reviewed");
        return Err(ReviewError::OrderAlreadyReviewed(order_id));
    }

    let review_id = ReviewId::from_raw(deps.id_generator.generate());
    let review = Review::from_new(review_id, input, Utc::now());

    let created = match deps.review_store.insert_review(&review).await {
        Ok(created) => created,
        Err(StoreError::Conflict(reason)) => {
            warn!(order_id = %order_id, reason = %reason, "Concurrent review for order rejected by store");
            return Err(ReviewError::OrderAlreadyReviewed(order_id));
        }
        Err(e) => return Err(ReviewError::from_store(e, "failed to save review")),
    };

    info!(review_id = %created.review_id, order_id = %order_id, "Review created");
    Ok(created)
}
