//! Review query actions
//!
//! Query actions return data directly and never write.

use tracing::debug;

use crate::common::{PageArgs, ReviewId, UserId};
use crate::domains::reviews::errors::ReviewError;
use crate::domains::reviews::models::{Reply, Review};
use crate::kernel::ServerDeps;

/// A page of reviews plus the total row count.
///
/// The page and the count come from two separate queries and are not
/// guaranteed to be consistent with each other under concurrent writes.
#[derive(Debug, Clone)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: i64,
    pub page_number: i64,
    pub page_size: i64,
}

/// Get a review by ID
pub async fn get_review(review_id: ReviewId, deps: &ServerDeps) -> Result<Review, ReviewError> {
    debug!(review_id = %review_id, "Getting review");

    deps.review_store
        .find_review(review_id)
        .await
        .map_err(|e| ReviewError::from_store(e, "failed to query review"))
}

/// Get the merchant reply for a review
pub async fn get_review_reply(review_id: ReviewId, deps: &ServerDeps) -> Result<Reply, ReviewError> {
    debug!(review_id = %review_id, "Getting review reply");

    deps.review_store
        .find_reply(review_id)
        .await
        .map_err(|e| ReviewError::from_store(e, "failed to query review reply"))
}

/// Get a user's reviews, newest first, with offset pagination
pub async fn list_reviews_by_user(
    user_id: UserId,
    page: PageArgs,
    deps: &ServerDeps,
) -> Result<ReviewPage, ReviewError> {
    let page = page
        .validate()
        .map_err(|e| ReviewError::InvalidArgument(e.to_string()))?;

    debug!(
        user_id = %user_id,
        page_number = page.page_number,
        page_size = page.page_size,
        "Listing reviews by user"
    );

    let reviews = deps
        .review_store
        .list_reviews_by_user(user_id, page.offset(), page.limit())
        .await
        .map_err(|e| ReviewError::from_store(e, "failed to query user reviews"))?;

    let total = count_reviews_by_user(user_id, deps).await?;

    Ok(ReviewPage {
        reviews,
        total,
        page_number: page.page_number,
        page_size: page.page_size,
    })
}

/// Count all of a user's reviews
pub async fn count_reviews_by_user(user_id: UserId, deps: &ServerDeps) -> Result<i64, ReviewError> {
    deps.review_store
        .count_reviews_by_user(user_id)
        .await
        .map_err(|e| ReviewError::from_store(e, "failed to count user reviews"))
}
