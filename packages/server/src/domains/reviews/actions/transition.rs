use tracing::info;

use crate::common::ReviewId;
use crate::domains::reviews::errors::ReviewError;
use crate::domains::reviews::models::{OperatorDecision, Review, ReviewStatus, ReviewTransition};
use crate::domains::reviews::store::StoreError;
use crate::kernel::ServerDeps;

/// Build an operator decision, validating the status code and operator.
pub(super) fn operator_decision(
    status: i32,
    op_user: String,
    op_reason: String,
    op_remarks: String,
) -> Result<OperatorDecision, ReviewError> {
    let status = ReviewStatus::decision_from_code(status).ok_or_else(|| {
        ReviewError::InvalidArgument(format!(
            "status must be 1 (approved) or 2 (rejected), got {}",
            status
        ))
    })?;

    if op_user.trim().is_empty() {
        return Err(ReviewError::InvalidArgument(
            "op_user must not be empty".to_string(),
        ));
    }

    Ok(OperatorDecision {
        status,
        op_user,
        op_reason,
        op_remarks,
    })
}

/// Apply a guarded transition through the store and map its errors.
pub(super) async fn apply_transition(
    review_id: ReviewId,
    transition: ReviewTransition,
    deps: &ServerDeps,
) -> Result<Review, ReviewError> {
    let action = transition.action();

    match deps.review_store.transition(review_id, &transition).await {
        Ok(review) => {
            info!(
                review_id = %review_id,
                action = %action,
                status = %review.status,
                "Review status updated"
            );
            Ok(review)
        }
        Err(StoreError::StatusMismatch(from)) => {
            info!(review_id = %review_id, action = %action, from = %from, "Transition rejected");
            Err(ReviewError::InvalidTransition { from, action })
        }
        Err(e) => Err(ReviewError::from_store(e, "failed to update review")),
    }
}
