use thiserror::Error;
use tracing::error;

use super::models::{ReviewAction, ReviewStatus};
use super::store::StoreError;
use crate::common::{OrderId, ReviewId};

/// Errors returned by the review actions.
///
/// Each business rule has its own variant so the HTTP layer can map it to a
/// distinct status code; every persistence failure collapses into `DbFailed`.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("{0}")]
    DbFailed(String),

    #[error("review not found")]
    NotFound,

    #[error("order {0} has already been reviewed")]
    OrderAlreadyReviewed(OrderId),

    #[error("review {0} has already been replied to")]
    AlreadyReplied(ReviewId),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("cannot {action} a review that is {from}")]
    InvalidTransition {
        from: ReviewStatus,
        action: ReviewAction,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ReviewError {
    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            ReviewError::DbFailed(_) => "DB_FAILED",
            ReviewError::NotFound => "NOT_FOUND",
            ReviewError::OrderAlreadyReviewed(_) => "ORDER_ALREADY_REVIEWED",
            ReviewError::AlreadyReplied(_) => "ALREADY_REPLIED",
            ReviewError::PermissionDenied(_) => "PERMISSION_DENIED",
            ReviewError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ReviewError::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }

    /// Map a store error that has no business meaning at this call site.
    ///
    /// `NotFound` keeps its kind; anything else is logged and reported as
    /// `DbFailed` with the given user-facing message.
    pub fn from_store(err: StoreError, message: &str) -> Self {
        match err {
            StoreError::NotFound => ReviewError::NotFound,
            other => {
                error!(error = %other, "{}", message);
                ReviewError::DbFailed(message.to_string())
            }
        }
    }
}
