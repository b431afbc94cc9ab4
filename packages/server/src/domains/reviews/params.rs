//! Inputs accepted by the review actions.

use serde::{Deserialize, Serialize};

use crate::common::{OrderId, ReviewId, StoreId, UserId};

/// Lowest accepted score.
pub const MIN_SCORE: i16 = 1;
/// Highest accepted score.
pub const MAX_SCORE: i16 = 5;

/// A user's review of a completed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub user_id: UserId,
    pub order_id: OrderId,
    /// Merchant that fulfilled the order (owner of any reply)
    pub store_id: StoreId,
    pub score: i16,
    pub service_score: i16,
    pub express_score: i16,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pic_info: String,
    #[serde(default)]
    pub video_info: String,
    #[serde(default)]
    pub anonymous: bool,
}

impl NewReview {
    /// Check that every score lies in `MIN_SCORE..=MAX_SCORE`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("score", self.score),
            ("service_score", self.service_score),
            ("express_score", self.express_score),
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(format!(
                    "{} must be between {} and {}, got {}",
                    name, MIN_SCORE, MAX_SCORE, value
                ));
            }
        }
        Ok(())
    }
}

/// A merchant's reply to a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyParam {
    pub review_id: ReviewId,
    pub store_id: StoreId,
    pub content: String,
    #[serde(default)]
    pub pic_info: String,
    #[serde(default)]
    pub video_info: String,
}

/// An operator's decision on a pending review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditParam {
    pub review_id: ReviewId,
    pub op_user: String,
    #[serde(default)]
    pub op_reason: String,
    #[serde(default)]
    pub op_remark: String,
    /// 1 = approved, 2 = rejected
    pub status: i32,
}

/// A merchant's appeal against an audit outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppealParam {
    pub review_id: ReviewId,
    pub store_id: StoreId,
    pub reason: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pic_info: String,
    #[serde(default)]
    pub video_info: String,
}

/// An operator's decision on a filed appeal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditAppealParam {
    pub review_id: ReviewId,
    pub op_user: String,
    #[serde(default)]
    pub op_reason: String,
    #[serde(default)]
    pub op_remark: String,
    /// 1 = approved, 2 = rejected
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(score: i16, service_score: i16, express_score: i16) -> NewReview {
        NewReview {
            user_id: UserId::from_raw(1),
            order_id: OrderId::from_raw(100),
            store_id: StoreId::from_raw(10),
            score,
            service_score,
            express_score,
            content: String::new(),
            pic_info: String::new(),
            video_info: String::new(),
            anonymous: false,
        }
    }

    #[test]
    fn test_scores_in_range_are_valid() {
        assert!(review(1, 3, 5).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_score_names_field() {
        let err = review(5, 0, 5).validate().unwrap_err();
        assert!(err.contains("service_score"));

        let err = review(5, 5, 6).validate().unwrap_err();
        assert!(err.contains("express_score"));
    }
}
