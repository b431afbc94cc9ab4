//! Review data types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::common::{OrderId, ReviewId, StoreId, UserId};
use crate::domains::reviews::actions::ReviewPage;
use crate::domains::reviews::models::Review;

/// API-friendly representation of a review
///
/// `user_id` is omitted for anonymous reviews. `status` is the numeric code
/// (0 pending, 1 approved, 2 rejected, 3 appealed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewData {
    pub review_id: ReviewId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub order_id: OrderId,
    pub store_id: StoreId,
    pub score: i16,
    pub service_score: i16,
    pub express_score: i16,
    pub content: String,
    pub pic_info: String,
    pub video_info: String,
    pub anonymous: bool,
    pub status: i16,
    pub has_reply: bool,
    pub op_user: Option<String>,
    pub op_reason: Option<String>,
    pub op_remarks: Option<String>,
    pub appeal_reason: Option<String>,
    pub appeal_content: Option<String>,
    pub appeal_pic_info: Option<String>,
    pub appeal_video_info: Option<String>,
    pub appeal_created_at: Option<String>,
    pub appeal_audited_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewData {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.review_id,
            user_id: (!review.anonymous).then_some(review.user_id),
            order_id: review.order_id,
            store_id: review.store_id,
            score: review.score,
            service_score: review.service_score,
            express_score: review.express_score,
            content: review.content,
            pic_info: review.pic_info,
            video_info: review.video_info,
            anonymous: review.anonymous,
            status: review.status.code(),
            has_reply: review.has_reply,
            op_user: review.op_user,
            op_reason: review.op_reason,
            op_remarks: review.op_remarks,
            appeal_reason: review.appeal_reason,
            appeal_content: review.appeal_content,
            appeal_pic_info: review.appeal_pic_info,
            appeal_video_info: review.appeal_video_info,
            appeal_created_at: review.appeal_created_at.map(|dt| dt.to_rfc3339()),
            appeal_audited_at: review.appeal_audited_at.map(|dt| dt.to_rfc3339()),
            created_at: review.created_at.to_rfc3339(),
            updated_at: review.updated_at.to_rfc3339(),
        }
    }
}

/// One page of a user's reviews plus the user's total review count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListData {
    pub data: Vec<ReviewData>,
    pub total: i64,
}

impl From<ReviewPage> for ReviewListData {
    fn from(page: ReviewPage) -> Self {
        Self {
            data: page.reviews.into_iter().map(ReviewData::from).collect(),
            total: page.total,
        }
    }
}
