//! Reply data types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::common::{ReplyId, ReviewId, StoreId};
use crate::domains::reviews::models::Reply;

/// API-friendly representation of a merchant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyData {
    pub reply_id: ReplyId,
    pub review_id: ReviewId,
    pub store_id: StoreId,
    pub content: String,
    pub pic_info: String,
    pub video_info: String,
    pub created_at: String,
}

impl From<Reply> for ReplyData {
    fn from(reply: Reply) -> Self {
        Self {
            reply_id: reply.reply_id,
            review_id: reply.review_id,
            store_id: reply.store_id,
            content: reply.content,
            pic_info: reply.pic_info,
            video_info: reply.video_info,
            created_at: reply.created_at.to_rfc3339(),
        }
    }
}
