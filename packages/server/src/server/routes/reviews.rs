//! Review endpoints.
//!
//! Handlers translate paths and JSON bodies into action params and render
//! results through the `data` types. Business rules stay in the actions.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{PageArgs, ReplyId, ReviewId, StoreId, UserId};
use crate::domains::reviews::actions;
use crate::domains::reviews::data::{ReplyData, ReviewData, ReviewListData};
use crate::domains::reviews::errors::ReviewError;
use crate::domains::reviews::params::{
    AppealParam, AuditAppealParam, AuditParam, NewReview, ReplyParam,
};
use crate::server::app::AppState;
use crate::server::error::{json_body, path_param, query_args};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReviewResponse {
    pub review_id: ReviewId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReplyRequest {
    pub store_id: StoreId,
    pub content: String,
    #[serde(default)]
    pub pic_info: String,
    #[serde(default)]
    pub video_info: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReplyResponse {
    pub reply_id: ReplyId,
}

/// Operator decision body, shared by review audits and appeal audits
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditRequest {
    pub op_user: String,
    #[serde(default)]
    pub op_reason: String,
    #[serde(default)]
    pub op_remark: String,
    /// 1 approves, 2 rejects
    pub status: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppealRequest {
    pub store_id: StoreId,
    pub reason: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pic_info: String,
    #[serde(default)]
    pub video_info: String,
}

/// POST /v1/reviews
pub async fn create_review_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReviewResponse>), ReviewError> {
    let input = json_body(payload)?;
    let review = actions::create_review(input, &state.deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            review_id: review.review_id,
        }),
    ))
}

/// GET /v1/reviews/:review_id
pub async fn get_review_handler(
    Extension(state): Extension<AppState>,
    review_id: Result<Path<ReviewId>, PathRejection>,
) -> Result<Json<ReviewData>, ReviewError> {
    let review_id = path_param(review_id)?;
    let review = actions::get_review(review_id, &state.deps).await?;
    Ok(Json(review.into()))
}

/// POST /v1/reviews/:review_id/reply
pub async fn create_reply_handler(
    Extension(state): Extension<AppState>,
    review_id: Result<Path<ReviewId>, PathRejection>,
    payload: Result<Json<CreateReplyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReplyResponse>), ReviewError> {
    let review_id = path_param(review_id)?;
    let body = json_body(payload)?;
    let param = ReplyParam {
        review_id,
        store_id: body.store_id,
        content: body.content,
        pic_info: body.pic_info,
        video_info: body.video_info,
    };
    let reply = actions::create_reply(param, &state.deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateReplyResponse {
            reply_id: reply.reply_id,
        }),
    ))
}

/// GET /v1/reviews/:review_id/reply
pub async fn get_reply_handler(
    Extension(state): Extension<AppState>,
    review_id: Result<Path<ReviewId>, PathRejection>,
) -> Result<Json<ReplyData>, ReviewError> {
    let review_id = path_param(review_id)?;
    let reply = actions::get_review_reply(review_id, &state.deps).await?;
    Ok(Json(reply.into()))
}

/// POST /v1/reviews/:review_id/audit
pub async fn audit_review_handler(
    Extension(state): Extension<AppState>,
    review_id: Result<Path<ReviewId>, PathRejection>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Result<Json<ReviewData>, ReviewError> {
    let review_id = path_param(review_id)?;
    let body = json_body(payload)?;
    let param = AuditParam {
        review_id,
        op_user: body.op_user,
        op_reason: body.op_reason,
        op_remark: body.op_remark,
        status: body.status,
    };
    let review = actions::audit_review(param, &state.deps).await?;
    Ok(Json(review.into()))
}

/// POST /v1/reviews/:review_id/appeal
pub async fn appeal_review_handler(
    Extension(state): Extension<AppState>,
    review_id: Result<Path<ReviewId>, PathRejection>,
    payload: Result<Json<AppealRequest>, JsonRejection>,
) -> Result<Json<ReviewData>, ReviewError> {
    let review_id = path_param(review_id)?;
    let body = json_body(payload)?;
    let param = AppealParam {
        review_id,
        store_id: body.store_id,
        reason: body.reason,
        content: body.content,
        pic_info: body.pic_info,
        video_info: body.video_info,
    };
    let review = actions::appeal_review(param, &state.deps).await?;
    Ok(Json(review.into()))
}

/// POST /v1/reviews/:review_id/appeal/audit
pub async fn audit_appeal_handler(
    Extension(state): Extension<AppState>,
    review_id: Result<Path<ReviewId>, PathRejection>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Result<Json<ReviewData>, ReviewError> {
    let review_id = path_param(review_id)?;
    let body = json_body(payload)?;
    let param = AuditAppealParam {
        review_id,
        op_user: body.op_user,
        op_reason: body.op_reason,
        op_remark: body.op_remark,
        status: body.status,
    };
    let review = actions::audit_appeal(param, &state.deps).await?;
    Ok(Json(review.into()))
}

/// GET /v1/users/:user_id/reviews?page_number=&page_size=
pub async fn list_user_reviews_handler(
    Extension(state): Extension<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
    page: Result<Query<PageArgs>, QueryRejection>,
) -> Result<Json<ReviewListData>, ReviewError> {
    let user_id = path_param(user_id)?;
    let page = query_args(page)?;
    let page = actions::list_reviews_by_user(user_id, page, &state.deps).await?;
    Ok(Json(page.into()))
}
