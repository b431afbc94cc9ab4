//! HTTP mapping for review errors.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domains::reviews::errors::ReviewError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

pub fn status_for(err: &ReviewError) -> StatusCode {
    match err {
        ReviewError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        ReviewError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        ReviewError::NotFound => StatusCode::NOT_FOUND,
        ReviewError::OrderAlreadyReviewed(_)
        | ReviewError::AlreadyReplied(_)
        | ReviewError::InvalidTransition { .. } => StatusCode::CONFLICT,
        ReviewError::DbFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let body = ErrorBody {
            code: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Unwrap a JSON body, reporting malformed input as `InvalidArgument`
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ReviewError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ReviewError::InvalidArgument(rejection.body_text()))
}

/// Unwrap path parameters, reporting unparsable segments as `InvalidArgument`
pub fn path_param<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ReviewError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ReviewError::InvalidArgument(rejection.body_text()))
}

/// Unwrap query arguments, reporting malformed ones as `InvalidArgument`
pub fn query_args<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ReviewError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ReviewError::InvalidArgument(rejection.body_text()))
}
