//! Operator audit actions - decisions on reviews and on appeals

use tracing::info;

use super::transition::{apply_transition, operator_decision};
use crate::domains::reviews::errors::ReviewError;
use crate::domains::reviews::models::{Review, ReviewTransition};
use crate::domains::reviews::params::{AuditAppealParam, AuditParam};
use crate::kernel::ServerDeps;

/// Approve or reject a pending review.
///
/// Writes status, operator, reason and remarks only. Fails
/// `InvalidTransition` unless the review is still pending.
pub async fn audit_review(param: AuditParam, deps: &ServerDeps) -> Result<Review, ReviewError> {
    info!(
        review_id = %param.review_id,
        op_user = %param.op_user,
        status = param.status,
        "Auditing review"
    );

    let decision = operator_decision(param.status, param.op_user, param.op_reason, param.op_remark)?;
    apply_transition(param.review_id, ReviewTransition::Audit(decision), deps).await
}

/// Approve or reject a filed appeal.
///
/// Fails `InvalidTransition` unless the review is currently appealed.
pub async fn audit_appeal(param: AuditAppealParam, deps: &ServerDeps) -> Result<Review, ReviewError> {
    info!(
        review_id = %param.review_id,
        op_user = %param.op_user,
        status = param.status,
        "Auditing appeal"
    );

    let decision = operator_decision(param.status, param.op_user, param.op_reason, param.op_remark)?;
    apply_transition(param.review_id, ReviewTransition::AuditAppeal(decision), deps).await
}
