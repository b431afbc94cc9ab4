use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status, stored as SMALLINT.
///
/// Legal transitions:
///
/// ```text
/// Pending  --audit-->        Approved | Rejected
/// Approved --appeal-->       Appealed
/// Rejected --appeal-->       Appealed
/// Appealed --audit_appeal--> Approved | Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum ReviewStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
    Appealed = 3,
}

impl ReviewStatus {
    /// Wire/database code for this status.
    pub fn code(self) -> i16 {
        self as i16
    }

    /// Interpret an operator decision code. Only Approved (1) and
    /// Rejected (2) are decisions.
    pub fn decision_from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ReviewStatus::Approved),
            2 => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_decision(self) -> bool {
        matches!(self, ReviewStatus::Approved | ReviewStatus::Rejected)
    }

    /// Whether `action` may be applied to a review in this status.
    pub fn allows(self, action: ReviewAction) -> bool {
        action.allowed_from().contains(&self)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Rejected => write!(f, "rejected"),
            ReviewStatus::Appealed => write!(f, "appealed"),
        }
    }
}

impl TryFrom<i16> for ReviewStatus {
    type Error = i16;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ReviewStatus::Pending),
            1 => Ok(ReviewStatus::Approved),
            2 => Ok(ReviewStatus::Rejected),
            3 => Ok(ReviewStatus::Appealed),
            other => Err(other),
        }
    }
}

/// Status-changing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Audit,
    Appeal,
    AuditAppeal,
}

impl ReviewAction {
    /// Statuses from which this action is legal.
    pub fn allowed_from(self) -> &'static [ReviewStatus] {
        match self {
            ReviewAction::Audit => &[ReviewStatus::Pending],
            ReviewAction::Appeal => &[ReviewStatus::Approved, ReviewStatus::Rejected],
            ReviewAction::AuditAppeal => &[ReviewStatus::Appealed],
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewAction::Audit => write!(f, "audit"),
            ReviewAction::Appeal => write!(f, "appeal"),
            ReviewAction::AuditAppeal => write!(f, "audit the appeal of"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_only_from_pending() {
        assert!(ReviewStatus::Pending.allows(ReviewAction::Audit));
        assert!(!ReviewStatus::Approved.allows(ReviewAction::Audit));
        assert!(!ReviewStatus::Rejected.allows(ReviewAction::Audit));
        assert!(!ReviewStatus::Appealed.allows(ReviewAction::Audit));
    }

    #[test]
    fn test_appeal_only_after_decision() {
        assert!(!ReviewStatus::Pending.allows(ReviewAction::Appeal));
        assert!(ReviewStatus::Approved.allows(ReviewAction::Appeal));
        assert!(ReviewStatus::Rejected.allows(ReviewAction::Appeal));
        assert!(!ReviewStatus::Appealed.allows(ReviewAction::Appeal));
    }

    #[test]
    fn test_audit_appeal_only_from_appealed() {
        assert!(ReviewStatus::Appealed.allows(ReviewAction::AuditAppeal));
        assert!(!ReviewStatus::Pending.allows(ReviewAction::AuditAppeal));
        assert!(!ReviewStatus::Approved.allows(ReviewAction::AuditAppeal));
    }

    #[test]
    fn test_decision_codes() {
        assert_eq!(ReviewStatus::decision_from_code(1), Some(ReviewStatus::Approved));
        assert_eq!(ReviewStatus::decision_from_code(2), Some(ReviewStatus::Rejected));
        assert_eq!(ReviewStatus::decision_from_code(0), None);
        assert_eq!(ReviewStatus::decision_from_code(3), None);
    }

    #[test]
    fn test_code_roundtrip() {
        for status in [
            ReviewStatus::Pending,
            ReviewStatus::Approved,
            ReviewStatus::Rejected,
            ReviewStatus::Appealed,
        ] {
            assert_eq!(ReviewStatus::try_from(status.code()), Ok(status));
        }
        assert_eq!(ReviewStatus::try_from(9), Err(9));
    }
}
