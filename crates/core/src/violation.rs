//! Client-side rule violations raised before any network call

use dealerdesk_domain::constants::{
    MAX_ACTIVE_REMARKS, MSG_CANCEL_NOT_PERMITTED, MSG_CANCEL_REASON_REQUIRED, MSG_ENTITY_LOCKED,
    MSG_LOST_REASON_REQUIRED, MSG_REMARKS_CLOSED, MSG_REMARK_ALREADY_CANCELLED, MSG_REMARK_EMPTY,
    MSG_REMARK_LIMIT_REACHED,
};
use dealerdesk_domain::CrmError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{}", MSG_REMARK_LIMIT_REACHED)]
    RemarkLimitReached { max: usize },

    #[error("{}", MSG_REMARK_EMPTY)]
    EmptyRemark,

    #[error("{}", MSG_CANCEL_REASON_REQUIRED)]
    CancellationReasonRequired,

    #[error("{}", MSG_LOST_REASON_REQUIRED)]
    LostReasonRequired,

    #[error("{}", MSG_REMARK_ALREADY_CANCELLED)]
    AlreadyCancelled,

    #[error("{}", MSG_CANCEL_NOT_PERMITTED)]
    NotPermitted,

    /// Mutations are disabled; remarks may still be accepted
    #[error("{}", MSG_ENTITY_LOCKED)]
    EntityLocked,

    /// Remarks are disabled as well
    #[error("{}", MSG_REMARKS_CLOSED)]
    RemarksClosed,
}

impl RuleViolation {
    pub const fn remark_limit() -> Self {
        Self::RemarkLimitReached { max: MAX_ACTIVE_REMARKS }
    }
}

impl From<RuleViolation> for CrmError {
    fn from(value: RuleViolation) -> Self {
        match value {
            RuleViolation::NotPermitted => Self::PermissionDenied(value.to_string()),
            other => Self::Precondition(other.to_string()),
        }
    }
}
