//! Pure remark rule checks

use dealerdesk_domain::constants::MAX_ACTIVE_REMARKS;
use dealerdesk_domain::{Remark, Session};

use crate::enquiry::LockState;
use crate::violation::RuleViolation;

/// Whether `actor` may cancel `remark`.
///
/// Decides if the cancel action is shown at all. The server remains the
/// authority and may still refuse.
pub fn can_cancel(remark: &Remark, actor: &Session) -> bool {
    remark.is_active() && (remark.created_by.id == actor.user_id || actor.role.is_elevated())
}

/// Whether a parent in `lock` with `active_count` remarks accepts another
pub fn remark_add_allowed(lock: LockState, active_count: usize) -> bool {
    lock.allows_remarks() && active_count < MAX_ACTIVE_REMARKS
}

/// Validate a new remark; returns the trimmed text to send.
///
/// The count cap is checked first so a full parent reports the limit even
/// when the text is also empty.
pub fn validate_new_remark(active_count: usize, text: &str) -> Result<String, RuleViolation> {
    if active_count >= MAX_ACTIVE_REMARKS {
        return Err(RuleViolation::remark_limit());
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RuleViolation::EmptyRemark);
    }

    Ok(trimmed.to_string())
}

/// Validate a cancellation; returns the trimmed reason to send
pub fn validate_cancellation(
    remark: &Remark,
    actor: &Session,
    reason: &str,
) -> Result<String, RuleViolation> {
    if !remark.is_active() {
        return Err(RuleViolation::AlreadyCancelled);
    }

    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(RuleViolation::CancellationReasonRequired);
    }

    if !can_cancel(remark, actor) {
        return Err(RuleViolation::NotPermitted);
    }

    Ok(trimmed.to_string())
}
