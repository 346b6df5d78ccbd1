//! Remark add/cancel with the consistency rules applied

use std::sync::Arc;

use chrono::Utc;
use dealerdesk_domain::constants::{MSG_CANCEL_NOT_PERMITTED, MSG_SESSION_EXPIRED};
use dealerdesk_domain::{Booking, CrmError, Enquiry, Remark, RemarkType, Result, Session};
use tracing::{debug, info, instrument, warn};

use super::board::RemarkBoard;
use super::ports::RemarkGateway;
use super::rules::{can_cancel, validate_cancellation, validate_new_remark};
use crate::enquiry::LockState;
use crate::session::ports::SessionProvider;
use crate::violation::RuleViolation;

/// The parent a remark is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemarkTarget {
    pub kind: RemarkType,
    pub id: String,
    pub lock: LockState,
}

impl RemarkTarget {
    pub fn enquiry(enquiry: &Enquiry) -> Self {
        Self {
            kind: RemarkType::Enquiry,
            id: enquiry.id.clone(),
            lock: LockState::for_enquiry(enquiry),
        }
    }

    pub fn booking(booking: &Booking) -> Self {
        Self {
            kind: RemarkType::Booking,
            id: booking.id.clone(),
            lock: LockState::for_booking(booking),
        }
    }
}

pub struct RemarkService {
    gateway: Arc<dyn RemarkGateway>,
    sessions: Arc<dyn SessionProvider>,
}

impl RemarkService {
    pub fn new(gateway: Arc<dyn RemarkGateway>, sessions: Arc<dyn SessionProvider>) -> Self {
        Self { gateway, sessions }
    }

    pub async fn add_enquiry_remark(
        &self,
        enquiry: &Enquiry,
        board: &mut RemarkBoard,
        text: &str,
    ) -> Result<Remark> {
        self.add_remark(&RemarkTarget::enquiry(enquiry), board, text).await
    }

    pub async fn add_booking_remark(
        &self,
        booking: &Booking,
        board: &mut RemarkBoard,
        text: &str,
    ) -> Result<Remark> {
        self.add_remark(&RemarkTarget::booking(booking), board, text).await
    }

    /// Add a remark to `target` and record it on `board`.
    ///
    /// Closed parents, a full board and empty text are rejected without a
    /// network call. A server-side limit rejection is reported with the same
    /// message as the local one.
    #[instrument(skip(self, board, text), fields(kind = %target.kind, parent_id = %target.id))]
    pub async fn add_remark(
        &self,
        target: &RemarkTarget,
        board: &mut RemarkBoard,
        text: &str,
    ) -> Result<Remark> {
        target.lock.ensure_accepts_remarks()?;
        let text = validate_new_remark(board.active_count(), text)?;

        let remark = self
            .gateway
            .add_remark(target.kind, &target.id, &text)
            .await
            .map_err(map_add_rejection)?;

        debug!(remark_id = %remark.id, "Remark added");
        board.apply_added(remark.clone());
        Ok(remark)
    }

    /// Whether the signed-in user should be offered the cancel action
    pub async fn can_cancel(&self, remark: &Remark) -> bool {
        match self.sessions.current_session().await {
            Some(session) => can_cancel(remark, &session),
            None => false,
        }
    }

    /// Cancel the remark `remark_id` shown on `board`.
    ///
    /// A 403 from the server is reported as
    /// [`CrmError::PermissionDenied`] even when the local check passed.
    #[instrument(skip(self, board, reason))]
    pub async fn cancel_remark(
        &self,
        board: &mut RemarkBoard,
        remark_id: &str,
        reason: &str,
    ) -> Result<Remark> {
        let session = self.require_session().await?;
        let remark = board
            .find(remark_id)
            .ok_or_else(|| CrmError::NotFound(format!("remark {remark_id}")))?;

        let reason = validate_cancellation(remark, &session, reason)?;
        let shown = remark.clone();

        let mut cancelled = match self.gateway.cancel_remark(remark_id, &reason).await {
            Ok(Some(remark)) => remark,
            Ok(None) => {
                debug!(%remark_id, "Cancel confirmed without a remark body");
                Remark { cancellation_reason: None, cancelled_at: None, ..shown }
            }
            Err(CrmError::PermissionDenied(message)) => {
                warn!(%remark_id, %message, "Server refused remark cancellation");
                return Err(CrmError::PermissionDenied(MSG_CANCEL_NOT_PERMITTED.to_string()));
            }
            Err(err) => return Err(err),
        };

        cancelled.cancelled = true;
        if cancelled.cancellation_reason.as_deref().map_or(true, str::is_empty) {
            cancelled.cancellation_reason = Some(reason);
        }
        if cancelled.cancelled_at.is_none() {
            cancelled.cancelled_at = Some(Utc::now());
        }

        board.apply_cancelled(&cancelled);
        info!(%remark_id, "Remark cancelled");
        Ok(board.find(remark_id).cloned().unwrap_or(cancelled))
    }

    async fn require_session(&self) -> Result<Session> {
        self.sessions
            .current_session()
            .await
            .ok_or_else(|| CrmError::SessionExpired(MSG_SESSION_EXPIRED.to_string()))
    }
}

/// Server-side limit rejections look like any other validation failure;
/// recognise them by message so the UI shows the same notice as locally.
fn map_add_rejection(err: CrmError) -> CrmError {
    match err {
        CrmError::Validation(message) if message.to_ascii_lowercase().contains("limit") => {
            debug!(%message, "Server rejected remark at limit");
            RuleViolation::remark_limit().into()
        }
        other => other,
    }
}
