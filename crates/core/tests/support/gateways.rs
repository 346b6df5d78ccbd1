//! Fake gateway and session provider implementations

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dealerdesk_core::{EnquiryGateway, RemarkGateway, SessionProvider};
use dealerdesk_domain::{
    CrmError, Enquiry, Remark, RemarkAuthor, RemarkType, Result as DomainResult, Role, Session,
    UpdateEnquiryRequest,
};

/// Session provider holding a fixed session
pub struct FixedSession {
    session: Option<Session>,
}

impl FixedSession {
    pub fn signed_in(user_id: &str, role: Role) -> Self {
        Self {
            session: Some(Session {
                bearer_token: format!("token-{user_id}"),
                user_id: user_id.to_string(),
                role,
            }),
        }
    }

    pub fn signed_out() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl SessionProvider for FixedSession {
    async fn current_session(&self) -> Option<Session> {
        self.session.clone()
    }

    async fn access_token(&self) -> DomainResult<Option<String>> {
        Ok(self.session.as_ref().map(|s| s.bearer_token.clone()))
    }

    async fn force_refresh(&self) -> DomainResult<String> {
        self.session
            .as_ref()
            .map(|s| s.bearer_token.clone())
            .ok_or_else(|| CrmError::SessionExpired("no session".into()))
    }

    async fn clear_session(&self) -> DomainResult<()> {
        Ok(())
    }
}

/// In-memory remark backend that counts calls
pub struct FakeRemarkGateway {
    author: RemarkAuthor,
    next_id: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub cancel_calls: AtomicUsize,
    silent_cancel: AtomicBool,
    cancel_error: Mutex<Option<CrmError>>,
    add_error: Mutex<Option<CrmError>>,
}

impl FakeRemarkGateway {
    pub fn new(author_id: &str, role: Role) -> Self {
        Self {
            author: RemarkAuthor { id: author_id.to_string(), name: "Current User".into(), role },
            next_id: AtomicUsize::new(1),
            add_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
            silent_cancel: AtomicBool::new(false),
            cancel_error: Mutex::new(None),
            add_error: Mutex::new(None),
        }
    }

    pub fn fail_next_cancel(&self, err: CrmError) {
        *self.cancel_error.lock().unwrap() = Some(err);
    }

    /// Confirm cancellations with an envelope that carries no `data`
    pub fn confirm_cancel_without_body(&self) {
        self.silent_cancel.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_add(&self, err: CrmError) {
        *self.add_error.lock().unwrap() = Some(err);
    }

    pub fn adds(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn cancels(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemarkGateway for FakeRemarkGateway {
    async fn add_remark(
        &self,
        parent: RemarkType,
        _parent_id: &str,
        text: &str,
    ) -> DomainResult<Remark> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.add_error.lock().unwrap().take() {
            return Err(err);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(Remark {
            id: format!("R{id}"),
            remark: text.to_string(),
            remark_type: parent,
            created_at: Utc::now(),
            created_by: self.author.clone(),
            cancelled: false,
            cancellation_reason: None,
            cancelled_at: None,
        })
    }

    async fn cancel_remark(&self, remark_id: &str, reason: &str) -> DomainResult<Option<Remark>> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.cancel_error.lock().unwrap().take() {
            return Err(err);
        }
        if self.silent_cancel.load(Ordering::SeqCst) {
            return Ok(None);
        }

        // Mirrors a backend that only echoes the id and flag.
        let _ = reason;
        Ok(Some(Remark {
            id: remark_id.to_string(),
            remark: String::new(),
            remark_type: RemarkType::Enquiry,
            created_at: Utc::now(),
            created_by: self.author.clone(),
            cancelled: true,
            cancellation_reason: None,
            cancelled_at: None,
        }))
    }
}

/// Enquiry backend that applies updates to a stored copy
pub struct FakeEnquiryGateway {
    stored: Mutex<Enquiry>,
    pub calls: AtomicUsize,
}

impl FakeEnquiryGateway {
    pub fn new(enquiry: Enquiry) -> Self {
        Self { stored: Mutex::new(enquiry), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnquiryGateway for FakeEnquiryGateway {
    async fn update_enquiry(
        &self,
        _id: &str,
        update: &UpdateEnquiryRequest,
    ) -> DomainResult<Enquiry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut stored = self.stored.lock().unwrap();
        if let Some(category) = update.category {
            stored.category = category;
        }
        if update.lost_reason.is_some() {
            stored.lost_reason = update.lost_reason.clone();
        }
        Ok(stored.clone())
    }
}
