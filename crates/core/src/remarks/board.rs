//! In-memory remark list backing the detail screens
//!
//! Display state only. The backend holds the full history and is the
//! source of truth.

use dealerdesk_domain::constants::RECENT_REMARKS_WINDOW;
use dealerdesk_domain::Remark;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemarkBoard {
    remarks: Vec<Remark>,
}

impl RemarkBoard {
    pub fn new(mut remarks: Vec<Remark>) -> Self {
        sort_newest_first(&mut remarks);
        Self { remarks }
    }

    pub fn all(&self) -> &[Remark] {
        &self.remarks
    }

    pub fn find(&self, id: &str) -> Option<&Remark> {
        self.remarks.iter().find(|r| r.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.remarks.iter().filter(|r| r.is_active()).count()
    }

    /// Active remarks, newest first
    pub fn active(&self) -> impl Iterator<Item = &Remark> {
        self.remarks.iter().filter(|r| r.is_active())
    }

    /// The newest `limit` active remarks
    pub fn recent(&self, limit: usize) -> Vec<&Remark> {
        self.active().take(limit).collect()
    }

    /// The "recent remarks" window shown on detail screens
    pub fn recent_window(&self) -> Vec<&Remark> {
        self.recent(RECENT_REMARKS_WINDOW)
    }

    /// Record a remark the server accepted
    pub fn apply_added(&mut self, remark: Remark) {
        self.remarks.retain(|r| r.id != remark.id);
        self.remarks.insert(0, remark);
        sort_newest_first(&mut self.remarks);
    }

    /// Record a cancellation the server accepted.
    ///
    /// Only the cancellation fields are taken from `updated`. Cancellation
    /// is terminal: an already-cancelled entry keeps its original reason.
    /// Returns `false` if the id is unknown.
    pub fn apply_cancelled(&mut self, updated: &Remark) -> bool {
        match self.remarks.iter_mut().find(|r| r.id == updated.id) {
            Some(existing) if existing.cancelled => true,
            Some(existing) => {
                existing.cancelled = true;
                existing.cancellation_reason.clone_from(&updated.cancellation_reason);
                existing.cancelled_at = updated.cancelled_at;
                true
            }
            None => false,
        }
    }
}

fn sort_newest_first(remarks: &mut [Remark]) {
    remarks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
