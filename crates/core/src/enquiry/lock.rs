//! Lock gate for enquiries and bookings
//!
//! The client uses this to hide or disable affordances. The backend
//! enforces the same lock independently.

use dealerdesk_domain::{Booking, BookingStatus, Enquiry, EnquiryCategory, EnquiryStatus};
use serde::{Deserialize, Serialize};

use crate::violation::RuleViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Every action is available
    Open,
    /// Field and category changes are disabled; remarks are still accepted
    Locked,
    /// Nothing is accepted, remarks included
    Closed,
}

impl LockState {
    /// Enquiries close with status CLOSED and lock once categorised
    /// BOOKED or LOST
    pub fn for_enquiry_parts(category: EnquiryCategory, status: EnquiryStatus) -> Self {
        if status == EnquiryStatus::Closed {
            Self::Closed
        } else if category.is_terminal() {
            Self::Locked
        } else {
            Self::Open
        }
    }

    pub fn for_enquiry(enquiry: &Enquiry) -> Self {
        Self::for_enquiry_parts(enquiry.category, enquiry.status)
    }

    pub fn for_booking_status(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Closed => Self::Closed,
            BookingStatus::Delivered | BookingStatus::Cancelled => Self::Locked,
            BookingStatus::Pending
            | BookingStatus::Assigned
            | BookingStatus::InProgress
            | BookingStatus::Confirmed => Self::Open,
        }
    }

    pub fn for_booking(booking: &Booking) -> Self {
        Self::for_booking_status(booking.status)
    }

    pub fn allows_mutation(self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn allows_remarks(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Gate for field/category changes
    pub fn ensure_mutable(self) -> Result<(), RuleViolation> {
        if self.allows_mutation() {
            Ok(())
        } else {
            Err(RuleViolation::EntityLocked)
        }
    }

    /// Gate for adding remarks
    pub fn ensure_accepts_remarks(self) -> Result<(), RuleViolation> {
        if self.allows_remarks() {
            Ok(())
        } else {
            Err(RuleViolation::RemarksClosed)
        }
    }
}
