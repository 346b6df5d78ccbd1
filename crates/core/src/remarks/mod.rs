//! Remark consistency rules
//!
//! Remarks are free-text notes on enquiries and bookings. The rules here
//! mirror the backend's own checks so that doomed requests are never sent:
//!
//! - at most [`MAX_ACTIVE_REMARKS`] active remarks per parent
//! - empty text is rejected
//! - cancellation needs a reason and is terminal
//! - authors may cancel their own remarks; elevated roles may cancel any
//!
//! [`MAX_ACTIVE_REMARKS`]: dealerdesk_domain::constants::MAX_ACTIVE_REMARKS

pub mod board;
pub mod ports;
pub mod rules;
pub mod service;

pub use board::RemarkBoard;
pub use rules::{can_cancel, remark_add_allowed, validate_cancellation, validate_new_remark};
pub use service::{RemarkService, RemarkTarget};
