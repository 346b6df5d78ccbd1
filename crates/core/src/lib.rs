//! # DealerDesk Core
//!
//! Business rules for the CRM client - no HTTP, no storage.
//!
//! This crate contains:
//! - Remark consistency rules (ownership, role elevation, count cap,
//!   mandatory cancellation reason)
//! - Enquiry/booking lock gate and the category transition gate
//! - Port interfaces (traits) for sessions and the remote API
//! - Services that enforce the rules before calling a port
//!
//! ## Architecture Principles
//! - Only depends on `dealerdesk-domain`
//! - All external dependencies via traits
//! - Rules are plain functions so the UI can evaluate them without a
//!   service instance

pub mod enquiry;
pub mod remarks;
pub mod session;
pub mod utils;
pub mod violation;

// Re-export specific items to avoid ambiguity
pub use enquiry::ports::EnquiryGateway;
pub use enquiry::{CategoryChange, EnquiryService, LockState};
pub use remarks::ports::RemarkGateway;
pub use remarks::{RemarkBoard, RemarkService, RemarkTarget};
pub use session::ports::{SessionProvider, SessionStore};
pub use utils::debounce::Debouncer;
pub use violation::RuleViolation;
