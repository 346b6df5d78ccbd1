//! Enquiry lifecycle rules
//!
//! - [`lock`]: which mutations an enquiry or booking still accepts
//! - [`category`]: the HOT/LOST/BOOKED transition gate
//! - [`service`]: applies the gate before calling the backend

pub mod category;
pub mod lock;
pub mod ports;
pub mod service;

pub use category::CategoryChange;
pub use lock::LockState;
pub use service::EnquiryService;
