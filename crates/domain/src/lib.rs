//! # DealerDesk Domain
//!
//! Business domain types for the DealerDesk dealership CRM client.
//!
//! This crate contains:
//! - Entity shapes mirrored from the backend (enquiries, bookings,
//!   quotations, stock, remarks, dealerships, users)
//! - Request, filter and pagination types
//! - Session and role types
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other DealerDesk crates
//! - No I/O; pure data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
