//! Application constants
//!
//! Centralized location for domain-level limits and defaults.

/// Maximum number of active (non-cancelled) remarks per enquiry or booking
pub const MAX_ACTIVE_REMARKS: usize = 20;

/// Size of the "recent remarks" display window
pub const RECENT_REMARKS_WINDOW: usize = 5;

/// Default request timeout for the backend API
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Timeout used by the unauthenticated health probe
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Tokens closer than this to expiry are refreshed before use
pub const TOKEN_REFRESH_SKEW_SECS: i64 = 60;

// User-facing messages for client-side precondition failures
pub const MSG_REMARK_LIMIT_REACHED: &str =
    "Remark limit reached. A maximum of 20 active remarks is allowed.";
pub const MSG_REMARK_EMPTY: &str = "Remark text cannot be empty.";
pub const MSG_CANCEL_REASON_REQUIRED: &str = "Please provide a reason for cancellation.";
pub const MSG_LOST_REASON_REQUIRED: &str = "Please provide a reason for marking the enquiry as lost.";
pub const MSG_ENTITY_LOCKED: &str = "This record is locked and can no longer be modified.";
pub const MSG_REMARKS_CLOSED: &str = "Remarks can no longer be added to this record.";
pub const MSG_CANCEL_NOT_PERMITTED: &str = "You do not have permission to cancel this remark.";
pub const MSG_REMARK_ALREADY_CANCELLED: &str = "This remark has already been cancelled.";

// User-facing messages for transport failures
pub const MSG_NETWORK_ERROR: &str =
    "Network error. Please check your internet connection and try again.";
pub const MSG_SESSION_EXPIRED: &str = "Session expired. Please log in again.";
