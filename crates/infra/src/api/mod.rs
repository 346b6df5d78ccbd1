//! Backend API access for DealerDesk
//!
//! # Architecture
//!
//! - [`HttpClient`](crate::http::HttpClient) sends; [`ApiClient`] owns the
//!   envelope, error normalization and the 401 refresh-and-replay
//! - The bearer token comes from an injected
//!   [`SessionProvider`](dealerdesk_core::SessionProvider)
//! - One resource client per backend collection in [`resources`]
//!
//! # Compliance
//!
//! - Structured tracing only (no println!)
//! - Timeout on all external calls
//! - No automatic retry on network failure

pub mod client;
pub mod envelope;
pub mod errors;
pub mod resources;
pub mod retry;

pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig, ApiRequest, Payload, UploadFile};
pub use envelope::{normalize_payload, Envelope};
pub use errors::{derive_message, fallback_message, ApiError, ApiErrorCategory};
pub use resources::{
    BookingsClient, CatalogClient, DashboardClient, DealershipsClient, EnquiriesClient,
    FilesClient, QuotationsClient, RemarksClient, StockClient, UsersClient,
};
pub use retry::{Attempt, AuthRetryPolicy, RetryDecision};
