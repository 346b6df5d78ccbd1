//! # DealerDesk Infrastructure
//!
//! Network access layer for the DealerDesk CRM client.
//!
//! This crate contains:
//! - Single-attempt HTTP transport ([`http::HttpClient`])
//! - Envelope decoding and the 401 refresh-and-replay policy
//!   ([`api::ApiClient`])
//! - Typed clients for each backend resource
//! - Identity provider token client and local session stores
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements the ports defined in `dealerdesk-core`
//! - Everything that touches the network, the file system or the keychain
//!   lives here

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiRequest, Payload};
pub use http::HttpClient;
pub use observability::init_tracing;
pub use session::{build_session_store, AnonymousSessions, FirebaseTokenProvider};
