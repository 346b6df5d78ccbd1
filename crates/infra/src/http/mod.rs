//! HTTP transport shared by every API client

pub mod client;

pub use client::{default_accepts, HttpClient, HttpClientBuilder, StatusPredicate};
