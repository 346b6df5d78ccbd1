//! Error conversions at the infrastructure boundary

pub mod conversions;

pub use conversions::{io_error, json_error, keyring_error};
