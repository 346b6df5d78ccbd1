//! Session access ports

pub mod ports;
