//! Small runtime helpers

pub mod debounce;
