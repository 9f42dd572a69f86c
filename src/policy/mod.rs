//! Caller-side license policy.

pub mod access;
