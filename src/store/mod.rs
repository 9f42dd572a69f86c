//! Key and artifact persistence.

pub mod file;
