//! License record model and artifact framing.

pub mod envelope;
pub mod models;
