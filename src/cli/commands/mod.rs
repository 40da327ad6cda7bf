//! CLI command implementations.

pub mod indicator;
pub mod metrics;
pub mod signal;
pub mod strategies;
pub mod validate;
