//! CLI library components for the REdI seed generator.

pub mod config;
pub mod logging;
