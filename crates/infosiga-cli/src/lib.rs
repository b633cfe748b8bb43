//! CLI library components for the Infosiga SP pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
