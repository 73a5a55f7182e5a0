//! Shared utilities for the finance workspace
//!
//! Logging setup and the small amount of process-level configuration that
//! every binary in the workspace needs.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{LogFormat, init_tracing_with};
