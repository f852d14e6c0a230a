//! Core types, configuration, and error handling for devstats.
//!
//! This crate provides the shared foundation used by the other devstats crates:
//! - [`DevstatsError`]: unified error type using `thiserror`
//! - [`DevstatsConfig`]: configuration loaded from `.devstats.toml`

mod config;
mod error;

pub use config::{AnalysisConfig, DevstatsConfig, InputConfig};
pub use error::DevstatsError;

/// A convenience `Result` type for devstats operations.
pub type Result<T> = std::result::Result<T, DevstatsError>;
