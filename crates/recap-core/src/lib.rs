//! # recap-core
//!
//! Core types, configuration, and utilities for Recap.
//!
//! This crate provides shared functionality used across all Recap crates:
//!
//! - **Configuration**: Loading, validation, and management of the config file
//! - **Types**: Meeting records, analysis results, and integration plans
//! - **Utilities**: Path resolution for data and config locations

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
