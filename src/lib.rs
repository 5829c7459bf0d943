//! REST wrapper for Free Fire game data.
//!
//! This library exposes player stats, account info, guild info, and
//! craftland profiles by proxying an upstream Free Fire data provider.
//! Requests carry a region code selecting which upstream server cluster
//! to query; responses are passed through as JSON, optionally trimmed
//! to a caller-selected field subset.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`region`]: Supported region codes and parsing
//! - [`upstream`]: Client for the upstream data provider
//! - [`api`]: HTTP API routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod region;
pub mod upstream;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result};
pub use region::Region;
