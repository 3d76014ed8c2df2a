//! # Core Runtime Module
//!
//! Provides the runtime infrastructure the façade depends on:
//! - Logging and tracing infrastructure
//! - The process-wide diagnostic sink and its backend binder
//! - Configuration management
//!
//! ## Overview
//!
//! This crate establishes the logging conventions and configuration builder
//! used by `core-service`. The diagnostic sink is the channel the core uses
//! for its own messages; by default it writes into `tracing`, and hosts can
//! swap in any [`DiagnosticBackend`](bridge_traits::DiagnosticBackend).

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
