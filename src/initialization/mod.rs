//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a scan:
//! - Logger (plain or JSON)
//! - DNS resolver (system or explicit nameservers, UDP or TCP)
//! - HTTP client for the connection probe
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::{init_resolver, resolver_options};
