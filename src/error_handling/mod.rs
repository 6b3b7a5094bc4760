//! Error handling and scan statistics.
//!
//! This module provides:
//! - Error type definitions for every layer (names, queries, transfers, setup)
//! - Failure classifications that decide what the engine absorbs
//! - Scan statistics tracking
//!
//! Only target-server conditions (NXDOMAIN, timeouts, refused transfers, ...)
//! are absorbed. Caller and configuration errors always propagate.

mod stats;
mod types;

// Re-export public API
pub use stats::ScanStats;
pub use types::{
    DomainNameError, InitializationError, QueryError, QueryFailure, ScanEvent, TransferError,
    TransferFailure, WordlistError,
};
