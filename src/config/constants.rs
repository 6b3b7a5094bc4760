//! Configuration constants.
//!
//! Defaults for the command-line options plus fixed protocol parameters.

/// DNS server port, used for zone transfers and configured nameservers
pub const DNS_PORT: u16 = 53;

/// DNS query timeout in seconds
/// Most queries complete in well under a second; 3s fails fast on dead servers
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Default number of neighbors on each side of a discovered address
pub const DEFAULT_TRAVERSE: u32 = 5;

/// Port probed by the HTTP HEAD request
pub const HTTP_PORT: u16 = 80;

/// HTTP probe timeout in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 3;

/// Range of the random numeric label used to detect wildcard records.
/// Every value has exactly 11 digits.
pub const WILDCARD_LABEL_RANGE: std::ops::Range<u64> = 10_000_000_000..100_000_000_000;

/// Maximum width of a mapping printed on a single line
pub const REPORT_LINE_WIDTH: usize = 80;
